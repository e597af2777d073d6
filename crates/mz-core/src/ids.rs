//! Typed identifiers for agents and maze nodes.
//!
//! Both are plain `u32` indices into per-level `Vec`s.  An absent node is
//! always `Option<NodeId>`; there is no sentinel value.

use std::fmt;

/// Declare an index newtype.  `Display` prints `prefix` followed by the
/// index (`n12`, `a0`), which keeps log lines short.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in a level.  The player is always `AgentId(0)`.
    pub struct AgentId(u32) = "a";
}

typed_id! {
    /// Index of a maze intersection node in its `NavGraph`.
    pub struct NodeId(u32) = "n";
}
