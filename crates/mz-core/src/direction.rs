//! The four cardinal movement intents.
//!
//! Player input arrives as a `Direction`; the engine converts it to a unit
//! `Vec2` and matches it exactly against node travel directions.

use crate::Vec2;

/// A cardinal direction of travel on the maze plane (y-up).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction.
    #[inline]
    pub fn as_vec(self) -> Vec2 {
        match self {
            Direction::Up    => Vec2::UP,
            Direction::Down  => Vec2::DOWN,
            Direction::Left  => Vec2::LEFT,
            Direction::Right => Vec2::RIGHT,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction whose unit vector equals `v` exactly, if any.
    pub fn from_vec(v: Vec2) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.as_vec() == v)
    }

    /// Human-readable label, useful for logs and scripted input files.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up"    => Ok(Direction::Up),
            "down"  => Ok(Direction::Down),
            "left"  => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other   => Err(crate::CoreError::Parse(format!(
                "invalid direction {other:?}: expected up, down, left, or right"
            ))),
        }
    }
}
