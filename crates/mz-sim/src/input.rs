//! Per-tick player intent sources for [`Sim::run`][crate::Sim::run].

use std::collections::BTreeMap;

use mz_core::{Direction, Tick};

/// Supplies the player's directional intent for each tick.
///
/// Interactive front-ends poll their input device here; tests and demos use
/// [`ScriptedInput`].  Any `FnMut(Tick) -> Option<Direction>` closure is an
/// `IntentSource` too.
pub trait IntentSource {
    fn intent(&mut self, tick: Tick) -> Option<Direction>;
}

impl<F: FnMut(Tick) -> Option<Direction>> IntentSource for F {
    fn intent(&mut self, tick: Tick) -> Option<Direction> {
        self(tick)
    }
}

/// A player who never presses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl IntentSource for NoInput {
    fn intent(&mut self, _tick: Tick) -> Option<Direction> {
        None
    }
}

/// A fixed schedule of key presses: at most one direction per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedInput {
    presses: BTreeMap<Tick, Direction>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `dir` on `tick`.  A later press on the same tick wins.
    pub fn at(mut self, tick: u64, dir: Direction) -> Self {
        self.presses.insert(Tick(tick), dir);
        self
    }

    pub fn len(&self) -> usize {
        self.presses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    /// The last scheduled tick, if any.
    pub fn last_tick(&self) -> Option<Tick> {
        self.presses.keys().next_back().copied()
    }
}

impl FromIterator<(Tick, Direction)> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = (Tick, Direction)>>(iter: I) -> Self {
        Self { presses: iter.into_iter().collect() }
    }
}

impl IntentSource for ScriptedInput {
    fn intent(&mut self, tick: Tick) -> Option<Direction> {
        self.presses.get(&tick).copied()
    }
}
