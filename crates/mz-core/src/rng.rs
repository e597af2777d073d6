//! Seeded randomness for pursuers.
//!
//! Every agent owns an [`AgentRng`] derived from the level seed and its own
//! `AgentId`, so a randomised pursuer makes the same choices on every run
//! with the same seed, regardless of how many other agents share the level
//! or in which order they are advanced.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Odd 64-bit multiplier (2^64 / golden ratio); consecutive ids land far
/// apart in seed space.
const ID_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's random stream.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(level_seed: u64, agent: AgentId) -> Self {
        let seed = level_seed ^ u64::from(agent.0).wrapping_mul(ID_SPREAD);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform pick from `options`; `None` when there is nothing to pick.
    #[inline]
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        options.choose(&mut self.0)
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
