//! Bridges a [`PursuerPolicy`] to the movement controller.

use mz_core::{AgentRng, NodeId};
use mz_motion::{MovementState, Steering};
use mz_nav::{NavGraph, Router};

use crate::{PursuerPolicy, TargetView};

/// Everything a pursuer needs to pick a hop, borrowed for one tick.
pub struct PursuerSteering<'a, R: Router + ?Sized> {
    pub policy: PursuerPolicy,
    pub router: &'a R,
    pub target: &'a TargetView,
    pub rng:    &'a mut AgentRng,
}

impl<'a, R: Router + ?Sized> PursuerSteering<'a, R> {
    #[inline]
    pub fn new(
        policy: PursuerPolicy,
        router: &'a R,
        target: &'a TargetView,
        rng:    &'a mut AgentRng,
    ) -> Self {
        Self { policy, router, target, rng }
    }
}

impl<R: Router + ?Sized> Steering for PursuerSteering<'_, R> {
    fn next_hop(&mut self, graph: &NavGraph, state: &MovementState) -> Option<NodeId> {
        self.policy.choose(graph, self.router, state, self.target, self.rng)
    }
}
