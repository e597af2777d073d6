//! The `Steering` trait: who picks the next hop.

use mz_core::NodeId;
use mz_nav::{EdgeMatch, NavGraph, can_move};

use crate::MovementState;

/// Chooses the next node for an agent standing on `state.current`.
///
/// Called by [`MovementController::tick`][crate::MovementController::tick]
/// when the agent is idle and right after every arrival.  Returning `None`
/// leaves the agent idle at its node; it will be asked again next tick.
///
/// The returned node must be an out-neighbour of `state.current`.  Any other
/// node is ignored and the agent stays idle.
pub trait Steering {
    fn next_hop(&mut self, graph: &NavGraph, state: &MovementState) -> Option<NodeId>;
}

impl<S: Steering + ?Sized> Steering for &mut S {
    fn next_hop(&mut self, graph: &NavGraph, state: &MovementState) -> Option<NodeId> {
        (**self).next_hop(graph, state)
    }
}

/// Player steering: take the queued turn if the maze allows it, otherwise
/// keep going straight, otherwise stop.
///
/// Both lookups are exact; there is no cornering tolerance.  The controller
/// clears `pending` once the agent is dispatched in that direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSteering;

impl Steering for InputSteering {
    fn next_hop(&mut self, graph: &NavGraph, state: &MovementState) -> Option<NodeId> {
        let node = state.current?;
        state
            .pending
            .and_then(|dir| can_move(graph, node, dir.as_vec(), EdgeMatch::Exact))
            .or_else(|| can_move(graph, node, state.heading, EdgeMatch::Exact))
    }
}
