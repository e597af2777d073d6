//! Navigation-subsystem error type.
//!
//! Every variant is a construction error: a level whose graph fails to build
//! does not load.  Runtime queries ("no path", "no neighbour") never fail;
//! they return empty paths or `None`.

use thiserror::Error;

use mz_core::{NodeId, Vec2};

/// Errors produced by `mz-nav` while building or loading a graph.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("edge {from} → {to} has zero length")]
    ZeroLengthEdge { from: NodeId, to: NodeId },

    #[error("nodes {first} and {second} share the rounded position {pos}")]
    DuplicatePosition { first: NodeId, second: NodeId, pos: Vec2 },

    #[error("node {0} has a non-finite position")]
    NonFinitePosition(NodeId),

    #[error("node id {0} does not exist")]
    UnknownNode(u32),

    #[error("portal at {portal} points at node id {target}, which does not exist")]
    UnknownPortalTarget { portal: NodeId, target: u32 },

    #[error("portal at {0} points at itself")]
    PortalToSelf(NodeId),

    #[error("node {0} already has a portal destination")]
    DuplicatePortal(NodeId),

    #[error("node {0} has no neighbours and is not marked as a dead end")]
    NoNeighbors(NodeId),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NavResult<T> = Result<T, NavError>;
