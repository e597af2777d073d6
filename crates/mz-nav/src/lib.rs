//! `mz-nav` — maze node graph, edge selection, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `NavGraph` (CSR + R-tree + cell index), `NavNode`, builder   |
//! | [`select`]  | `can_move` — exact / quadrant edge selection                 |
//! | [`router`]  | `Router` trait, `Path`, `DijkstraRouter`                     |
//! | [`loader`]  | `load_graph_csv`, `load_graph_reader`                        |
//! | [`error`]   | `NavError`, `NavResult<T>`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |
//!
//! The graph is built once per level and never mutated afterwards; every
//! agent borrows it read-only.

pub mod error;
pub mod loader;
pub mod network;
pub mod router;
pub mod select;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use loader::{load_graph_csv, load_graph_reader};
pub use network::{NavGraph, NavGraphBuilder, NavNode, NodeDescriptor};
pub use router::{DijkstraRouter, Path, Router};
pub use select::{EdgeMatch, can_move};
