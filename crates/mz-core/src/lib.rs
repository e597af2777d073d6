//! `mz-core` — foundational types for the `mazerun` navigation engine.
//!
//! This crate is a dependency of every other `mz-*` crate.  It intentionally
//! has no `mz-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`                                   |
//! | [`geo`]         | `Vec2` — maze-plane coordinates and directions        |
//! | [`direction`]   | `Direction` — the four cardinal intents               |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `ArrivalBoundary`    |
//! | [`rng`]         | `AgentRng` (per-agent)                                |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::Vec2;
pub use ids::{AgentId, NodeId};
pub use rng::AgentRng;
pub use time::{ArrivalBoundary, SimClock, SimConfig, Tick};
