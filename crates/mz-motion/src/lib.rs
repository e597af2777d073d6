//! `mz-motion` — continuous agent movement over a [`NavGraph`][mz_nav::NavGraph].
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`state`]      | `MovementState`, the `overshot` arrival test                    |
//! | [`steering`]   | `Steering` trait, `InputSteering` (player edge lookup)          |
//! | [`controller`] | `MovementController`: integrate, arrive, teleport, reverse      |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                                |
//!
//! # Movement model (continuous, snap-on-arrival)
//!
//! An agent is either **at a node** (`current = Some`, no target) or **in
//! transit** along one edge (`current = None`, `previous → target`).
//!
//! 1. Every tick an in-transit agent first checks whether it has moved past
//!    its target ("overshoot"): `|pos − prev|² > |target − prev|²`.
//! 2. If it has, it snaps onto the target (or onto the portal exit when the
//!    target is a portal) and asks its [`Steering`] for the next hop.
//! 3. Otherwise it advances `heading · speed · dt` along the edge.
//!
//! Arrival is therefore detected one tick *after* the agent reaches or
//! passes the node, and the leftover distance of that tick is discarded.
//! Who decides the next hop is the only difference between the player and a
//! pursuer: both run the same controller with a different `Steering`.

pub mod controller;
pub mod error;
pub mod state;
pub mod steering;


pub use controller::{Arrival, MovementController, TickOutcome};
pub use error::{MotionError, MotionResult};
pub use state::{MovementState, overshot};
pub use steering::{InputSteering, Steering};
