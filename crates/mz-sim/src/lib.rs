//! `mz-sim` — tick loop for one maze level: a player and its pursuers.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Intent   — the player's directional request (if any) is applied:
//!                queued, reversed mid-edge, or dispatched from a node.
//!   ② Snapshot — the player is frozen into a TargetView.
//!   ③ Player   — MovementController::tick with InputSteering.
//!   ④ Pursuers — MovementController::tick with PursuerSteering, all reading
//!                the snapshot from ② (parallel with the `parallel` feature).
//!   ⑤ Report   — arrivals and per-agent snapshots, in AgentId order.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the pursuer phase on Rayon's thread pool.         |
//! | `serde`    | Serde derives on `AgentSpec`, snapshots, and inputs.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mz_core::{SimConfig, Vec2};
//! use mz_nav::DijkstraRouter;
//! use mz_pursuit::PursuerPolicy;
//! use mz_sim::{AgentSpec, NoInput, NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, graph, DijkstraRouter)
//!     .player(AgentSpec::new(Vec2::new(0.0, 0.0), 7.0))
//!     .pursuer(AgentSpec::new(Vec2::new(20.0, 10.0), 3.0), PursuerPolicy::GraphSearch)
//!     .build()?;
//! sim.run(&mut NoInput, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod input;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::{AgentSpec, SimBuilder};
pub use error::{SimError, SimResult};
pub use input::{IntentSource, NoInput, ScriptedInput};
pub use observer::{NoopObserver, SimObserver};
pub use report::{AgentSnapshot, TickReport};
pub use sim::{Pursuer, Sim};
