//! `mz-pursuit` — autonomous pursuer decision making.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`target`]   | `TargetView`: read-only snapshot of the agent being chased       |
//! | [`policy`]   | `PursuerPolicy` enum and its next-hop rules                      |
//! | [`steering`] | `PursuerSteering`: adapts a policy to `mz_motion::Steering`      |
//! | [`error`]    | `PursuitError`, `PursuitResult<T>`                               |
//!
//! # Design notes
//!
//! Pursuers decide only at nodes: once per arrival, and once per tick while
//! idle.  Every decision reads the graph, a stateless [`Router`][mz_nav::Router]
//! and a [`TargetView`] taken at the start of the tick, so the order in
//! which pursuers are advanced never changes what they choose.  The only
//! mutable input is the pursuer's own `AgentRng`, used by `Wander`.

pub mod error;
pub mod policy;
pub mod steering;
pub mod target;


pub use error::{PursuitError, PursuitResult};
pub use policy::PursuerPolicy;
pub use steering::PursuerSteering;
pub use target::TargetView;
