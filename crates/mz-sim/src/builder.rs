//! Fluent builder for constructing a [`Sim`].

use std::io::Read;
use std::path::Path;

use tracing::debug;

use mz_core::{AgentId, AgentRng, SimClock, SimConfig, Vec2};
use mz_motion::{MotionError, MovementController};
use mz_nav::{NavGraph, Router, load_graph_csv, load_graph_reader};
use mz_pursuit::PursuerPolicy;

use crate::{Pursuer, Sim, SimError, SimResult};

/// Where an agent starts and how fast it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    /// Spawn point; the agent starts on the nearest graph node.
    pub spawn: Vec2,
    /// Board units per second.
    pub speed: f32,
}

impl AgentSpec {
    pub fn new(spawn: Vec2, speed: f32) -> Self {
        Self { spawn, speed }
    }
}

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick length, run length, seed, arrival rule
/// - [`NavGraph`]: the level, owned by the sim
/// - `R: Router`: the routing algorithm (e.g. [`mz_nav::DijkstraRouter`])
/// - exactly one [`player`](Self::player)
///
/// Pursuers are optional and receive `AgentId(1)`, `AgentId(2)`, … in the
/// order they are added.
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config, graph, DijkstraRouter)
///     .player(AgentSpec::new(Vec2::new(0.0, 0.0), 7.0))
///     .pursuer(AgentSpec::new(Vec2::new(10.0, 10.0), 3.0), PursuerPolicy::Wander)
///     .build()?;
/// ```
pub struct SimBuilder<R: Router> {
    config:   SimConfig,
    graph:    NavGraph,
    router:   R,
    player:   Option<AgentSpec>,
    pursuers: Vec<(AgentSpec, PursuerPolicy)>,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, graph: NavGraph, router: R) -> Self {
        Self {
            config,
            graph,
            router,
            player:   None,
            pursuers: Vec::new(),
        }
    }

    /// Load the level from a CSV file (see [`mz_nav::loader`]).
    pub fn from_csv(config: SimConfig, path: &Path, router: R) -> SimResult<Self> {
        Ok(Self::new(config, load_graph_csv(path)?, router))
    }

    /// Load the level from any CSV `Read` source.
    pub fn from_reader<T: Read>(config: SimConfig, reader: T, router: R) -> SimResult<Self> {
        Ok(Self::new(config, load_graph_reader(reader)?, router))
    }

    /// Set the player (`AgentId(0)`).  A second call replaces the first.
    pub fn player(mut self, spec: AgentSpec) -> Self {
        self.player = Some(spec);
        self
    }

    /// Add a pursuer with its initial policy.
    pub fn pursuer(mut self, spec: AgentSpec, policy: PursuerPolicy) -> Self {
        self.pursuers.push((spec, policy));
        self
    }

    /// Validate the configuration, spawn every agent on its nearest node,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;
        let boundary = self.config.arrival;
        let player_spec = self.player.ok_or(SimError::MissingPlayer)?;

        let spawn = |agent: AgentId, spec: AgentSpec| {
            MovementController::spawn(&self.graph, spec.spawn, spec.speed, boundary).map_err(|e| match e {
                MotionError::NoSpawnNode(_) => SimError::NoSpawnNode(agent),
                source => SimError::Agent { agent, source },
            })
        };

        let player = spawn(AgentId(0), player_spec)?;
        let pursuers = self
            .pursuers
            .iter()
            .enumerate()
            .map(|(i, &(spec, policy))| {
                let id = AgentId(i as u32 + 1);
                Ok(Pursuer {
                    id,
                    controller: spawn(id, spec)?,
                    policy,
                    rng: AgentRng::new(self.config.seed, id),
                })
            })
            .collect::<SimResult<Vec<_>>>()?;

        debug!(
            nodes = self.graph.node_count(),
            pursuers = pursuers.len(),
            seed = self.config.seed,
            "built sim"
        );

        Ok(Sim {
            config: self.config,
            clock: SimClock::new(),
            graph: self.graph,
            router: self.router,
            player,
            pursuers,
        })
    }
}
