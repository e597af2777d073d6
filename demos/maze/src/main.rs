//! maze — smallest runnable level for the mazerun engine.
//!
//! A 14-node maze with a wrap-around tunnel, one scripted player, and four
//! pursuers (one per policy).  Pass a JSON `SimConfig` path as the first
//! argument to override the bundled `data/config.json`; set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) for per-arrival logging.

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mz_core::{AgentId, Direction, NodeId, SimConfig, Tick, Vec2};
use mz_motion::Arrival;
use mz_nav::DijkstraRouter;
use mz_pursuit::PursuerPolicy;
use mz_sim::{AgentSnapshot, AgentSpec, ScriptedInput, SimBuilder, SimObserver, TickReport};

// ── Level data ────────────────────────────────────────────────────────────────

const MAZE_CSV:    &str = include_str!("../data/maze.csv");
const CONFIG_JSON: &str = include_str!("../data/config.json");

const PLAYER_SPEED:  f32 = 7.0;
const PURSUER_SPEED: f32 = 3.0;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts events and tracks how close any pursuer came to the player.
#[derive(Default)]
struct DemoObserver {
    arrivals:         usize,
    teleports:        usize,
    player_arrivals:  usize,
    closest_approach: Option<(f32, Tick, AgentId)>,
}

impl SimObserver for DemoObserver {
    fn on_arrival(&mut self, tick: Tick, agent: AgentId, arrival: &Arrival) {
        self.arrivals += 1;
        if agent == AgentId(0) {
            self.player_arrivals += 1;
        }
        if let Some(entrance) = arrival.teleported_from {
            self.teleports += 1;
            debug!(%tick, %agent, %entrance, exit = %arrival.node, "tunnel");
        } else {
            debug!(%tick, %agent, node = %arrival.node, next = ?arrival.next, "arrival");
        }
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let Some(player) = report.player() else {
            return;
        };
        for p in &report.agents[1..] {
            let d = p.position.distance(player.position);
            if self.closest_approach.is_none_or(|(best, _, _)| d < best) {
                self.closest_approach = Some((d, tick, p.id));
            }
        }
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
        for a in agents {
            info!(%tick, agent = %a.id, position = %a.position, target = ?a.target, "snapshot");
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, arrivals = self.arrivals, teleports = self.teleports, "run complete");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== maze — mazerun navigation demo ===");

    // 1. Config: bundled JSON unless a path is given.
    let config: SimConfig = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => serde_json::from_str(CONFIG_JSON).context("parsing bundled config")?,
    };
    println!(
        "Ticks: {}  |  dt: {:.3} s  |  Seed: {}  |  Arrival: {:?}",
        config.total_ticks, config.tick_secs, config.seed, config.arrival
    );

    // 2. Level + agents.
    let policies = PursuerPolicy::ALL;
    let mut sim = SimBuilder::from_reader(config, Cursor::new(MAZE_CSV), DijkstraRouter)?
        .player(AgentSpec::new(Vec2::new(10.0, 10.0), PLAYER_SPEED))
        .pursuer(AgentSpec::new(Vec2::new(30.0, 0.0), PURSUER_SPEED), policies[0])
        .pursuer(AgentSpec::new(Vec2::new(0.0, 0.0), PURSUER_SPEED), policies[1])
        .pursuer(AgentSpec::new(Vec2::new(30.0, 20.0), PURSUER_SPEED), policies[2])
        .pursuer(AgentSpec::new(Vec2::new(0.0, 20.0), PURSUER_SPEED), policies[3])
        .build()?;
    println!(
        "Maze: {} nodes, {} edges, {} portals  |  Agents: {}",
        sim.graph.node_count(),
        sim.graph.edge_count(),
        sim.graph.portal_count(),
        sim.agent_count()
    );

    // 3. Player script: west through the tunnel, then loop the lower half.
    let mut script = ScriptedInput::new()
        .at(0, Direction::Left)
        .at(90, Direction::Down)
        .at(150, Direction::Right)
        .at(260, Direction::Up)
        .at(330, Direction::Left)
        .at(420, Direction::Down)
        .at(480, Direction::Right);

    // 4. Run.
    let mut obs = DemoObserver::default();
    let t0 = Instant::now();
    sim.run(&mut script, &mut obs);
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Simulated {} in {:.3} ms", sim.clock, elapsed.as_secs_f64() * 1e3);
    println!(
        "  arrivals: {} ({} by the player)  |  tunnel transits: {}",
        obs.arrivals, obs.player_arrivals, obs.teleports
    );
    if let Some((d, tick, agent)) = obs.closest_approach {
        println!("  closest approach: {agent} at {d:.2} units on {tick}");
    }
    println!();

    // 6. Final agent table.
    println!("{:<8} {:<18} {:<8} {:<8} {:<16}", "Agent", "Role", "Node", "Target", "Position");
    println!("{}", "-".repeat(60));
    for snap in sim.snapshots() {
        let role = match snap.id.index() {
            0 => "player".to_string(),
            i => sim.pursuers[i - 1].policy.to_string(),
        };
        let node = snap.current.map_or("-".to_string(), |n| n.0.to_string());
        let target = snap.target.map_or("-".to_string(), |n| n.0.to_string());
        println!("{:<8} {:<18} {:<8} {:<8} {:<16}", snap.id.0, role, node, target, snap.position.to_string());
    }

    let preview = sim.shortest_path(NodeId(10), NodeId(3));
    println!();
    println!(
        "Shortest path 10 → 3: {:?} ({:.1} units)",
        preview.nodes.iter().map(|n| n.0).collect::<Vec<_>>(),
        preview.total_length
    );

    Ok(())
}
