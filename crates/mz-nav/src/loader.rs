//! CSV maze loader.
//!
//! # CSV format
//!
//! One row per node.  Ids must cover `0..n` exactly once; rows may appear in
//! any order.
//!
//! ```csv
//! id,x,y,neighbors,portal,dead_end
//! 0,0,0,1;3,,
//! 1,10,0,0;2,,
//! 2,20,0,1,0,
//! 3,0,10,0,,true
//! ```
//!
//! | Column      | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `neighbors` | `;`-separated node ids, in edge order (may be empty) |
//! | `portal`    | destination node id if this node teleports           |
//! | `dead_end`  | `true` to allow an empty neighbour list              |
//!
//! Edges are directed as written; list each corridor on both endpoints.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::network::{NavGraph, NodeDescriptor};
use crate::NavError;
use mz_core::Vec2;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:        u32,
    x:         f32,
    y:         f32,
    #[serde(default)]
    neighbors: String,
    #[serde(default)]
    portal:    Option<u32>,
    #[serde(default)]
    dead_end:  Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`NavGraph`] from a CSV file.
pub fn load_graph_csv(path: &Path) -> Result<NavGraph, NavError> {
    let file = std::fs::File::open(path)?;
    load_graph_reader(file)
}

/// Like [`load_graph_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for level data embedded
/// in a binary.
pub fn load_graph_reader<R: Read>(reader: R) -> Result<NavGraph, NavError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<NodeRecord> = Vec::new();
    for result in csv_reader.deserialize::<NodeRecord>() {
        rows.push(result.map_err(|e| NavError::Parse(e.to_string()))?);
    }
    rows.sort_by_key(|r| r.id);

    let descriptors = rows
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            if r.id as usize != i {
                return Err(NavError::Parse(format!(
                    "node ids must be dense and unique: expected id {i}, found {}",
                    r.id
                )));
            }
            Ok(NodeDescriptor {
                position:  Vec2::new(r.x, r.y),
                neighbors: parse_neighbors(&r.neighbors)?,
                portal:    r.portal.map(|p| p as usize),
                dead_end:  r.dead_end.unwrap_or(false),
            })
        })
        .collect::<Result<Vec<_>, NavError>>()?;

    NavGraph::from_descriptors(&descriptors)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_neighbors(s: &str) -> Result<Vec<usize>, NavError> {
    s.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<usize>().map_err(|_| {
                NavError::Parse(format!("invalid neighbour id {t:?}: expected a node id"))
            })
        })
        .collect()
}
