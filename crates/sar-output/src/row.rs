//! Plain record types written by the output backends.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use sar_core::{AgentId, Position, VictimId};
use sar_map::{CellInfo, CellStatus};

use crate::{OutputError, OutputResult};

/// Column order of the persisted map format.
pub const CELL_HEADER: [&str; 18] = [
    "agent",
    "x",
    "y",
    "status",
    "visited",
    "last_seen_step",
    "difficulty",
    "difficulty_samples",
    "victim_present",
    "victim_id",
    "vitals_read",
    "read_step",
    "vitals",
    "g_cost",
    "parent_x",
    "parent_y",
    "neighbors_clear",
    "discovered_by",
];

/// Agent label used for the fused cell map.
pub const UNIFIED_AGENT: &str = "UNIFIED";

/// One known cell of a map, flattened for CSV.
///
/// Optional values are empty fields.  `vitals` and `neighbors_clear` hold
/// JSON lists; an unread vital-sign vector is `[]`, never empty.
/// `difficulty_samples` and `discovered_by` may be absent from older files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRow {
    pub agent:              String,
    pub x:                  i32,
    pub y:                  i32,
    pub status:             String,
    pub visited:            bool,
    pub last_seen_step:     i64,
    pub difficulty:         Option<f64>,
    #[serde(default)]
    pub difficulty_samples: Option<u32>,
    pub victim_present:     bool,
    pub victim_id:          Option<u32>,
    pub vitals_read:        bool,
    pub read_step:          Option<u64>,
    pub vitals:             String,
    pub g_cost:             Option<f64>,
    pub parent_x:           Option<i32>,
    pub parent_y:           Option<i32>,
    pub neighbors_clear:    String,
    #[serde(default)]
    pub discovered_by:      Option<u32>,
}

impl CellRow {
    pub fn from_cell(agent: &str, pos: Position, cell: &CellInfo) -> OutputResult<Self> {
        let neighbors: Vec<[i32; 2]> = cell.neighbors_clear.iter().map(|n| [n.x, n.y]).collect();
        Ok(Self {
            agent:              agent.to_owned(),
            x:                  pos.x,
            y:                  pos.y,
            status:             cell.status.as_str().to_owned(),
            visited:            cell.visited,
            last_seen_step:     cell.last_seen_step,
            difficulty:         cell.difficulty,
            difficulty_samples: cell.difficulty.map(|_| cell.difficulty_samples()),
            victim_present:     cell.victim_present,
            victim_id:          cell.victim_id.map(|v| v.0),
            vitals_read:        cell.vitals_read,
            read_step:          cell.read_step,
            vitals:             serde_json::to_string(&cell.vitals)?,
            g_cost:             cell.g_cost,
            parent_x:           cell.parent.map(|p| p.x),
            parent_y:           cell.parent.map(|p| p.y),
            neighbors_clear:    serde_json::to_string(&neighbors)?,
            discovered_by:      cell.discovered_by.map(|a| a.0),
        })
    }

    /// Validate the row and rebuild the cell it describes.
    pub fn into_cell(self) -> OutputResult<(Position, CellInfo)> {
        let status: CellStatus = self.status.parse()?;
        let vitals: Vec<f64> = serde_json::from_str(&self.vitals)?;
        let neighbors: Vec<[i32; 2]> = serde_json::from_str(&self.neighbors_clear)?;
        let parent = match (self.parent_x, self.parent_y) {
            (Some(x), Some(y)) => Some(Position::new(x, y)),
            (None, None) => None,
            _ => {
                return Err(OutputError::Malformed(format!(
                    "cell ({}, {}) has only one parent coordinate",
                    self.x, self.y
                )));
            }
        };

        let mut cell = CellInfo::default();
        cell.status = status;
        if let Some(d) = self.difficulty {
            cell.restore_difficulty(d, self.difficulty_samples.unwrap_or(1));
        }
        cell.visited = self.visited;
        cell.last_seen_step = self.last_seen_step;
        cell.victim_present = self.victim_present;
        cell.victim_id = self.victim_id.map(VictimId);
        cell.vitals_read = self.vitals_read;
        cell.read_step = self.read_step;
        cell.vitals = vitals;
        cell.g_cost = self.g_cost;
        cell.parent = parent;
        cell.neighbors_clear = neighbors.into_iter().map(|[x, y]| Position::new(x, y)).collect::<BTreeSet<_>>();
        cell.discovered_by = self.discovered_by.map(AgentId);

        Ok((Position::new(self.x, self.y), cell))
    }
}
