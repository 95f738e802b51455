//! What agents hand back to the coordinator when they stop.

use sar_core::{AgentId, AgentState, ClusterId, VictimId};
use sar_map::LocalMap;

/// Final snapshot of one explorer.  Owns the explorer's map from now on.
#[derive(Clone, Debug)]
pub struct ExplorerReport {
    pub agent:     AgentId,
    pub name:      String,
    pub state:     AgentState,
    /// Budget left at report time; negative for dead explorers.
    pub remaining: f64,
    /// Executed moves.
    pub moves:     u64,
    pub map:       LocalMap,
}

impl ExplorerReport {
    /// Victims recorded in the map, in id order.
    pub fn victim_ids(&self) -> Vec<VictimId> {
        let mut ids: Vec<VictimId> = self.map.victims().map(|(_, id, _)| id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Final snapshot of one rescuer.
#[derive(Clone, Debug, PartialEq)]
pub struct RescueReport {
    pub agent:            AgentId,
    pub name:             String,
    pub state:            AgentState,
    pub remaining:        f64,
    /// Clusters this rescuer was given, in processing order.
    pub clusters:         Vec<ClusterId>,
    /// Victims aided, in the order they were reached.
    pub completed:        Vec<VictimId>,
    /// Victims skipped because no path led to them.
    pub unreachable:      Vec<VictimId>,
    pub returned_to_base: bool,
}
