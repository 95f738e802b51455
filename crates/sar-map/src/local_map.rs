//! `LocalMap` — one agent's sparse knowledge of the grid.
//!
//! # Ownership
//!
//! A `LocalMap` is owned by exactly one explorer while it runs and is only
//! written through that explorer's `record_*` calls.  When the explorer
//! reports, the map moves into the report and is read-only from then on.
//!
//! # Merge
//!
//! [`LocalMap::merge`] combines two maps cell by cell with
//! [`CellInfo::merged_with`].  On the `status` field the merge is
//! commutative and associative (max under a total priority order), so the
//! fused status of a set of maps does not depend on the fold order.

use std::collections::{BTreeMap, BTreeSet};

use sar_core::{AgentId, Position, VictimId};

use crate::cell::{CellInfo, CellStatus};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocalMap {
    cells: BTreeMap<Position, CellInfo>,
}

impl LocalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, pos: Position) -> Option<&CellInfo> {
        self.cells.get(&pos)
    }

    pub fn status(&self, pos: Position) -> CellStatus {
        self.cells.get(&pos).map_or(CellStatus::Unknown, |c| c.status)
    }

    /// All cells in position order, including unknown ones.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CellInfo)> + '_ {
        self.cells.iter().map(|(&p, c)| (p, c))
    }

    /// Cells whose status is not `Unknown`, in position order.  These are the
    /// cells that get persisted.
    pub fn known_cells(&self) -> impl Iterator<Item = (Position, &CellInfo)> + '_ {
        self.cells().filter(|(_, c)| c.status != CellStatus::Unknown)
    }

    /// Replace a whole cell.  Used by loaders that rebuild a map from disk.
    pub fn insert(&mut self, pos: Position, cell: CellInfo) {
        self.cells.insert(pos, cell);
    }

    fn entry(&mut self, pos: Position) -> &mut CellInfo {
        self.cells.entry(pos).or_default()
    }

    // ── Recording ─────────────────────────────────────────────────────────

    /// Record that `agent` stands on `pos` at `step`; marks the cell visited.
    pub fn record_cell(
        &mut self,
        agent: AgentId,
        pos: Position,
        status: CellStatus,
        step: i64,
        difficulty: Option<f64>,
    ) {
        let cell = self.entry(pos);
        cell.observe(status, step);
        cell.visited = true;
        cell.claim(agent);
        if let Some(d) = difficulty {
            cell.set_difficulty(d);
        }
    }

    /// Record a status observed without entering the cell (a probe result
    /// or a bump).
    pub fn record_status(&mut self, agent: AgentId, pos: Position, status: CellStatus, step: i64) {
        let cell = self.entry(pos);
        cell.observe(status, step);
        cell.claim(agent);
    }

    /// Record a full proximity probe taken at `pos` and remember which
    /// neighbours were clear.
    pub fn record_neighbors(
        &mut self,
        agent: AgentId,
        pos: Position,
        neighbors: &[(Position, CellStatus)],
        step: i64,
    ) {
        for &(n, status) in neighbors {
            self.record_status(agent, n, status, step);
        }
        let clear = neighbors
            .iter()
            .filter(|(_, s)| *s == CellStatus::Clear)
            .map(|(n, _)| *n);
        self.entry(pos).neighbors_clear.extend(clear);
    }

    /// Record a victim at `pos`.  `vitals` is `Some` once they were read.
    pub fn record_victim(
        &mut self,
        agent: AgentId,
        pos: Position,
        victim: VictimId,
        vitals: Option<Vec<f64>>,
        step: u64,
    ) {
        let cell = self.entry(pos);
        cell.victim_present = true;
        cell.victim_id = Some(victim);
        cell.claim(agent);
        if let Some(vitals) = vitals {
            cell.vitals_read = true;
            cell.read_step = Some(step);
            cell.vitals = vitals;
        }
    }

    /// Annotate a cell with planning data.
    pub fn record_plan(&mut self, pos: Position, g_cost: f64, parent: Option<Position>) {
        let cell = self.entry(pos);
        cell.g_cost = Some(g_cost);
        cell.parent = parent;
    }

    // ── Merge ─────────────────────────────────────────────────────────────

    /// Cell-wise merge of `self` and `other`.
    pub fn merge(&self, other: &LocalMap) -> LocalMap {
        let mut out = self.clone();
        out.merge_from(other);
        out
    }

    /// In-place variant of [`merge`][Self::merge].
    pub fn merge_from(&mut self, other: &LocalMap) {
        for (&pos, theirs) in &other.cells {
            match self.cells.get_mut(&pos) {
                Some(ours) => *ours = ours.merged_with(theirs),
                None => {
                    self.cells.insert(pos, theirs.clone());
                }
            }
        }
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn visited_positions(&self) -> BTreeSet<Position> {
        self.cells().filter(|(_, c)| c.visited).map(|(p, _)| p).collect()
    }

    /// Walls and out-of-bounds cells.
    pub fn obstacle_positions(&self) -> BTreeSet<Position> {
        self.cells().filter(|(_, c)| c.status.is_obstacle()).map(|(p, _)| p).collect()
    }

    /// Cells that carry a victim id, in position order.
    pub fn victims(&self) -> impl Iterator<Item = (Position, VictimId, &CellInfo)> + '_ {
        self.cells()
            .filter(|(_, c)| c.victim_present)
            .filter_map(|(p, c)| c.victim_id.map(|v| (p, v, c)))
    }

    pub fn victim_count(&self) -> usize {
        self.victims().count()
    }
}
