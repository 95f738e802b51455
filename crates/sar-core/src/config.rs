//! Agent profiles and mission-level configuration.
//!
//! Both structs are typically loaded from a JSON file by the application
//! crate (with the `serde` feature) and then overridden from the command line.

use crate::{Direction, SarError, SarResult};

// ── CostModel ─────────────────────────────────────────────────────────────────

/// Time charged by the environment for each primitive action.
///
/// Movement costs are multiplied by the difficulty of the destination cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostModel {
    /// Orthogonal step.
    pub line:      f64,
    /// Diagonal step.
    pub diag:      f64,
    /// Reading a victim's vital signs.
    pub read:      f64,
    /// Administering first aid.
    pub first_aid: f64,
}

impl CostModel {
    /// Base cost of a move by `(dx, dy)` before difficulty scaling.
    #[inline]
    pub fn move_cost(&self, dx: i32, dy: i32) -> f64 {
        if dx != 0 && dy != 0 { self.diag } else { self.line }
    }

    pub fn validate(&self) -> SarResult<()> {
        let all = [self.line, self.diag, self.read, self.first_aid];
        if all.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(SarError::Config(format!("action costs must be finite and >= 0: {self:?}")));
        }
        if self.line <= 0.0 || self.diag <= 0.0 {
            return Err(SarError::Config("movement costs must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self { line: 1.0, diag: 1.5, read: 2.0, first_aid: 1.0 }
    }
}

// ── AgentProfile ──────────────────────────────────────────────────────────────

/// Identity and resources of one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentProfile {
    /// Display name, also used as the `agent` column of persisted maps.
    pub name:       String,
    /// Initial time budget.
    pub time_limit: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs:      CostModel,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, time_limit: f64) -> Self {
        Self { name: name.into(), time_limit, costs: CostModel::default() }
    }

    pub fn with_costs(mut self, costs: CostModel) -> Self {
        self.costs = costs;
        self
    }

    pub fn validate(&self) -> SarResult<()> {
        if !self.time_limit.is_finite() || self.time_limit < 0.0 {
            return Err(SarError::Config(format!(
                "agent {:?}: time limit must be finite and >= 0, got {}",
                self.name, self.time_limit
            )));
        }
        self.costs.validate()
    }
}

// ── NeighborPolicy ────────────────────────────────────────────────────────────

/// How an explorer picks among unvisited free neighbours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeighborPolicy {
    /// Uniform choice from the agent's seeded RNG.
    #[default]
    Random,
    /// First unvisited neighbour in a compass order rotated per explorer:
    /// explorer `i` starts at direction `2 * i mod 8`.
    RotatedPreference,
}

impl NeighborPolicy {
    /// Compass preference for the explorer registered at `slot`.
    pub fn preference_for(slot: usize) -> [Direction; 8] {
        Direction::from_index(2 * slot).rotation_from()
    }
}

// ── MissionConfig ─────────────────────────────────────────────────────────────

/// Top-level mission configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MissionConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed:              u64,
    /// Number of victim clusters handed to the rescuers.
    pub clusters:          usize,
    /// Upper bound on scheduler ticks per phase.  Agents still active when
    /// the cap is hit are reported as they are.
    pub max_ticks:         u64,
    pub neighbor_policy:   NeighborPolicy,
    /// Neighbour count for the victim predictor.
    pub knn_k:             usize,
    /// Include maps of explorers that died of exhaustion in the fusion.
    pub fuse_dead_reports: bool,
}

impl MissionConfig {
    pub fn validate(&self) -> SarResult<()> {
        if self.clusters == 0 {
            return Err(SarError::Config("cluster count must be >= 1".into()));
        }
        if self.knn_k == 0 {
            return Err(SarError::Config("knn_k must be >= 1".into()));
        }
        if self.max_ticks == 0 {
            return Err(SarError::Config("max_ticks must be >= 1".into()));
        }
        Ok(())
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            seed:              42,
            clusters:          3,
            max_ticks:         1_000_000,
            neighbor_policy:   NeighborPolicy::Random,
            knn_k:             5,
            fuse_dead_reports: false,
        }
    }
}
