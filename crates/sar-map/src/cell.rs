//! Per-cell knowledge held in a [`LocalMap`][crate::LocalMap].

use std::collections::BTreeSet;
use std::str::FromStr;

use sar_core::{AgentId, Position, VictimId};

use crate::MapError;

// ── CellStatus ────────────────────────────────────────────────────────────────

/// What an agent believes occupies a cell.
///
/// Conflicts between maps resolve to the status with the higher
/// [`priority`][Self::priority]: wall > clear > unknown > out-of-bounds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellStatus {
    #[default]
    Unknown,
    Clear,
    Wall,
    OutOfBounds,
}

impl CellStatus {
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            CellStatus::Wall        => 3,
            CellStatus::Clear       => 2,
            CellStatus::Unknown     => 1,
            CellStatus::OutOfBounds => 0,
        }
    }

    /// The status that wins a merge conflict.
    #[inline]
    pub fn stronger(self, other: CellStatus) -> CellStatus {
        if other.priority() > self.priority() { other } else { self }
    }

    /// Walls and the grid edge both block movement.
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, CellStatus::Wall | CellStatus::OutOfBounds)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellStatus::Unknown     => "unknown",
            CellStatus::Clear       => "clear",
            CellStatus::Wall        => "wall",
            CellStatus::OutOfBounds => "out_of_bounds",
        }
    }
}

impl FromStr for CellStatus {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown"       => Ok(CellStatus::Unknown),
            "clear"         => Ok(CellStatus::Clear),
            "wall"          => Ok(CellStatus::Wall),
            "out_of_bounds" => Ok(CellStatus::OutOfBounds),
            other           => Err(MapError::UnknownStatus(other.to_owned())),
        }
    }
}

impl std::fmt::Display for CellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── CellInfo ──────────────────────────────────────────────────────────────────

/// Everything known about one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellInfo {
    pub status:          CellStatus,
    /// Measured movement-cost multiplier.  `None` until the cell is entered.
    pub difficulty:      Option<f64>,
    /// How many measurements `difficulty` averages.
    samples:             u32,
    pub visited:         bool,
    /// Step counter of the last observation; `-1` if never observed.
    pub last_seen_step:  i64,

    pub victim_present:  bool,
    pub victim_id:       Option<VictimId>,
    pub vitals_read:     bool,
    pub read_step:       Option<u64>,
    /// Raw vital-sign reading; empty when unread.
    pub vitals:          Vec<f64>,

    /// Cost-to-goal annotation from planning.
    pub g_cost:          Option<f64>,
    pub parent:          Option<Position>,
    /// Adjacent cells seen clear from here.
    pub neighbors_clear: BTreeSet<Position>,

    /// First agent that wrote this cell.  Never overwritten.
    pub discovered_by:   Option<AgentId>,
}

impl Default for CellInfo {
    fn default() -> Self {
        Self {
            status:          CellStatus::Unknown,
            difficulty:      None,
            samples:         0,
            visited:         false,
            last_seen_step:  -1,
            victim_present:  false,
            victim_id:       None,
            vitals_read:     false,
            read_step:       None,
            vitals:          Vec::new(),
            g_cost:          None,
            parent:          None,
            neighbors_clear: BTreeSet::new(),
            discovered_by:   None,
        }
    }
}

impl CellInfo {
    /// Apply a fresh status observation.  `Unknown` never replaces a
    /// classified status; any classified status replaces the previous one.
    pub fn observe(&mut self, status: CellStatus, step: i64) {
        if status != CellStatus::Unknown {
            self.status = status;
        }
        self.last_seen_step = self.last_seen_step.max(step);
    }

    /// Replace the difficulty with a single measurement.
    pub fn set_difficulty(&mut self, difficulty: f64) {
        self.difficulty = Some(difficulty);
        self.samples = 1;
    }

    /// Restore a difficulty that already averages `samples` measurements,
    /// as read back from a persisted map.
    pub fn restore_difficulty(&mut self, difficulty: f64, samples: u32) {
        self.difficulty = Some(difficulty);
        self.samples = samples.max(1);
    }

    /// Number of measurements averaged into `difficulty`.
    pub fn difficulty_samples(&self) -> u32 {
        if self.difficulty.is_some() { self.samples.max(1) } else { 0 }
    }

    pub(crate) fn claim(&mut self, agent: AgentId) {
        self.discovered_by.get_or_insert(agent);
    }

    /// Combine two beliefs about the same cell.
    ///
    /// Status, visit flags, victim presence, step counters, clear-neighbour
    /// sets and difficulty (a sample-weighted mean) combine symmetrically.
    /// Vitals, parent and `discovered_by` prefer `self` when both are set.
    pub fn merged_with(&self, other: &CellInfo) -> CellInfo {
        let (difficulty, samples) = match (self.difficulty, other.difficulty) {
            (Some(a), Some(b)) => {
                let (wa, wb) = (self.difficulty_samples(), other.difficulty_samples());
                let w = wa + wb;
                (Some((a * wa as f64 + b * wb as f64) / w as f64), w)
            }
            (Some(a), None) => (Some(a), self.difficulty_samples()),
            (None, Some(b)) => (Some(b), other.difficulty_samples()),
            (None, None)    => (None, 0),
        };

        let vitals = if self.vitals.is_empty() { &other.vitals } else { &self.vitals };

        CellInfo {
            status:          self.status.stronger(other.status),
            difficulty,
            samples,
            visited:         self.visited || other.visited,
            last_seen_step:  self.last_seen_step.max(other.last_seen_step),
            victim_present:  self.victim_present || other.victim_present,
            victim_id:       min_some(self.victim_id, other.victim_id),
            vitals_read:     self.vitals_read || other.vitals_read,
            read_step:       min_some(self.read_step, other.read_step),
            vitals:          vitals.clone(),
            g_cost:          min_some_f64(self.g_cost, other.g_cost),
            parent:          self.parent.or(other.parent),
            neighbors_clear: self.neighbors_clear.union(&other.neighbors_clear).copied().collect(),
            discovered_by:   self.discovered_by.or(other.discovered_by),
        }
    }
}

fn min_some<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b)             => a.or(b),
    }
}

fn min_some_f64(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b)             => a.or(b),
    }
}
