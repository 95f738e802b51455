//! The fused map and victim registry shared with the rescuers.

use std::collections::{BTreeMap, BTreeSet};

use sar_core::{AgentId, Position, TriageClass, VictimId};

// ── VictimInfo ────────────────────────────────────────────────────────────────

/// A victim as known to the coordinator.
///
/// `id` and `position` are fixed at creation.  Everything else may be filled
/// in later by further reports or by the predictor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictimInfo {
    pub id:       VictimId,
    pub position: Position,
    /// Raw vital-sign vector; empty if nobody read it.
    pub signals:  Vec<f64>,
    pub triage:   Option<TriageClass>,
    /// Predicted survival probability in `[0, 1]`.
    pub survival: Option<f64>,
    /// Agents that detected this victim.
    pub sources:  BTreeSet<AgentId>,
}

impl VictimInfo {
    pub fn new(id: VictimId, position: Position) -> Self {
        Self {
            id,
            position,
            signals:  Vec::new(),
            triage:   None,
            survival: None,
            sources:  BTreeSet::new(),
        }
    }

    pub fn with_source(mut self, agent: AgentId) -> Self {
        self.sources.insert(agent);
        self
    }

    pub fn with_signals(mut self, signals: Vec<f64>) -> Self {
        self.signals = signals;
        self
    }

    /// Fold another report of the same victim into `self`.
    ///
    /// Sources are unioned, the first non-empty signal vector is kept, and
    /// the most severe triage class wins (its survival score travels with
    /// it).  `position` is left untouched.
    pub fn merge_from(&mut self, other: &VictimInfo) {
        debug_assert_eq!(self.id, other.id);
        self.sources.extend(other.sources.iter().copied());
        if self.signals.is_empty() && !other.signals.is_empty() {
            self.signals = other.signals.clone();
        }
        match (self.triage, other.triage) {
            (None, Some(_)) => {
                self.triage = other.triage;
                self.survival = other.survival;
            }
            (Some(ours), Some(theirs)) if theirs > ours => {
                self.triage = other.triage;
                self.survival = other.survival;
            }
            _ => {
                if self.survival.is_none() {
                    self.survival = other.survival;
                }
            }
        }
    }
}

// ── UnifiedMap ────────────────────────────────────────────────────────────────

/// Fused knowledge of all reporting explorers.
///
/// `visited` and `obstacles` are disjoint and `base` is always in `visited`;
/// every mutator keeps both properties.
#[derive(Clone, Debug, PartialEq)]
pub struct UnifiedMap {
    base:      Position,
    visited:   BTreeSet<Position>,
    obstacles: BTreeSet<Position>,
    pub victims: BTreeMap<VictimId, VictimInfo>,
}

impl UnifiedMap {
    /// An empty map that knows only the base.
    pub fn new(base: Position) -> Self {
        Self {
            base,
            visited:   BTreeSet::from([base]),
            obstacles: BTreeSet::new(),
            victims:   BTreeMap::new(),
        }
    }

    /// Build from raw sets, restoring the invariants.
    pub fn from_parts(
        base: Position,
        visited: BTreeSet<Position>,
        obstacles: BTreeSet<Position>,
        victims: BTreeMap<VictimId, VictimInfo>,
    ) -> Self {
        let mut map = Self { base, visited, obstacles, victims };
        map.normalize();
        map
    }

    fn normalize(&mut self) {
        let obstacles = &self.obstacles;
        self.visited.retain(|p| !obstacles.contains(p));
        self.obstacles.remove(&self.base);
        self.visited.insert(self.base);
    }

    pub fn base(&self) -> Position {
        self.base
    }

    pub fn visited(&self) -> &BTreeSet<Position> {
        &self.visited
    }

    pub fn obstacles(&self) -> &BTreeSet<Position> {
        &self.obstacles
    }

    /// `true` if `p` is a known-traversable cell.
    #[inline]
    pub fn is_walkable(&self, p: Position) -> bool {
        self.visited.contains(&p) && !self.obstacles.contains(&p)
    }

    /// Mark `p` as an obstacle and drop it from `visited`.  The base is
    /// never turned into an obstacle.
    pub fn add_obstacle(&mut self, p: Position) {
        if p == self.base {
            return;
        }
        self.visited.remove(&p);
        self.obstacles.insert(p);
    }

    pub fn victim(&self, id: VictimId) -> Option<&VictimInfo> {
        self.victims.get(&id)
    }
}
