//! `MapSynchronizer` — fuses explorers' local maps into one [`UnifiedMap`].
//!
//! Fusion is a pure function of the reports it is given: it never fails,
//! accepts zero reports (yielding a map that knows only the base), and drops
//! every coordinate outside the configured grid.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use sar_core::{AgentId, Position, VictimId};

use crate::cell::CellStatus;
use crate::local_map::LocalMap;
use crate::unified::{UnifiedMap, VictimInfo};

// ── FusionMetrics ─────────────────────────────────────────────────────────────

/// Bookkeeping produced alongside the fused map.
#[derive(Clone, Debug, PartialEq)]
pub struct FusionMetrics {
    pub width:          i32,
    pub height:         i32,
    pub base:           Position,
    /// Victims each contributing explorer found.
    pub per_agent:      BTreeMap<AgentId, usize>,
    /// Sum of `per_agent`.
    pub total_found:    usize,
    pub unique_victims: usize,
    /// `total_found / unique_victims - 1`; zero without victims.
    pub overlap:        f64,
    /// Visited cells over grid area.
    pub coverage:       f64,
    pub visited_cells:  usize,
    pub obstacles:      usize,
}

impl fmt::Display for FusionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MAP SYNCHRONIZATION SUMMARY ===")?;
        writeln!(f, "Grid size: {}x{}", self.width, self.height)?;
        writeln!(f, "Base: {}", self.base)?;
        writeln!(
            f,
            "Visited cells: {} ({:.2}% coverage)",
            self.visited_cells,
            self.coverage * 100.0
        )?;
        writeln!(f, "Known obstacles: {}", self.obstacles)?;
        writeln!(f, "Victims located: {}", self.unique_victims)?;
        for (agent, n) in &self.per_agent {
            writeln!(f, "    {agent}: {n} victims")?;
        }
        writeln!(f, "Overlap: {:.2}", self.overlap)
    }
}

// ── FusionOutcome ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FusionOutcome {
    pub unified: UnifiedMap,
    /// Cell-level merge of every in-grid cell of every report.
    pub cells:   LocalMap,
    pub metrics: FusionMetrics,
}

impl FusionOutcome {
    /// Human-readable synchronization summary including the victim list.
    pub fn summary(&self) -> String {
        let mut out = self.metrics.to_string();
        if self.unified.victims.is_empty() {
            out.push_str("No victims located by reporting explorers.\n");
            return out;
        }
        out.push_str("Victims detail:\n");
        for (id, info) in &self.unified.victims {
            let sources = info
                .sources
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "    Victim {:03} at {} (from: {})\n",
                id.0,
                info.position,
                if sources.is_empty() { "?" } else { sources.as_str() }
            ));
        }
        out
    }
}

// ── MapSynchronizer ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
pub struct MapSynchronizer {
    width:  i32,
    height: i32,
    base:   Position,
}

impl MapSynchronizer {
    pub fn new(width: i32, height: i32, base: Position) -> Self {
        Self { width, height, base }
    }

    #[inline]
    fn within(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Fuse the given `(agent, map)` reports.
    pub fn fuse<'a, I>(&self, reports: I) -> FusionOutcome
    where
        I: IntoIterator<Item = (AgentId, &'a LocalMap)>,
    {
        let mut cells = LocalMap::new();
        let mut victims: BTreeMap<VictimId, VictimInfo> = BTreeMap::new();
        let mut per_agent = BTreeMap::new();

        for (agent, map) in reports {
            let mut clipped = LocalMap::new();
            for (p, cell) in map.cells().filter(|(p, _)| self.within(*p)) {
                clipped.insert(p, cell.clone());
            }

            let mut found = 0;
            for (p, id, cell) in clipped.victims() {
                found += 1;
                let report = VictimInfo::new(id, p)
                    .with_source(agent)
                    .with_signals(cell.vitals.clone());
                match victims.get_mut(&id) {
                    Some(existing) => {
                        if existing.position != p {
                            tracing::warn!(
                                victim = %id,
                                kept = %existing.position,
                                reported = %p,
                                "conflicting victim position ignored"
                            );
                        }
                        existing.merge_from(&report);
                    }
                    None => {
                        victims.insert(id, report);
                    }
                }
            }
            per_agent.insert(agent, found);
            cells.merge_from(&clipped);
        }

        let visited: BTreeSet<Position> = cells.visited_positions();
        let obstacles: BTreeSet<Position> = cells
            .cells()
            .filter(|(_, c)| c.status == CellStatus::Wall)
            .map(|(p, _)| p)
            .collect();
        let unified = UnifiedMap::from_parts(self.base, visited, obstacles, victims);

        let total_found: usize = per_agent.values().sum();
        let unique_victims = unified.victims.len();
        let overlap = if unique_victims == 0 {
            0.0
        } else {
            total_found as f64 / unique_victims as f64 - 1.0
        };
        let area = (self.width.max(0) as f64) * (self.height.max(0) as f64);
        let coverage = if area > 0.0 { unified.visited().len() as f64 / area } else { 0.0 };

        let metrics = FusionMetrics {
            width: self.width,
            height: self.height,
            base: self.base,
            per_agent,
            total_found,
            unique_victims,
            overlap,
            coverage,
            visited_cells: unified.visited().len(),
            obstacles: unified.obstacles().len(),
        };
        tracing::info!(
            explorers = metrics.per_agent.len(),
            visited   = metrics.visited_cells,
            obstacles = metrics.obstacles,
            victims   = metrics.unique_victims,
            overlap   = metrics.overlap,
            "maps fused"
        );

        FusionOutcome { unified, cells, metrics }
    }
}
