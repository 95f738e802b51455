//! `MissionReport` — the end-of-run summary.

use std::fmt;

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::{RescuerAssignment, RescuerRole};
use sar_core::{AgentId, AgentState, ClusterId, VictimId};
use sar_map::{FusionMetrics, VictimInfo};
use sar_predict::ModelMetrics;

/// How one explorer finished.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerOutcome {
    pub agent:     AgentId,
    pub name:      String,
    pub state:     AgentState,
    pub remaining: f64,
    pub moves:     u64,
    pub victims:   usize,
    /// Whether its map went into the fusion.
    pub fused:     bool,
}

impl ExplorerOutcome {
    pub(crate) fn from_report(report: &ExplorerReport, fused: bool) -> Self {
        Self {
            agent:     report.agent,
            name:      report.name.clone(),
            state:     report.state,
            remaining: report.remaining,
            moves:     report.moves,
            victims:   report.victim_ids().len(),
            fused,
        }
    }
}

/// One cluster hand-out, without the victim payload.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentSummary {
    pub cluster_id: ClusterId,
    pub rescuer:    AgentId,
    pub role:       RescuerRole,
    pub victims:    Vec<VictimId>,
}

impl From<&RescuerAssignment> for AssignmentSummary {
    fn from(a: &RescuerAssignment) -> Self {
        Self {
            cluster_id: a.assignment.cluster_id,
            rescuer:    a.rescuer,
            role:       a.role,
            victims:    a.assignment.victims.iter().map(|v| v.id).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MissionReport {
    pub explorers:   Vec<ExplorerOutcome>,
    /// `None` when the explorer barrier never released.
    pub fusion:      Option<FusionMetrics>,
    /// Fused victims in id order, with predictions applied.
    pub victims:     Vec<VictimInfo>,
    pub model:       Option<ModelMetrics>,
    pub assignments: Vec<AssignmentSummary>,
    pub rescues:     Vec<RescueReport>,
}

impl MissionReport {
    /// Victims aided by any rescuer.
    pub fn aided(&self) -> usize {
        self.rescues.iter().map(|r| r.completed.len()).sum()
    }

    pub fn unreachable(&self) -> usize {
        self.rescues.iter().map(|r| r.unreachable.len()).sum()
    }

    pub fn dead_agents(&self) -> usize {
        self.explorers.iter().filter(|e| e.state == AgentState::Dead).count()
            + self.rescues.iter().filter(|r| r.state == AgentState::Dead).count()
    }
}

impl fmt::Display for MissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLORATION ===")?;
        for e in &self.explorers {
            writeln!(
                f,
                "{} ({}): {} | remaining {:.2} | moves {} | victims {}{}",
                e.agent,
                e.name,
                e.state.as_str(),
                e.remaining,
                e.moves,
                e.victims,
                if e.fused { "" } else { " | not fused" }
            )?;
        }

        match &self.fusion {
            Some(metrics) => write!(f, "{metrics}")?,
            None => writeln!(f, "Maps were not fused.")?,
        }

        if let Some(m) = &self.model {
            writeln!(f, "=== PREDICTOR ===")?;
            writeln!(
                f,
                "tri accuracy {:.3} | sobr MAE {:.3} | train {} | test {}",
                m.tri_accuracy, m.sobr_mae, m.train_rows, m.test_rows
            )?;
        }

        writeln!(f, "=== RESCUE ===")?;
        for a in &self.assignments {
            let ids = a.victims.iter().map(|v| v.0.to_string()).collect::<Vec<_>>().join(", ");
            writeln!(f, "{} -> {} ({}): [{}]", a.cluster_id, a.rescuer, a.role, ids)?;
        }
        for r in &self.rescues {
            writeln!(
                f,
                "{} ({}): {} | remaining {:.2} | aided {} | unreachable {} | at base: {}",
                r.agent,
                r.name,
                r.state.as_str(),
                r.remaining,
                r.completed.len(),
                r.unreachable.len(),
                if r.returned_to_base { "yes" } else { "no" }
            )?;
        }
        writeln!(
            f,
            "Victims aided: {}/{} | unreachable: {} | dead agents: {}",
            self.aided(),
            self.victims.len(),
            self.unreachable(),
            self.dead_agents()
        )
    }
}
