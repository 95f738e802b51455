//! Victim partitioning and hand-out to rescuers.

use std::fmt;

use sar_core::{AgentId, ClusterId, TriageClass};
use sar_map::VictimInfo;
use sar_predict::MinMaxScaler;

use crate::kmeans::KMeans;
use crate::{ClusterError, ClusterResult};

// ── ClusterAssignment ─────────────────────────────────────────────────────────

/// One group of victims, consumed by exactly one rescuer.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment {
    /// One-based.
    pub cluster_id: ClusterId,
    /// Victims in id order; the rescuer visits them in this order.
    pub victims:    Vec<VictimInfo>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RescuerRole {
    Master,
    Worker,
}

impl fmt::Display for RescuerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RescuerRole::Master => "master",
            RescuerRole::Worker => "worker",
        })
    }
}

/// A cluster together with the rescuer that will work it.
#[derive(Clone, Debug, PartialEq)]
pub struct RescuerAssignment {
    pub rescuer:    AgentId,
    pub role:       RescuerRole,
    pub assignment: ClusterAssignment,
}

// ── ClusterAssigner ───────────────────────────────────────────────────────────

/// Splits victims into `k` groups on normalised
/// `(x, y, triage, survival)` features.
///
/// Victims without a prediction enter with triage 0 and survival 0.
#[derive(Copy, Clone, Debug)]
pub struct ClusterAssigner {
    k:    usize,
    seed: u64,
}

impl ClusterAssigner {
    pub fn new(k: usize, seed: u64) -> ClusterResult<Self> {
        if k == 0 {
            return Err(ClusterError::ZeroClusters);
        }
        Ok(Self { k, seed })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Exactly `k` assignments (some possibly empty) whose victims together
    /// are `victims`, each exactly once.
    pub fn partition(&self, victims: &[VictimInfo]) -> ClusterResult<Vec<ClusterAssignment>> {
        let mut groups: Vec<Vec<VictimInfo>> = vec![Vec::new(); self.k];

        if !victims.is_empty() {
            let features: Vec<Vec<f64>> = victims.iter().map(features_of).collect();
            let normalized = MinMaxScaler::fit_transform(&features)
                .map(|(_, rows)| rows)
                .map_err(|_| ClusterError::RaggedPoints)?;
            let fit = KMeans::new(self.k, self.seed).fit(&normalized)?;
            tracing::debug!(iterations = fit.iterations, k = self.k, "k-means converged");
            for (victim, label) in victims.iter().zip(fit.labels) {
                groups[label].push(victim.clone());
            }
        }

        Ok(groups
            .into_iter()
            .enumerate()
            .map(|(i, mut victims)| {
                victims.sort_by_key(|v| v.id);
                ClusterAssignment { cluster_id: ClusterId(i as u32 + 1), victims }
            })
            .collect())
    }
}

fn features_of(v: &VictimInfo) -> Vec<f64> {
    vec![
        v.position.x as f64,
        v.position.y as f64,
        v.triage.map_or(0.0, |t: TriageClass| t.index() as f64),
        v.survival.unwrap_or(0.0),
    ]
}

/// Hand clusters out round-robin over `rescuers`; the first rescuer is the
/// master, the rest are workers.  Clusters keep their order.
pub fn assign_round_robin(
    clusters: Vec<ClusterAssignment>,
    rescuers: &[AgentId],
) -> ClusterResult<Vec<RescuerAssignment>> {
    if rescuers.is_empty() {
        return Err(ClusterError::NoRescuers);
    }
    Ok(clusters
        .into_iter()
        .enumerate()
        .map(|(i, assignment)| {
            let slot = i % rescuers.len();
            RescuerAssignment {
                rescuer: rescuers[slot],
                role: if slot == 0 { RescuerRole::Master } else { RescuerRole::Worker },
                assignment,
            }
        })
        .collect())
}
