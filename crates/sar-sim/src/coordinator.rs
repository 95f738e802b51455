//! `Coordinator` — collects agent reports, fuses maps, hands out clusters.
//!
//! # Lifecycle
//!
//! ```text
//! receive_report × N  ──(barrier)──▶ fuse + predict ──▶ plan_rescue
//!                                                          │
//! summary ◀── receive_rescue_report × M ◀──────────────────┘
//! ```
//!
//! Fusion happens exactly once, when the last expected explorer report
//! arrives.  Explorers that died of exhaustion are left out of the fusion
//! unless `MissionConfig::fuse_dead_reports` is set.

use std::collections::{BTreeMap, BTreeSet};

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::{assign_round_robin, ClusterAssigner, RescuerAssignment};
use sar_core::{AgentId, AgentState, MissionConfig};
use sar_map::{FusionOutcome, MapSynchronizer, UnifiedMap};
use sar_predict::TriagePredictor;

use crate::latch::{Arrival, ReportLatch};
use crate::report::{AssignmentSummary, ExplorerOutcome, MissionReport};
use crate::{SimError, SimResult};

pub struct Coordinator {
    config:       MissionConfig,
    synchronizer: MapSynchronizer,
    predictor:    Option<Box<dyn TriagePredictor>>,

    latch:        ReportLatch<ExplorerReport>,
    reported:     BTreeSet<AgentId>,
    /// Every explorer report, in arrival order, once the latch released.
    reports:      Vec<ExplorerReport>,
    fused_agents: BTreeSet<AgentId>,
    fusion:       Option<FusionOutcome>,

    assignments:  Vec<RescuerAssignment>,
    rescues:      BTreeMap<AgentId, RescueReport>,
}

impl Coordinator {
    /// A coordinator waiting for `explorers` reports.  With zero explorers
    /// the (empty) fusion happens immediately.
    pub fn new(config: MissionConfig, synchronizer: MapSynchronizer, explorers: usize) -> Self {
        let mut coordinator = Self {
            config,
            synchronizer,
            predictor: None,
            latch: ReportLatch::new(explorers),
            reported: BTreeSet::new(),
            reports: Vec::new(),
            fused_agents: BTreeSet::new(),
            fusion: None,
            assignments: Vec::new(),
            rescues: BTreeMap::new(),
        };
        if let Some(reports) = coordinator.latch.try_release() {
            coordinator.release(reports);
        }
        coordinator
    }

    /// Predictor applied to every fused victim with a vital-sign reading.
    pub fn with_predictor(mut self, predictor: Box<dyn TriagePredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    // ── Exploration reports ───────────────────────────────────────────────

    /// Accept one explorer's final report.  Returns the fusion result when
    /// this report was the last one the barrier waited for.
    pub fn receive_report(&mut self, report: ExplorerReport) -> SimResult<Option<&FusionOutcome>> {
        if !self.reported.insert(report.agent) {
            return Err(SimError::DuplicateReport(report.agent));
        }
        tracing::debug!(agent = %report.agent, state = report.state.as_str(), "explorer report received");

        match self.latch.arrive(report)? {
            Arrival::Waiting { remaining } => {
                tracing::debug!(remaining, "waiting for explorer reports");
                Ok(None)
            }
            Arrival::Released(reports) => {
                self.release(reports);
                Ok(self.fusion.as_ref())
            }
        }
    }

    pub fn pending_reports(&self) -> usize {
        self.latch.remaining()
    }

    pub fn is_fused(&self) -> bool {
        self.fusion.is_some()
    }

    pub fn fusion(&self) -> Option<&FusionOutcome> {
        self.fusion.as_ref()
    }

    pub fn unified(&self) -> Option<&UnifiedMap> {
        self.fusion.as_ref().map(|f| &f.unified)
    }

    pub fn explorer_reports(&self) -> &[ExplorerReport] {
        &self.reports
    }

    fn release(&mut self, reports: Vec<ExplorerReport>) {
        let fuse_dead = self.config.fuse_dead_reports;
        for r in &reports {
            if r.state == AgentState::Dead && !fuse_dead {
                tracing::warn!(agent = %r.agent, "dead explorer left out of the fusion");
            } else {
                self.fused_agents.insert(r.agent);
            }
        }

        let fused = &self.fused_agents;
        let mut outcome = self
            .synchronizer
            .fuse(reports.iter().filter(|r| fused.contains(&r.agent)).map(|r| (r.agent, &r.map)));

        if let Some(predictor) = &self.predictor {
            apply_predictions(predictor.as_ref(), &mut outcome.unified);
        }

        self.reports = reports;
        self.fusion = Some(outcome);
    }

    // ── Rescue ────────────────────────────────────────────────────────────

    /// Cluster the fused victims and deal the clusters out to `rescuers`
    /// (the first one is the master).
    pub fn plan_rescue(&mut self, rescuers: &[AgentId]) -> SimResult<&[RescuerAssignment]> {
        let unified = self.unified().ok_or(SimError::NotFused)?;
        let victims: Vec<_> = unified.victims.values().cloned().collect();

        let clusters = ClusterAssigner::new(self.config.clusters, self.config.seed)?.partition(&victims)?;
        self.assignments = assign_round_robin(clusters, rescuers)?;

        for a in &self.assignments {
            tracing::info!(
                cluster = %a.assignment.cluster_id,
                rescuer = %a.rescuer,
                role    = %a.role,
                victims = a.assignment.victims.len(),
                "cluster assigned"
            );
        }
        Ok(&self.assignments)
    }

    pub fn assignments(&self) -> &[RescuerAssignment] {
        &self.assignments
    }

    /// Assignments for one rescuer, in cluster order.
    pub fn assignments_for(&self, rescuer: AgentId) -> impl Iterator<Item = &RescuerAssignment> + '_ {
        self.assignments.iter().filter(move |a| a.rescuer == rescuer)
    }

    pub fn receive_rescue_report(&mut self, report: RescueReport) -> SimResult<()> {
        if self.rescues.contains_key(&report.agent) {
            return Err(SimError::DuplicateReport(report.agent));
        }
        tracing::debug!(
            agent     = %report.agent,
            state     = report.state.as_str(),
            completed = report.completed.len(),
            "rescue report received"
        );
        self.rescues.insert(report.agent, report);
        Ok(())
    }

    // ── Summary ───────────────────────────────────────────────────────────

    pub fn summary(&self) -> MissionReport {
        MissionReport {
            explorers:   self
                .reports
                .iter()
                .map(|r| ExplorerOutcome::from_report(r, self.fused_agents.contains(&r.agent)))
                .collect(),
            fusion:      self.fusion.as_ref().map(|f| f.metrics.clone()),
            victims:     self
                .unified()
                .map(|u| u.victims.values().cloned().collect())
                .unwrap_or_default(),
            model:       self.predictor.as_ref().and_then(|p| p.quality()),
            assignments: self.assignments.iter().map(AssignmentSummary::from).collect(),
            rescues:     self.rescues.values().cloned().collect(),
        }
    }
}

/// Fill in triage and survival for every victim whose signals fit the
/// predictor.  Victims without a usable reading stay unpredicted.
fn apply_predictions(predictor: &dyn TriagePredictor, unified: &mut UnifiedMap) {
    let expected = predictor.feature_count();
    for victim in unified.victims.values_mut() {
        if victim.signals.is_empty() {
            continue;
        }
        if victim.signals.len() != expected {
            tracing::warn!(
                victim   = %victim.id,
                expected,
                got      = victim.signals.len(),
                "vital-sign reading does not fit the predictor"
            );
            continue;
        }
        match predictor.predict(&victim.signals) {
            Ok(p) => {
                victim.triage = Some(p.triage);
                victim.survival = Some(p.survival);
            }
            Err(e) => tracing::warn!(victim = %victim.id, error = %e, "prediction failed"),
        }
    }
}
