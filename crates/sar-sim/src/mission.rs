//! The `Mission` struct: exploration, fusion, clustering, rescue.

use sar_agent::{ExplorationAgent, RescueAgent, SteppingAgent};
use sar_core::{AgentId, AgentProfile, MissionConfig};
use sar_world::GridWorld;

use crate::coordinator::Coordinator;
use crate::observer::{MissionObserver, Phase};
use crate::report::MissionReport;
use crate::scheduler::run_phase;
use crate::{SimError, SimResult};

/// A complete search-and-rescue run over one [`GridWorld`].
///
/// [`run`][Self::run] drives the mission end to end:
///
/// 1. **Exploration**: every explorer is stepped once per tick, in
///    registration order, until all have halted (or `max_ticks`).
/// 2. **Barrier + fusion**: each explorer's report goes to the
///    [`Coordinator`]; the last one releases the barrier and the maps are
///    fused and victims classified.
/// 3. **Clustering**: fused victims are split into `config.clusters` groups
///    and dealt out to the rescuers, master first.
/// 4. **Rescue**: rescuers plan on private copies of the fused map and are
///    stepped like the explorers.
///
/// Create via [`MissionBuilder`][crate::MissionBuilder].
pub struct Mission {
    pub config:   MissionConfig,
    pub world:    GridWorld,
    explorer_ids: Vec<AgentId>,
    explorers:    Vec<ExplorationAgent>,
    rescuers:     Vec<(AgentId, AgentProfile)>,
    coordinator:  Coordinator,
    finished:     bool,
}

impl Mission {
    pub(crate) fn new(
        config:      MissionConfig,
        world:       GridWorld,
        explorers:   Vec<ExplorationAgent>,
        rescuers:    Vec<(AgentId, AgentProfile)>,
        coordinator: Coordinator,
    ) -> Self {
        let explorer_ids = explorers.iter().map(|e| e.id()).collect();
        Self { config, world, explorer_ids, explorers, rescuers, coordinator, finished: false }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn explorer_ids(&self) -> &[AgentId] {
        &self.explorer_ids
    }

    pub fn rescuer_ids(&self) -> Vec<AgentId> {
        self.rescuers.iter().map(|(id, _)| *id).collect()
    }

    /// Run the mission to completion.  A mission runs once.
    pub fn run<O: MissionObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<MissionReport> {
        if self.finished {
            return Err(SimError::Finished);
        }
        self.finished = true;
        let max_ticks = self.config.max_ticks;

        // ── Exploration ───────────────────────────────────────────────────
        observer.on_phase_start(Phase::Exploration);
        let outcome = run_phase(
            Phase::Exploration,
            self.explorers.as_mut_slice(),
            &mut self.world,
            max_ticks,
            &mut *observer,
        );
        observer.on_phase_end(Phase::Exploration, outcome.ticks);

        for explorer in std::mem::take(&mut self.explorers) {
            let report = explorer.into_report(&self.world);
            observer.on_explorer_report(&report);
            self.coordinator.receive_report(report)?;
        }
        let fusion = self.coordinator.fusion().ok_or(SimError::NotFused)?;
        observer.on_fusion(fusion);
        let unified = fusion.unified.clone();

        // ── Clustering ────────────────────────────────────────────────────
        let ids = self.rescuer_ids();
        let assignments = self.coordinator.plan_rescue(&ids)?;
        observer.on_assignments(assignments);

        // ── Rescue ────────────────────────────────────────────────────────
        let mut rescuers: Vec<RescueAgent> = self
            .rescuers
            .iter()
            .map(|(id, profile)| {
                let mut agent = RescueAgent::new(*id, profile, unified.clone());
                for a in self.coordinator.assignments_for(*id) {
                    agent.assign(&a.assignment);
                }
                agent
            })
            .collect();

        observer.on_phase_start(Phase::Rescue);
        let outcome = run_phase(
            Phase::Rescue,
            rescuers.as_mut_slice(),
            &mut self.world,
            max_ticks,
            &mut *observer,
        );
        observer.on_phase_end(Phase::Rescue, outcome.ticks);

        for rescuer in &rescuers {
            let report = rescuer.report(&self.world);
            observer.on_rescue_report(&report);
            self.coordinator.receive_rescue_report(report)?;
        }

        let summary = self.coordinator.summary();
        tracing::info!(
            victims = summary.victims.len(),
            aided   = summary.aided(),
            dead    = summary.dead_agents(),
            "mission complete"
        );
        observer.on_mission_end(&summary);
        Ok(summary)
    }
}
