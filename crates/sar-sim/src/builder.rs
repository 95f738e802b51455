//! Fluent builder for constructing a [`Mission`].

use sar_agent::{ExplorationAgent, NeighborChooser};
use sar_core::{AgentProfile, MissionConfig};
use sar_map::MapSynchronizer;
use sar_predict::TriagePredictor;
use sar_world::{Environment, GridWorld};

use crate::coordinator::Coordinator;
use crate::{Mission, SimError, SimResult};

/// Fluent builder for [`Mission`].
///
/// # Required inputs
///
/// - [`MissionConfig`]: seed, cluster count, tick cap, neighbour policy, …
/// - [`GridWorld`]: the simulated environment
/// - at least one rescuer profile (the first becomes the master)
///
/// # Optional inputs
///
/// | Method             | Default                              |
/// |--------------------|--------------------------------------|
/// | `.explorer(p)`     | No explorers (fusion knows the base) |
/// | `.predictor(p)`    | Victims stay unclassified            |
///
/// Agents are spawned in the world in registration order: explorers first,
/// then rescuers.
///
/// # Example
///
/// ```rust,ignore
/// let mut mission = MissionBuilder::new(config, world)
///     .explorers(3, AgentProfile::new("explorer", 500.0))
///     .rescuer(AgentProfile::new("master", 800.0))
///     .predictor(VictimPredictor::train(&dataset, 5, 42)?)
///     .build()?;
/// let report = mission.run(&mut NoopObserver)?;
/// ```
pub struct MissionBuilder {
    config:    MissionConfig,
    world:     GridWorld,
    explorers: Vec<AgentProfile>,
    rescuers:  Vec<AgentProfile>,
    predictor: Option<Box<dyn TriagePredictor>>,
}

impl MissionBuilder {
    pub fn new(config: MissionConfig, world: GridWorld) -> Self {
        Self {
            config,
            world,
            explorers: Vec::new(),
            rescuers:  Vec::new(),
            predictor: None,
        }
    }

    pub fn explorer(mut self, profile: AgentProfile) -> Self {
        self.explorers.push(profile);
        self
    }

    /// Register `n` explorers named `"{name}-{i}"` from one profile.
    pub fn explorers(mut self, n: usize, profile: AgentProfile) -> Self {
        for i in 0..n {
            let mut p = profile.clone();
            p.name = format!("{}-{}", profile.name, i + 1);
            self.explorers.push(p);
        }
        self
    }

    pub fn rescuer(mut self, profile: AgentProfile) -> Self {
        self.rescuers.push(profile);
        self
    }

    pub fn predictor(mut self, predictor: impl TriagePredictor + 'static) -> Self {
        self.predictor = Some(Box::new(predictor));
        self
    }

    /// Validate inputs, spawn every agent and return a ready-to-run
    /// [`Mission`].
    pub fn build(self) -> SimResult<Mission> {
        self.config.validate()?;
        for profile in self.explorers.iter().chain(&self.rescuers) {
            profile.validate()?;
        }
        if self.rescuers.is_empty() {
            return Err(SimError::Config("at least one rescuer (the master) is required".into()));
        }

        let mut world = self.world;
        let explorers: Vec<ExplorationAgent> = self
            .explorers
            .iter()
            .enumerate()
            .map(|(slot, profile)| {
                let id = world.spawn(profile);
                let chooser =
                    NeighborChooser::for_explorer(self.config.neighbor_policy, slot, self.config.seed, id);
                ExplorationAgent::new(id, profile, chooser)
            })
            .collect();
        let rescuers = self
            .rescuers
            .into_iter()
            .map(|profile| (world.spawn(&profile), profile))
            .collect();

        let synchronizer = MapSynchronizer::new(world.width(), world.height(), world.base());
        let mut coordinator = Coordinator::new(self.config.clone(), synchronizer, explorers.len());
        if let Some(predictor) = self.predictor {
            coordinator = coordinator.with_predictor(predictor);
        }

        tracing::info!(
            explorers = explorers.len(),
            rescuers  = world.agent_count() - explorers.len(),
            width     = world.width(),
            height    = world.height(),
            "mission ready"
        );
        Ok(Mission::new(self.config, world, explorers, rescuers, coordinator))
    }
}
