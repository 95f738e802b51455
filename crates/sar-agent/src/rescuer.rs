//! `RescueAgent` — plans routes over the fused map and executes them one
//! action per step.
//!
//! # Planning
//!
//! From the current position, the rescuer routes to each outstanding victim
//! in assignment order, then back to the base, and flattens the legs into a
//! queue of moves and aid actions.  A victim with no route from the planning
//! cursor is marked unreachable and skipped for good.
//!
//! # Stale maps
//!
//! The rescuer plans on its own copy of the [`UnifiedMap`].  A bump adds the
//! blocked cell to that copy only, drops the queue and replans from where
//! the rescuer stands; the shared map is never written.

use std::collections::VecDeque;

use sar_core::{AgentId, AgentProfile, AgentState, ClusterId, Position, VictimId};
use sar_cluster::ClusterAssignment;
use sar_map::{BfsRouter, Router, UnifiedMap, VictimInfo};
use sar_world::{AidOutcome, Environment, WalkOutcome};

use crate::report::RescueReport;
use crate::stepping::{StepOutcome, SteppingAgent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Action {
    Move(Position),
    Aid(VictimId),
}

pub struct RescueAgent<R: Router = BfsRouter> {
    id:          AgentId,
    name:        String,
    router:      R,
    map:         UnifiedMap,

    clusters:    Vec<ClusterId>,
    /// Victims still to be aided, in visiting order.
    targets:     VecDeque<VictimInfo>,
    queue:       VecDeque<Action>,
    completed:   Vec<VictimId>,
    unreachable: Vec<VictimId>,

    started:     bool,
    pos:         Position,
    state:       AgentState,
    replans:     u32,
}

impl RescueAgent<BfsRouter> {
    pub fn new(id: AgentId, profile: &AgentProfile, map: UnifiedMap) -> Self {
        Self::with_router(id, profile, map, BfsRouter)
    }
}

impl<R: Router> RescueAgent<R> {
    pub fn with_router(id: AgentId, profile: &AgentProfile, map: UnifiedMap, router: R) -> Self {
        let pos = map.base();
        Self {
            id,
            name: profile.name.clone(),
            router,
            map,
            clusters: Vec::new(),
            targets: VecDeque::new(),
            queue: VecDeque::new(),
            completed: Vec::new(),
            unreachable: Vec::new(),
            started: false,
            pos,
            state: AgentState::Active,
            replans: 0,
        }
    }

    /// Append a cluster's victims to the work list.  Takes effect at the
    /// next (re)plan.
    pub fn assign(&mut self, assignment: &ClusterAssignment) {
        self.clusters.push(assignment.cluster_id);
        self.targets.extend(assignment.victims.iter().cloned());
        if self.started {
            self.plan();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// The rescuer's private view, including its own obstacle corrections.
    pub fn map(&self) -> &UnifiedMap {
        &self.map
    }

    pub fn replans(&self) -> u32 {
        self.replans
    }

    pub fn report(&self, env: &dyn Environment) -> RescueReport {
        RescueReport {
            agent:            self.id,
            name:             self.name.clone(),
            state:            self.state,
            remaining:        env.remaining_time(self.id),
            clusters:         self.clusters.clone(),
            completed:        self.completed.clone(),
            unreachable:      self.unreachable.clone(),
            returned_to_base: self.pos == self.map.base(),
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    fn plan(&mut self) {
        self.queue.clear();
        let mut cursor = self.pos;
        let mut kept = VecDeque::with_capacity(self.targets.len());

        while let Some(victim) = self.targets.pop_front() {
            let path = self.router.route(&self.map, cursor, victim.position);
            if path.is_empty() {
                tracing::warn!(
                    agent  = %self.id,
                    victim = %victim.id,
                    pos    = %victim.position,
                    "victim unreachable, skipped"
                );
                self.unreachable.push(victim.id);
                continue;
            }
            self.queue.extend(path.into_iter().skip(1).map(Action::Move));
            self.queue.push_back(Action::Aid(victim.id));
            cursor = victim.position;
            kept.push_back(victim);
        }
        self.targets = kept;

        let home = self.router.route(&self.map, cursor, self.map.base());
        if home.is_empty() {
            tracing::warn!(agent = %self.id, from = %cursor, "no route back to base");
        }
        self.queue.extend(home.into_iter().skip(1).map(Action::Move));
        tracing::debug!(agent = %self.id, actions = self.queue.len(), "rescue plan ready");
    }

    fn finish(&mut self, env: &mut dyn Environment, state: AgentState) -> StepOutcome {
        self.state = state;
        env.set_state(self.id, state);
        match state {
            AgentState::Dead => {
                tracing::warn!(agent = %self.id, pos = %self.pos, "rescuer ran out of time")
            }
            AgentState::Idle => {
                tracing::warn!(agent = %self.id, pos = %self.pos, "rescuer cannot return to base")
            }
            _ => tracing::info!(
                agent       = %self.id,
                completed   = self.completed.len(),
                unreachable = self.unreachable.len(),
                "rescuer back at base"
            ),
        }
        StepOutcome::Halt
    }
}

impl<R: Router> SteppingAgent for RescueAgent<R> {
    fn id(&self) -> AgentId {
        self.id
    }

    fn state(&self) -> AgentState {
        self.state
    }

    fn step(&mut self, env: &mut dyn Environment) -> StepOutcome {
        if self.state.is_terminal() {
            return StepOutcome::Halt;
        }
        if !self.started {
            self.started = true;
            self.pos = env.base();
            self.plan();
        }
        if env.remaining_time(self.id) < 0.0 {
            return self.finish(env, AgentState::Dead);
        }

        let Some(action) = self.queue.pop_front() else {
            let state = if self.pos == self.map.base() { AgentState::Ended } else { AgentState::Idle };
            return self.finish(env, state);
        };

        match action {
            Action::Move(target) => {
                let (dx, dy) = self.pos.delta_to(target);
                match env.walk(self.id, dx, dy) {
                    WalkOutcome::Executed => {
                        self.pos = target;
                        StepOutcome::Continue
                    }
                    WalkOutcome::Bumped => {
                        tracing::debug!(agent = %self.id, blocked = %target, "stale map, replanning");
                        self.map.add_obstacle(target);
                        self.replans += 1;
                        self.plan();
                        StepOutcome::Continue
                    }
                    WalkOutcome::TimeExceeded => self.finish(env, AgentState::Dead),
                }
            }
            Action::Aid(victim) => match env.administer_aid(self.id) {
                AidOutcome::Aided => {
                    self.targets.retain(|v| v.id != victim);
                    self.completed.push(victim);
                    tracing::debug!(agent = %self.id, victim = %victim, "aid administered");
                    StepOutcome::Continue
                }
                AidOutcome::NoVictim => {
                    self.targets.retain(|v| v.id != victim);
                    tracing::warn!(agent = %self.id, victim = %victim, pos = %self.pos, "no victim at expected cell");
                    StepOutcome::Continue
                }
                AidOutcome::TimeExceeded => self.finish(env, AgentState::Dead),
            },
        }
    }
}
