//! `ExplorationAgent` — online depth-first exploration under a time budget.
//!
//! # Per-step contract
//!
//! Each [`step`][SteppingAgent::step] performs at most one charged action:
//!
//! 1. First call: start at the base with the base on the path stack.
//! 2. Negative budget: terminate as `Dead`.
//! 3. Mark the current cell visited.  On the first visit, sense for a victim
//!    and read its vital signs (a read that exhausts the budget is fatal).
//! 4. Reservation: if `manhattan(pos, base) * cost.line >= remaining`, start
//!    returning and do nothing else this step.
//! 5. Exploring: probe the eight neighbours, pick an unvisited clear one and
//!    walk to it, re-checking the reservation from the target first.  A bump
//!    records the target as a wall.  Each newly reached cell is annotated
//!    with its parent on the path stack and the measured cost of the tree
//!    path from the base.  Without candidates, step back along the path
//!    stack; with only the base left on it, start returning.
//! 6. Returning: take the greedy diagonal-first step toward the base; after a
//!    bump, retrace the path stack instead.  At the base the explorer ends;
//!    if neither move is possible it stops `Idle` where it stands.
//!
//! The reservation estimate is a lower bound on the cost home, never a
//! ledger: the budget itself is only ever read back from the environment.

use std::collections::BTreeSet;

use sar_core::{AgentId, AgentProfile, AgentState, CostModel, Direction, Position};
use sar_map::{CellStatus, LocalMap};
use sar_world::{Environment, Probe, VitalsOutcome, WalkOutcome};

use crate::chooser::NeighborChooser;
use crate::report::ExplorerReport;
use crate::stepping::{StepOutcome, SteppingAgent};

#[derive(Debug)]
pub struct ExplorationAgent {
    id:        AgentId,
    name:      String,
    costs:     CostModel,
    chooser:   NeighborChooser,

    started:   bool,
    base:      Position,
    pos:       Position,
    /// Path from the base to `pos`; `stack.last() == Some(&pos)`.
    stack:     Vec<Position>,
    visited:   BTreeSet<Position>,
    obstacles: BTreeSet<Position>,
    returning: bool,
    /// Set after the greedy return bumped; from then on only the stack is used.
    retracing: bool,

    map:       LocalMap,
    state:     AgentState,
    cycle:     u64,
    moves:     u64,
}

impl ExplorationAgent {
    pub fn new(id: AgentId, profile: &AgentProfile, chooser: NeighborChooser) -> Self {
        Self {
            id,
            name: profile.name.clone(),
            costs: profile.costs,
            chooser,
            started: false,
            base: Position::default(),
            pos: Position::default(),
            stack: Vec::new(),
            visited: BTreeSet::new(),
            obstacles: BTreeSet::new(),
            returning: false,
            retracing: false,
            map: LocalMap::new(),
            state: AgentState::Active,
            cycle: 0,
            moves: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    pub fn visited(&self) -> &BTreeSet<Position> {
        &self.visited
    }

    pub fn obstacles(&self) -> &BTreeSet<Position> {
        &self.obstacles
    }

    pub fn map(&self) -> &LocalMap {
        &self.map
    }

    /// Hand the map over to the coordinator.
    pub fn into_report(self, env: &dyn Environment) -> ExplorerReport {
        ExplorerReport {
            agent:     self.id,
            remaining: env.remaining_time(self.id),
            name:      self.name,
            state:     self.state,
            moves:     self.moves,
            map:       self.map,
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn start(&mut self, env: &dyn Environment) {
        self.started = true;
        self.base = env.base();
        self.pos = self.base;
        self.stack = vec![self.base];
        self.map.record_cell(self.id, self.pos, CellStatus::Clear, 0, None);
        self.map.record_plan(self.base, 0.0, None);
    }

    /// Record the DFS tree edge `parent -> child` just walked.
    fn record_tree_edge(&mut self, parent: Position, child: Position) {
        let from = self.map.get(parent).and_then(|c| c.g_cost).unwrap_or(0.0);
        let (dx, dy) = parent.delta_to(child);
        let difficulty = self.map.get(child).and_then(|c| c.difficulty).unwrap_or(1.0);
        let g_cost = from + self.costs.move_cost(dx, dy) * difficulty;
        self.map.record_plan(child, g_cost, Some(parent));
    }

    /// `true` once the cheapest conceivable trip home from `from` no longer
    /// fits in `remaining`.
    fn reservation_exceeded(&self, from: Position, remaining: f64) -> bool {
        from.manhattan(self.base) as f64 * self.costs.line >= remaining
    }

    fn finish(&mut self, env: &mut dyn Environment, state: AgentState) -> StepOutcome {
        self.state = state;
        env.set_state(self.id, state);
        match state {
            AgentState::Dead => {
                tracing::warn!(agent = %self.id, pos = %self.pos, "explorer ran out of time")
            }
            AgentState::Idle => {
                tracing::warn!(agent = %self.id, pos = %self.pos, "explorer stuck on the way back")
            }
            _ => tracing::info!(
                agent   = %self.id,
                visited = self.visited.len(),
                victims = self.map.victim_count(),
                "explorer back at base"
            ),
        }
        StepOutcome::Halt
    }

    /// Sense the current cell on its first visit.  `false` if the vital-sign
    /// read exhausted the budget.
    fn visit(&mut self, env: &mut dyn Environment) -> bool {
        if !self.visited.insert(self.pos) {
            return true;
        }
        let step = self.cycle as i64;
        self.map.record_cell(self.id, self.pos, CellStatus::Clear, step, None);

        let Some(victim) = env.sense_victim(self.id) else {
            return true;
        };
        match env.read_vital_signs(self.id) {
            VitalsOutcome::Read(vitals) => {
                tracing::debug!(agent = %self.id, victim = %victim, pos = %self.pos, "victim found");
                self.map.record_victim(self.id, self.pos, victim, Some(vitals), self.cycle);
                true
            }
            VitalsOutcome::TimeExceeded => {
                self.map.record_victim(self.id, self.pos, victim, None, self.cycle);
                false
            }
        }
    }

    /// Walk one cell to `target` (must be adjacent).  On success, updates the
    /// position and records the measured difficulty; on a bump, records the
    /// target as a wall.
    fn move_to(&mut self, env: &mut dyn Environment, target: Position) -> WalkOutcome {
        let (dx, dy) = self.pos.delta_to(target);
        let before = env.remaining_time(self.id);
        let outcome = env.walk(self.id, dx, dy);
        match outcome {
            WalkOutcome::Executed => {
                let spent = before - env.remaining_time(self.id);
                let difficulty = spent / self.costs.move_cost(dx, dy);
                self.pos = target;
                self.moves += 1;
                self.map.record_cell(
                    self.id,
                    target,
                    CellStatus::Clear,
                    self.cycle as i64,
                    Some(difficulty),
                );
            }
            WalkOutcome::Bumped => {
                self.obstacles.insert(target);
                self.map.record_status(self.id, target, CellStatus::Wall, self.cycle as i64);
            }
            WalkOutcome::TimeExceeded => {}
        }
        outcome
    }

    /// Keep `stack` a chain from the base after moving to `pos` outside the
    /// normal push/pop discipline.
    fn rejoin_stack(&mut self, pos: Position) {
        match self.stack.iter().rposition(|&q| q == pos) {
            Some(i) => self.stack.truncate(i + 1),
            None => self.stack.push(pos),
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn explore(&mut self, env: &mut dyn Environment) -> StepOutcome {
        let probe = env.probe_neighbors(self.id);
        let mut observed = Vec::with_capacity(8);
        let mut candidates = Vec::with_capacity(8);
        for (dir, result) in Direction::ALL.into_iter().zip(probe) {
            let n = self.pos.step(dir);
            let status = match result {
                Probe::Clear       => CellStatus::Clear,
                Probe::Wall        => CellStatus::Wall,
                Probe::OutOfBounds => CellStatus::OutOfBounds,
            };
            if status.is_obstacle() {
                self.obstacles.insert(n);
            } else if !self.visited.contains(&n) && !self.obstacles.contains(&n) {
                candidates.push(dir);
            }
            observed.push((n, status));
        }
        self.map.record_neighbors(self.id, self.pos, &observed, self.cycle as i64);

        if let Some(dir) = self.chooser.choose(&candidates) {
            let next = self.pos.step(dir);
            if self.reservation_exceeded(next, env.remaining_time(self.id)) {
                tracing::debug!(agent = %self.id, pos = %self.pos, "reservation reached, returning");
                self.returning = true;
                return StepOutcome::Continue;
            }
            let here = self.pos;
            return match self.move_to(env, next) {
                WalkOutcome::Executed => {
                    self.record_tree_edge(here, next);
                    self.stack.push(next);
                    StepOutcome::Continue
                }
                WalkOutcome::Bumped => StepOutcome::Continue,
                WalkOutcome::TimeExceeded => self.finish(env, AgentState::Dead),
            };
        }

        // Dead end: backtrack.
        if self.stack.len() <= 1 {
            self.returning = true;
            return StepOutcome::Continue;
        }
        let prev = self.stack[self.stack.len() - 2];
        match self.move_to(env, prev) {
            WalkOutcome::Executed => {
                self.stack.pop();
                StepOutcome::Continue
            }
            WalkOutcome::Bumped => {
                self.returning = true;
                StepOutcome::Continue
            }
            WalkOutcome::TimeExceeded => self.finish(env, AgentState::Dead),
        }
    }

    fn go_home(&mut self, env: &mut dyn Environment) -> StepOutcome {
        if self.pos == self.base {
            return self.finish(env, AgentState::Ended);
        }

        if !self.retracing {
            let greedy = self.pos.step_toward(self.base);
            if !self.obstacles.contains(&greedy) {
                let here = self.pos;
                match self.move_to(env, greedy) {
                    WalkOutcome::Executed => {
                        if self.map.get(greedy).is_some_and(|c| c.g_cost.is_none()) {
                            self.record_tree_edge(here, greedy);
                        }
                        self.rejoin_stack(greedy);
                        return self.arrived_or_continue(env);
                    }
                    WalkOutcome::TimeExceeded => return self.finish(env, AgentState::Dead),
                    WalkOutcome::Bumped => {
                        self.retracing = true;
                        return StepOutcome::Continue;
                    }
                }
            }
            self.retracing = true;
        }

        if self.stack.len() > 1 {
            let prev = self.stack[self.stack.len() - 2];
            match self.move_to(env, prev) {
                WalkOutcome::Executed => {
                    self.stack.pop();
                    return self.arrived_or_continue(env);
                }
                WalkOutcome::TimeExceeded => return self.finish(env, AgentState::Dead),
                WalkOutcome::Bumped => {}
            }
        }
        self.finish(env, AgentState::Idle)
    }

    fn arrived_or_continue(&mut self, env: &mut dyn Environment) -> StepOutcome {
        if self.pos == self.base {
            self.finish(env, AgentState::Ended)
        } else {
            StepOutcome::Continue
        }
    }
}

impl SteppingAgent for ExplorationAgent {
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
            self.start(env);
        }
        self.cycle += 1;

        if env.remaining_time(self.id) < 0.0 {
            return self.finish(env, AgentState::Dead);
        }
        if !self.visit(env) {
            return self.finish(env, AgentState::Dead);
        }

        if !self.returning && self.reservation_exceeded(self.pos, env.remaining_time(self.id)) {
            tracing::debug!(agent = %self.id, pos = %self.pos, "reservation reached, returning");
            self.returning = true;
            return StepOutcome::Continue;
        }

        if self.returning { self.go_home(env) } else { self.explore(env) }
    }
}
