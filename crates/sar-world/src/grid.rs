//! Reference grid-world simulator and its builder.
//!
//! # Data layout
//!
//! Terrain is a dense row-major `Vec<Terrain>` of `width * height` cells;
//! `Position { x, y }` maps to index `y * width + x`.  Victims are sparse
//! (`BTreeMap<Position, VictimId>`), at most one per cell.
//!
//! # Charging
//!
//! Every charged action deducts its cost *before* the outcome is decided.
//! If the deduction leaves the budget negative the action reports
//! `TimeExceeded` and has no other effect.  Bumping into a wall or the grid
//! edge costs the base move cost (no difficulty scaling).

use std::collections::BTreeMap;

use sar_core::{AgentId, AgentProfile, AgentState, CostModel, Direction, Position, VictimId};

use crate::env::{AidOutcome, Environment, Probe, VitalsOutcome, WalkOutcome};
use crate::{WorldError, WorldResult};

/// Difficulty at or above which a loaded cell is a wall.
pub const WALL_DIFFICULTY: f64 = 100.0;

// ── Terrain ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Terrain {
    /// Passable; movement cost multiplier.
    Open(f64),
    Wall,
}

// ── Per-agent body ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Body {
    name:      String,
    pos:       Position,
    remaining: f64,
    costs:     CostModel,
    state:     AgentState,
}

impl Body {
    /// Deduct `cost`; `true` if the budget is still non-negative.
    #[inline]
    fn charge(&mut self, cost: f64) -> bool {
        self.remaining -= cost;
        self.remaining >= 0.0
    }
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// A bounded 2-D grid with walls, per-cell difficulty, victims, and the
/// bodies of every spawned agent.
///
/// Do not construct directly; use [`GridWorldBuilder`] or
/// [`load_world_dir`][crate::load_world_dir].
#[derive(Clone, Debug)]
pub struct GridWorld {
    width:   i32,
    height:  i32,
    base:    Position,
    terrain: Vec<Terrain>,
    victims: BTreeMap<Position, VictimId>,
    vitals:  BTreeMap<VictimId, Vec<f64>>,
    bodies:  Vec<Body>,
    /// First rescuer to aid each victim.
    aided:   BTreeMap<VictimId, AgentId>,
}

impl GridWorld {
    pub fn builder(width: i32, height: i32, base: Position) -> GridWorldBuilder {
        GridWorldBuilder::new(width, height, base)
    }

    // ── Dimensions & terrain ──────────────────────────────────────────────

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Terrain at `p`; `None` outside the grid.
    #[inline]
    pub fn terrain(&self, p: Position) -> Option<Terrain> {
        self.in_bounds(p)
            .then(|| self.terrain[(p.y * self.width + p.x) as usize])
    }

    pub fn is_wall(&self, p: Position) -> bool {
        matches!(self.terrain(p), Some(Terrain::Wall))
    }

    // ── Victims ───────────────────────────────────────────────────────────

    pub fn victim_count(&self) -> usize {
        self.victims.len()
    }

    pub fn victim_at(&self, p: Position) -> Option<VictimId> {
        self.victims.get(&p).copied()
    }

    /// All victims as `(position, id)` in position order.
    pub fn victims(&self) -> impl Iterator<Item = (Position, VictimId)> + '_ {
        self.victims.iter().map(|(&p, &v)| (p, v))
    }

    pub fn is_aided(&self, victim: VictimId) -> bool {
        self.aided.contains_key(&victim)
    }

    pub fn aided(&self) -> &BTreeMap<VictimId, AgentId> {
        &self.aided
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Place a new agent at the base with a full time budget.
    pub fn spawn(&mut self, profile: &AgentProfile) -> AgentId {
        let id = AgentId(self.bodies.len() as u32);
        self.bodies.push(Body {
            name:      profile.name.clone(),
            pos:       self.base,
            remaining: profile.time_limit,
            costs:     profile.costs,
            state:     AgentState::Active,
        });
        tracing::debug!(agent = %id, name = %profile.name, "spawned at base");
        id
    }

    pub fn agent_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn position(&self, agent: AgentId) -> Position {
        self.bodies[agent.index()].pos
    }

    pub fn state(&self, agent: AgentId) -> AgentState {
        self.bodies[agent.index()].state
    }

    pub fn name(&self, agent: AgentId) -> &str {
        &self.bodies[agent.index()].name
    }
}

impl Environment for GridWorld {
    fn base(&self) -> Position {
        self.base
    }

    fn remaining_time(&self, agent: AgentId) -> f64 {
        self.bodies[agent.index()].remaining
    }

    fn walk(&mut self, agent: AgentId, dx: i32, dy: i32) -> WalkOutcome {
        let Some(_) = Direction::from_delta(dx, dy) else {
            tracing::warn!(agent = %agent, dx, dy, "rejected walk with invalid offset");
            return WalkOutcome::Bumped;
        };
        let from = self.bodies[agent.index()].pos;
        let target = from.offset(dx, dy);
        let terrain = self.terrain(target);

        let body = &mut self.bodies[agent.index()];
        let base_cost = body.costs.move_cost(dx, dy);
        match terrain {
            Some(Terrain::Open(difficulty)) => {
                if !body.charge(base_cost * difficulty) {
                    return WalkOutcome::TimeExceeded;
                }
                body.pos = target;
                WalkOutcome::Executed
            }
            Some(Terrain::Wall) | None => {
                if !body.charge(base_cost) {
                    return WalkOutcome::TimeExceeded;
                }
                WalkOutcome::Bumped
            }
        }
    }

    fn probe_neighbors(&self, agent: AgentId) -> [Probe; 8] {
        let pos = self.bodies[agent.index()].pos;
        Direction::ALL.map(|d| match self.terrain(pos.step(d)) {
            Some(Terrain::Open(_)) => Probe::Clear,
            Some(Terrain::Wall)    => Probe::Wall,
            None                   => Probe::OutOfBounds,
        })
    }

    fn sense_victim(&self, agent: AgentId) -> Option<VictimId> {
        self.victim_at(self.bodies[agent.index()].pos)
    }

    fn read_vital_signs(&mut self, agent: AgentId) -> VitalsOutcome {
        let body = &mut self.bodies[agent.index()];
        let cost = body.costs.read;
        if !body.charge(cost) {
            return VitalsOutcome::TimeExceeded;
        }
        let vitals = self
            .victims
            .get(&body.pos)
            .and_then(|v| self.vitals.get(v))
            .cloned()
            .unwrap_or_default();
        VitalsOutcome::Read(vitals)
    }

    fn administer_aid(&mut self, agent: AgentId) -> AidOutcome {
        let body = &mut self.bodies[agent.index()];
        let cost = body.costs.first_aid;
        if !body.charge(cost) {
            return AidOutcome::TimeExceeded;
        }
        match self.victims.get(&body.pos) {
            Some(&victim) => {
                self.aided.entry(victim).or_insert(agent);
                AidOutcome::Aided
            }
            None => AidOutcome::NoVictim,
        }
    }

    fn set_state(&mut self, agent: AgentId, state: AgentState) {
        self.bodies[agent.index()].state = state;
    }
}

// ── GridWorldBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`GridWorld`].
///
/// All cells start open with difficulty 1.0.  [`build`][Self::build]
/// validates that the base and every victim sit on open, in-bounds cells and
/// that victim ids and positions are unique.
pub struct GridWorldBuilder {
    width:   i32,
    height:  i32,
    base:    Position,
    cells:   Vec<(Position, Terrain)>,
    victims: Vec<(VictimId, Position, Vec<f64>)>,
}

impl GridWorldBuilder {
    pub fn new(width: i32, height: i32, base: Position) -> Self {
        Self { width, height, base, cells: Vec::new(), victims: Vec::new() }
    }

    pub fn wall(mut self, p: Position) -> Self {
        self.cells.push((p, Terrain::Wall));
        self
    }

    pub fn walls(mut self, ps: impl IntoIterator<Item = Position>) -> Self {
        self.cells.extend(ps.into_iter().map(|p| (p, Terrain::Wall)));
        self
    }

    /// Set the difficulty of `p`; values at or above [`WALL_DIFFICULTY`]
    /// make it a wall.
    pub fn difficulty(mut self, p: Position, difficulty: f64) -> Self {
        let terrain = if difficulty >= WALL_DIFFICULTY {
            Terrain::Wall
        } else {
            Terrain::Open(difficulty)
        };
        self.cells.push((p, terrain));
        self
    }

    pub fn victim(mut self, id: VictimId, p: Position, vitals: Vec<f64>) -> Self {
        self.victims.push((id, p, vitals));
        self
    }

    pub fn build(self) -> WorldResult<GridWorld> {
        if self.width <= 0 || self.height <= 0 {
            return Err(WorldError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let area = self.width as usize * self.height as usize;
        let mut world = GridWorld {
            width:   self.width,
            height:  self.height,
            base:    self.base,
            terrain: vec![Terrain::Open(1.0); area],
            victims: BTreeMap::new(),
            vitals:  BTreeMap::new(),
            bodies:  Vec::new(),
            aided:   BTreeMap::new(),
        };

        if !world.in_bounds(self.base) {
            return Err(WorldError::Invalid(format!("base {} outside the grid", self.base)));
        }

        for (p, terrain) in self.cells {
            if !world.in_bounds(p) {
                return Err(WorldError::Invalid(format!("cell {p} outside the grid")));
            }
            if let Terrain::Open(d) = terrain {
                if !d.is_finite() || d <= 0.0 {
                    return Err(WorldError::Invalid(format!(
                        "cell {p}: difficulty must be > 0, got {d}"
                    )));
                }
            }
            world.terrain[(p.y * self.width + p.x) as usize] = terrain;
        }

        if world.is_wall(self.base) {
            return Err(WorldError::Invalid(format!("base {} is a wall", self.base)));
        }

        for (id, p, vitals) in self.victims {
            if !world.in_bounds(p) || world.is_wall(p) {
                return Err(WorldError::Invalid(format!("{id} at {p} is not on an open cell")));
            }
            if world.vitals.contains_key(&id) {
                return Err(WorldError::Invalid(format!("duplicate {id}")));
            }
            if world.victims.insert(p, id).is_some() {
                return Err(WorldError::Invalid(format!("two victims share cell {p}")));
            }
            world.vitals.insert(id, vitals);
        }

        Ok(world)
    }
}
