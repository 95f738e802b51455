//! The `Environment` trait — the narrow interface agents use to act.
//!
//! Agents never see the world's internals.  Every primitive either completes
//! one atomic action (and charges its cost against the caller's time budget)
//! or reports why it could not.

use sar_core::{AgentId, AgentState, Position, VictimId};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of [`Environment::walk`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The agent moved to the target cell.
    Executed,
    /// The target is a wall or outside the grid; the agent did not move.
    Bumped,
    /// The charge drove the budget below zero; the agent did not move.
    TimeExceeded,
}

/// One entry of a proximity probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    Clear,
    Wall,
    OutOfBounds,
}

/// Result of [`Environment::read_vital_signs`].
#[derive(Clone, Debug, PartialEq)]
pub enum VitalsOutcome {
    /// Vital-sign vector of the victim under the agent; empty if there is none.
    Read(Vec<f64>),
    TimeExceeded,
}

/// Result of [`Environment::administer_aid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AidOutcome {
    Aided,
    /// No victim at the agent's cell.
    NoVictim,
    TimeExceeded,
}

// ── Environment trait ─────────────────────────────────────────────────────────

/// Per-agent primitives exposed by the simulator.
///
/// All methods take the acting agent's id; the id must come from the same
/// world (e.g. [`GridWorld::spawn`][crate::GridWorld::spawn]).  Implementations
/// may panic on a foreign id.
///
/// The trait is object safe so the scheduler can drive agents through
/// `&mut dyn Environment`.
pub trait Environment {
    /// The shared base cell every agent starts from.
    fn base(&self) -> Position;

    /// Remaining time budget.  Negative once exhausted.
    fn remaining_time(&self, agent: AgentId) -> f64;

    /// Attempt a single move by `(dx, dy)`, each in `{-1, 0, 1}`.
    fn walk(&mut self, agent: AgentId, dx: i32, dy: i32) -> WalkOutcome;

    /// Free / wall / out-of-bounds status of the eight surrounding cells, in
    /// [`Direction::ALL`][sar_core::Direction::ALL] order.  Free of charge.
    fn probe_neighbors(&self, agent: AgentId) -> [Probe; 8];

    /// Victim standing on the agent's cell, if any.  Free of charge.
    fn sense_victim(&self, agent: AgentId) -> Option<VictimId>;

    fn read_vital_signs(&mut self, agent: AgentId) -> VitalsOutcome;

    fn administer_aid(&mut self, agent: AgentId) -> AidOutcome;

    /// Mirror the agent's lifecycle state into the simulator.
    fn set_state(&mut self, agent: AgentId, state: AgentState);
}
