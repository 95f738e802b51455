//! The `SteppingAgent` trait — one decision per scheduler tick.

use sar_core::{AgentId, AgentState};
use sar_world::Environment;

/// What the scheduler should do with an agent after a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent wants another tick.
    Continue,
    /// The agent reached a terminal state; do not step it again.
    Halt,
}

/// An agent driven by a cooperative, turn-based scheduler.
///
/// Every call to [`step`][Self::step] performs at most one atomic action
/// (one move, one read, or one aid) through `env`, or declines to act.  No
/// call blocks.
///
/// Once `step` has returned [`StepOutcome::Halt`], [`state`][Self::state]
/// is terminal and further calls return `Halt` without touching `env`.
pub trait SteppingAgent {
    fn id(&self) -> AgentId;

    fn state(&self) -> AgentState;

    fn step(&mut self, env: &mut dyn Environment) -> StepOutcome;
}
