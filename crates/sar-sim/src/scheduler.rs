//! Cooperative tick loop.
//!
//! One tick steps every still-active agent once, in registration order.
//! The loop stops when every agent has halted or after `max_ticks` ticks,
//! whichever comes first.

use sar_agent::{StepOutcome, SteppingAgent};
use sar_core::Tick;
use sar_world::Environment;

use crate::observer::{MissionObserver, Phase};

/// How a phase ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PhaseOutcome {
    /// Ticks executed.
    pub ticks:  u64,
    /// Agents still active when the tick cap was hit.
    pub active: usize,
}

impl PhaseOutcome {
    pub fn capped(&self) -> bool {
        self.active > 0
    }
}

/// Drive `agents` against `env` until they all halt or `max_ticks` runs out.
pub fn run_phase<A, O>(
    phase:     Phase,
    agents:    &mut [A],
    env:       &mut dyn Environment,
    max_ticks: u64,
    observer:  &mut O,
) -> PhaseOutcome
where
    A: SteppingAgent,
    O: MissionObserver + ?Sized,
{
    let mut halted = vec![false; agents.len()];
    let mut tick = Tick::ZERO;

    while tick.0 < max_ticks && halted.iter().any(|h| !h) {
        let mut stepped = 0;
        for (agent, done) in agents.iter_mut().zip(halted.iter_mut()) {
            if *done {
                continue;
            }
            stepped += 1;
            if agent.step(env) == StepOutcome::Halt {
                *done = true;
            }
        }
        observer.on_tick_end(phase, tick, stepped);
        tick = tick.next();
    }

    let active = halted.iter().filter(|h| !**h).count();
    if active > 0 {
        tracing::warn!(%phase, ticks = tick.0, active, "tick cap reached with agents still active");
    } else {
        tracing::info!(%phase, ticks = tick.0, "phase complete");
    }
    PhaseOutcome { ticks: tick.0, active }
}
