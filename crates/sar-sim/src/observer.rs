//! Mission observer trait for progress reporting and data collection.

use std::fmt;

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::RescuerAssignment;
use sar_core::Tick;
use sar_map::FusionOutcome;

use crate::report::MissionReport;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Exploration,
    Rescue,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Exploration => "exploration",
            Phase::Rescue      => "rescue",
        })
    }
}

/// Callbacks invoked by [`Mission::run`][crate::Mission::run] at key points
/// of the mission.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl MissionObserver for Progress {
///     fn on_phase_end(&mut self, phase: Phase, ticks: u64) {
///         println!("{phase} took {ticks} ticks");
///     }
/// }
/// ```
pub trait MissionObserver {
    fn on_phase_start(&mut self, _phase: Phase) {}

    /// Called after every scheduler tick; `stepped` is the number of agents
    /// that were still active and got a step.
    fn on_tick_end(&mut self, _phase: Phase, _tick: Tick, _stepped: usize) {}

    fn on_phase_end(&mut self, _phase: Phase, _ticks: u64) {}

    /// Called for every explorer report, before the coordinator sees it.
    fn on_explorer_report(&mut self, _report: &ExplorerReport) {}

    /// Called once, when the report barrier released and the maps are fused.
    fn on_fusion(&mut self, _fusion: &FusionOutcome) {}

    fn on_assignments(&mut self, _assignments: &[RescuerAssignment]) {}

    fn on_rescue_report(&mut self, _report: &RescueReport) {}

    /// Called once with the final summary.
    fn on_mission_end(&mut self, _report: &MissionReport) {}
}

/// A [`MissionObserver`] that does nothing.
pub struct NoopObserver;

impl MissionObserver for NoopObserver {}
