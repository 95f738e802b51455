//! The `MissionWriter` trait implemented by output backends.

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::RescuerAssignment;
use sar_map::FusionOutcome;
use sar_sim::MissionReport;

use crate::OutputResult;

/// Persists the artefacts a mission produces.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored and retrieved with
/// [`MissionOutputObserver::take_error`][crate::MissionOutputObserver::take_error].
pub trait MissionWriter {
    /// One explorer's local map.
    fn write_explorer_map(&mut self, report: &ExplorerReport) -> OutputResult<()>;

    /// The fused cell map, the unified map and the synchronization summary.
    fn write_fusion(&mut self, fusion: &FusionOutcome) -> OutputResult<()>;

    fn write_assignments(&mut self, assignments: &[RescuerAssignment]) -> OutputResult<()>;

    /// One rescuer's aided and unreachable victims.
    fn write_rescue_report(&mut self, report: &RescueReport) -> OutputResult<()>;

    fn write_summary(&mut self, report: &MissionReport) -> OutputResult<()>;

    /// Flush everything.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
