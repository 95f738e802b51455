//! `MissionOutputObserver<W>` — bridges `MissionObserver` to a `MissionWriter`.

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::RescuerAssignment;
use sar_map::FusionOutcome;
use sar_sim::{MissionObserver, MissionReport};

use crate::writer::MissionWriter;
use crate::{OutputError, OutputResult};

/// A [`MissionObserver`] that persists every mission artefact through any
/// [`MissionWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `mission.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct MissionOutputObserver<W: MissionWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: MissionWriter> MissionOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `mission.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "mission output failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: MissionWriter> MissionObserver for MissionOutputObserver<W> {
    fn on_explorer_report(&mut self, report: &ExplorerReport) {
        let result = self.writer.write_explorer_map(report);
        self.store_err(result);
    }

    fn on_fusion(&mut self, fusion: &FusionOutcome) {
        let result = self.writer.write_fusion(fusion);
        self.store_err(result);
    }

    fn on_assignments(&mut self, assignments: &[RescuerAssignment]) {
        let result = self.writer.write_assignments(assignments);
        self.store_err(result);
    }

    fn on_rescue_report(&mut self, report: &RescueReport) {
        let result = self.writer.write_rescue_report(report);
        self.store_err(result);
    }

    fn on_mission_end(&mut self, report: &MissionReport) {
        let result = self.writer.write_summary(report);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
