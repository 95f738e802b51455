//! Per-rescuer results, one `rescue_agent{n}.csv` per rescuer.

use std::path::Path;

use csv::Writer;
use serde::{Deserialize, Serialize};

use sar_agent::RescueReport;
use sar_core::AgentId;

use crate::OutputResult;

pub const RESCUE_HEADER: [&str; 8] = [
    "agent",
    "name",
    "state",
    "remaining",
    "clusters",
    "completed",
    "unreachable",
    "returned_to_base",
];

pub fn rescue_file_name(agent: AgentId) -> String {
    format!("rescue_agent{}.csv", agent.0)
}

/// One rescuer's outcome.  The id lists are JSON arrays in the order the
/// rescuer produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescueRow {
    pub agent:            u32,
    pub name:             String,
    pub state:            String,
    pub remaining:        f64,
    pub clusters:         String,
    pub completed:        String,
    pub unreachable:      String,
    pub returned_to_base: bool,
}

impl RescueRow {
    pub fn from_report(report: &RescueReport) -> OutputResult<Self> {
        let clusters: Vec<u32> = report.clusters.iter().map(|c| c.0).collect();
        let completed: Vec<u32> = report.completed.iter().map(|v| v.0).collect();
        let unreachable: Vec<u32> = report.unreachable.iter().map(|v| v.0).collect();
        Ok(Self {
            agent:            report.agent.0,
            name:             report.name.clone(),
            state:            report.state.to_string(),
            remaining:        report.remaining,
            clusters:         serde_json::to_string(&clusters)?,
            completed:        serde_json::to_string(&completed)?,
            unreachable:      serde_json::to_string(&unreachable)?,
            returned_to_base: report.returned_to_base,
        })
    }
}

pub fn write_rescue_report(path: &Path, report: &RescueReport) -> OutputResult<()> {
    let mut w = Writer::from_path(path)?;
    w.serialize(RescueRow::from_report(report)?)?;
    w.flush()?;
    Ok(())
}
