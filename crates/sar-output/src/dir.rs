//! File-per-artefact backend.
//!
//! Creates, in the configured output directory:
//! - `map_agent{n}.csv` for every explorer
//! - `map_unified.csv`, `unified_map.json`, `sync_summary.txt`
//! - `cluster{n}.txt` for every cluster
//! - `rescue_agent{n}.csv` for every rescuer
//! - `mission_summary.txt`

use std::fs;
use std::path::{Path, PathBuf};

use sar_agent::{ExplorerReport, RescueReport};
use sar_cluster::{ClusterAssignment, RescuerAssignment};
use sar_map::FusionOutcome;
use sar_sim::MissionReport;

use crate::cluster::write_cluster_files;
use crate::json::write_unified_json;
use crate::map_csv::write_map_csv;
use crate::rescue::{rescue_file_name, write_rescue_report};
use crate::row::UNIFIED_AGENT;
use crate::writer::MissionWriter;
use crate::OutputResult;

pub const UNIFIED_CSV: &str = "map_unified.csv";
pub const UNIFIED_JSON: &str = "unified_map.json";
pub const SYNC_SUMMARY: &str = "sync_summary.txt";
pub const MISSION_SUMMARY: &str = "mission_summary.txt";

pub fn explorer_map_file(report: &ExplorerReport) -> String {
    format!("map_agent{}.csv", report.agent.0)
}

/// Writes every artefact to its own file under one directory.
pub struct DirectoryWriter {
    dir:      PathBuf,
    written:  Vec<PathBuf>,
    finished: bool,
}

impl DirectoryWriter {
    /// Create `dir` (and parents) if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), written: Vec::new(), finished: false })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.written
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl MissionWriter for DirectoryWriter {
    fn write_explorer_map(&mut self, report: &ExplorerReport) -> OutputResult<()> {
        let path = self.path(&explorer_map_file(report));
        write_map_csv(&path, &report.agent.0.to_string(), &report.map)?;
        self.written.push(path);
        Ok(())
    }

    fn write_fusion(&mut self, fusion: &FusionOutcome) -> OutputResult<()> {
        let csv = self.path(UNIFIED_CSV);
        write_map_csv(&csv, UNIFIED_AGENT, &fusion.cells)?;
        self.written.push(csv);

        let json = self.path(UNIFIED_JSON);
        write_unified_json(&json, &fusion.unified)?;
        self.written.push(json);

        let summary = self.path(SYNC_SUMMARY);
        fs::write(&summary, fusion.summary())?;
        self.written.push(summary);
        Ok(())
    }

    fn write_assignments(&mut self, assignments: &[RescuerAssignment]) -> OutputResult<()> {
        let clusters: Vec<ClusterAssignment> = assignments.iter().map(|a| a.assignment.clone()).collect();
        let paths = write_cluster_files(&self.dir, &clusters)?;
        self.written.extend(paths);
        Ok(())
    }

    fn write_rescue_report(&mut self, report: &RescueReport) -> OutputResult<()> {
        let path = self.path(&rescue_file_name(report.agent));
        write_rescue_report(&path, report)?;
        self.written.push(path);
        Ok(())
    }

    fn write_summary(&mut self, report: &MissionReport) -> OutputResult<()> {
        let path = self.path(MISSION_SUMMARY);
        fs::write(&path, report.to_string())?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        tracing::info!(dir = %self.dir.display(), files = self.written.len(), "mission output written");
        Ok(())
    }
}
