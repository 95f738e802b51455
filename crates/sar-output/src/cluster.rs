//! Per-cluster victim lists, one `cluster{n}.txt` per cluster.

use std::path::{Path, PathBuf};

use csv::Writer;

use sar_cluster::ClusterAssignment;
use sar_core::ClusterId;

use crate::OutputResult;

pub const CLUSTER_HEADER: [&str; 5] = ["id_vict", "x", "y", "sobr", "tri"];

pub fn cluster_file_name(id: ClusterId) -> String {
    format!("cluster{}.txt", id.0)
}

/// Victims in assignment order.  Unpredicted victims are written with
/// survival 0 and triage 0.
pub fn write_cluster_file(path: &Path, assignment: &ClusterAssignment) -> OutputResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record(CLUSTER_HEADER)?;
    for v in &assignment.victims {
        w.write_record(&[
            v.id.0.to_string(),
            v.position.x.to_string(),
            v.position.y.to_string(),
            format!("{:.2}", v.survival.unwrap_or(0.0)),
            v.triage.map_or(0, |t| t.index()).to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Write one file per assignment into `dir`; returns the paths written.
pub fn write_cluster_files(dir: &Path, assignments: &[ClusterAssignment]) -> OutputResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(assignments.len());
    for a in assignments {
        let path = dir.join(cluster_file_name(a.cluster_id));
        write_cluster_file(&path, a)?;
        paths.push(path);
    }
    Ok(paths)
}
