//! `sar-output` — mission output writers.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`row`]       | `CellRow` (persisted map record), column constants        |
//! | [`map_csv`]   | `write_map_csv`, `read_map_csv` and their stream variants |
//! | [`json`]      | Unified map JSON document, `write_unified_json`           |
//! | [`cluster`]   | `cluster{n}.txt` victim lists                             |
//! | [`rescue`]    | `rescue_agent{n}.csv` per-rescuer results                 |
//! | [`writer`]    | `MissionWriter` trait                                     |
//! | [`dir`]       | `DirectoryWriter` backend (one file per artefact)         |
//! | [`observer`]  | `MissionOutputObserver`, the `MissionObserver` bridge     |
//! | [`error`]     | `OutputError`, `OutputResult<T>`                          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use sar_output::{DirectoryWriter, MissionOutputObserver};
//!
//! let writer = DirectoryWriter::new(Path::new("./output"))?;
//! let mut obs = MissionOutputObserver::new(writer);
//! mission.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod cluster;
pub mod dir;
pub mod error;
pub mod json;
pub mod map_csv;
pub mod observer;
pub mod rescue;
pub mod row;
pub mod writer;


pub use cluster::{cluster_file_name, write_cluster_file, write_cluster_files, CLUSTER_HEADER};
pub use dir::DirectoryWriter;
pub use error::{OutputError, OutputResult};
pub use json::{read_unified_json, write_unified_json, UnifiedMapDoc, VictimDoc};
pub use map_csv::{read_map, read_map_csv, write_map, write_map_csv};
pub use observer::MissionOutputObserver;
pub use rescue::{rescue_file_name, write_rescue_report, RescueRow, RESCUE_HEADER};
pub use row::{CellRow, CELL_HEADER, UNIFIED_AGENT};
pub use writer::MissionWriter;
