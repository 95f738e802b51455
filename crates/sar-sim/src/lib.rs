//! `sar-sim` — coordinator and turn-based mission runner.
//!
//! # Mission flow
//!
//! ```text
//! explore   — step every explorer once per tick (registration order)
//!             until all halt or config.max_ticks
//! barrier   — each ExplorerReport counts down the ReportLatch;
//!             the last one triggers fusion + triage prediction
//! cluster   — k-means over the fused victims, clusters dealt
//!             round-robin to [master, workers...]
//! rescue    — step every rescuer once per tick until all halt
//! summary   — MissionReport
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`latch`]       | `ReportLatch` count-down barrier, `Arrival`           |
//! | [`coordinator`] | `Coordinator` (fusion, prediction, rescue planning)   |
//! | [`scheduler`]   | `run_phase` tick loop, `PhaseOutcome`                 |
//! | [`mission`]     | `Mission`                                             |
//! | [`builder`]     | `MissionBuilder`                                      |
//! | [`observer`]    | `MissionObserver` hooks, `NoopObserver`, `Phase`      |
//! | [`report`]      | `MissionReport` and its parts                         |
//! | [`error`]       | `SimError`, `SimResult<T>`                            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sar_core::{AgentProfile, MissionConfig};
//! use sar_sim::{MissionBuilder, NoopObserver};
//!
//! let world = sar_world::load_world_dir(dir)?;
//! let mut mission = MissionBuilder::new(MissionConfig::default(), world)
//!     .explorers(2, AgentProfile::new("explorer", 300.0))
//!     .rescuer(AgentProfile::new("master", 300.0))
//!     .build()?;
//! println!("{}", mission.run(&mut NoopObserver)?);
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod latch;
pub mod mission;
pub mod observer;
pub mod report;
pub mod scheduler;


pub use builder::MissionBuilder;
pub use coordinator::Coordinator;
pub use error::{SimError, SimResult};
pub use latch::{Arrival, ReportLatch};
pub use mission::Mission;
pub use observer::{MissionObserver, NoopObserver, Phase};
pub use report::{AssignmentSummary, ExplorerOutcome, MissionReport};
pub use scheduler::{run_phase, PhaseOutcome};
