//! `sar-map` — what the agents know about the grid.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`cell`]      | `CellStatus` (with merge priority), `CellInfo`             |
//! | [`local_map`] | `LocalMap` — per-explorer sparse map and its merge         |
//! | [`unified`]   | `UnifiedMap`, `VictimInfo`                                 |
//! | [`sync`]      | `MapSynchronizer`, `FusionOutcome`, `FusionMetrics`        |
//! | [`planner`]   | `Router` trait, `BfsRouter`                                |
//! | [`error`]     | `MapError`, `MapResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CellStatus` and `VictimInfo`. |

pub mod cell;
pub mod error;
pub mod local_map;
pub mod planner;
pub mod sync;
pub mod unified;


pub use cell::{CellInfo, CellStatus};
pub use error::{MapError, MapResult};
pub use local_map::LocalMap;
pub use planner::{BfsRouter, Router};
pub use sync::{FusionMetrics, FusionOutcome, MapSynchronizer};
pub use unified::{UnifiedMap, VictimInfo};
