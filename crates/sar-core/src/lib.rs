//! `sar-core` — foundational types for the search-and-rescue simulation.
//!
//! This crate is a dependency of every other `sar-*` crate.  It has no
//! `sar-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `VictimId`, `ClusterId`                         |
//! | [`geo`]     | `Position`, `Direction` (8-way compass)                    |
//! | [`state`]   | `AgentState` lifecycle                                     |
//! | [`triage`]  | `TriageClass`                                              |
//! | [`config`]  | `CostModel`, `AgentProfile`, `NeighborPolicy`, `MissionConfig` |
//! | [`time`]    | `Tick`                                                     |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (mission)                 |
//! | [`error`]   | `SarError`, `SarResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod state;
pub mod time;
pub mod triage;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentProfile, CostModel, MissionConfig, NeighborPolicy};
pub use error::{SarError, SarResult};
pub use geo::{Direction, Position};
pub use ids::{AgentId, ClusterId, VictimId};
pub use rng::{AgentRng, SimRng};
pub use state::AgentState;
pub use time::Tick;
pub use triage::TriageClass;
