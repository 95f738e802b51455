//! `sar-world` — the environment agents act in.
//!
//! The core treats the simulator as a black box reached through the
//! [`Environment`] trait.  [`GridWorld`] is the reference implementation used
//! by the mission runner and the tests.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`env`]    | `Environment` trait, `WalkOutcome`, `Probe`, `VitalsOutcome`, `AidOutcome` |
//! | [`grid`]   | `GridWorld`, `GridWorldBuilder`, `Terrain`                    |
//! | [`loader`] | `load_world_dir`, `load_world_reader`                         |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                                |

pub mod env;
pub mod error;
pub mod grid;
pub mod loader;


pub use env::{AidOutcome, Environment, Probe, VitalsOutcome, WalkOutcome};
pub use error::{WorldError, WorldResult};
pub use grid::{GridWorld, GridWorldBuilder, Terrain, WALL_DIFFICULTY};
pub use loader::{load_world_dir, load_world_reader};
