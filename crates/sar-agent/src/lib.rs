//! `sar-agent` — the two agent kinds and the trait the scheduler drives.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`stepping`] | `SteppingAgent` trait, `StepOutcome`                       |
//! | [`explorer`] | `ExplorationAgent` (online DFS with energy reservation)    |
//! | [`rescuer`]  | `RescueAgent` (plan-and-execute over the fused map)        |
//! | [`chooser`]  | `NeighborChooser` (random / rotated compass preference)    |
//! | [`report`]   | `ExplorerReport`, `RescueReport`                           |
//!
//! # Design notes
//!
//! Agents own all of their working state (position, path stack, visited and
//! obstacle sets, local map) and only touch the world through
//! `&mut dyn Environment`.  Nothing is shared between agents until a report
//! is handed to the coordinator.

pub mod chooser;
pub mod explorer;
pub mod report;
pub mod rescuer;
pub mod stepping;

#[cfg(test)]
mod tests;

pub use chooser::NeighborChooser;
pub use explorer::ExplorationAgent;
pub use report::{ExplorerReport, RescueReport};
pub use rescuer::RescueAgent;
pub use stepping::{StepOutcome, SteppingAgent};
