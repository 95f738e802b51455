//! How an explorer picks the next unvisited neighbour.

use sar_core::{AgentId, AgentRng, Direction, NeighborPolicy};

/// Per-explorer neighbour selection, deterministic for a fixed mission seed.
#[derive(Debug)]
pub enum NeighborChooser {
    /// Uniform choice from the explorer's own RNG stream.
    Random(AgentRng),
    /// First candidate in a fixed compass order.
    Preference([Direction; 8]),
}

impl NeighborChooser {
    /// Chooser for the explorer registered at `slot` (0-based) with id `agent`.
    pub fn for_explorer(policy: NeighborPolicy, slot: usize, seed: u64, agent: AgentId) -> Self {
        match policy {
            NeighborPolicy::Random => NeighborChooser::Random(AgentRng::new(seed, agent)),
            NeighborPolicy::RotatedPreference => {
                NeighborChooser::Preference(NeighborPolicy::preference_for(slot))
            }
        }
    }

    /// Pick one of `candidates`; `None` if it is empty.
    pub fn choose(&mut self, candidates: &[Direction]) -> Option<Direction> {
        match self {
            NeighborChooser::Random(rng) => rng.choose(candidates).copied(),
            NeighborChooser::Preference(order) => {
                order.iter().copied().find(|d| candidates.contains(d))
            }
        }
    }
}
