//! Deterministic per-agent and mission-level RNG wrappers.
//!
//! Each agent owns an independent `SmallRng` seeded by
//!
//!   seed = mission_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! so two explorers never share RNG state and adding agents at the end of
//! the roster leaves the streams of earlier agents untouched.  Nothing in the
//! workspace draws from a global or thread-local RNG.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, owned by the agent's state struct.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the mission seed and an agent ID.
    pub fn new(mission_seed: u64, agent: AgentId) -> Self {
        let seed = mission_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}

impl std::fmt::Debug for AgentRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AgentRng(..)")
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Mission-level RNG for global operations (cluster seeding, hold-out
/// splits).  Used only from the single-threaded coordinator.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
