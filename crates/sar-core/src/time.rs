//! Discrete scheduler time.
//!
//! A `Tick` counts synchronized scheduler rounds: during one tick every
//! active agent performs at most one atomic action.  It is unrelated to the
//! per-agent time *budget*, which is a float drained by action costs.

use std::fmt;

/// An absolute tick counter within one mission phase.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
