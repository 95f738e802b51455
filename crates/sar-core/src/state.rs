//! Agent lifecycle states shared by the world, the agents, and the reports.

/// Lifecycle state of an explorer or rescuer.
///
/// `Active` is the only non-terminal state.  The three terminal states map to
/// the failure taxonomy: `Dead` is exhaustion (time budget crossed zero),
/// `Idle` is a stuck or unable-to-return agent, `Ended` is a clean finish at
/// base.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    #[default]
    Active,
    Idle,
    Ended,
    Dead,
}

impl AgentState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, AgentState::Active)
    }

    /// `false` only for `Dead`: idle and ended agents still hand in usable data.
    #[inline]
    pub fn survived(self) -> bool {
        !matches!(self, AgentState::Dead)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Active => "active",
            AgentState::Idle   => "idle",
            AgentState::Ended  => "ended",
            AgentState::Dead   => "dead",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
