//! Ordinal triage buckets.

use crate::{SarError, SarResult};

/// Urgency class predicted from vital signs, ordered by severity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum TriageClass {
    #[default]
    Green  = 0,
    Yellow = 1,
    Red    = 2,
    Black  = 3,
}

impl TriageClass {
    pub const ALL: [TriageClass; 4] = [
        TriageClass::Green,
        TriageClass::Yellow,
        TriageClass::Red,
        TriageClass::Black,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: u8) -> SarResult<TriageClass> {
        TriageClass::ALL
            .get(i as usize)
            .copied()
            .ok_or_else(|| SarError::Parse(format!("triage class {i} outside 0..=3")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriageClass::Green  => "green",
            TriageClass::Yellow => "yellow",
            TriageClass::Red    => "red",
            TriageClass::Black  => "black",
        }
    }
}

impl TryFrom<u8> for TriageClass {
    type Error = SarError;
    fn try_from(i: u8) -> SarResult<TriageClass> {
        TriageClass::from_index(i)
    }
}

impl From<TriageClass> for u8 {
    fn from(t: TriageClass) -> u8 {
        t.index()
    }
}

impl std::fmt::Display for TriageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
