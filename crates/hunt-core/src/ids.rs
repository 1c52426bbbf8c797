//! Strongly typed treasure identifier.
//!
//! A treasure's id is derived from its generation index and renders as
//! `treasure-<i>`.  The rendered string is the join key the scene host sees,
//! so [`TreasureId`] parses back from it.

use std::fmt;
use std::str::FromStr;

use crate::HuntError;

const PREFIX: &str = "treasure-";

/// Index of a treasure in the session's treasure list.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreasureId(pub u32);

impl TreasureId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TreasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

impl FromStr for TreasureId {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PREFIX)
            .and_then(|n| n.parse::<u32>().ok())
            .map(TreasureId)
            .ok_or_else(|| HuntError::Parse(format!("not a treasure id: {s:?}")))
    }
}

impl From<TreasureId> for usize {
    #[inline(always)]
    fn from(id: TreasureId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for TreasureId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<TreasureId, Self::Error> {
        u32::try_from(n).map(TreasureId)
    }
}
