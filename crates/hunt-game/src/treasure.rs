//! The treasure record and its visual kind.

use hunt_core::{Coordinate, TreasureId};

/// How a treasure is drawn in the AR scene.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VisualKind {
    Chest,
    Coin,
}

impl VisualKind {
    /// Even generation indices are chests, odd ones are coins.
    #[inline]
    pub fn for_index(index: usize) -> VisualKind {
        if index % 2 == 0 { VisualKind::Chest } else { VisualKind::Coin }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualKind::Chest => "chest",
            VisualKind::Coin  => "coin",
        }
    }
}

impl std::fmt::Display for VisualKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collectible placed in the world.
///
/// Everything except the collected flag is fixed at creation.  The flag only
/// ever goes from `false` to `true`, and only through
/// [`GameState::collect`](crate::GameState::collect).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Treasure {
    id:        TreasureId,
    position:  Coordinate,
    points:    u8,
    kind:      VisualKind,
    collected: bool,
}

impl Treasure {
    pub fn new(id: TreasureId, position: Coordinate, points: u8, kind: VisualKind) -> Self {
        Self { id, position, points, kind, collected: false }
    }

    #[inline]
    pub fn id(&self) -> TreasureId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn points(&self) -> u8 {
        self.points
    }

    #[inline]
    pub fn kind(&self) -> VisualKind {
        self.kind
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Flip to collected.  Returns `false` if it already was.
    pub(crate) fn mark_collected(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}
