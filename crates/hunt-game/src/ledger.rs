//! `GameState` — the score and collection ledger for one play session.
//!
//! # Invariants
//!
//! - `collected_count` equals the number of treasures flagged collected.
//! - `score` equals the sum of `points` over collected treasures.
//! - Both only ever grow.
//! - The treasure list is set once by [`GameState::seed`] and never resized.

use hunt_core::{HuntError, HuntResult, TreasureId};

use crate::Treasure;

/// Result of a collection attempt on a known treasure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collection {
    /// The treasure was flipped to collected by this call.
    Collected {
        points:    u8,
        /// Score after adding `points`.
        score:     u32,
        /// `true` when this was the last uncollected treasure.
        all_found: bool,
    },
    /// The treasure had been collected before; nothing changed.
    AlreadyCollected,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameState {
    score:           u32,
    collected_count: usize,
    treasures:       Vec<Treasure>,
    seeded:          bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the session's treasures.
    ///
    /// Only the first call succeeds; later calls return
    /// [`HuntError::AlreadySeeded`] and leave existing progress untouched.
    pub fn seed(&mut self, treasures: Vec<Treasure>) -> HuntResult<()> {
        if self.seeded {
            return Err(HuntError::AlreadySeeded);
        }
        tracing::info!(count = treasures.len(), "treasures placed");
        self.treasures = treasures;
        self.seeded = true;
        Ok(())
    }

    /// Collect the treasure with `id`.
    ///
    /// Idempotent: a treasure that is already collected yields
    /// [`Collection::AlreadyCollected`] and the ledger is unchanged.
    pub fn collect(&mut self, id: TreasureId) -> HuntResult<Collection> {
        let treasure = self
            .treasures
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(HuntError::UnknownTreasure(id))?;

        if !treasure.mark_collected() {
            return Ok(Collection::AlreadyCollected);
        }

        let points = treasure.points();
        self.score += u32::from(points);
        self.collected_count += 1;

        debug_assert!(self.check_invariants(), "ledger invariants violated after collecting {id}");

        Ok(Collection::Collected {
            points,
            score:     self.score,
            all_found: self.is_complete(),
        })
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn collected_count(&self) -> usize {
        self.collected_count
    }

    #[inline]
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn treasure(&self, id: TreasureId) -> Option<&Treasure> {
        self.treasures.iter().find(|t| t.id() == id)
    }

    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn remaining(&self) -> usize {
        self.treasures.len() - self.collected_count
    }

    /// `true` once every seeded treasure is collected.  An unseeded ledger is
    /// never complete.
    pub fn is_complete(&self) -> bool {
        self.seeded && self.collected_count == self.treasures.len()
    }

    /// Recompute the derived totals from the treasure list and compare.
    pub fn check_invariants(&self) -> bool {
        let collected = self.treasures.iter().filter(|t| t.is_collected());
        let count = collected.clone().count();
        let sum: u32 = collected.map(|t| u32::from(t.points())).sum();
        count == self.collected_count && sum == self.score && count <= self.treasures.len()
    }
}
