//! Per-turn action slots.
//!
//! A character may play one card per available slot. The slot set is
//! reconciled against the power level at every turn start and on level-up,
//! growing or shrinking from the end.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single per-turn use counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSlot {
    max_uses: u32,
    remaining_uses: u32,
    used_this_turn: bool,
}

impl ActionSlot {
    /// A fresh single-use slot.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_uses(1)
    }

    /// A fresh slot with `max_uses` uses per turn.
    #[must_use]
    pub const fn with_uses(max_uses: u32) -> Self {
        Self {
            max_uses,
            remaining_uses: max_uses,
            used_this_turn: false,
        }
    }

    #[must_use]
    pub fn can_use(&self) -> bool {
        self.remaining_uses > 0
    }

    /// Consume one use. Returns `false` when exhausted.
    pub fn use_once(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.remaining_uses -= 1;
        self.used_this_turn = true;
        true
    }

    pub fn reset(&mut self) {
        self.remaining_uses = self.max_uses;
        self.used_this_turn = false;
    }

    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.remaining_uses
    }

    #[must_use]
    pub fn used_this_turn(&self) -> bool {
        self.used_this_turn
    }
}

impl Default for ActionSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The slot set owned by one character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSlots {
    slots: SmallVec<[ActionSlot; 6]>,
}

impl ActionSlots {
    /// `count` fresh single-use slots.
    #[must_use]
    pub fn new(count: u32) -> Self {
        let mut slots = Self::default();
        slots.reconcile(count);
        slots
    }

    /// Grow with fresh slots or truncate from the end to match `count`.
    pub fn reconcile(&mut self, count: u32) {
        let count = count as usize;
        if count > self.slots.len() {
            self.slots.resize(count, ActionSlot::new());
        } else {
            self.slots.truncate(count);
        }
    }

    /// Reset every slot to full uses.
    pub fn reset_all(&mut self) {
        self.slots.iter_mut().for_each(ActionSlot::reset);
    }

    #[must_use]
    pub fn has_available(&self) -> bool {
        self.slots.iter().any(ActionSlot::can_use)
    }

    /// Consume one use from the first slot that has any left.
    pub fn use_any(&mut self) -> bool {
        self.slots
            .iter_mut()
            .find(|slot| slot.can_use())
            .is_some_and(ActionSlot::use_once)
    }

    /// Total uses left this turn across all slots.
    #[must_use]
    pub fn available(&self) -> u32 {
        self.slots.iter().map(ActionSlot::remaining_uses).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionSlot> {
        self.slots.iter()
    }
}
