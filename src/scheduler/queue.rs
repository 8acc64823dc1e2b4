//! The delayed-effect queue and turn arithmetic.

use serde::{Deserialize, Serialize};

use super::delayed::{DelayedEffect, DelayedKind, Trigger};
use crate::core::PlayerId;

/// Round in which `player` next takes a turn, strictly after the turn at
/// `current_index` of `turn_order` in round `current_round`.
///
/// Rounds advance when the turn pointer wraps to the first seat, so a player
/// seated after the current one still acts this round and everyone else acts
/// next round. Works for any number of seats. A player missing from
/// `turn_order` is treated as acting next round.
///
/// ```
/// use lingcard::core::PlayerId;
/// use lingcard::scheduler::next_turn_for_player;
///
/// let order = [PlayerId::new(1), PlayerId::new(0)];
/// // Round 3, seat 0 (player 2) is acting.
/// assert_eq!(next_turn_for_player(3, &order, 0, PlayerId::new(1)), 4);
/// assert_eq!(next_turn_for_player(3, &order, 0, PlayerId::new(0)), 3);
/// ```
#[must_use]
pub fn next_turn_for_player(
    current_round: u32,
    turn_order: &[PlayerId],
    current_index: usize,
    player: PlayerId,
) -> u32 {
    match turn_order.iter().position(|&p| p == player) {
        Some(seat) if seat > current_index => current_round,
        _ => current_round + 1,
    }
}

/// FIFO queue of pending delayed effects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    queue: Vec<DelayedEffect>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-timed effect.
    pub fn schedule(&mut self, effect: DelayedEffect) {
        self.queue.push(effect);
    }

    /// Schedule `kind` for `target`'s next own turn start.
    pub fn schedule_next_turn(
        &mut self,
        kind: DelayedKind,
        target: PlayerId,
        current_round: u32,
        turn_order: &[PlayerId],
        current_index: usize,
        origin: impl Into<String>,
    ) -> u32 {
        let turn = next_turn_for_player(current_round, turn_order, current_index, target);
        self.schedule(DelayedEffect::new(kind, target, turn, Trigger::TurnStart).with_origin(origin));
        turn
    }

    /// Schedule `kind` to fire when the current turn ends.
    pub fn schedule_turn_end(
        &mut self,
        kind: DelayedKind,
        target: PlayerId,
        current_round: u32,
        origin: impl Into<String>,
    ) {
        self.schedule(
            DelayedEffect::new(kind, target, current_round, Trigger::TurnEnd).with_origin(origin),
        );
    }

    /// Remove and return every effect matching `(turn, player, trigger)`, in
    /// scheduling order. Everything else stays queued untouched.
    pub fn drain_matching(
        &mut self,
        turn: u32,
        player: PlayerId,
        trigger: Trigger,
    ) -> Vec<DelayedEffect> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|effect| effect.matches(turn, player, trigger));
        self.queue = pending;
        due
    }

    pub fn pending(&self) -> impl Iterator<Item = &DelayedEffect> {
        self.queue.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
