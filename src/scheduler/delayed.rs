//! Delayed effect records.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// When, within the trigger turn, an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// At the target player's turn start, before the draw step.
    TurnStart,
    /// At the instant the target player's turn ends.
    TurnEnd,
}

/// What a delayed effect does when it fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedKind {
    /// Target player draws `count` cards.
    DrawCards { count: u32 },
    /// Restore energy to one roster member of the target player.
    RestoreEnergy { amount: u32, slot: usize },
    /// Put a card, looked up by catalog name, into the target player's hand.
    InsertCard { card: String },
}

impl std::fmt::Display for DelayedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelayedKind::DrawCards { count } => write!(f, "draw {count}"),
            DelayedKind::RestoreEnergy { amount, slot } => {
                write!(f, "restore {amount} energy to roster slot {slot}")
            }
            DelayedKind::InsertCard { card } => write!(f, "add {card} to hand"),
        }
    }
}

/// A consequence deferred to a specific turn of a specific player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub kind: DelayedKind,
    pub target: PlayerId,
    pub trigger_turn: u32,
    pub trigger: Trigger,
    /// Short narration of where the effect came from.
    pub origin: String,
}

impl DelayedEffect {
    #[must_use]
    pub fn new(kind: DelayedKind, target: PlayerId, trigger_turn: u32, trigger: Trigger) -> Self {
        Self {
            kind,
            target,
            trigger_turn,
            trigger,
            origin: String::new(),
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    #[must_use]
    pub fn matches(&self, turn: u32, player: PlayerId, trigger: Trigger) -> bool {
        self.trigger_turn == turn && self.target == player && self.trigger == trigger
    }
}
