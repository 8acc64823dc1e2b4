//! Player-submitted actions and their reports.
//!
//! An action is a `(card, actor, target)` triple of indices as a player sees
//! them:
//! - `card` indexes the acting player's hand
//! - `actor` indexes the player's *living* characters in roster order
//! - `target` indexes living characters on the side the card targets, and
//!   is ignored by cards that take no target

use serde::{Deserialize, Serialize};

use super::player::CharacterRef;
use crate::cards::CardKind;

/// One card play as submitted by a player or the AI.
///
/// ```
/// use lingcard::core::PlayAction;
///
/// let action = PlayAction::new(0, 1).targeting(0);
/// assert_eq!(action.target, Some(0));
/// assert_eq!(PlayAction::new(2, 0).target, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayAction {
    pub card: usize,
    pub actor: usize,
    pub target: Option<usize>,
}

impl PlayAction {
    /// An action with no target.
    #[must_use]
    pub const fn new(card: usize, actor: usize) -> Self {
        Self {
            card,
            actor,
            target: None,
        }
    }

    #[must_use]
    pub const fn targeting(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }
}

impl std::fmt::Display for PlayAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target {
            Some(target) => write!(f, "card {} by {} -> {}", self.card, self.actor, target),
            None => write!(f, "card {} by {}", self.card, self.actor),
        }
    }
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub card: CardKind,
    pub actor: CharacterRef,
    pub target: Option<CharacterRef>,
    /// Damage dealt to characters other than the actor, after mitigation.
    pub damage_dealt: u32,
    /// Characters that went down during the action.
    pub knocked_out: Vec<CharacterRef>,
    /// The action ended the match.
    pub game_over: bool,
}

impl ActionReport {
    pub(crate) fn new(card: CardKind, actor: CharacterRef, target: Option<CharacterRef>) -> Self {
        Self {
            card,
            actor,
            target,
            damage_dealt: 0,
            knocked_out: Vec::new(),
            game_over: false,
        }
    }
}
