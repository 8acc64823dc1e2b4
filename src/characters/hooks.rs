//! Passive hooks, dispatched by character kind.
//!
//! Hooks only touch the character they belong to. Anything with wider
//! reach (drawing cards, reading the opponent) comes back to the engine as
//! a return value or through [`TurnContext`].

use super::character::Character;
use super::kind::CharacterKind;
use crate::cards::CardKind;
use crate::core::Randomness;

/// Liuli's judgment succeeds on this face of a d6.
pub const MIRROR_FACE: u32 = 6;

/// Damage Liuli returns on a successful judgment.
pub const MIRROR_COUNTER: u32 = 2;

/// Hits per turn that Jun's guard softens.
pub const GUARDED_HITS: u32 = 2;

/// Cards Yangguang draws when the opponent stayed passive.
pub const DAYBREAK_DRAW: u32 = 2;

/// What the engine tells a character at its turn start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnContext {
    /// The opponent played an attack during their most recent turn.
    pub opponent_attacked: bool,
}

/// Result of the target's `on_take_damage` hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intercept {
    /// Damage that proceeds to the HP-reduction step.
    pub damage: u32,
    /// Damage returned to the attacker.
    pub counter: u32,
}

impl Character {
    /// Adjust outgoing damage.
    pub fn on_deal_damage(&mut self, damage: u32) -> u32 {
        let first = !self.flags.first_damage_dealt;
        self.flags.first_damage_dealt = true;
        match self.kind() {
            CharacterKind::Cafe if first => damage + 1,
            _ => damage,
        }
    }

    /// Adjust incoming damage and decide on a counter.
    pub fn on_take_damage<R: Randomness>(&mut self, damage: u32, rng: &mut R) -> Intercept {
        let hits = self.flags.hits_taken;
        self.flags.hits_taken += 1;
        match self.kind() {
            CharacterKind::Jun if hits < GUARDED_HITS => Intercept {
                damage: damage.saturating_sub(1),
                counter: 0,
            },
            CharacterKind::Liuli if rng.roll_die(6) == MIRROR_FACE => Intercept {
                damage: 0,
                counter: MIRROR_COUNTER,
            },
            _ => Intercept { damage, counter: 0 },
        }
    }

    /// Returns extra cards the owning player should draw this turn.
    pub fn on_turn_start(&mut self, context: TurnContext) -> u32 {
        match self.kind() {
            CharacterKind::Yangguang if !context.opponent_attacked => DAYBREAK_DRAW,
            _ => 0,
        }
    }

    /// Returns cards the owning player should draw right now.
    pub fn on_turn_end(&mut self) -> u32 {
        match self.kind() {
            CharacterKind::Xinhe if !self.flags.used_card => 1,
            _ => 0,
        }
    }

    pub fn on_card_played(&mut self, _card: CardKind) {
        self.flags.used_card = true;
    }

    pub fn reset_round_flags(&mut self) {
        self.flags = Default::default();
    }
}
