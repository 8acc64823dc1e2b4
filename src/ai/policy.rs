//! Action-selection policies.
//!
//! A policy looks at the engine's query surface and picks one action for
//! the acting player. It never mutates the match.

use crate::cards::{CardCategory, CardKind};
use crate::core::{PlayAction, PlayerId, Randomness};
use crate::characters::Character;
use crate::rules::Engine;
use crate::status::StatusKind;

/// Picks the next action for a player, or `None` to end the turn.
pub trait ActionPolicy {
    fn choose<R: Randomness>(&self, engine: &Engine<R>, player: PlayerId) -> Option<PlayAction>;
}

/// A legal action and its heuristic score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredAction {
    pub action: PlayAction,
    pub score: f64,
}

// =============================================================================
// Priority heuristic
// =============================================================================

/// Score bonus for an attack that should kill.
const LETHAL_SCORE: f64 = 100.0;
/// Non-lethal attacks score this minus the target's HP.
const ATTACK_BASE: f64 = 50.0;
const HEAL_PER_POINT: f64 = 10.0;
const HEAL_PER_MISSING: f64 = 2.0;
const DEFEND_LOW_HP: f64 = 30.0;
const DEFEND_BASE: f64 = 10.0;
const POISON_NEW: f64 = 40.0;
const POISON_REFRESH: f64 = 15.0;
const SUPPORT_BASE: f64 = 20.0;
const DRAW_BASE: f64 = 15.0;
const SUN_BASE: f64 = 25.0;
const SUN_PER_ENEMY: f64 = 10.0;
/// Below this energy ratio, costly cards are penalized.
const LOW_ENERGY_RATIO: f32 = 0.5;
const COST_PENALTY: f64 = 5.0;

/// Greedy one-ply heuristic: score every legal action, play the best.
///
/// - attacks: lethal first, otherwise the lowest-HP target
/// - heals: HP actually restored, then how hurt the target is
/// - defends: protect allies under half HP
/// - poison: prefer fresh applications, scaled by target HP
///
/// Ties go to the first candidate in roster-then-hand order.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityPolicy;

impl PriorityPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Every legal action worth considering, scored, in enumeration order.
    /// Heals aimed at full-HP targets are left out.
    #[must_use]
    pub fn candidates<R: Randomness>(&self, engine: &Engine<R>, player: PlayerId) -> Vec<ScoredAction> {
        engine
            .legal_actions(player)
            .into_iter()
            .filter_map(|action| {
                self.score(engine, player, action)
                    .map(|score| ScoredAction { action, score })
            })
            .collect()
    }

    /// Score one action. `None` if the action is not worth enumerating or
    /// its indices do not resolve.
    #[must_use]
    pub fn score<R: Randomness>(
        &self,
        engine: &Engine<R>,
        player: PlayerId,
        action: PlayAction,
    ) -> Option<f64> {
        let state = engine.state();
        let actor_ref = *engine.living_characters(player).get(action.actor)?;
        let actor = state.character(actor_ref);
        let card = *state.player(player).hand.get(action.card)?;
        let target = match action.target {
            Some(index) => Some(state.character(*engine.targets_for(card, player).get(index)?)),
            None => None,
        };

        let mut score = match card.category() {
            CardCategory::Heal => {
                let target = target?;
                let missing = target.missing_hp();
                if missing == 0 {
                    return None;
                }
                f64::from(card.base_value().min(missing)) * HEAL_PER_POINT
                    + f64::from(missing) * HEAL_PER_MISSING
            }
            CardCategory::Defend => {
                let target = target?;
                if target.current_hp() * 2 < target.max_hp() {
                    DEFEND_LOW_HP
                } else {
                    DEFEND_BASE
                }
            }
            CardCategory::Poison => {
                let target = target?;
                let base = if target.statuses.has(StatusKind::Poison) {
                    POISON_REFRESH
                } else {
                    POISON_NEW
                };
                base + f64::from(target.current_hp()) / 2.0
            }
            CardCategory::SwordSupport => {
                let heal = if card == CardKind::RemoveScars {
                    f64::from(actor.missing_hp()) * HEAL_PER_MISSING
                } else {
                    0.0
                };
                SUPPORT_BASE + heal
            }
            CardCategory::Special if card == CardKind::BlazingSun => {
                let enemies = engine.living_characters(engine.opponent_of(player)).len();
                SUN_BASE + SUN_PER_ENEMY * enemies as f64
            }
            CardCategory::Special => DRAW_BASE,
            CardCategory::Attack
            | CardCategory::SwordAttack
            | CardCategory::SwordSpecial
            | CardCategory::Reforge
            | CardCategory::Liberation => {
                let target = target?;
                attack_score(estimated_damage(card, target), target.current_hp())
            }
        };

        if actor.ledger.ratio() < LOW_ENERGY_RATIO {
            score -= f64::from(card.cost()) * COST_PENALTY;
        }
        Some(score)
    }
}

impl ActionPolicy for PriorityPolicy {
    fn choose<R: Randomness>(&self, engine: &Engine<R>, player: PlayerId) -> Option<PlayAction> {
        let mut best: Option<ScoredAction> = None;
        for candidate in self.candidates(engine, player) {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best.map(|b| b.action)
    }
}

fn attack_score(damage: u32, target_hp: u32) -> f64 {
    if target_hp <= damage {
        LETHAL_SCORE
    } else {
        ATTACK_BASE - f64::from(target_hp)
    }
}

/// Headline damage against `target`, ignoring hooks and mitigation.
fn estimated_damage(card: CardKind, target: &Character) -> u32 {
    match card {
        CardKind::DrawSwordSlash if target.current_hp() * 100 < target.max_hp() * 15 => {
            target.current_hp()
        }
        _ => card.base_value(),
    }
}
