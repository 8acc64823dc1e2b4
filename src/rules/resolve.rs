//! Per-card effect resolution, dispatched by card kind after the action
//! pipeline has committed the play.

use super::engine::Engine;
use crate::cards::{CardCategory, CardKind, BLAZING_SUN_GUARD_COST, THORNS_SELF_DAMAGE};
use crate::core::{ActionError, ActionReport, CharacterRef, PlayerId, Randomness};
use crate::characters::DamageMode;
use crate::scheduler::DelayedKind;
use crate::status::{StatusEffect, StatusKind};

/// Execute threshold for the drawn-sword finisher, in percent of max HP.
const EXECUTE_PERCENT: u32 = 15;

/// Intent spent by a successful execute.
const EXECUTE_INTENT_COST: u32 = 2;

/// Splash damage of the liberated blade against non-primary enemies.
const LIBERATION_SPLASH: u32 = 10;

impl<R: Randomness> Engine<R> {
    /// Resolve `card`'s effect. The card is already paid for.
    pub(crate) fn resolve_card(
        &mut self,
        card: CardKind,
        actor: CharacterRef,
        target: Option<CharacterRef>,
        report: &mut ActionReport,
    ) -> Result<(), ActionError> {
        let value = card.base_value();
        let needs_target = || {
            target.ok_or_else(|| ActionError::Internal(format!("{card} resolved without a target")))
        };

        match card {
            CardKind::Attack | CardKind::SharpSlash | CardKind::SlidingBlade => {
                self.strike(actor, needs_target()?, value, DamageMode::Standard, report);
            }
            CardKind::Heal => {
                let target = needs_target()?;
                let character = self.state.character_mut(target);
                let healed = character.heal(value);
                let line = format!("{} recovers {healed} HP", character.name());
                self.state.add_log(line);
            }
            CardKind::Defend => {
                let target = needs_target()?;
                let character = self.state.character_mut(target);
                character.add_defense(value);
                let line = format!("{} gains {value} defense", character.name());
                self.state.add_log(line);
            }
            CardKind::Poison => {
                let target = needs_target()?;
                let character = self.state.character_mut(target);
                character.statuses.add(StatusEffect::poison(value, actor));
                let line = format!(
                    "{} is poisoned ({} stacks)",
                    character.name(),
                    character.statuses.stacks(StatusKind::Poison)
                );
                self.state.add_log(line);
            }
            CardKind::DrawTest => {
                self.state.players[actor.player].pending_extra_draw += value;
                self.state
                    .add_log(format!("{} will draw {value} more next turn", actor.player));
            }
            CardKind::ThornsSlash => {
                let target = needs_target()?;
                self.apply_damage(actor, THORNS_SELF_DAMAGE, DamageMode::Piercing, report);
                if self.state.character(actor).is_alive() {
                    self.strike(actor, target, value, DamageMode::Standard, report);
                }
            }
            CardKind::DrawSwordSlash => {
                let target = needs_target()?;
                let victim = self.state.character(target);
                let (hp, max_hp) = (victim.current_hp(), victim.max_hp());
                if hp * 100 < max_hp * EXECUTE_PERCENT {
                    let name = victim.name().to_string();
                    if self.execute_target(actor, target, report) {
                        self.state.add_log(format!("{name} is executed"));
                    }
                    self.state
                        .character_mut(actor)
                        .statuses
                        .reduce(StatusKind::SwordIntent, EXECUTE_INTENT_COST);
                } else {
                    self.strike(actor, target, value, DamageMode::Piercing, report);
                    self.state
                        .character_mut(actor)
                        .statuses
                        .remove(StatusKind::SwordIntent);
                }
            }
            CardKind::WheelSlash => {
                self.schedule_for_next_turn(
                    actor.player,
                    DelayedKind::RestoreEnergy { amount: value, slot: actor.slot },
                    card,
                );
                self.schedule_for_next_turn(actor.player, DelayedKind::DrawCards { count: 1 }, card);
            }
            CardKind::SwordEdgeTurn => {
                let character = self.state.character_mut(actor);
                character.statuses.add(StatusEffect::shield(value));
                let line = format!("{} raises a {value} point shield", character.name());
                self.state.add_log(line);
            }
            CardKind::RemoveScars => {
                let character = self.state.character_mut(actor);
                let healed = character.heal(value);
                character.statuses.add(StatusEffect::shield(3));
                let line = format!("{} recovers {healed} HP and gains 3 shield", character.name());
                self.state.add_log(line);
            }
            CardKind::ReforgeWoodenSword
            | CardKind::ReforgeCrudeIron
            | CardKind::ReforgeFamousBlade
            | CardKind::ReforgeDemonBlade
            | CardKind::ReforgeMagicBlade => {
                self.strike(actor, needs_target()?, value, DamageMode::Standard, report);
            }
            CardKind::LiberationMagicBlade => {
                let primary = needs_target()?;
                self.strike(actor, primary, value, DamageMode::Standard, report);
                let others: Vec<_> = self
                    .living_characters(primary.player)
                    .into_iter()
                    .filter(|&r| r != primary)
                    .collect();
                for other in others {
                    if !self.state.character(actor).is_alive() {
                        break;
                    }
                    self.strike(actor, other, LIBERATION_SPLASH, DamageMode::Standard, report);
                }
                self.state
                    .character_mut(actor)
                    .statuses
                    .add(StatusEffect::corruption(1));
            }
            CardKind::BlazingSun => self.blazing_sun(actor, value, report),
        }

        if matches!(
            card.category(),
            CardCategory::SwordAttack | CardCategory::SwordSupport
        ) {
            self.post_sword_effects(card, actor);
        }
        if card.is_single_use() {
            self.reforge(actor, card);
        }
        Ok(())
    }

    /// Follow-ups shared by sword attacks and supports: intent gain and the
    /// next-turn rewards of the attacks.
    fn post_sword_effects(&mut self, card: CardKind, actor: CharacterRef) {
        match card {
            CardKind::SharpSlash => {
                self.schedule_for_next_turn(actor.player, DelayedKind::DrawCards { count: 1 }, card);
            }
            CardKind::SlidingBlade => {
                self.schedule_for_next_turn(
                    actor.player,
                    DelayedKind::RestoreEnergy { amount: 1, slot: actor.slot },
                    card,
                );
            }
            _ => {}
        }

        let intent = match card {
            CardKind::SharpSlash | CardKind::SlidingBlade => 1,
            CardKind::WheelSlash | CardKind::SwordEdgeTurn => 2,
            _ => 0,
        };
        if intent > 0 && self.state.character(actor).is_alive() {
            let character = self.state.character_mut(actor);
            character.statuses.add(StatusEffect::sword_intent(intent));
            let line = format!(
                "{} gathers sword intent ({})",
                character.name(),
                character.statuses.stacks(StatusKind::SwordIntent)
            );
            self.state.add_log(line);
        }
    }

    fn schedule_for_next_turn(&mut self, player: PlayerId, kind: DelayedKind, card: CardKind) {
        let state = &mut self.state;
        let turn = state.scheduler.schedule_next_turn(
            kind,
            player,
            state.round,
            &state.turn_order,
            state.turn_index,
            card.name(),
        );
        tracing::debug!(%player, turn, %card, "delayed effect scheduled");
    }

    /// Take `card` out of circulation and queue its successor for this
    /// turn's end.
    fn reforge(&mut self, actor: CharacterRef, card: CardKind) {
        let player = actor.player;
        let purged = self.state.players[player].purge(card);
        self.state.removed_cards.insert(card);
        tracing::debug!(%player, %card, purged, "card removed from circulation");

        if let Some(next) = card.next_tier() {
            let round = self.state.round;
            self.state.scheduler.schedule_turn_end(
                DelayedKind::InsertCard { card: next.name().to_string() },
                player,
                round,
                card.name(),
            );
            self.state
                .add_log(format!("{card} is reforged; {next} arrives at turn end"));
        }
    }

    /// Burn every other living character. Paying the guard cost spares the
    /// caster's allies.
    fn blazing_sun(&mut self, actor: CharacterRef, value: u32, report: &mut ActionReport) {
        let spared = {
            let caster = self.state.character_mut(actor);
            caster.ledger.spend(BLAZING_SUN_GUARD_COST).is_ok()
        };
        if spared {
            self.state
                .add_log(format!("The blazing sun spares {}'s team", actor.player));
        }

        let enemies = self.living_characters(self.state.opponent_of(actor.player));
        let allies: Vec<_> = if spared {
            Vec::new()
        } else {
            self.living_characters(actor.player)
                .into_iter()
                .filter(|&r| r != actor)
                .collect()
        };

        for enemy in enemies {
            if !self.state.character(actor).is_alive() {
                break;
            }
            self.strike(actor, enemy, value, DamageMode::Standard, report);
        }
        for ally in allies {
            self.apply_damage(ally, value, DamageMode::Standard, report);
        }
    }
}
