//! The strike path shared by every damaging card.
//!
//! A strike runs, in order:
//! 1. the strike-bonus synergy of the attacker's team
//! 2. the attacker's `on_deal_damage` hook
//! 3. the first-hit guard synergy of the target's team
//! 4. the target's `on_take_damage` hook (may reduce and counter)
//! 5. [`Character::suffer`], then power-level credit for the attacker
//! 6. counter damage back at the attacker, credited to the target
//!
//! Counters and self-inflicted damage skip the hooks.
//!
//! [`Character::suffer`]: crate::characters::Character::suffer

use super::engine::Engine;
use crate::core::{ActionReport, CharacterRef, Randomness};
use crate::characters::{DamageMode, DamageOutcome, TeamSynergy, SYNERGY_STRIKE};

impl<R: Randomness> Engine<R> {
    /// Strike `target` from `attacker` for `base` damage. Returns the HP
    /// the target actually lost.
    pub(crate) fn strike(
        &mut self,
        attacker: CharacterRef,
        target: CharacterRef,
        base: u32,
        mode: DamageMode,
        report: &mut ActionReport,
    ) -> u32 {
        if !self.state.character(target).is_alive() {
            return 0;
        }

        let mut damage = base;
        let team = &mut self.state.players[attacker.player];
        if damage > 0 && team.has_synergy(TeamSynergy::StrikeBonus) && !team.flags.strike_bonus_used {
            team.flags.strike_bonus_used = true;
            damage += SYNERGY_STRIKE;
            self.state.add_log(format!(
                "{}: +{SYNERGY_STRIKE} damage",
                TeamSynergy::StrikeBonus
            ));
        }

        let boosted = self.state.character_mut(attacker).on_deal_damage(damage);
        if boosted > damage {
            let attacker_ch = self.state.character(attacker);
            let line = format!(
                "{}'s {} adds {} damage",
                attacker_ch.name(),
                attacker_ch.kind().passive(),
                boosted - damage
            );
            self.state.add_log(line);
        }
        damage = boosted;

        if target.player != attacker.player && damage > 0 {
            let guard = &mut self.state.players[target.player];
            if guard.has_synergy(TeamSynergy::FirstHitGuard) && !guard.flags.guard_used {
                guard.flags.guard_used = true;
                let line = format!(
                    "{} nullifies the hit on {}",
                    TeamSynergy::FirstHitGuard,
                    self.state.character(target).name()
                );
                self.state.add_log(line);
                return 0;
            }
        }

        let intercept = self
            .state
            .character_mut(target)
            .on_take_damage(damage, &mut self.rng);
        if intercept.damage < damage || intercept.counter > 0 {
            let target_ch = self.state.character(target);
            let line = format!(
                "{}'s {} turns {} damage into {}",
                target_ch.name(),
                target_ch.kind().passive(),
                damage,
                intercept.damage
            );
            self.state.add_log(line);
        }

        let outcome = self.apply_damage(target, intercept.damage, mode, report);
        report.damage_dealt += outcome.realized;
        self.credit(attacker, outcome.realized);
        tracing::debug!(
            ?attacker,
            ?target,
            base,
            dealt = outcome.realized,
            "strike resolved"
        );

        if intercept.counter > 0 && self.state.character(attacker).is_alive() {
            let countered = self.apply_damage(attacker, intercept.counter, DamageMode::Standard, report);
            self.credit(target, countered.realized);
        }

        outcome.realized
    }

    /// Take all of `target`'s remaining HP, skipping the strike hooks and
    /// synergies. Realized damage is credited to `attacker`. Returns whether
    /// the target went down.
    pub(crate) fn execute_target(
        &mut self,
        attacker: CharacterRef,
        target: CharacterRef,
        report: &mut ActionReport,
    ) -> bool {
        let hp = self.state.character(target).current_hp();
        let outcome = self.apply_damage(target, hp, DamageMode::Execute, report);
        report.damage_dealt += outcome.realized;
        self.credit(attacker, outcome.realized);
        tracing::debug!(?attacker, ?target, died = outcome.died, "execute resolved");
        outcome.died
    }

    /// Run damage straight through [`crate::characters::Character::suffer`]
    /// and narrate it. No hooks, no credit.
    pub(crate) fn apply_damage(
        &mut self,
        target: CharacterRef,
        amount: u32,
        mode: DamageMode,
        report: &mut ActionReport,
    ) -> DamageOutcome {
        let character = self.state.character_mut(target);
        let outcome = character.suffer(amount, mode);
        let name = character.name().to_string();
        let (hp, max_hp) = (character.current_hp(), character.max_hp());

        if outcome.absorbed > 0 {
            let broke = if outcome.shield_depleted { " and breaks" } else { "" };
            self.state
                .add_log(format!("{name}'s shield absorbs {}{broke}", outcome.absorbed));
        }
        if let Some(revived) = outcome.revived {
            self.state
                .add_log(format!("{name} refuses to fall and returns with {revived} HP"));
        } else if outcome.requested > 0 {
            self.state.add_log(format!(
                "{name} takes {} damage ({hp}/{max_hp} HP)",
                outcome.realized
            ));
        }
        if outcome.died {
            self.state.add_log(format!("{name} is down"));
            report.knocked_out.push(target);
        }
        outcome
    }

    /// Credit realized damage toward `dealer`'s power level. The fallen earn
    /// nothing.
    pub(crate) fn credit(&mut self, dealer: CharacterRef, amount: u32) {
        if amount == 0 {
            return;
        }
        let character = self.state.character_mut(dealer);
        if !character.is_alive() {
            return;
        }
        if character.ledger.accumulate_damage(amount) {
            character.slots.reconcile(character.ledger.slot_count());
            let level = character.ledger.power_level();
            let name = character.name().to_string();
            tracing::info!(character = %name, level, "power level up");
            self.state
                .add_log(format!("{name} reaches power level {level} and recharges"));
        }
    }
}
