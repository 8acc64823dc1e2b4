//! A fielded character: HP, defense, round flags and owned sub-systems.
//!
//! ## Damage
//!
//! [`Character::suffer`] is the single HP-reduction primitive. Every source
//! of damage goes through it:
//!
//! 1. Unless the hit is piercing, the Shield status absorbs first.
//! 2. The flat defense buff is subtracted (clamped at zero), then itself
//!    reduced by the incoming amount.
//! 3. HP drops. At zero, a revive may intercept the blow before the
//!    character is flagged down.
//!
//! The amount credited toward the attacker's power level is the HP actually
//! lost. Shield absorption, defense, overkill and revives contribute nothing.

use serde::{Deserialize, Serialize};

use super::kind::CharacterKind;
use crate::resources::{ActionSlots, EnergyLedger};
use crate::status::{Outcomes, StatusHost, StatusKind, StatusEffects};

/// Percent of max HP restored per point of energy spent on a revive.
pub const REVIVE_PERCENT_PER_ENERGY: u32 = 5;

/// Which mitigation a hit is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageMode {
    Standard,
    /// Bypasses Shield; defense and death checks still apply.
    Piercing,
    /// Takes all remaining HP past Shield and defense. A revive can still
    /// catch it.
    Execute,
}

/// What one call to [`Character::suffer`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    pub requested: u32,
    pub absorbed: u32,
    pub shield_depleted: bool,
    pub blocked: u32,
    /// HP actually lost; zero when a revive intercepted the blow.
    pub realized: u32,
    /// HP the character came back with, if a revive fired.
    pub revived: Option<u32>,
    pub died: bool,
}

/// Known round-scoped flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFlags {
    /// Dealt damage at least once since the last reset.
    pub first_damage_dealt: bool,
    /// Hits taken since the last reset.
    pub hits_taken: u32,
    /// Played a card since the last reset.
    pub used_card: bool,
}

/// A character on the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    kind: CharacterKind,
    name: String,
    max_hp: u32,
    current_hp: u32,
    defense: u32,
    alive: bool,
    revive_used: bool,
    pub flags: CharacterFlags,
    pub ledger: EnergyLedger,
    pub slots: ActionSlots,
    pub statuses: StatusEffects,
}

impl Character {
    /// A fresh character of `kind` with default stats.
    #[must_use]
    pub fn new(kind: CharacterKind) -> Self {
        let ledger = EnergyLedger::new(kind.thresholds());
        let slots = ActionSlots::new(ledger.slot_count());
        Self {
            kind,
            name: kind.name().to_string(),
            max_hp: kind.default_max_hp(),
            current_hp: kind.default_max_hp(),
            defense: 0,
            alive: true,
            revive_used: false,
            flags: CharacterFlags::default(),
            ledger,
            slots,
            statuses: StatusEffects::new(),
        }
    }

    /// Override max HP, starting at full health.
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self.current_hp = max_hp;
        self.alive = max_hp > 0;
        self
    }

    /// Override the ledger bases, starting at full energy.
    #[must_use]
    pub fn with_energy_bases(mut self, base_limit: u32, base_slots: u32) -> Self {
        self.ledger = EnergyLedger::with_bases(self.kind.thresholds(), base_limit, base_slots);
        self.slots = ActionSlots::new(self.ledger.slot_count());
        self
    }

    #[must_use]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    #[must_use]
    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    #[must_use]
    pub fn missing_hp(&self) -> u32 {
        self.max_hp - self.current_hp
    }

    #[must_use]
    pub fn defense(&self) -> u32 {
        self.defense
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn revive_used(&self) -> bool {
        self.revive_used
    }

    /// Alive and holding at least one unused action slot.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.alive && self.slots.has_available()
    }

    /// Set HP directly, clamped to max. Zero marks the character down.
    pub fn set_current_hp(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp);
        self.alive = self.current_hp > 0;
    }

    /// Restore HP, clamped to max. The fallen cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let healed = amount.min(self.missing_hp());
        self.current_hp += healed;
        healed
    }

    pub fn add_defense(&mut self, amount: u32) {
        self.defense = self.defense.saturating_add(amount);
    }

    /// The HP-reduction primitive.
    pub fn suffer(&mut self, amount: u32, mode: DamageMode) -> DamageOutcome {
        let mut outcome = DamageOutcome {
            requested: amount,
            ..DamageOutcome::default()
        };
        if !self.alive {
            return outcome;
        }

        let mut incoming = amount;
        if mode == DamageMode::Standard {
            let absorption = self.statuses.absorb(incoming);
            incoming = absorption.remaining;
            outcome.absorbed = absorption.absorbed;
            outcome.shield_depleted = absorption.depleted;
        }

        let actual = if mode == DamageMode::Execute {
            self.current_hp
        } else {
            let actual = incoming.saturating_sub(self.defense);
            outcome.blocked = incoming - actual;
            self.defense = self.defense.saturating_sub(incoming);
            actual
        };

        let lost = actual.min(self.current_hp);
        self.current_hp -= lost;
        outcome.realized = lost;

        if self.current_hp == 0 {
            match self.try_revive() {
                Some(hp) => {
                    outcome.revived = Some(hp);
                    outcome.realized = 0;
                }
                None => {
                    self.alive = false;
                    outcome.died = true;
                }
            }
        }
        outcome
    }

    /// Once-per-match revive: spend all energy to come back with a share of
    /// max HP. Only some kinds have it, and it needs energy to fire.
    fn try_revive(&mut self) -> Option<u32> {
        if self.kind != CharacterKind::Yangguang || self.revive_used || self.ledger.current() == 0 {
            return None;
        }
        let energy = self.ledger.drain();
        let hp = (self.max_hp * energy * REVIVE_PERCENT_PER_ENERGY / 100)
            .max(1)
            .min(self.max_hp);
        self.current_hp = hp;
        self.revive_used = true;
        Some(hp)
    }

    /// Turn-start upkeep: reconcile slots with the power level, refill them
    /// and regenerate energy. Returns energy regenerated.
    pub fn begin_turn(&mut self) -> u32 {
        self.slots.reconcile(self.ledger.slot_count());
        self.slots.reset_all();
        self.ledger.reset_for_turn()
    }

    /// Run the turn-end status pass against this character.
    pub fn apply_statuses(&mut self) -> Outcomes {
        let mut statuses = std::mem::take(&mut self.statuses);
        // Status damage is piercing, so the pass never reads the collection.
        let outcomes = statuses.apply_all(self);
        self.statuses = statuses;
        outcomes
    }

    pub fn tick_statuses(&mut self) -> smallvec::SmallVec<[StatusKind; 4]> {
        self.statuses.tick_all()
    }

    /// One-line summary for narration and debugging.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} [{}/{} HP, {}/{} energy, Lv{}]",
            self.name,
            self.current_hp,
            self.max_hp,
            self.ledger.current(),
            self.ledger.limit(),
            self.ledger.power_level()
        );
        if self.defense > 0 {
            line.push_str(&format!(" def {}", self.defense));
        }
        for effect in self.statuses.iter() {
            line.push_str(&format!(" {} x{}", effect.kind, effect.stacks));
        }
        if !self.alive {
            line.push_str(" (down)");
        }
        line
    }
}

impl StatusHost for Character {
    fn is_alive(&self) -> bool {
        self.alive
    }

    /// Status damage skips the Shield but not defense.
    fn suffer_status_damage(&mut self, amount: u32) -> u32 {
        self.suffer(amount, DamageMode::Piercing).realized
    }
}
