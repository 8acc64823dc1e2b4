//! The per-character status effect collection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::effect::{EffectOutcome, StatusEffect, StatusHost, StatusKind};

/// Outcomes of one turn-end pass, in insertion order.
pub type Outcomes = SmallVec<[EffectOutcome; 4]>;

/// Result of running incoming damage through a shield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absorption {
    /// Damage left over after the shield.
    pub remaining: u32,
    /// Damage the shield soaked up.
    pub absorbed: u32,
    /// The shield hit zero and was removed.
    pub depleted: bool,
}

/// Live status effects on one character, at most one per kind, kept in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: SmallVec<[StatusEffect; 4]>,
}

impl StatusEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect. Merges stacks into an existing instance of the same
    /// kind when the kind stacks. Returns `false` (and changes nothing) when
    /// the kind is present but does not stack.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        match self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            Some(existing) if effect.kind.stackable() => {
                existing.stacks = existing.stacks.saturating_add(effect.stacks);
                if effect.source.is_some() {
                    existing.source = effect.source;
                }
                true
            }
            Some(_) => false,
            None => {
                self.effects.push(effect);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Current stack count of `kind`, zero when absent.
    #[must_use]
    pub fn stacks(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, |e| e.stacks)
    }

    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Remove `kind` outright, returning it.
    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Remove up to `amount` stacks of `kind`, clamping at zero. The instance
    /// stays in place until the next tick. Returns stacks removed.
    pub fn reduce(&mut self, kind: StatusKind, amount: u32) -> u32 {
        self.effects
            .iter_mut()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.reduce_stacks(amount))
    }

    /// Run `damage` through the shield, if any. A depleted shield is removed
    /// immediately.
    pub fn absorb(&mut self, damage: u32) -> Absorption {
        let Some(index) = self.effects.iter().position(|e| e.kind == StatusKind::Shield) else {
            return Absorption {
                remaining: damage,
                ..Absorption::default()
            };
        };
        let absorbed = self.effects[index].reduce_stacks(damage);
        let depleted = self.effects[index].stacks == 0;
        if depleted {
            self.effects.remove(index);
        }
        Absorption {
            remaining: damage - absorbed,
            absorbed,
            depleted,
        }
    }

    /// Apply every effect once, in insertion order, against `host`.
    ///
    /// Effects see the host's aliveness as left by the previous effect, so a
    /// host killed mid-pass takes no further damage.
    pub fn apply_all(&mut self, host: &mut dyn StatusHost) -> Outcomes {
        self.effects
            .iter_mut()
            .map(|effect| effect.apply(&mut *host))
            .collect()
    }

    /// Advance durations and drop expired or zero-stack effects.
    /// Returns the kinds that were removed.
    pub fn tick_all(&mut self) -> SmallVec<[StatusKind; 4]> {
        let mut removed = SmallVec::new();
        self.effects.retain(|effect| {
            if effect.tick() {
                removed.push(effect.kind);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
