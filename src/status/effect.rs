//! Status effect kinds and their per-kind rules.
//!
//! Each [`StatusKind`] decides its own category, stacking eligibility, default
//! duration, and what it does when the turn-end pass applies it.
//!
//! ## Kinds
//!
//! | Kind | Category | Duration | Turn-end effect |
//! |------|----------|----------|-----------------|
//! | Poison | damage over time | permanent | deals `stacks` damage, then loses `min(2, stacks)` |
//! | Shield | beneficial | permanent, never ticks | none; absorbs hits in the damage pipeline |
//! | SwordIntent | beneficial | permanent | none; a resource some cards require |
//! | Corruption | status marker | permanent | none |

use serde::{Deserialize, Serialize};

use crate::core::CharacterRef;

/// Category tag for a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    DamageOverTime,
    StatusMarker,
    Beneficial,
}

/// The fixed catalog of status effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusKind {
    Poison,
    Shield,
    /// Stacking "intent" resource consumed by sword techniques.
    SwordIntent,
    /// Cosmetic corruption marker left by the liberated blade.
    Corruption,
}

impl StatusKind {
    #[must_use]
    pub const fn category(self) -> StatusCategory {
        match self {
            StatusKind::Poison => StatusCategory::DamageOverTime,
            StatusKind::Shield | StatusKind::SwordIntent => StatusCategory::Beneficial,
            StatusKind::Corruption => StatusCategory::StatusMarker,
        }
    }

    /// Whether a new application merges into an existing instance.
    #[must_use]
    pub const fn stackable(self) -> bool {
        match self {
            StatusKind::Poison
            | StatusKind::Shield
            | StatusKind::SwordIntent
            | StatusKind::Corruption => true,
        }
    }

    /// Whether the duration counter ever advances for this kind.
    #[must_use]
    pub const fn ticks(self) -> bool {
        !matches!(self, StatusKind::Shield)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StatusKind::Poison => "Poison",
            StatusKind::Shield => "Shield",
            StatusKind::SwordIntent => "Sword Intent",
            StatusKind::Corruption => "Corruption",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaining lifetime of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duration {
    Permanent,
    Turns(u32),
}

impl Duration {
    #[must_use]
    pub fn is_expired(self) -> bool {
        matches!(self, Duration::Turns(0))
    }
}

/// Narrow view of a character that status effects act on.
///
/// Effects may read aliveness and inflict damage through the character's own
/// HP-reduction primitive, nothing more.
pub trait StatusHost {
    fn is_alive(&self) -> bool;

    /// Inflict `amount` damage from a status effect. Returns damage realized.
    fn suffer_status_damage(&mut self, amount: u32) -> u32;
}

/// One live status effect on a character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub stacks: u32,
    pub duration: Duration,
    /// Character credited with damage this effect deals.
    pub source: Option<CharacterRef>,
}

impl StatusEffect {
    /// A permanent effect with `stacks` stacks and no source.
    #[must_use]
    pub fn new(kind: StatusKind, stacks: u32) -> Self {
        Self {
            kind,
            stacks,
            duration: Duration::Permanent,
            source: None,
        }
    }

    #[must_use]
    pub fn poison(stacks: u32, source: CharacterRef) -> Self {
        Self::new(StatusKind::Poison, stacks).with_source(source)
    }

    #[must_use]
    pub fn shield(amount: u32) -> Self {
        Self::new(StatusKind::Shield, amount)
    }

    #[must_use]
    pub fn sword_intent(stacks: u32) -> Self {
        Self::new(StatusKind::SwordIntent, stacks)
    }

    #[must_use]
    pub fn corruption(stacks: u32) -> Self {
        Self::new(StatusKind::Corruption, stacks)
    }

    #[must_use]
    pub fn with_source(mut self, source: CharacterRef) -> Self {
        self.source = Some(source);
        self
    }

    /// Limit the effect to `turns` turn-end ticks. Ignored by kinds that never tick.
    #[must_use]
    pub fn for_turns(mut self, turns: u32) -> Self {
        self.duration = Duration::Turns(turns);
        self
    }

    /// Remove up to `amount` stacks, clamping at zero. Returns stacks removed.
    pub fn reduce_stacks(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.stacks);
        self.stacks -= removed;
        removed
    }

    /// Run this effect's turn-end resolution against its host.
    pub fn apply(&mut self, host: &mut dyn StatusHost) -> EffectOutcome {
        match self.kind {
            StatusKind::Poison => {
                if !host.is_alive() || self.stacks == 0 {
                    return EffectOutcome::Skipped { kind: self.kind };
                }
                let amount = self.stacks;
                let dealt = host.suffer_status_damage(amount);
                self.reduce_stacks(amount.min(2));
                EffectOutcome::Damage {
                    kind: self.kind,
                    amount,
                    dealt,
                    remaining_stacks: self.stacks,
                    source: self.source,
                }
            }
            StatusKind::Shield | StatusKind::SwordIntent | StatusKind::Corruption => {
                EffectOutcome::Passive {
                    kind: self.kind,
                    stacks: self.stacks,
                }
            }
        }
    }

    /// Advance the duration counter. Returns `true` once the effect should go.
    pub fn tick(&mut self) -> bool {
        if self.kind.ticks() {
            if let Duration::Turns(turns) = &mut self.duration {
                *turns = turns.saturating_sub(1);
            }
        }
        self.stacks == 0 || self.duration.is_expired()
    }
}

/// What one effect did during a turn-end pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    Damage {
        kind: StatusKind,
        amount: u32,
        dealt: u32,
        remaining_stacks: u32,
        source: Option<CharacterRef>,
    },
    /// No active effect; reports current strength.
    Passive { kind: StatusKind, stacks: u32 },
    /// Nothing happened (host already down, or no stacks).
    Skipped { kind: StatusKind },
}
