//! Card kinds and their static data.
//!
//! Every card is a [`CardKind`]: a plain tag whose cost, category, target
//! side and base value are fixed. Resolution is dispatched by category in
//! the combat engine; this module only answers "what is this card" and
//! "may this character play it".
//!
//! ```
//! use lingcard::cards::{CardCategory, CardKind};
//!
//! let card = CardKind::ReforgeWoodenSword;
//! assert_eq!(card.category(), CardCategory::Reforge);
//! assert!(card.is_single_use());
//! assert_eq!(card.next_tier(), Some(CardKind::ReforgeCrudeIron));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::characters::Character;
use crate::status::StatusKind;

/// Category tag driving effect resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Attack,
    Heal,
    Defend,
    Poison,
    Special,
    SwordAttack,
    SwordSpecial,
    SwordSupport,
    Reforge,
    Liberation,
}

impl CardCategory {
    /// Whether playing this category counts as "used an attack" for the turn.
    #[must_use]
    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            CardCategory::Attack
                | CardCategory::SwordAttack
                | CardCategory::SwordSpecial
                | CardCategory::Reforge
                | CardCategory::Liberation
        )
    }
}

/// Which side of the table a card's target comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSide {
    /// A living character of the opposing player.
    Enemy,
    /// A living character of the acting player, the actor included.
    Ally,
    /// No target; the card acts on its user or on everyone.
    None,
}

/// Every playable card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CardKind {
    Attack,
    Heal,
    Defend,
    Poison,
    DrawTest,
    SharpSlash,
    SlidingBlade,
    ThornsSlash,
    DrawSwordSlash,
    WheelSlash,
    SwordEdgeTurn,
    RemoveScars,
    ReforgeWoodenSword,
    ReforgeCrudeIron,
    ReforgeFamousBlade,
    ReforgeDemonBlade,
    ReforgeMagicBlade,
    LiberationMagicBlade,
    BlazingSun,
}

/// Sword intent needed to draw the blade.
pub const DRAW_SWORD_INTENT: u32 = 5;

/// HP a character must exceed to cut through thorns.
pub const THORNS_SELF_DAMAGE: u32 = 9;

/// Extra energy that spares allies from the blazing sun.
pub const BLAZING_SUN_GUARD_COST: u32 = 3;

impl CardKind {
    pub const ALL: [CardKind; 19] = [
        CardKind::Attack,
        CardKind::Heal,
        CardKind::Defend,
        CardKind::Poison,
        CardKind::DrawTest,
        CardKind::SharpSlash,
        CardKind::SlidingBlade,
        CardKind::ThornsSlash,
        CardKind::DrawSwordSlash,
        CardKind::WheelSlash,
        CardKind::SwordEdgeTurn,
        CardKind::RemoveScars,
        CardKind::ReforgeWoodenSword,
        CardKind::ReforgeCrudeIron,
        CardKind::ReforgeFamousBlade,
        CardKind::ReforgeDemonBlade,
        CardKind::ReforgeMagicBlade,
        CardKind::LiberationMagicBlade,
        CardKind::BlazingSun,
    ];

    /// Catalog name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Attack => "Attack",
            CardKind::Heal => "Heal",
            CardKind::Defend => "Defend",
            CardKind::Poison => "Poison",
            CardKind::DrawTest => "DrawTest",
            CardKind::SharpSlash => "SharpSlash",
            CardKind::SlidingBlade => "SlidingBlade",
            CardKind::ThornsSlash => "ThornsSlash",
            CardKind::DrawSwordSlash => "DrawSwordSlash",
            CardKind::WheelSlash => "WheelSlash",
            CardKind::SwordEdgeTurn => "SwordEdgeTurn",
            CardKind::RemoveScars => "RemoveScars",
            CardKind::ReforgeWoodenSword => "ReforgeWoodenSword",
            CardKind::ReforgeCrudeIron => "ReforgeCrudeIron",
            CardKind::ReforgeFamousBlade => "ReforgeFamousBlade",
            CardKind::ReforgeDemonBlade => "ReforgeDemonBlade",
            CardKind::ReforgeMagicBlade => "ReforgeMagicBlade",
            CardKind::LiberationMagicBlade => "LiberationMagicBlade",
            CardKind::BlazingSun => "BlazingSun",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            CardKind::Attack => "Deal 3 damage to an enemy.",
            CardKind::Heal => "Restore 2 HP to an ally.",
            CardKind::Defend => "Grant an ally 1 defense.",
            CardKind::Poison => "Apply 2 poison to an enemy.",
            CardKind::DrawTest => "Draw 2 extra cards next turn.",
            CardKind::SharpSlash => "Deal 12 damage. Draw 1 next turn. +1 sword intent.",
            CardKind::SlidingBlade => "Deal 6 damage. Restore 1 energy next turn. +1 sword intent.",
            CardKind::ThornsSlash => "Lose 9 HP, then deal 18 damage. Requires more than 9 HP.",
            CardKind::DrawSwordSlash => {
                "Requires 5 sword intent. Execute a target below 15% HP, else deal 10 piercing damage."
            }
            CardKind::WheelSlash => "Restore 3 energy and draw 1 next turn. +2 sword intent.",
            CardKind::SwordEdgeTurn => "+2 sword intent and 8 shield.",
            CardKind::RemoveScars => "Heal 5 HP and gain 3 shield.",
            CardKind::ReforgeWoodenSword => "Deal 3 damage, then reforge into Crude Iron.",
            CardKind::ReforgeCrudeIron => "Deal 5 damage, then reforge into Famous Blade.",
            CardKind::ReforgeFamousBlade => "Deal 7 damage, then reforge into Demon Blade.",
            CardKind::ReforgeDemonBlade => "Deal 9 damage, then reforge into Magic Blade.",
            CardKind::ReforgeMagicBlade => "Deal 11 damage, then release the blade.",
            CardKind::LiberationMagicBlade => {
                "Deal 25 damage to a target and 10 to every other enemy. Corrupts the wielder."
            }
            CardKind::BlazingSun => {
                "Deal 30 damage to everyone else. Spend 3 more energy to spare allies."
            }
        }
    }

    #[must_use]
    pub const fn category(self) -> CardCategory {
        match self {
            CardKind::Attack => CardCategory::Attack,
            CardKind::Heal => CardCategory::Heal,
            CardKind::Defend => CardCategory::Defend,
            CardKind::Poison => CardCategory::Poison,
            CardKind::DrawTest | CardKind::BlazingSun => CardCategory::Special,
            CardKind::SharpSlash | CardKind::SlidingBlade => CardCategory::SwordAttack,
            CardKind::ThornsSlash | CardKind::DrawSwordSlash => CardCategory::SwordSpecial,
            CardKind::WheelSlash | CardKind::SwordEdgeTurn | CardKind::RemoveScars => {
                CardCategory::SwordSupport
            }
            CardKind::ReforgeWoodenSword
            | CardKind::ReforgeCrudeIron
            | CardKind::ReforgeFamousBlade
            | CardKind::ReforgeDemonBlade
            | CardKind::ReforgeMagicBlade => CardCategory::Reforge,
            CardKind::LiberationMagicBlade => CardCategory::Liberation,
        }
    }

    /// Energy cost.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            CardKind::Attack
            | CardKind::Heal
            | CardKind::Defend
            | CardKind::ReforgeWoodenSword
            | CardKind::ReforgeCrudeIron => 0,
            CardKind::SlidingBlade | CardKind::RemoveScars | CardKind::ReforgeFamousBlade => 1,
            CardKind::Poison
            | CardKind::DrawTest
            | CardKind::SharpSlash
            | CardKind::WheelSlash
            | CardKind::SwordEdgeTurn
            | CardKind::ReforgeDemonBlade => 2,
            CardKind::ThornsSlash | CardKind::DrawSwordSlash | CardKind::ReforgeMagicBlade => 3,
            CardKind::LiberationMagicBlade | CardKind::BlazingSun => 5,
        }
    }

    /// Headline number: damage, healing, defense, stacks or cards.
    #[must_use]
    pub const fn base_value(self) -> u32 {
        match self {
            CardKind::Attack | CardKind::ReforgeWoodenSword => 3,
            CardKind::Heal | CardKind::Poison | CardKind::DrawTest => 2,
            CardKind::Defend => 1,
            CardKind::SharpSlash => 12,
            CardKind::SlidingBlade => 6,
            CardKind::ThornsSlash => 18,
            CardKind::DrawSwordSlash => 10,
            CardKind::WheelSlash => 3,
            CardKind::SwordEdgeTurn => 8,
            CardKind::RemoveScars => 5,
            CardKind::ReforgeCrudeIron => 5,
            CardKind::ReforgeFamousBlade => 7,
            CardKind::ReforgeDemonBlade => 9,
            CardKind::ReforgeMagicBlade => 11,
            CardKind::LiberationMagicBlade => 25,
            CardKind::BlazingSun => 30,
        }
    }

    #[must_use]
    pub const fn target_side(self) -> TargetSide {
        match self.category() {
            CardCategory::Heal | CardCategory::Defend => TargetSide::Ally,
            CardCategory::Attack
            | CardCategory::Poison
            | CardCategory::SwordAttack
            | CardCategory::SwordSpecial
            | CardCategory::Reforge
            | CardCategory::Liberation => TargetSide::Enemy,
            CardCategory::Special | CardCategory::SwordSupport => TargetSide::None,
        }
    }

    /// Upgrade-chain cards leave circulation once played.
    #[must_use]
    pub const fn is_single_use(self) -> bool {
        matches!(self.category(), CardCategory::Reforge)
    }

    /// Successor in the reforge chain.
    #[must_use]
    pub const fn next_tier(self) -> Option<CardKind> {
        match self {
            CardKind::ReforgeWoodenSword => Some(CardKind::ReforgeCrudeIron),
            CardKind::ReforgeCrudeIron => Some(CardKind::ReforgeFamousBlade),
            CardKind::ReforgeFamousBlade => Some(CardKind::ReforgeDemonBlade),
            CardKind::ReforgeDemonBlade => Some(CardKind::ReforgeMagicBlade),
            CardKind::ReforgeMagicBlade => Some(CardKind::LiberationMagicBlade),
            _ => None,
        }
    }

    /// Card-specific precondition, independent of energy.
    pub fn precondition(self, actor: &Character) -> Result<(), Precondition> {
        match self {
            CardKind::DrawSwordSlash => {
                let current = actor.statuses.stacks(StatusKind::SwordIntent);
                if current < DRAW_SWORD_INTENT {
                    return Err(Precondition::SwordIntent {
                        required: DRAW_SWORD_INTENT,
                        current,
                    });
                }
                Ok(())
            }
            CardKind::ThornsSlash => {
                if actor.current_hp() <= THORNS_SELF_DAMAGE {
                    return Err(Precondition::Health {
                        above: THORNS_SELF_DAMAGE,
                        current: actor.current_hp(),
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Energy affordability, then the card's own precondition.
    pub fn can_use(self, actor: &Character) -> Result<(), UseBlock> {
        if !actor.ledger.can_afford(self.cost()) {
            return Err(UseBlock::Energy {
                current: actor.ledger.current(),
                limit: actor.ledger.limit(),
                required: self.cost(),
            });
        }
        self.precondition(actor).map_err(UseBlock::Precondition)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A card-specific requirement the actor does not meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Precondition {
    #[error("needs {required} sword intent, has {current}")]
    SwordIntent { required: u32, current: u32 },

    #[error("needs more than {above} HP, has {current}")]
    Health { above: u32, current: u32 },
}

/// Why `can_use` refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseBlock {
    Energy { current: u32, limit: u32, required: u32 },
    Precondition(Precondition),
}
