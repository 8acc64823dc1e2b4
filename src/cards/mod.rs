//! Action cards.
//!
//! Cards are plain tags with fixed static data. Categories drive effect
//! resolution in the combat engine:
//! - baseline: attack, heal, defend
//! - status: poison
//! - sword: attacks, specials, supports
//! - reforge: single-use upgrade chain ending in a liberation card
//! - special: everything else

pub mod definition;

pub use definition::{
    CardCategory, CardKind, Precondition, TargetSide, UseBlock, BLAZING_SUN_GUARD_COST,
    DRAW_SWORD_INTENT, THORNS_SELF_DAMAGE,
};
