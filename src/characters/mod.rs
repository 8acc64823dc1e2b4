//! Characters: the roster, the per-character state, passive hooks and team
//! synergies.
//!
//! Character behavior is a closed set of kinds. Each kind's data lives in
//! [`kind`], its passives in [`hooks`], both dispatched by `match` on the
//! kind tag rather than through trait objects.

pub mod character;
pub mod hooks;
pub mod kind;
pub mod synergy;

pub use character::{Character, CharacterFlags, DamageMode, DamageOutcome};
pub use hooks::{Intercept, TurnContext};
pub use kind::{CharacterKind, DEFAULT_MAX_HP};
pub use synergy::{derive_synergies, SynergyRule, TeamSynergy, SYNERGY_DRAW, SYNERGY_STRIKE};
