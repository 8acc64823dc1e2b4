//! Status effect ("buff") engine.
//!
//! ## Rules
//!
//! - At most one live instance per kind on a character; new applications
//!   merge stacks or are rejected.
//! - `apply_all` runs once per character in the turn-end pass, in insertion
//!   order. `tick_all` runs after it, never before, so an effect that spends
//!   its own stacks is removed rather than evaluated again.
//! - Shield takes no part in the turn-end pass beyond reporting its value;
//!   the damage pipeline consults it through [`StatusEffects::absorb`].

pub mod collection;
pub mod effect;

pub use collection::{Absorption, Outcomes, StatusEffects};
pub use effect::{
    Duration, EffectOutcome, StatusCategory, StatusEffect, StatusHost, StatusKind,
};
