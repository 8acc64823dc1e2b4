//! Cross-turn delayed-effect scheduler.
//!
//! Effects are keyed by absolute round number, target player and trigger
//! point. The engine drains matches twice per turn: at turn start, before
//! the draw step, and at the moment the turn ends. Execution of a drained
//! effect belongs to the engine.

pub mod delayed;
pub mod queue;

pub use delayed::{DelayedEffect, DelayedKind, Trigger};
pub use queue::{next_turn_for_player, Scheduler};
