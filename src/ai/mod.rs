//! Computer opponent.
//!
//! The chooser consumes the engine's query surface (`legal_actions`,
//! `targets_for`) and submits actions through `execute_action` like any
//! other player.

pub mod chooser;
pub mod policy;

pub use chooser::AiChooser;
pub use policy::{ActionPolicy, PriorityPolicy, ScoredAction};
