//! Error taxonomy.
//!
//! - [`ActionError`]: an illegal action, rejected before any mutation, or an
//!   internal invariant violation detected mid-pipeline.
//! - [`EnergyError`]: a ledger spend that cannot be covered.
//! - [`ConfigError`]: malformed configuration or match setup.
//! - [`PersistError`]: document or snapshot encoding failures.
//!
//! Missing catalog entries and unrecognized delayed effects are not errors:
//! they are skipped with a log line.

use thiserror::Error;

use crate::cards::{CardKind, Precondition};

/// Why an action submitted to the engine was not carried out.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the match is already over")]
    GameOver,

    #[error("invalid actor: index {index} but only {living} living characters")]
    InvalidActor { index: usize, living: usize },

    #[error("{name} is down and cannot act")]
    ActorDown { name: String },

    #[error("{name} has used all action slots this turn")]
    NoActionSlot { name: String },

    #[error("invalid hand index {index} (hand holds {hand_size} cards)")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("invalid target index {index} ({available} eligible targets)")]
    InvalidTarget { index: usize, available: usize },

    #[error("{name} lacks energy for {card}: has {current}/{limit}, needs {required}")]
    InsufficientEnergy {
        name: String,
        card: CardKind,
        current: u32,
        limit: u32,
        required: u32,
    },

    #[error("{name} cannot play {card}: {reason}")]
    PreconditionUnmet {
        name: String,
        card: CardKind,
        reason: Precondition,
    },

    /// An invariant the legality gate should have guaranteed did not hold.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Illegal actions are the player's fault; internal errors are ours.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, ActionError::Internal(_))
    }
}

/// Ledger spend failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EnergyError {
    #[error("insufficient energy: need {required}, have {available}")]
    Insufficient { required: u32, available: u32 },
}

/// Configuration or setup mistake.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("power thresholds must strictly increase: {0:?}")]
    ThresholdsNotIncreasing(Vec<u32>),

    #[error("a match needs exactly 2 players, got {0}")]
    PlayerCount(usize),

    #[error("{player} fielded no known characters")]
    EmptyRoster { player: String },

    #[error("roster size must be at least 1")]
    ZeroRosterSize,
}

/// Match document or snapshot encoding failure.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("match document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("match snapshot: {0}")]
    Binary(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::InsufficientEnergy {
            name: "Jun".into(),
            card: CardKind::ThornsSlash,
            current: 2,
            limit: 3,
            required: 3,
        };
        assert_eq!(
            err.to_string(),
            "Jun lacks energy for ThornsSlash: has 2/3, needs 3"
        );
        assert!(!err.is_internal());
        assert!(ActionError::Internal("slot vanished".into()).is_internal());
    }

    #[test]
    fn test_persist_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PersistError = json_err.into();
        assert!(err.to_string().starts_with("match document"));
    }
}
