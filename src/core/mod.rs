//! Core types: seats, match state, actions, randomness, configuration,
//! errors and the match log.

pub mod action;
pub mod config;
pub mod error;
pub mod log;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionReport, PlayAction};
pub use config::{DeckEntry, DeckList, EngineConfig};
pub use error::{ActionError, ConfigError, EnergyError, PersistError};
pub use log::MatchLog;
pub use player::{CharacterRef, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, Randomness, ScriptedRolls};
pub use state::{MatchState, Player, TurnFlags};
