//! # lingcard
//!
//! A turn-based, team-vs-team card combat engine.
//!
//! Two players each field a small roster of characters, draw and play
//! energy-gated action cards, and alternate turns until one side has no
//! character left standing.
//!
//! ## Design Principles
//!
//! 1. **One owner**: the [`rules::Engine`] exclusively owns and mutates the
//!    [`core::MatchState`]. Everything else (the AI, a UI) calls its
//!    operations and reads the state.
//!
//! 2. **Checked, then committed**: an action is either rejected before any
//!    mutation or runs through its whole pipeline to the win check.
//!
//! 3. **Closed kinds, explicit tables**: characters, cards, statuses and
//!    delayed effects are enums dispatched by `match`. Content lookup by name
//!    goes through an explicit [`catalog::Catalog`].
//!
//! 4. **Swappable randomness**: shuffles and die rolls come from a
//!    [`core::Randomness`] implementation, so matches replay exactly.
//!
//! ## Modules
//!
//! - `core`: seats, match state, actions, randomness, configuration, errors, log
//! - `resources`: energy ledger, power levels, action slots
//! - `status`: stacking status effects (poison, shield, sword intent, corruption)
//! - `scheduler`: cross-turn delayed effects
//! - `characters`: roster kinds, passive hooks, team synergies
//! - `cards`: card kinds and their static data
//! - `catalog`: name-keyed registration table
//! - `rules`: the combat engine and match setup
//! - `ai`: priority-scored action chooser
//!
//! ## Example
//!
//! ```
//! use lingcard::ai::{AiChooser, PriorityPolicy};
//! use lingcard::catalog::Catalog;
//! use lingcard::core::{DeckList, EngineConfig, GameRng};
//! use lingcard::rules::MatchBuilder;
//!
//! let mut engine = MatchBuilder::new(Catalog::standard(), EngineConfig::default())
//!     .player(["Jun", "Liuli"], DeckList::standard())
//!     .player(["Cafe", "Xinhe"], DeckList::basic())
//!     .build(GameRng::new(2024))
//!     .unwrap();
//! engine.start();
//!
//! let ai = AiChooser::new(PriorityPolicy);
//! ai.play_match(&mut engine, 200);
//! assert!(engine.state().round >= 1);
//! ```

pub mod ai;
pub mod cards;
pub mod catalog;
pub mod characters;
pub mod core;
pub mod resources;
pub mod rules;
pub mod scheduler;
pub mod status;

// Re-export commonly used types
pub use crate::core::{
    ActionError, ActionReport, CharacterRef, DeckList, EngineConfig, GameRng, GameRngState,
    MatchLog, MatchState, PlayAction, Player, PlayerId, PlayerMap, Randomness, ScriptedRolls,
};

pub use crate::resources::{ActionSlots, EnergyLedger, PowerThresholds};

pub use crate::status::{StatusEffect, StatusEffects, StatusKind};

pub use crate::scheduler::{DelayedEffect, DelayedKind, Scheduler, Trigger};

pub use crate::characters::{Character, CharacterKind, TeamSynergy};

pub use crate::cards::{CardCategory, CardKind};

pub use crate::catalog::Catalog;

pub use crate::rules::{Engine, GameResult, MatchBuilder};

pub use crate::ai::{ActionPolicy, AiChooser, PriorityPolicy};
