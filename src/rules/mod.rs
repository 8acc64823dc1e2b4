//! Combat resolution: the engine that owns a match.
//!
//! - Turn lifecycle: start (upkeep, delayed effects, hooks, draw) and end
//!   (hooks, delayed effects, status pass, win check)
//! - Action pipeline: validate everything, then commit and resolve
//! - Win detection after every action and status death
//!
//! The engine never reads files or discovers content; it is handed a
//! [`crate::catalog::Catalog`] and an [`crate::core::EngineConfig`].

mod damage;
pub mod engine;
mod pipeline;
mod resolve;
pub mod setup;
mod turn;

pub use engine::{Engine, GameResult};
pub use setup::MatchBuilder;
