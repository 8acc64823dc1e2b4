//! Engine and deck configuration.
//!
//! - `EngineConfig`: match-wide knobs (log size, draw, hand size, energy
//!   bases, synergy table)
//! - `DeckList`: an ordered list of `(card name, count)` entries
//!
//! Both are plain serde types, so an outer layer can load them from any
//! format. The engine itself never reads files.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::characters::SynergyRule;
use crate::resources::{BASE_ACTION_SLOTS, BASE_ENERGY_LIMIT};

/// Match-wide configuration.
///
/// ```
/// use lingcard::core::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_log_capacity(50)
///     .with_initial_hp(15);
/// assert_eq!(config.log_capacity, 50);
/// assert_eq!(config.initial_hp, Some(15));
/// assert_eq!(config.base_draw, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lines retained by the match log.
    pub log_capacity: usize,

    /// Cards drawn at every turn start before bonuses.
    pub base_draw: u32,

    /// Cards dealt to each player before the first turn.
    pub starting_hand_size: u32,

    /// Characters each player fields.
    pub roster_size: usize,

    /// Overrides every character's default max HP.
    pub initial_hp: Option<u32>,

    /// Energy cap before power levels.
    pub base_energy_limit: u32,

    /// Action slots before power levels.
    pub base_action_slots: u32,

    /// Pairs that unlock team synergies.
    pub synergies: Vec<SynergyRule>,
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_base_draw(mut self, draw: u32) -> Self {
        self.base_draw = draw;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: u32) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_roster_size(mut self, size: usize) -> Self {
        self.roster_size = size;
        self
    }

    #[must_use]
    pub fn with_initial_hp(mut self, hp: u32) -> Self {
        self.initial_hp = Some(hp);
        self
    }

    #[must_use]
    pub fn with_energy_bases(mut self, limit: u32, slots: u32) -> Self {
        self.base_energy_limit = limit;
        self.base_action_slots = slots;
        self
    }

    #[must_use]
    pub fn with_synergies(mut self, rules: Vec<SynergyRule>) -> Self {
        self.synergies = rules;
        self
    }

    /// Reject settings no match can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_size == 0 {
            return Err(ConfigError::ZeroRosterSize);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_capacity: 20,
            base_draw: 1,
            starting_hand_size: 3,
            roster_size: 2,
            initial_hp: None,
            base_energy_limit: BASE_ENERGY_LIMIT,
            base_action_slots: BASE_ACTION_SLOTS,
            synergies: SynergyRule::standard(),
        }
    }
}

/// One line of a deck list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: String,
    pub count: u32,
}

/// Deck composition by catalog name. Unknown names are skipped at build time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of `card`.
    #[must_use]
    pub fn with(mut self, card: impl Into<String>, count: u32) -> Self {
        self.entries.push(DeckEntry {
            card: card.into(),
            count,
        });
        self
    }

    /// The default ten-card sword deck.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with("SharpSlash", 2)
            .with("SlidingBlade", 2)
            .with("RemoveScars", 2)
            .with("ReforgeWoodenSword", 1)
            .with("SwordEdgeTurn", 1)
            .with("WheelSlash", 1)
            .with("DrawSwordSlash", 1)
    }

    /// A basic deck of the three baseline cards plus poison.
    #[must_use]
    pub fn basic() -> Self {
        Self::new()
            .with("Attack", 5)
            .with("Heal", 2)
            .with("Defend", 2)
            .with("Poison", 1)
    }

    /// Total cards listed, counting unknown names.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }
}
