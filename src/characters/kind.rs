//! The roster of playable characters.

use serde::{Deserialize, Serialize};

use crate::resources::PowerThresholds;

/// Default max HP for every roster member.
pub const DEFAULT_MAX_HP: u32 = 10;

/// Playable character kinds. Each kind pairs static data with the passive
/// hooks dispatched in [`super::hooks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Hits harder with the first blow of each turn.
    Cafe,
    /// Shrugs off the first two hits each turn.
    Jun,
    /// May reflect a hit entirely.
    Liuli,
    /// Draws after a turn spent holding back.
    Xinhe,
    /// Draws when the opponent stays passive; revives once.
    Yangguang,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 5] = [
        CharacterKind::Cafe,
        CharacterKind::Jun,
        CharacterKind::Liuli,
        CharacterKind::Xinhe,
        CharacterKind::Yangguang,
    ];

    /// Catalog name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CharacterKind::Cafe => "Cafe",
            CharacterKind::Jun => "Jun",
            CharacterKind::Liuli => "Liuli",
            CharacterKind::Xinhe => "Xinhe",
            CharacterKind::Yangguang => "Yangguang",
        }
    }

    /// Name of the passive, used in narration.
    #[must_use]
    pub const fn passive(self) -> &'static str {
        match self {
            CharacterKind::Cafe => "Opening Edge",
            CharacterKind::Jun => "Iron Guard",
            CharacterKind::Liuli => "Mirror Judgment",
            CharacterKind::Xinhe => "Patient Study",
            CharacterKind::Yangguang => "Daybreak",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            CharacterKind::Cafe => "The first damage dealt each turn is increased by 1.",
            CharacterKind::Jun => "The first two hits taken each turn are reduced by 1.",
            CharacterKind::Liuli => {
                "Each hit rolls a die: on a 6 the hit is negated and 2 damage is returned."
            }
            CharacterKind::Xinhe => "Draws 1 card at turn end if no card was played this turn.",
            CharacterKind::Yangguang => {
                "Draws 2 extra cards if the opponent did not attack last turn. \
                 Once per match, survives a lethal blow by spending all energy."
            }
        }
    }

    #[must_use]
    pub const fn default_max_hp(self) -> u32 {
        DEFAULT_MAX_HP
    }

    /// Power-level thresholds for this kind.
    #[must_use]
    pub const fn thresholds(self) -> PowerThresholds {
        match self {
            CharacterKind::Cafe | CharacterKind::Xinhe | CharacterKind::Yangguang => {
                PowerThresholds::from_sorted([5, 13, 24, 38, 55])
            }
            CharacterKind::Jun => PowerThresholds::from_sorted([6, 16, 31, 52, 80]),
            CharacterKind::Liuli => PowerThresholds::from_sorted([4, 11, 22, 38, 60]),
        }
    }
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
