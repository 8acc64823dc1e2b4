//! Team synergies unlocked by fielding specific character pairs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::CharacterKind;

/// Extra cards drawn per turn under [`TeamSynergy::DrawBonus`].
pub const SYNERGY_DRAW: u32 = 2;

/// Bonus damage on the first strike under [`TeamSynergy::StrikeBonus`].
pub const SYNERGY_STRIKE: u32 = 1;

/// A team-wide bonus, derived once at match start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSynergy {
    /// The first damaging strike each turn deals +1.
    StrikeBonus,
    /// Draw 2 extra cards at turn start.
    DrawBonus,
    /// The first damage taken during each opposing turn is nullified.
    FirstHitGuard,
}

impl TeamSynergy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TeamSynergy::StrikeBonus => "Blade and Mirror",
            TeamSynergy::DrawBonus => "Study Group",
            TeamSynergy::FirstHitGuard => "Sunlit Mirror",
        }
    }
}

impl std::fmt::Display for TeamSynergy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A pair of kinds that unlocks a synergy when fielded together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyRule {
    pub members: [CharacterKind; 2],
    pub synergy: TeamSynergy,
}

impl SynergyRule {
    #[must_use]
    pub const fn new(a: CharacterKind, b: CharacterKind, synergy: TeamSynergy) -> Self {
        Self {
            members: [a, b],
            synergy,
        }
    }

    /// The built-in synergy table.
    #[must_use]
    pub fn standard() -> Vec<SynergyRule> {
        vec![
            SynergyRule::new(CharacterKind::Jun, CharacterKind::Liuli, TeamSynergy::StrikeBonus),
            SynergyRule::new(CharacterKind::Cafe, CharacterKind::Xinhe, TeamSynergy::DrawBonus),
            SynergyRule::new(
                CharacterKind::Yangguang,
                CharacterKind::Liuli,
                TeamSynergy::FirstHitGuard,
            ),
        ]
    }

    #[must_use]
    pub fn matches(&self, roster: &[CharacterKind]) -> bool {
        self.members.iter().all(|member| roster.contains(member))
    }
}

/// Synergies a roster unlocks under `rules`, without duplicates.
#[must_use]
pub fn derive_synergies(roster: &[CharacterKind], rules: &[SynergyRule]) -> SmallVec<[TeamSynergy; 2]> {
    let mut active = SmallVec::new();
    for rule in rules.iter().filter(|rule| rule.matches(roster)) {
        if !active.contains(&rule.synergy) {
            active.push(rule.synergy);
        }
    }
    active
}
