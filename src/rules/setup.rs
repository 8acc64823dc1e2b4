//! Match setup.

use super::engine::Engine;
use crate::catalog::Catalog;
use crate::cards::CardKind;
use crate::characters::{derive_synergies, Character};
use crate::core::{
    ConfigError, DeckList, EngineConfig, MatchState, Player, PlayerId, PlayerMap, Randomness,
};

/// Roster names and deck for one seat.
#[derive(Clone, Debug, Default)]
struct Seat {
    roster: Vec<String>,
    deck: DeckList,
}

/// Builds a ready-to-start two-player match.
///
/// ## Example
///
/// ```
/// use lingcard::catalog::Catalog;
/// use lingcard::core::{DeckList, EngineConfig, GameRng};
/// use lingcard::rules::MatchBuilder;
///
/// let mut engine = MatchBuilder::new(Catalog::standard(), EngineConfig::default())
///     .player(["Jun", "Liuli"], DeckList::standard())
///     .player(["Cafe", "Xinhe"], DeckList::basic())
///     .build(GameRng::new(7))
///     .unwrap();
///
/// engine.start();
/// assert_eq!(engine.state().round, 1);
/// assert!(!engine.is_over());
/// ```
#[derive(Clone, Debug)]
pub struct MatchBuilder {
    catalog: Catalog,
    config: EngineConfig,
    seats: Vec<Seat>,
}

impl MatchBuilder {
    #[must_use]
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            seats: Vec::new(),
        }
    }

    /// Add a seat. Seats are numbered in the order they are added.
    #[must_use]
    pub fn player<I, S>(mut self, roster: I, deck: DeckList) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seats.push(Seat {
            roster: roster.into_iter().map(Into::into).collect(),
            deck,
        });
        self
    }

    /// Instantiate rosters and decks, shuffle, derive synergies, randomize
    /// the turn order and deal starting hands. Unknown names are skipped
    /// with a warning.
    pub fn build<R: Randomness>(self, mut rng: R) -> Result<Engine<R>, ConfigError> {
        self.config.validate()?;
        if self.seats.len() != 2 {
            return Err(ConfigError::PlayerCount(self.seats.len()));
        }

        let mut warnings = Vec::new();
        let mut players = Vec::with_capacity(self.seats.len());
        for (index, seat) in self.seats.iter().enumerate() {
            let id = PlayerId::new(index as u8);
            let roster = self.build_roster(id, &seat.roster, &mut warnings);
            if roster.is_empty() {
                return Err(ConfigError::EmptyRoster {
                    player: id.to_string(),
                });
            }

            let mut deck = self.build_deck(id, &seat.deck, &mut warnings);
            rng.shuffle(&mut deck);

            let kinds: Vec<_> = roster.iter().map(Character::kind).collect();
            let mut player = Player::new(id, roster);
            player.deck = deck;
            player.synergies = derive_synergies(&kinds, &self.config.synergies);
            players.push(player);
        }
        let players = PlayerMap::from_vec(players).ok_or(ConfigError::PlayerCount(0))?;

        let mut turn_order: Vec<_> = players.player_ids().collect();
        rng.shuffle(&mut turn_order);

        let mut state = MatchState::new(players, turn_order, self.config.log_capacity);
        for warning in warnings {
            state.add_log(warning);
        }
        let unlocked: Vec<_> = state
            .players
            .iter()
            .flat_map(|(id, p)| p.synergies.iter().map(move |s| (id, *s)))
            .collect();
        for (id, synergy) in unlocked {
            state.add_log(format!("{id} unlocks {synergy}"));
        }

        let hand_size = self.config.starting_hand_size;
        let mut engine = Engine::new(state, self.catalog, self.config, rng);
        let ids: Vec<_> = engine.state.players.player_ids().collect();
        for id in ids {
            engine.draw_cards(id, hand_size);
        }
        let first = engine.current_player();
        engine.add_log(format!("{first} goes first"));
        tracing::info!(%first, "match built");
        Ok(engine)
    }

    fn build_roster(&self, id: PlayerId, names: &[String], warnings: &mut Vec<String>) -> Vec<Character> {
        let mut roster = Vec::with_capacity(self.config.roster_size);
        for name in names {
            if roster.len() == self.config.roster_size {
                break;
            }
            let Some(character) = self.catalog.character(name) else {
                tracing::warn!(player = %id, %name, "unknown character skipped");
                warnings.push(format!("{id}: unknown character {name} skipped"));
                continue;
            };
            let mut character = character
                .with_energy_bases(self.config.base_energy_limit, self.config.base_action_slots);
            if let Some(hp) = self.config.initial_hp {
                character = character.with_max_hp(hp);
            }
            roster.push(character);
        }
        roster
    }

    fn build_deck(&self, id: PlayerId, list: &DeckList, warnings: &mut Vec<String>) -> Vec<CardKind> {
        let mut deck = Vec::with_capacity(list.total() as usize);
        for entry in &list.entries {
            match self.catalog.card(&entry.card) {
                Some(card) => deck.extend(std::iter::repeat(card).take(entry.count as usize)),
                None => {
                    tracing::warn!(player = %id, card = %entry.card, "unknown card skipped");
                    warnings.push(format!("{id}: unknown card {} skipped", entry.card));
                }
            }
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::TeamSynergy;
    use crate::core::ScriptedRolls;

    fn builder() -> MatchBuilder {
        MatchBuilder::new(Catalog::standard(), EngineConfig::default())
    }

    #[test]
    fn test_build_deals_hands_and_synergies() {
        let engine = builder()
            .player(["Jun", "Liuli"], DeckList::standard())
            .player(["Cafe", "Xinhe"], DeckList::basic())
            .build(ScriptedRolls::quiet())
            .unwrap();

        let state = engine.state();
        let p0 = state.player(PlayerId::new(0));
        assert_eq!(p0.hand.len(), 3);
        assert_eq!(p0.deck.len(), 7);
        assert_eq!(p0.synergies.as_slice(), &[TeamSynergy::StrikeBonus]);
        let p1 = state.player(PlayerId::new(1));
        assert_eq!(p1.synergies.as_slice(), &[TeamSynergy::DrawBonus]);
        // Unshuffled: the top of the deck is the last entry.
        assert_eq!(p1.hand, vec![CardKind::Poison, CardKind::Defend, CardKind::Defend]);
        assert_eq!(engine.current_player(), PlayerId::new(0));
        assert!(state.log.contains("Player 1 goes first"));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let engine = builder()
            .player(["Jun", "Nobody", "Liuli"], DeckList::new().with("Attack", 2).with("Fireball", 3))
            .player(["Cafe"], DeckList::basic())
            .build(ScriptedRolls::quiet())
            .unwrap();

        let p0 = engine.state().player(PlayerId::new(0));
        assert_eq!(p0.roster.len(), 2);
        assert_eq!(p0.hand.len(), 2);
        assert!(engine.state().log.contains("unknown character Nobody skipped"));
        assert!(engine.state().log.contains("unknown card Fireball skipped"));
    }

    #[test]
    fn test_roster_capped_and_hp_override() {
        let config = EngineConfig::new().with_roster_size(1).with_initial_hp(25);
        let engine = MatchBuilder::new(Catalog::standard(), config)
            .player(["Yangguang", "Liuli"], DeckList::basic())
            .player(["Jun", "Cafe"], DeckList::basic())
            .build(ScriptedRolls::quiet())
            .unwrap();

        let p0 = engine.state().player(PlayerId::new(0));
        assert_eq!(p0.roster.len(), 1);
        assert_eq!(p0.roster[0].max_hp(), 25);
        assert!(p0.synergies.is_empty());
    }

    #[test]
    fn test_setup_errors() {
        let err = builder()
            .player(["Jun"], DeckList::basic())
            .build(ScriptedRolls::quiet())
            .unwrap_err();
        assert_eq!(err, ConfigError::PlayerCount(1));

        let err = builder()
            .player(["Ghost"], DeckList::basic())
            .player(["Jun"], DeckList::basic())
            .build(ScriptedRolls::quiet())
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRoster { player: "Player 1".into() });
    }
}
