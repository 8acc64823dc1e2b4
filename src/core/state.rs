//! Match state: players, turn bookkeeping, the delayed-effect queue and the
//! log.
//!
//! ## Player
//!
//! A roster, three card piles (draw, hand, discard), the synergies unlocked
//! at match start, round-scoped flags and a pending extra-draw counter that
//! carries into the player's next turn start.
//!
//! ## MatchState
//!
//! Everything needed to resume a match. The combat engine owns it outright.
//! The document round trip is [`MatchState::to_json`] /
//! [`MatchState::from_json`]; a compact binary snapshot is available via
//! [`MatchState::to_bytes`] / [`MatchState::from_bytes`].

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::PersistError;
use super::log::MatchLog;
use super::player::{CharacterRef, PlayerId, PlayerMap};
use crate::cards::CardKind;
use crate::characters::{Character, TeamSynergy};
use crate::scheduler::{DelayedEffect, Scheduler};

/// Known round-scoped player flags, cleared at the player's turn start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    /// Played an attack-category card this turn.
    pub used_attack: bool,
    /// The strike-bonus synergy has fired this turn.
    pub strike_bonus_used: bool,
    /// The first-hit guard synergy has fired since this player's turn start.
    pub guard_used: bool,
}

/// One side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub roster: Vec<Character>,
    /// Draw pile; the top card is the last element.
    pub deck: Vec<CardKind>,
    pub hand: Vec<CardKind>,
    pub discard: Vec<CardKind>,
    pub synergies: SmallVec<[TeamSynergy; 2]>,
    pub flags: TurnFlags,
    /// Extra cards to draw at this player's next turn start.
    pub pending_extra_draw: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, roster: Vec<Character>) -> Self {
        Self {
            id,
            roster,
            deck: Vec::new(),
            hand: Vec::new(),
            discard: Vec::new(),
            synergies: SmallVec::new(),
            flags: TurnFlags::default(),
            pending_extra_draw: 0,
        }
    }

    #[must_use]
    pub fn has_synergy(&self, synergy: TeamSynergy) -> bool {
        self.synergies.contains(&synergy)
    }

    /// Roster slots of living characters, in roster order.
    #[must_use]
    pub fn living_slots(&self) -> SmallVec<[usize; 2]> {
        self.roster
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter().filter(|c| c.is_alive())
    }

    /// Defeated iff every roster member is down.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.roster.iter().all(|c| !c.is_alive())
    }

    /// Strip every copy of `card` from draw pile, hand and discard.
    /// Returns copies removed.
    pub fn purge(&mut self, card: CardKind) -> usize {
        let before = self.deck.len() + self.hand.len() + self.discard.len();
        self.deck.retain(|&c| c != card);
        self.hand.retain(|&c| c != card);
        self.discard.retain(|&c| c != card);
        before - (self.deck.len() + self.hand.len() + self.discard.len())
    }
}

/// Full state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Seating order, fixed at match start.
    pub turn_order: Vec<PlayerId>,
    /// Starts at 1; advances when the turn pointer wraps to the first seat.
    pub round: u32,
    /// Index into `turn_order` of the acting player.
    pub turn_index: usize,
    pub players: PlayerMap<Player>,
    pub log: MatchLog,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Card kinds permanently out of circulation.
    pub removed_cards: OrdSet<CardKind>,
    pub scheduler: Scheduler,
}

impl MatchState {
    /// A fresh match in round 1 with the first seat to act.
    #[must_use]
    pub fn new(players: PlayerMap<Player>, turn_order: Vec<PlayerId>, log_capacity: usize) -> Self {
        Self {
            turn_order,
            round: 1,
            turn_index: 0,
            players,
            log: MatchLog::new(log_capacity),
            game_over: false,
            winner: None,
            removed_cards: OrdSet::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// The acting player.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order
            .get(self.turn_index)
            .copied()
            .unwrap_or(PlayerId::new(0))
    }

    /// The other seat of a two-player match.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> PlayerId {
        self.players
            .player_ids()
            .find(|&p| p != player)
            .unwrap_or(player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn character(&self, r: CharacterRef) -> &Character {
        &self.players[r.player].roster[r.slot]
    }

    pub fn character_mut(&mut self, r: CharacterRef) -> &mut Character {
        &mut self.players[r.player].roster[r.slot]
    }

    /// Append to the match log.
    pub fn add_log(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    /// Serialize to a structured JSON document.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON document.
    ///
    /// Delayed effects whose kind is not recognised are dropped with a log
    /// line; everything else must parse.
    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        let mut document: serde_json::Value = serde_json::from_str(text)?;
        let mut dropped = Vec::new();
        if let Some(queue) = document
            .pointer_mut("/scheduler/queue")
            .and_then(serde_json::Value::as_array_mut)
        {
            queue.retain(|entry| {
                match serde_json::from_value::<DelayedEffect>(entry.clone()) {
                    Ok(_) => true,
                    Err(err) => {
                        dropped.push(err.to_string());
                        false
                    }
                }
            });
        }

        let mut state: MatchState = serde_json::from_value(document)?;
        for reason in dropped {
            tracing::warn!(%reason, "dropping unrecognized delayed effect");
            state.add_log(format!("Dropped an unrecognized delayed effect ({reason})"));
        }
        Ok(state)
    }

    /// Compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterKind;
    use crate::scheduler::{DelayedKind, Trigger};

    fn sample() -> MatchState {
        let players = PlayerMap::new(2, |id| {
            let mut player = Player::new(
                id,
                vec![Character::new(CharacterKind::Cafe), Character::new(CharacterKind::Jun)],
            );
            player.deck = vec![CardKind::Attack, CardKind::Heal];
            player
        });
        MatchState::new(players, vec![PlayerId::new(1), PlayerId::new(0)], 10)
    }

    #[test]
    fn test_current_and_opponent() {
        let state = sample();
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert_eq!(state.opponent_of(PlayerId::new(1)), PlayerId::new(0));
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_purge_removes_every_copy() {
        let mut player = Player::new(PlayerId::new(0), Vec::new());
        player.deck = vec![CardKind::ReforgeWoodenSword, CardKind::Attack];
        player.hand = vec![CardKind::ReforgeWoodenSword];
        player.discard = vec![CardKind::ReforgeWoodenSword, CardKind::Heal];
        assert_eq!(player.purge(CardKind::ReforgeWoodenSword), 3);
        assert_eq!(player.deck, vec![CardKind::Attack]);
        assert!(player.hand.is_empty());
    }

    #[test]
    fn test_defeat_and_living_slots() {
        let mut state = sample();
        let p0 = PlayerId::new(0);
        state.character_mut(CharacterRef::new(p0, 0)).set_current_hp(0);
        assert_eq!(state.player(p0).living_slots().as_slice(), &[1]);
        assert!(!state.player(p0).is_defeated());

        state.character_mut(CharacterRef::new(p0, 1)).set_current_hp(0);
        assert!(state.player(p0).is_defeated());
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = sample();
        state.removed_cards.insert(CardKind::ReforgeWoodenSword);
        state.scheduler.schedule(DelayedEffect::new(
            DelayedKind::DrawCards { count: 1 },
            PlayerId::new(0),
            2,
            Trigger::TurnStart,
        ));
        state.add_log("hello");

        let json = state.to_json().unwrap();
        let back = MatchState::from_json(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_bytes_round_trip() {
        let state = sample();
        let bytes = state.to_bytes().unwrap();
        assert_eq!(MatchState::from_bytes(&bytes).unwrap(), state);
    }

    #[test]
    fn test_unknown_delayed_kind_is_dropped() {
        let mut state = sample();
        state.scheduler.schedule(DelayedEffect::new(
            DelayedKind::DrawCards { count: 2 },
            PlayerId::new(1),
            3,
            Trigger::TurnStart,
        ));
        let mut document: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        document["scheduler"]["queue"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({
                "kind": {"SummonDragon": {"size": 9}},
                "target": 0,
                "trigger_turn": 2,
                "trigger": "TurnStart",
                "origin": ""
            }));

        let loaded = MatchState::from_json(&document.to_string()).unwrap();
        assert_eq!(loaded.scheduler.len(), 1);
        assert!(loaded.log.contains("unrecognized delayed effect"));
    }
}
