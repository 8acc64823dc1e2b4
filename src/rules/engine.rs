//! The combat engine: owner of the match state.
//!
//! `Engine` is split across several files by concern:
//! - this file: construction, accessors, win detection and queries
//! - `turn`: turn start/end, drawing, delayed-effect execution
//! - `pipeline`: action validation and commit
//! - `resolve`: per-card effect resolution
//! - `damage`: the strike path (hooks, synergies, counters, credit)
//!
//! The engine is the only thing that mutates a match. The AI and any UI
//! call its public operations and read [`Engine::state`].

use crate::catalog::Catalog;
use crate::cards::{CardKind, TargetSide};
use crate::core::{
    CharacterRef, EngineConfig, GameRng, MatchState, PlayAction, PlayerId, Randomness,
};

/// Outcome of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Round in which the match ended.
    pub round: u32,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Turn-based combat engine.
///
/// Generic over its randomness source so that matches can be replayed
/// with [`crate::core::ScriptedRolls`].
#[derive(Clone, Debug)]
pub struct Engine<R: Randomness = GameRng> {
    pub(crate) state: MatchState,
    pub(crate) catalog: Catalog,
    pub(crate) config: EngineConfig,
    pub(crate) rng: R,
}

impl<R: Randomness> Engine<R> {
    /// Wrap an existing match, e.g. one loaded with
    /// [`MatchState::from_json`]. New matches come from
    /// [`super::MatchBuilder`].
    #[must_use]
    pub fn new(state: MatchState, catalog: Catalog, config: EngineConfig, rng: R) -> Self {
        Self {
            state,
            catalog,
            config,
            rng,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Direct state access for scenario setup and tooling. Normal play goes
    /// through the engine's operations.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    #[must_use]
    pub fn into_state(self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> PlayerId {
        self.state.opponent_of(player)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// The winner, once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match (self.state.game_over, self.state.winner) {
            (true, Some(winner)) => Some(GameResult {
                winner,
                round: self.state.round,
            }),
            _ => None,
        }
    }

    /// Append a narration line to the match log.
    pub fn add_log(&mut self, line: impl Into<String>) {
        self.state.add_log(line);
    }

    // =========================================================================
    // Win detection
    // =========================================================================

    /// Settle the match if a side has no living characters.
    ///
    /// The acting player is checked before the opponent, so when both sides
    /// fall at once the opponent of the acting player wins. Calling this
    /// again without a state change returns the same result.
    pub fn check_game_over(&mut self) -> Option<GameResult> {
        if self.state.game_over {
            return self.result();
        }

        let current = self.state.current_player();
        let opponent = self.state.opponent_of(current);
        let winner = if self.state.player(current).is_defeated() {
            opponent
        } else if self.state.player(opponent).is_defeated() {
            current
        } else {
            return None;
        };

        self.state.game_over = true;
        self.state.winner = Some(winner);
        tracing::info!(%winner, round = self.state.round, "match over");
        self.state.add_log(format!("Game over: {winner} wins"));
        self.result()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// References to `player`'s living characters, in roster order. A
    /// player-facing actor or target index is an index into this list.
    #[must_use]
    pub fn living_characters(&self, player: PlayerId) -> Vec<CharacterRef> {
        self.state
            .player(player)
            .living_slots()
            .into_iter()
            .map(|slot| CharacterRef::new(player, slot))
            .collect()
    }

    /// Eligible targets for `card` played by `player`. Empty for cards that
    /// take no target.
    #[must_use]
    pub fn targets_for(&self, card: CardKind, player: PlayerId) -> Vec<CharacterRef> {
        match card.target_side() {
            TargetSide::Enemy => self.living_characters(self.state.opponent_of(player)),
            TargetSide::Ally => self.living_characters(player),
            TargetSide::None => Vec::new(),
        }
    }

    /// Every action `player` could submit right now that passes the
    /// legality gate. Roster order outer, hand order inner, then targets.
    /// Empty when it is not `player`'s turn or the match is over.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<PlayAction> {
        let mut actions = Vec::new();
        if self.state.game_over || player != self.state.current_player() {
            return actions;
        }

        let side = self.state.player(player);
        for (actor_index, slot) in side.living_slots().into_iter().enumerate() {
            let actor = &side.roster[slot];
            if !actor.can_act() {
                continue;
            }
            for (hand_index, &card) in side.hand.iter().enumerate() {
                if card.can_use(actor).is_err() {
                    continue;
                }
                let action = PlayAction::new(hand_index, actor_index);
                match card.target_side() {
                    TargetSide::None => actions.push(action),
                    _ => {
                        let count = self.targets_for(card, player).len();
                        actions.extend((0..count).map(|target| action.targeting(target)));
                    }
                }
            }
        }
        actions
    }
}
