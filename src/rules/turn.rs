//! Turn lifecycle: start, end, advancing the pointer, drawing cards and
//! executing delayed effects.

use super::engine::Engine;
use crate::core::{CharacterRef, PlayerId, Randomness, TurnFlags};
use crate::characters::{TeamSynergy, TurnContext, SYNERGY_DRAW};
use crate::scheduler::{DelayedEffect, DelayedKind, Trigger};
use crate::status::EffectOutcome;

impl<R: Randomness> Engine<R> {
    /// Run the first turn start of a freshly built match.
    pub fn start(&mut self) -> u32 {
        self.process_turn_start()
    }

    /// Turn start for the acting player. Returns cards drawn in the draw
    /// step.
    pub fn process_turn_start(&mut self) -> u32 {
        let player = self.state.current_player();
        let opponent = self.state.opponent_of(player);
        let round = self.state.round;
        tracing::info!(%player, round, "turn start");
        self.state.add_log(format!("Round {round}: {player}'s turn"));

        let opponent_attacked = self.state.players[opponent].flags.used_attack;
        let side = &mut self.state.players[player];
        side.flags = TurnFlags::default();
        for character in side.roster.iter_mut().filter(|c| c.is_alive()) {
            let regen = character.begin_turn();
            tracing::debug!(status = %character.summary(), regen, "upkeep");
        }

        self.run_delayed(player, Trigger::TurnStart);

        let context = TurnContext { opponent_attacked };
        let mut passive_lines = Vec::new();
        let side = &mut self.state.players[player];
        for character in side.roster.iter_mut().filter(|c| c.is_alive()) {
            let extra = character.on_turn_start(context);
            if extra > 0 {
                side.pending_extra_draw += extra;
                passive_lines.push(format!(
                    "{}'s {}: draw {extra} more",
                    character.name(),
                    character.kind().passive()
                ));
            }
        }
        let synergy = if side.has_synergy(TeamSynergy::DrawBonus) {
            SYNERGY_DRAW
        } else {
            0
        };
        let count = self.config.base_draw + std::mem::take(&mut side.pending_extra_draw) + synergy;
        for line in passive_lines {
            self.state.add_log(line);
        }

        let drawn = self.draw_cards(player, count);
        self.state.add_log(format!("{player} draws {drawn} card(s)"));
        drawn
    }

    /// Turn end for the acting player.
    ///
    /// Hooks and round flags first, then turn-end delayed effects, then the
    /// status pass over both players. A death during the status pass settles
    /// the match immediately and skips the rest.
    pub fn process_turn_end(&mut self) {
        let player = self.state.current_player();
        let opponent = self.state.opponent_of(player);

        let mut hook_draws = 0;
        let mut passive_lines = Vec::new();
        for character in self.state.players[player]
            .roster
            .iter_mut()
            .filter(|c| c.is_alive())
        {
            let draws = character.on_turn_end();
            if draws > 0 {
                hook_draws += draws;
                passive_lines.push(format!(
                    "{}'s {}: draw {draws}",
                    character.name(),
                    character.kind().passive()
                ));
            }
            character.reset_round_flags();
        }
        for line in passive_lines {
            self.state.add_log(line);
        }
        if hook_draws > 0 {
            self.draw_cards(player, hook_draws);
        }

        self.run_delayed(player, Trigger::TurnEnd);

        for side in [player, opponent] {
            for slot in 0..self.state.players[side].roster.len() {
                if self.status_pass(side, slot) {
                    return;
                }
            }
        }

        for (_, side) in self.state.players.iter_mut() {
            for character in &mut side.roster {
                let expired = character.tick_statuses();
                if !expired.is_empty() {
                    tracing::debug!(character = character.name(), ?expired, "statuses expired");
                }
            }
        }

        self.state.add_log(format!("{player} ends the turn"));
        self.check_game_over();
    }

    /// Apply one character's statuses. Returns `true` if the match ended.
    fn status_pass(&mut self, player: PlayerId, slot: usize) -> bool {
        let target = CharacterRef::new(player, slot);
        if !self.state.character(target).is_alive() {
            return false;
        }

        let outcomes = self.state.character_mut(target).apply_statuses();
        let name = self.state.character(target).name().to_string();
        for outcome in outcomes {
            if let EffectOutcome::Damage {
                kind,
                dealt,
                remaining_stacks,
                source,
                ..
            } = outcome
            {
                self.state.add_log(format!(
                    "{name} takes {dealt} {kind} damage ({remaining_stacks} stacks left)"
                ));
                if let Some(source) = source {
                    self.credit(source, dealt);
                }
            }
        }

        if !self.state.character(target).is_alive() {
            self.state.add_log(format!("{name} succumbs"));
            return self.check_game_over().is_some();
        }
        false
    }

    /// Pass the turn pointer to the next seat, starting a new round when it
    /// wraps.
    pub fn advance_turn(&mut self) {
        let seats = self.state.turn_order.len().max(1);
        self.state.turn_index = (self.state.turn_index + 1) % seats;
        if self.state.turn_index == 0 {
            self.state.round += 1;
        }
    }

    /// End the acting player's turn and, if the match goes on, start the
    /// next one.
    pub fn finish_turn(&mut self) {
        if self.state.game_over {
            return;
        }
        self.process_turn_end();
        if self.state.game_over {
            return;
        }
        self.advance_turn();
        self.process_turn_start();
    }

    /// Draw up to `count` cards for `player`. An empty draw pile is refilled
    /// from the shuffled discard, minus removed card kinds. Stops quietly
    /// when both piles run out. Returns cards drawn.
    pub fn draw_cards(&mut self, player: PlayerId, count: u32) -> u32 {
        let removed = self.state.removed_cards.clone();
        let side = &mut self.state.players[player];
        let mut drawn = 0;
        while drawn < count {
            if side.deck.is_empty() {
                if side.discard.is_empty() {
                    break;
                }
                let mut pile: Vec<_> = side
                    .discard
                    .drain(..)
                    .filter(|card| !removed.contains(card))
                    .collect();
                self.rng.shuffle(&mut pile);
                tracing::debug!(%player, cards = pile.len(), "discard reshuffled");
                side.deck = pile;
                continue;
            }
            let Some(card) = side.deck.pop() else { break };
            if removed.contains(&card) {
                continue;
            }
            side.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    fn run_delayed(&mut self, player: PlayerId, trigger: Trigger) {
        let due = self
            .state
            .scheduler
            .drain_matching(self.state.round, player, trigger);
        for effect in due {
            self.execute_delayed(effect);
        }
    }

    fn execute_delayed(&mut self, effect: DelayedEffect) {
        let target = effect.target;
        let origin = if effect.origin.is_empty() {
            "Delayed effect".to_string()
        } else {
            effect.origin
        };
        tracing::debug!(%target, kind = %effect.kind, "delayed effect fires");

        match effect.kind {
            DelayedKind::DrawCards { count } => {
                let drawn = self.draw_cards(target, count);
                self.state
                    .add_log(format!("{origin}: {target} draws {drawn} card(s)"));
            }
            DelayedKind::RestoreEnergy { amount, slot } => {
                let Some(character) = self.state.players[target]
                    .roster
                    .get_mut(slot)
                    .filter(|c| c.is_alive())
                else {
                    self.state
                        .add_log(format!("{origin}: no one left to receive energy"));
                    return;
                };
                let gained = character.ledger.restore(amount);
                let line = format!("{origin}: {} regains {gained} energy", character.name());
                self.state.add_log(line);
            }
            DelayedKind::InsertCard { card } => match self.catalog.card(&card) {
                Some(kind) => {
                    self.state.players[target].hand.push(kind);
                    self.state
                        .add_log(format!("{origin}: {kind} joins {target}'s hand"));
                }
                None => {
                    tracing::warn!(card = %card, "delayed insert names an unknown card");
                    self.state
                        .add_log(format!("{origin}: unknown card {card} skipped"));
                }
            },
        }
    }
}
