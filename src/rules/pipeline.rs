//! The action pipeline: every legality check runs before anything is
//! mutated, then the play is committed and resolved.

use super::engine::Engine;
use crate::cards::{CardKind, TargetSide, UseBlock};
use crate::core::{ActionError, ActionReport, CharacterRef, PlayAction, PlayerId, Randomness};

/// A play that passed the legality gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Validated {
    card: CardKind,
    hand_index: usize,
    actor: CharacterRef,
    target: Option<CharacterRef>,
}

impl<R: Randomness> Engine<R> {
    /// Play one card for the acting player.
    ///
    /// Illegal actions are rejected before any state changes; the cause is
    /// written to the match log and returned. A missing target on a targeted
    /// card means the first eligible target.
    pub fn execute_action(&mut self, action: PlayAction) -> Result<ActionReport, ActionError> {
        let player = self.state.current_player();
        let validated = match self.validate(player, action) {
            Ok(validated) => validated,
            Err(err) => {
                tracing::debug!(%player, %action, %err, "action rejected");
                self.state.add_log(format!("Rejected: {err}"));
                return Err(err);
            }
        };

        match self.commit(player, validated) {
            Ok(report) => Ok(report),
            Err(err) => {
                tracing::error!(%player, %action, %err, "action pipeline invariant broken");
                self.state.add_log(format!("Error: {err}"));
                self.check_game_over();
                Err(err)
            }
        }
    }

    fn validate(&self, player: PlayerId, action: PlayAction) -> Result<Validated, ActionError> {
        if self.state.game_over {
            return Err(ActionError::GameOver);
        }

        let side = self.state.player(player);
        let living = side.living_slots();
        let slot = *living.get(action.actor).ok_or(ActionError::InvalidActor {
            index: action.actor,
            living: living.len(),
        })?;
        let actor = &side.roster[slot];
        if !actor.is_alive() {
            return Err(ActionError::ActorDown {
                name: actor.name().to_string(),
            });
        }
        if !actor.slots.has_available() {
            return Err(ActionError::NoActionSlot {
                name: actor.name().to_string(),
            });
        }

        let card = *side.hand.get(action.card).ok_or(ActionError::InvalidHandIndex {
            index: action.card,
            hand_size: side.hand.len(),
        })?;

        card.can_use(actor).map_err(|block| match block {
            UseBlock::Energy {
                current,
                limit,
                required,
            } => ActionError::InsufficientEnergy {
                name: actor.name().to_string(),
                card,
                current,
                limit,
                required,
            },
            UseBlock::Precondition(reason) => ActionError::PreconditionUnmet {
                name: actor.name().to_string(),
                card,
                reason,
            },
        })?;

        let target = match card.target_side() {
            TargetSide::None => None,
            TargetSide::Enemy | TargetSide::Ally => {
                let targets = self.targets_for(card, player);
                let index = action.target.unwrap_or(0);
                let target = targets.get(index).copied().ok_or(ActionError::InvalidTarget {
                    index,
                    available: targets.len(),
                })?;
                Some(target)
            }
        };

        Ok(Validated {
            card,
            hand_index: action.card,
            actor: CharacterRef::new(player, slot),
            target,
        })
    }

    fn commit(&mut self, player: PlayerId, play: Validated) -> Result<ActionReport, ActionError> {
        let Validated {
            card,
            hand_index,
            actor,
            target,
        } = play;

        let side = &mut self.state.players[player];
        side.hand.remove(hand_index);
        side.discard.push(card);
        if card.category().is_attack() {
            side.flags.used_attack = true;
        }

        let character = &mut side.roster[actor.slot];
        character
            .ledger
            .spend(card.cost())
            .map_err(|err| ActionError::Internal(format!("{card}: {err}")))?;
        if !character.slots.use_any() {
            return Err(ActionError::Internal(format!(
                "{} had no free slot for {card}",
                character.name()
            )));
        }
        character.on_card_played(card);
        let actor_name = character.name().to_string();

        let line = match target {
            Some(target) => format!(
                "{actor_name} plays {card} on {}",
                self.state.character(target).name()
            ),
            None => format!("{actor_name} plays {card}"),
        };
        self.state.add_log(line);
        tracing::debug!(%player, %card, ?actor, ?target, "card committed");

        let mut report = ActionReport::new(card, actor, target);
        self.resolve_card(card, actor, target, &mut report)?;
        report.game_over = self.check_game_over().is_some();
        Ok(report)
    }
}
