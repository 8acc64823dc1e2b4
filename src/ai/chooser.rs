//! Drives a policy through whole turns.

use super::policy::{ActionPolicy, PriorityPolicy};
use crate::core::{ActionReport, Randomness};
use crate::rules::{Engine, GameResult};

/// Plays turns for whichever player is acting.
#[derive(Clone, Debug, Default)]
pub struct AiChooser<P: ActionPolicy = PriorityPolicy> {
    policy: P,
}

impl<P: ActionPolicy> AiChooser<P> {
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Play the acting player's turn: execute the policy's pick until it has
    /// none left, then end the turn. Returns the reports of accepted
    /// actions.
    pub fn play_turn<R: Randomness>(&self, engine: &mut Engine<R>) -> Vec<ActionReport> {
        let player = engine.current_player();
        let mut reports = Vec::new();

        while !engine.is_over() {
            let Some(action) = self.policy.choose(engine, player) else {
                break;
            };
            match engine.execute_action(action) {
                Ok(report) => reports.push(report),
                Err(err) => {
                    // A policy pick that fails the gate would loop forever.
                    tracing::warn!(%player, %action, %err, "policy chose an illegal action");
                    break;
                }
            }
        }

        if reports.is_empty() && !engine.is_over() {
            engine.add_log(format!("{player} passes"));
        }
        engine.finish_turn();
        reports
    }

    /// Play turns until the match ends or `max_rounds` rounds have passed.
    pub fn play_match<R: Randomness>(&self, engine: &mut Engine<R>, max_rounds: u32) -> Option<GameResult> {
        while !engine.is_over() && engine.state().round <= max_rounds {
            self.play_turn(engine);
        }
        engine.result()
    }
}
