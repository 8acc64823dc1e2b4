//! Combat engine integration tests: the legality gate, card resolution,
//! character passives, team synergies and win detection.

use lingcard::cards::Precondition;
use lingcard::core::{EngineConfig, MatchState, Player, PlayerMap, ScriptedRolls};
use lingcard::status::{StatusEffect, StatusKind};
use lingcard::{
    ActionError, CardKind, Catalog, Character, CharacterKind, CharacterRef, Engine, PlayAction,
    PlayerId, TeamSynergy,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn engine_with_rolls(
    p0: [CharacterKind; 2],
    p1: [CharacterKind; 2],
    hp: u32,
    rolls: ScriptedRolls,
) -> Engine<ScriptedRolls> {
    let rosters = [p0, p1];
    let players = PlayerMap::new(2, |id| {
        Player::new(
            id,
            rosters[id.index()]
                .iter()
                .map(|&kind| Character::new(kind).with_max_hp(hp))
                .collect(),
        )
    });
    let state = MatchState::new(players, vec![P0, P1], 100);
    Engine::new(state, Catalog::standard(), EngineConfig::default(), rolls)
}

fn engine(p0: [CharacterKind; 2], p1: [CharacterKind; 2], hp: u32) -> Engine<ScriptedRolls> {
    engine_with_rolls(p0, p1, hp, ScriptedRolls::quiet())
}

fn at(player: PlayerId, slot: usize) -> CharacterRef {
    CharacterRef::new(player, slot)
}

const XINHE_PAIR: [CharacterKind; 2] = [CharacterKind::Xinhe, CharacterKind::Xinhe];
const JUN_PAIR: [CharacterKind; 2] = [CharacterKind::Jun, CharacterKind::Jun];

// =============================================================================
// Legality gate
// =============================================================================

/// A 3-cost card at 2 energy is refused and nothing moves.
#[test]
fn test_insufficient_energy_leaves_state_untouched() {
    let mut engine = engine([CharacterKind::Jun, CharacterKind::Cafe], XINHE_PAIR, 30);
    engine.state_mut().players[P0].hand = vec![CardKind::ThornsSlash, CardKind::Attack];
    engine.state_mut().character_mut(at(P0, 0)).ledger.spend(1).unwrap();
    let before = engine.state().players[P0].clone();

    let err = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap_err();
    assert_eq!(
        err,
        ActionError::InsufficientEnergy {
            name: "Jun".into(),
            card: CardKind::ThornsSlash,
            current: 2,
            limit: 3,
            required: 3,
        }
    );
    assert_eq!(engine.state().players[P0], before);
    assert_eq!(
        engine.state().log.last(),
        Some("Rejected: Jun lacks energy for ThornsSlash: has 2/3, needs 3")
    );
}

/// Drawing the sword needs five intent.
#[test]
fn test_sword_intent_precondition() {
    let mut engine = engine(JUN_PAIR, XINHE_PAIR, 30);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(4));

    let err = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap_err();
    assert_eq!(
        err,
        ActionError::PreconditionUnmet {
            name: "Jun".into(),
            card: CardKind::DrawSwordSlash,
            reason: Precondition::SwordIntent { required: 5, current: 4 },
        }
    );
}

/// Thorns need more HP than they cost.
#[test]
fn test_thorns_health_precondition() {
    let mut engine = engine(JUN_PAIR, XINHE_PAIR, 30);
    engine.state_mut().players[P0].hand = vec![CardKind::ThornsSlash];
    engine.state_mut().character_mut(at(P0, 0)).set_current_hp(9);

    let err = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap_err();
    assert!(matches!(
        err,
        ActionError::PreconditionUnmet {
            reason: Precondition::Health { above: 9, current: 9 },
            ..
        }
    ));
}

// =============================================================================
// Card resolution
// =============================================================================

/// Thorns cost 9 piercing HP, then hit for 18; only the strike is credited.
#[test]
fn test_thorns_slash() {
    let mut engine = engine(JUN_PAIR, XINHE_PAIR, 30);
    engine.state_mut().players[P0].hand = vec![CardKind::ThornsSlash];

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(report.damage_dealt, 18);

    let jun = engine.state().character(at(P0, 0));
    assert_eq!(jun.current_hp(), 21);
    assert_eq!(jun.ledger.accumulated_damage(), 18);
    assert_eq!(jun.ledger.power_level(), 2);
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 12);
}

/// Below 15% HP the drawn sword executes and spends only two intent.
#[test]
fn test_draw_sword_slash_executes() {
    let mut engine = engine(JUN_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(6));
    engine.state_mut().character_mut(at(P1, 0)).set_current_hp(1);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(report.knocked_out, vec![at(P1, 0)]);
    assert!(!report.game_over);
    assert!(engine.state().log.contains("Xinhe is executed"));
    assert_eq!(
        engine.state().character(at(P0, 0)).statuses.stacks(StatusKind::SwordIntent),
        4
    );
}

/// The execute is lethal through defense and the target's guards.
#[test]
fn test_draw_sword_execute_ignores_guards() {
    let mut engine = engine(XINHE_PAIR, JUN_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine.state_mut().players[P1].synergies.push(TeamSynergy::FirstHitGuard);
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(6));
    let jun = engine.state_mut().character_mut(at(P1, 0));
    jun.set_current_hp(1);
    jun.add_defense(3);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 0);
    assert_eq!(report.knocked_out, vec![at(P1, 0)]);
    assert_eq!(report.damage_dealt, 1);
    assert!(!engine.state().players[P1].flags.guard_used);
    assert!(engine.state().log.contains("Jun is executed"));
    assert_eq!(engine.state().character(at(P0, 0)).ledger.accumulated_damage(), 1);
}

/// A roll of six does not save Liuli from an execute.
#[test]
fn test_draw_sword_execute_skips_judgment() {
    let mut engine = engine_with_rolls(
        XINHE_PAIR,
        [CharacterKind::Liuli, CharacterKind::Xinhe],
        10,
        ScriptedRolls::new([6]),
    );
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(5));
    engine.state_mut().character_mut(at(P1, 0)).set_current_hp(1);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(report.knocked_out, vec![at(P1, 0)]);
    assert!(!engine.state().character(at(P1, 0)).is_alive());
    assert_eq!(engine.state().character(at(P0, 0)).current_hp(), 10);
}

/// A revive catches the execute, and no execution is logged.
#[test]
fn test_draw_sword_execute_into_revive() {
    let mut engine = engine(XINHE_PAIR, [CharacterKind::Yangguang, CharacterKind::Xinhe], 10);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(5));
    engine.state_mut().character_mut(at(P1, 0)).set_current_hp(1);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert!(report.knocked_out.is_empty());
    assert_eq!(report.damage_dealt, 0);
    assert!(engine.state().character(at(P1, 0)).revive_used());
    assert!(!engine.state().log.contains("Yangguang is executed"));
    assert_eq!(
        engine.state().character(at(P0, 0)).statuses.stacks(StatusKind::SwordIntent),
        3
    );
}

/// Above the threshold it deals 10 piercing and spends all intent.
#[test]
fn test_draw_sword_slash_pierces() {
    let mut engine = engine(JUN_PAIR, XINHE_PAIR, 30);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawSwordSlash];
    engine
        .state_mut()
        .character_mut(at(P0, 0))
        .statuses
        .add(StatusEffect::sword_intent(5));
    engine
        .state_mut()
        .character_mut(at(P1, 0))
        .statuses
        .add(StatusEffect::shield(5));

    engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    let target = engine.state().character(at(P1, 0));
    assert_eq!(target.current_hp(), 20);
    assert_eq!(target.statuses.stacks(StatusKind::Shield), 5);
    assert!(!engine.state().character(at(P0, 0)).statuses.has(StatusKind::SwordIntent));
}

/// The liberated blade hits its target for 25, splashes 10 and corrupts.
#[test]
fn test_liberation_splash_and_corruption() {
    let mut engine = engine([CharacterKind::Cafe, CharacterKind::Xinhe], XINHE_PAIR, 40);
    engine.state_mut().players[P0].hand = vec![CardKind::LiberationMagicBlade];
    engine.state_mut().character_mut(at(P0, 0)).ledger.accumulate_damage(24);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(1))
        .unwrap();
    // Cafe's first blow adds one.
    assert_eq!(engine.state().character(at(P1, 1)).current_hp(), 14);
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 30);
    assert_eq!(report.damage_dealt, 36);
    assert_eq!(
        engine.state().character(at(P0, 0)).statuses.stacks(StatusKind::Corruption),
        1
    );
}

/// Affording the guard cost spares the caster's allies.
#[test]
fn test_blazing_sun_spares_allies_when_affordable() {
    let mut engine = engine([CharacterKind::Cafe, CharacterKind::Xinhe], XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::BlazingSun];
    engine.state_mut().character_mut(at(P0, 0)).ledger.accumulate_damage(60);
    assert_eq!(engine.state().character(at(P0, 0)).ledger.current(), 8);

    let report = engine.execute_action(PlayAction::new(0, 0)).unwrap();
    assert!(report.game_over);
    assert_eq!(report.knocked_out.len(), 2);
    assert_eq!(engine.result().map(|r| r.winner), Some(P0));
    assert_eq!(engine.state().character(at(P0, 1)).current_hp(), 10);
    assert_eq!(engine.state().character(at(P0, 0)).ledger.current(), 0);
    assert!(engine.state().log.contains("spares Player 1's team"));
}

/// Without the guard cost the sun burns allies too.
#[test]
fn test_blazing_sun_burns_allies_otherwise() {
    let mut engine = engine([CharacterKind::Cafe, CharacterKind::Xinhe], XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::BlazingSun];
    engine.state_mut().character_mut(at(P0, 0)).ledger.accumulate_damage(24);

    let report = engine.execute_action(PlayAction::new(0, 0)).unwrap();
    assert_eq!(report.knocked_out.len(), 3);
    assert!(!engine.state().character(at(P0, 1)).is_alive());
    assert!(engine.state().character(at(P0, 0)).is_alive());
    assert_eq!(engine.result().map(|r| r.winner), Some(P0));
}

/// Heals clamp at max HP.
#[test]
fn test_heal_clamps() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::Heal];
    engine.state_mut().character_mut(at(P0, 1)).set_current_hp(9);

    engine
        .execute_action(PlayAction::new(0, 0).targeting(1))
        .unwrap();
    assert_eq!(engine.state().character(at(P0, 1)).current_hp(), 10);
    assert!(engine.state().log.contains("Xinhe recovers 1 HP"));
}

/// Poison ticks at the caster's own turn end and credits the caster.
#[test]
fn test_poison_card_credits_caster() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::Poison];

    engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    engine.process_turn_end();

    let target = engine.state().character(at(P1, 0));
    assert_eq!(target.current_hp(), 8);
    assert!(!target.statuses.has(StatusKind::Poison));
    assert_eq!(engine.state().character(at(P0, 0)).ledger.accumulated_damage(), 2);
}

/// The draw card pays out at the player's next turn start.
#[test]
fn test_draw_test_extra_cards_next_turn() {
    let mut engine = engine(JUN_PAIR, JUN_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::DrawTest];
    engine.state_mut().players[P0].deck = vec![CardKind::Attack; 10];

    engine.execute_action(PlayAction::new(0, 0)).unwrap();
    assert_eq!(engine.state().players[P0].pending_extra_draw, 2);

    engine.finish_turn();
    engine.finish_turn();
    assert_eq!(engine.state().players[P0].hand.len(), 3);
    assert_eq!(engine.state().players[P0].pending_extra_draw, 0);
}

// =============================================================================
// Passives
// =============================================================================

/// A successful judgment negates the hit and returns two damage.
#[test]
fn test_liuli_counter_on_six() {
    let mut engine = engine_with_rolls(
        [CharacterKind::Cafe, CharacterKind::Jun],
        [CharacterKind::Liuli, CharacterKind::Xinhe],
        10,
        ScriptedRolls::new([6]),
    );
    engine.state_mut().players[P0].hand = vec![CardKind::Attack];

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(report.damage_dealt, 0);
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 10);
    assert_eq!(engine.state().character(at(P0, 0)).current_hp(), 8);
    assert_eq!(engine.state().character(at(P1, 0)).ledger.accumulated_damage(), 2);
}

/// Any other roll lets the hit through.
#[test]
fn test_liuli_judgment_fails() {
    let mut engine = engine_with_rolls(
        [CharacterKind::Cafe, CharacterKind::Jun],
        [CharacterKind::Liuli, CharacterKind::Xinhe],
        10,
        ScriptedRolls::new([3]),
    );
    engine.state_mut().players[P0].hand = vec![CardKind::Attack];

    engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 6);
    assert_eq!(engine.state().character(at(P0, 0)).current_hp(), 10);
}

/// Jun softens the first two hits of a turn.
#[test]
fn test_jun_guard() {
    let mut engine = engine(XINHE_PAIR, [CharacterKind::Jun, CharacterKind::Xinhe], 10);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack; 3];

    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();
    engine.execute_action(PlayAction::new(0, 1).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 6);

    engine.state_mut().character_mut(at(P0, 0)).slots.reset_all();
    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 3);
}

/// The once-per-match revive spends all energy and blocks the credit.
#[test]
fn test_yangguang_revive_once() {
    let mut engine = engine(JUN_PAIR, [CharacterKind::Yangguang, CharacterKind::Xinhe], 10);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack; 2];
    engine.state_mut().character_mut(at(P1, 0)).set_current_hp(2);

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    let yangguang = engine.state().character(at(P1, 0));
    assert!(yangguang.is_alive());
    assert!(yangguang.revive_used());
    assert_eq!(yangguang.current_hp(), 1);
    assert_eq!(yangguang.ledger.current(), 0);
    assert!(report.knocked_out.is_empty());
    assert_eq!(engine.state().character(at(P0, 0)).ledger.accumulated_damage(), 0);
    assert!(engine.state().log.contains("refuses to fall and returns with 1 HP"));

    let report = engine
        .execute_action(PlayAction::new(0, 1).targeting(0))
        .unwrap();
    assert_eq!(report.knocked_out, vec![at(P1, 0)]);
}

// =============================================================================
// Synergies
// =============================================================================

/// A mid-turn level-up opens its extra slot at once.
#[test]
fn test_level_up_adds_slot_mid_turn() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 40);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack; 3];

    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();
    engine.state_mut().character_mut(at(P0, 0)).slots.reset_all();
    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();

    let xinhe = engine.state().character(at(P0, 0));
    assert_eq!(xinhe.ledger.power_level(), 1);
    assert_eq!(xinhe.slots.len(), xinhe.ledger.slot_count() as usize);
    assert_eq!(xinhe.slots.available(), 1);

    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 31);
}

/// Only the team's first damaging strike each turn gets the bonus.
#[test]
fn test_strike_bonus_once_per_turn() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P0].synergies.push(TeamSynergy::StrikeBonus);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack; 2];

    engine.execute_action(PlayAction::new(0, 0).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 6);
    engine.execute_action(PlayAction::new(0, 1).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 3);
    assert!(engine.state().log.contains("Blade and Mirror: +1 damage"));
}

/// The guard eats the first enemy hit and rearms at its owner's turn start.
#[test]
fn test_first_hit_guard() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P1].synergies.push(TeamSynergy::FirstHitGuard);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack; 2];

    let report = engine
        .execute_action(PlayAction::new(0, 0).targeting(0))
        .unwrap();
    assert_eq!(report.damage_dealt, 0);
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 10);
    assert!(engine.state().log.contains("Sunlit Mirror nullifies the hit on Xinhe"));

    engine.execute_action(PlayAction::new(0, 1).targeting(0)).unwrap();
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 7);
    assert!(engine.state().players[P1].flags.guard_used);

    engine.finish_turn();
    assert!(!engine.state().players[P1].flags.guard_used);
}

// =============================================================================
// Win detection
// =============================================================================

/// When the status pass fells the acting side, the opponent wins at once
/// and the rest of the pass is skipped.
#[test]
fn test_status_pass_acting_side_falls_first() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    for player in [P0, P1] {
        let source = at(engine.opponent_of(player), 0);
        for slot in 0..2 {
            let character = engine.state_mut().character_mut(at(player, slot));
            character.set_current_hp(1);
            character.statuses.add(StatusEffect::poison(2, source));
        }
    }

    engine.process_turn_end();
    assert_eq!(engine.result().map(|r| r.winner), Some(P1));
    assert_eq!(engine.state().character(at(P1, 0)).current_hp(), 1);
    assert_eq!(engine.state().character(at(P1, 1)).current_hp(), 1);
    assert!(!engine.state().log.contains("ends the turn"));
}

/// A finished match rejects actions and stops advancing.
#[test]
fn test_finished_match_is_frozen() {
    let mut engine = engine(XINHE_PAIR, XINHE_PAIR, 10);
    engine.state_mut().players[P0].hand = vec![CardKind::Attack];
    for slot in 0..2 {
        engine.state_mut().character_mut(at(P1, slot)).set_current_hp(0);
    }
    let result = engine.check_game_over();
    assert_eq!(result.map(|r| r.winner), Some(P0));

    assert_eq!(
        engine.execute_action(PlayAction::new(0, 0).targeting(0)),
        Err(ActionError::GameOver)
    );
    let round = engine.state().round;
    engine.finish_turn();
    assert_eq!(engine.state().round, round);
    assert_eq!(engine.current_player(), P0);
    assert_eq!(engine.check_game_over(), result);
    let announcements = engine
        .state()
        .log
        .iter()
        .filter(|line| line.starts_with("Game over"))
        .count();
    assert_eq!(announcements, 1);
}
