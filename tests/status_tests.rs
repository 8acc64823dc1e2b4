//! Status effect integration tests: poison decay, shield absorption and the
//! apply-then-tick ordering.

use lingcard::characters::DamageMode;
use lingcard::status::{Duration, StatusEffect, StatusEffects, StatusKind};
use lingcard::{Character, CharacterKind};
use proptest::prelude::*;

// =============================================================================
// Poison
// =============================================================================

/// 3 poison: 3 damage then 1 stack; next pass 1 damage and the poison is gone.
#[test]
fn test_poison_decay_scenario() {
    let mut target = Character::new(CharacterKind::Xinhe);
    target.statuses.add(StatusEffect::new(StatusKind::Poison, 3));

    target.apply_statuses();
    target.tick_statuses();
    assert_eq!(target.current_hp(), 7);
    assert_eq!(target.statuses.stacks(StatusKind::Poison), 1);

    target.apply_statuses();
    let removed = target.tick_statuses();
    assert_eq!(target.current_hp(), 6);
    assert!(!target.statuses.has(StatusKind::Poison));
    assert_eq!(removed.as_slice(), &[StatusKind::Poison]);
}

/// Poison can kill, and the dead take no further status damage.
#[test]
fn test_poison_kills_then_stops() {
    let mut target = Character::new(CharacterKind::Cafe);
    target.set_current_hp(2);
    target.statuses.add(StatusEffect::new(StatusKind::Poison, 5));

    target.apply_statuses();
    assert!(!target.is_alive());
    assert_eq!(target.current_hp(), 0);

    target.apply_statuses();
    assert_eq!(target.statuses.stacks(StatusKind::Poison), 3);
}

/// Re-applying merges into the single live instance.
#[test]
fn test_poison_merges() {
    let mut effects = StatusEffects::new();
    assert!(effects.add(StatusEffect::new(StatusKind::Poison, 2)));
    assert!(effects.add(StatusEffect::new(StatusKind::Poison, 2)));
    assert_eq!(effects.len(), 1);
    assert_eq!(effects.stacks(StatusKind::Poison), 4);
}

// =============================================================================
// Shield
// =============================================================================

/// A 5 shield takes 5 of an 8 hit and breaks; the rest lands.
#[test]
fn test_shield_absorbs_standard_hit() {
    let mut target = Character::new(CharacterKind::Cafe);
    target.statuses.add(StatusEffect::shield(5));

    let outcome = target.suffer(8, DamageMode::Standard);
    assert_eq!(outcome.realized, 3);
    assert!(outcome.shield_depleted);
    assert_eq!(target.current_hp(), 7);
    assert!(!target.statuses.has(StatusKind::Shield));
}

/// Piercing ignores the shield but not flat defense.
#[test]
fn test_piercing_ignores_shield() {
    let mut target = Character::new(CharacterKind::Cafe);
    target.statuses.add(StatusEffect::shield(5));
    target.add_defense(2);

    let outcome = target.suffer(8, DamageMode::Piercing);
    assert_eq!(outcome.realized, 6);
    assert_eq!(target.current_hp(), 4);
    assert_eq!(target.statuses.stacks(StatusKind::Shield), 5);
}

/// Shields never expire on their own.
#[test]
fn test_shield_survives_ticks() {
    let mut effects = StatusEffects::new();
    effects.add(StatusEffect::shield(4).for_turns(1));
    for _ in 0..3 {
        effects.tick_all();
    }
    assert_eq!(effects.stacks(StatusKind::Shield), 4);
}

/// Timed effects leave once their counter runs out.
#[test]
fn test_timed_corruption_expires() {
    let mut effects = StatusEffects::new();
    effects.add(StatusEffect::corruption(1).for_turns(2));
    assert!(effects.tick_all().is_empty());
    assert_eq!(
        effects.get(StatusKind::Corruption).map(|e| e.duration),
        Some(Duration::Turns(1))
    );
    assert_eq!(effects.tick_all().as_slice(), &[StatusKind::Corruption]);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Poison with s stacks deals s, then drops min(2, s) stacks; it is
    /// removed exactly when nothing remains.
    #[test]
    fn prop_poison_step(stacks in 1u32..40) {
        let mut target = Character::new(CharacterKind::Jun).with_max_hp(100);
        target.statuses.add(StatusEffect::new(StatusKind::Poison, stacks));

        target.apply_statuses();
        target.tick_statuses();

        prop_assert_eq!(target.current_hp(), 100 - stacks);
        let left = stacks - stacks.min(2);
        prop_assert_eq!(target.statuses.stacks(StatusKind::Poison), left);
        prop_assert_eq!(target.statuses.has(StatusKind::Poison), left > 0);
    }

    /// After apply-then-tick no zero-stack or expired effect remains.
    #[test]
    fn prop_apply_then_tick_leaves_no_husks(
        poison in 0u32..6,
        shield in 0u32..6,
        intent in 0u32..6,
        corruption_turns in 0u32..3,
    ) {
        let mut target = Character::new(CharacterKind::Liuli).with_max_hp(50);
        target.statuses.add(StatusEffect::new(StatusKind::Poison, poison));
        target.statuses.add(StatusEffect::shield(shield));
        target.statuses.add(StatusEffect::sword_intent(intent));
        target.statuses.add(StatusEffect::corruption(1).for_turns(corruption_turns));

        target.apply_statuses();
        target.tick_statuses();

        for effect in target.statuses.iter() {
            prop_assert!(effect.stacks > 0);
            prop_assert!(!effect.duration.is_expired());
        }
    }
}
