//! Swappable randomness for shuffles and roster "random judgments".
//!
//! The engine never reaches for a global RNG. It is generic over
//! [`Randomness`], so a match can run on a seeded [`GameRng`] for real play
//! or on [`ScriptedRolls`] for replay and tests.
//!
//! ## Determinism
//!
//! ```
//! use lingcard::core::{GameRng, Randomness};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_die(6), b.roll_die(6));
//!
//! // State capture is O(1) regardless of how many numbers were drawn.
//! let saved = a.state();
//! let next = a.roll_die(6);
//! assert_eq!(GameRng::from_state(&saved).roll_die(6), next);
//! ```

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by the combat engine.
pub trait Randomness {
    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Roll a die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// A zero-sided die always yields 1.
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Deterministic ChaCha8-backed RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive an independent RNG, e.g. one per simulated match.
    ///
    /// The same parent seed and `stream` always produce the same child.
    #[must_use]
    pub fn derive(&self, stream: u64) -> Self {
        Self::new(self.seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Randomness for GameRng {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 1;
        }
        self.inner.gen_range(1..=sides)
    }
}

/// Serializable RNG state for checkpointing alongside a match document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Scripted randomness: rolls come from a fixed queue and shuffles keep order.
///
/// When the queue runs dry every further roll returns `fallback`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRolls {
    /// Create a script that yields `rolls` in order, then 1 forever.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Script that never rolls high: every roll is 1 and shuffles are no-ops.
    #[must_use]
    pub fn quiet() -> Self {
        Self::new([])
    }

    /// Value returned once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Randomness for ScriptedRolls {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}

    fn roll_die(&mut self, sides: u32) -> u32 {
        let roll = self.rolls.pop_front().unwrap_or(self.fallback);
        roll.clamp(1, sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(20), rng2.roll_die(20));
        }
    }

    #[test]
    fn test_roll_die_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..500 {
            let roll = rng.roll_die(6);
            assert!((1..=6).contains(&roll));
        }
        assert_eq!(rng.roll_die(0), 1);
    }

    #[test]
    fn test_derive_is_deterministic_and_distinct() {
        let rng = GameRng::new(42);
        assert_eq!(rng.derive(3).seed(), rng.derive(3).seed());
        assert_ne!(rng.derive(3).seed(), rng.derive(4).seed());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=10).collect();
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_state_restore_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            rng.roll_die(100);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die(100)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die(100)).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_scripted_rolls() {
        let mut script = ScriptedRolls::new([6, 2, 9]).with_fallback(3);
        assert_eq!(script.roll_die(6), 6);
        assert_eq!(script.roll_die(6), 2);
        // Out-of-range scripted values clamp to the die.
        assert_eq!(script.roll_die(6), 6);
        assert_eq!(script.remaining(), 0);
        assert_eq!(script.roll_die(6), 3);

        let mut items = vec![1, 2, 3];
        script.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3]);
    }
}
