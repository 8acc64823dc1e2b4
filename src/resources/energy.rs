//! Energy and power-level ledger.
//!
//! Each character owns one [`EnergyLedger`]. Energy gates card costs; the
//! power level rises as the character deals damage and raises both the energy
//! cap and the number of action slots.
//!
//! ```
//! use lingcard::resources::{EnergyLedger, PowerThresholds};
//!
//! let thresholds = PowerThresholds::new([5, 13, 24, 38, 55]).unwrap();
//! let mut ledger = EnergyLedger::new(thresholds);
//! assert_eq!(ledger.current(), 3);
//!
//! ledger.spend(3).unwrap();
//! assert!(ledger.accumulate_damage(6));
//! // A level-up always fills energy to the new limit.
//! assert_eq!(ledger.power_level(), 1);
//! assert_eq!(ledger.current(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, EnergyError};

/// Hard cap on power level.
pub const MAX_POWER_LEVEL: u8 = 5;

/// Default energy cap before any power level is added.
pub const BASE_ENERGY_LIMIT: u32 = 3;

/// Default slot count before any power level is added.
pub const BASE_ACTION_SLOTS: u32 = 1;

/// Energy restored by the passive per-turn regen.
pub const TURN_REGEN: u32 = 1;

/// Cumulative-damage thresholds for power levels 1 through 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerThresholds([u32; MAX_POWER_LEVEL as usize]);

impl PowerThresholds {
    /// Validate and wrap a threshold table. Entries must strictly increase.
    pub fn new(table: [u32; MAX_POWER_LEVEL as usize]) -> Result<Self, ConfigError> {
        if table.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::ThresholdsNotIncreasing(table.to_vec()));
        }
        Ok(Self(table))
    }

    /// Wrap a table known to be strictly increasing.
    pub(crate) const fn from_sorted(table: [u32; MAX_POWER_LEVEL as usize]) -> Self {
        Self(table)
    }

    /// Power level reached with `accumulated` damage dealt.
    #[must_use]
    pub fn level_for(&self, accumulated: u32) -> u8 {
        let reached = self.0.iter().take_while(|&&t| accumulated >= t).count();
        (reached as u8).min(MAX_POWER_LEVEL)
    }

    /// Damage needed to reach `level`, or `None` past the cap.
    #[must_use]
    pub fn threshold(&self, level: u8) -> Option<u32> {
        level
            .checked_sub(1)
            .and_then(|i| self.0.get(i as usize))
            .copied()
    }

    /// The raw table.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Per-character energy, power level and accumulated damage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyLedger {
    base_limit: u32,
    base_slots: u32,
    current: u32,
    power_level: u8,
    accumulated_damage: u32,
    thresholds: PowerThresholds,
}

impl EnergyLedger {
    /// Create a ledger with default bases, starting at full energy.
    #[must_use]
    pub fn new(thresholds: PowerThresholds) -> Self {
        Self::with_bases(thresholds, BASE_ENERGY_LIMIT, BASE_ACTION_SLOTS)
    }

    /// Create a ledger with explicit bases, starting at full energy.
    #[must_use]
    pub fn with_bases(thresholds: PowerThresholds, base_limit: u32, base_slots: u32) -> Self {
        Self {
            base_limit,
            base_slots,
            current: base_limit,
            power_level: 0,
            accumulated_damage: 0,
            thresholds,
        }
    }

    /// Replace the bases, keeping progress. Current energy is clamped to the new limit.
    pub fn rebase(&mut self, base_limit: u32, base_slots: u32) {
        self.base_limit = base_limit;
        self.base_slots = base_slots;
        self.current = self.current.min(self.limit());
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// `base_limit + power_level`.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.base_limit + u32::from(self.power_level)
    }

    #[must_use]
    pub fn power_level(&self) -> u8 {
        self.power_level
    }

    #[must_use]
    pub fn accumulated_damage(&self) -> u32 {
        self.accumulated_damage
    }

    #[must_use]
    pub fn thresholds(&self) -> &PowerThresholds {
        &self.thresholds
    }

    /// Number of action slots this power level grants.
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.base_slots + u32::from(self.power_level)
    }

    /// Damage still needed for the next level, `None` at the cap.
    #[must_use]
    pub fn damage_to_next_level(&self) -> Option<u32> {
        self.thresholds
            .threshold(self.power_level + 1)
            .map(|t| t.saturating_sub(self.accumulated_damage))
    }

    /// Fraction of the energy cap currently available.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        match self.limit() {
            0 => 0.0,
            limit => self.current as f32 / limit as f32,
        }
    }

    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Spend energy. Fails without mutation when `cost` exceeds current energy.
    pub fn spend(&mut self, cost: u32) -> Result<(), EnergyError> {
        if !self.can_afford(cost) {
            return Err(EnergyError::Insufficient {
                required: cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(())
    }

    /// Restore energy, clamped to the limit. Returns the amount actually gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.limit());
        self.current - before
    }

    /// Empty the pool, returning what was there.
    pub fn drain(&mut self) -> u32 {
        std::mem::take(&mut self.current)
    }

    /// Passive per-turn regen. Distinct from level-up refills.
    pub fn reset_for_turn(&mut self) -> u32 {
        self.restore(TURN_REGEN)
    }

    /// Record damage dealt. Returns `true` when the power level rose, in
    /// which case energy has been filled to the new limit.
    pub fn accumulate_damage(&mut self, amount: u32) -> bool {
        self.accumulated_damage = self.accumulated_damage.saturating_add(amount);
        let level = self.thresholds.level_for(self.accumulated_damage);
        if level > self.power_level {
            self.power_level = level;
            self.current = self.limit();
            return true;
        }
        false
    }
}
