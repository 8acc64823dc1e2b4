//! Resource ledger: energy, power level and action slots.
//!
//! Has no dependencies on the rest of the crate beyond error types.

pub mod energy;
pub mod slots;

pub use energy::{
    EnergyLedger, PowerThresholds, BASE_ACTION_SLOTS, BASE_ENERGY_LIMIT, MAX_POWER_LEVEL,
    TURN_REGEN,
};
pub use slots::{ActionSlot, ActionSlots};
