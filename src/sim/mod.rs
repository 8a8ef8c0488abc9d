//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count tick only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod constellation;
pub mod projectile;
pub mod tick;
pub mod tornado;

pub use constellation::{Connection, ConstellationState, Star};
pub use projectile::{PlayerSlot, Projectile};
pub use tick::{Command, DuelState};
pub use tornado::{Alphabet, SpinDirection, Tornado};
