//! Utility re-exports for the Digi-Dot-Booster driver.
//!
//! - `protocol`: opcode table, frame/transfer types and the pure command encoder
//! - `math`: gradient interpolation across a virtual LED range
//! - `controllers`: the SPI `Booster` driver, command messages and the
//!   channel-driven controller loop

pub mod controllers;
pub mod math;
pub mod protocol;

pub use controllers::{
    Booster, BoosterCommand, BoosterController, BoosterError, NoResetPin, BOOSTER_CHANNEL,
};
pub use math::gradient::Gradient;
pub use protocol::{DeviceConfig, StripBounds, Transfer};
