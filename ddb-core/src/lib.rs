//! Command driver for the Digi-Dot-Booster addressable LED controller on
//! no-std embedded platforms.
//!
//! For a runnable host demo, see the `ddb-app/mock-mcu` crate.
#![no_std]

pub mod utils;
