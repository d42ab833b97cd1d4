//! Math utilities for the Digi-Dot-Booster driver.
//!
//! This module provides the integer gradient interpolation the chip lacks.

pub mod gradient;
