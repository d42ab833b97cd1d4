//! Color payloads forwarded to the chip's color register.
//!
//! RGB uses `smart_leds_trait::RGB8`. The chip converts HSV itself, so
//! [`Hsv`] keeps its 0-359 hue unconverted.

/// Largest hue the firmware accepts.
pub const MAX_HUE: u16 = 359;

/// HSV color with a degree hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub hue: u16,
    pub sat: u8,
    pub val: u8,
}

impl Hsv {
    pub const fn new(
        hue: u16,
        sat: u8,
        val: u8,
    ) -> Self {
        Self { hue, sat, val }
    }

    /// Hue clamped to [`MAX_HUE`].
    pub const fn clamped_hue(&self) -> u16 {
        if self.hue > MAX_HUE {
            MAX_HUE
        } else {
            self.hue
        }
    }

    /// Hue as the little-endian byte pair the firmware expects.
    pub const fn hue_bytes(&self) -> [u8; 2] {
        self.clamped_hue().to_le_bytes()
    }
}

/// RGB plus a dedicated white channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(
        r: u8,
        g: u8,
        b: u8,
        w: u8,
    ) -> Self {
        Self { r, g, b, w }
    }
}
