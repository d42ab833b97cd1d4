//! Device configuration and the strip bounds derived from it.
//!
//! [`StripBounds`] is the only state the driver keeps. It is produced by
//! initialization and replaced only by re-initialization.

use serde::{Deserialize, Serialize};

/// Largest strip the chip can address.
pub const MAX_LED_COUNT: u16 = 256;

/// Bits per LED, sent verbatim as the init type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LedType {
    #[default]
    Rgb = 24,
    Rgbw = 32,
}

impl LedType {
    pub const fn wire_byte(self) -> u8 {
        self as u8
    }
}

/// Channel order of the attached LEDs. The chip defaults to GRB (ws2812).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorOrder {
    Rgb,
    #[default]
    Grb,
}

/// Strip configuration sent by `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub led_count: u16,
    #[serde(default)]
    pub led_type: LedType,
    #[serde(default)]
    pub color_order: ColorOrder,
}

impl DeviceConfig {
    /// RGB LEDs in GRB order, the chip's power-on defaults.
    pub const fn new(led_count: u16) -> Self {
        Self {
            led_count,
            led_type: LedType::Rgb,
            color_order: ColorOrder::Grb,
        }
    }

    pub const fn with_type(
        mut self,
        led_type: LedType,
    ) -> Self {
        self.led_type = led_type;
        self
    }

    pub const fn with_order(
        mut self,
        color_order: ColorOrder,
    ) -> Self {
        self.color_order = color_order;
        self
    }

    /// LED count clamped to `1..=256`.
    pub const fn clamped_count(&self) -> u16 {
        if self.led_count > MAX_LED_COUNT {
            MAX_LED_COUNT
        } else if self.led_count == 0 {
            1
        } else {
            self.led_count
        }
    }

    /// Count byte for the init frame: rounded up to even, then truncated
    /// so that 256 encodes as 0.
    pub const fn wire_count(&self) -> u8 {
        let n = self.clamped_count();
        (n + (n & 1)) as u8
    }

    /// Whether init must follow up with a channel-order frame.
    pub const fn needs_order_frame(&self) -> bool {
        matches!(self.led_type, LedType::Rgb) && !matches!(self.color_order, ColorOrder::Grb)
    }

    pub const fn bounds(&self) -> StripBounds {
        StripBounds {
            last_index: (self.clamped_count() - 1) as u8,
        }
    }
}

/// Highest addressable LED index.
///
/// Before `init` only index 0 is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StripBounds {
    last_index: u8,
}

impl StripBounds {
    pub const fn new(last_index: u8) -> Self {
        Self { last_index }
    }

    pub const fn last_index(&self) -> u8 {
        self.last_index
    }

    pub const fn led_count(&self) -> u16 {
        self.last_index as u16 + 1
    }

    pub const fn contains(
        &self,
        index: u8,
    ) -> bool {
        index <= self.last_index
    }

    /// `0 <= start <= end <= last_index`.
    pub const fn contains_range(
        &self,
        start: u8,
        end: u8,
    ) -> bool {
        start <= end && end <= self.last_index && start <= self.last_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_clamps_to_256_and_wraps() {
        let cfg = DeviceConfig::new(300);
        assert_eq!(cfg.clamped_count(), 256);
        assert_eq!(cfg.wire_count(), 0);
        assert_eq!(cfg.bounds().last_index(), 255);
    }

    #[test]
    fn odd_count_rounds_up() {
        let cfg = DeviceConfig::new(5);
        assert_eq!(cfg.wire_count(), 6);
        assert_eq!(cfg.bounds().last_index(), 4);
        assert_eq!(DeviceConfig::new(255).wire_count(), 0);
        assert_eq!(DeviceConfig::new(8).wire_count(), 8);
    }

    #[test]
    fn zero_count_treated_as_one() {
        let cfg = DeviceConfig::new(0);
        assert_eq!(cfg.clamped_count(), 1);
        assert_eq!(cfg.wire_count(), 2);
        assert_eq!(cfg.bounds().last_index(), 0);
    }

    #[test]
    fn order_frame_only_for_rgb_type() {
        assert!(!DeviceConfig::new(10).needs_order_frame());
        assert!(DeviceConfig::new(10)
            .with_order(ColorOrder::Rgb)
            .needs_order_frame());
        assert!(!DeviceConfig::new(10)
            .with_type(LedType::Rgbw)
            .with_order(ColorOrder::Rgb)
            .needs_order_frame());
    }

    #[test]
    fn range_checks() {
        let b = StripBounds::new(4);
        assert!(b.contains_range(0, 4));
        assert!(b.contains_range(2, 2));
        assert!(!b.contains_range(3, 2));
        assert!(!b.contains_range(0, 5));
        assert!(!b.contains_range(5, 5));
        assert!(b.contains(4));
        assert!(!b.contains(5));
        assert_eq!(b.led_count(), 5);
    }

    #[test]
    fn default_bounds_allow_only_first_led() {
        let b = StripBounds::default();
        assert!(b.contains(0));
        assert!(!b.contains(1));
    }
}
