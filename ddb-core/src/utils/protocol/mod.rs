//! Wire protocol of the Digi-Dot-Booster.
//!
//! Every operation becomes one [`Transfer`]: a single opcode frame, or two
//! frames fused into one chip-select window. Encoding is pure; the
//! [`encoder`] functions take the current [`StripBounds`] and return `None`
//! when a range or index falls outside the strip.

pub mod bounds;
pub mod color;
pub mod encoder;
pub mod frame;
pub mod opcode;

pub use bounds::{ColorOrder, DeviceConfig, LedType, StripBounds, MAX_LED_COUNT};
pub use color::{Hsv, Rgbw, MAX_HUE};
pub use frame::{Frame, Transfer, MAX_FRAME_LEN};

/// SPI clock used by the reference wiring (8-bit words, MSB first, mode 0).
pub const SPI_FREQUENCY_HZ: u32 = 12_000_000;
