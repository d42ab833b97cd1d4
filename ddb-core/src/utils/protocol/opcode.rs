//! Opcode table of the Digi-Dot-Booster firmware.
//!
//! Values must match the chip firmware exactly.

/// Set the color register from an RGB triple.
pub const SET_RGB: u8 = 0xA1;
/// Set the color register from an RGBW quadruple.
pub const SET_RGBW: u8 = 0xA2;
/// Set the color register from HSV; hue is sent little-endian in two bytes.
pub const SET_HSV: u8 = 0xA3;
/// Assign the color register to one LED.
pub const SET_LED: u8 = 0xA4;
/// Assign the color register to every LED.
pub const SET_ALL: u8 = 0xA5;
/// Assign the color register to an inclusive LED range.
pub const SET_RANGE: u8 = 0xA6;
/// Render a rainbow over an inclusive LED range.
pub const SET_RAINBOW: u8 = 0xA7;
/// Reserved by the firmware for gradients. The driver never sends it; see
/// [`crate::utils::math::gradient`].
pub const GRADIENT: u8 = 0xA8;

/// Configure LED count and type.
pub const INIT: u8 = 0xB1;
/// Latch the LED buffer out to the strip.
pub const SHOW: u8 = 0xB2;
/// Shift a range (direction A).
pub const SHIFT_UP: u8 = 0xB3;
/// Shift a range (direction B).
pub const SHIFT_DOWN: u8 = 0xB4;
/// Copy one LED onto another.
pub const COPY_LED: u8 = 0xB5;
/// Tile a range forward.
pub const REPEAT: u8 = 0xB6;

/// Reprogram the RGB channel order.
pub const RGB_ORDER: u8 = 0xC1;

/// Opcode actually sent by `shift_up`.
///
/// The reference driver sends [`SHIFT_DOWN`] for both directions. Enable the
/// `shift-up-b3` feature once the firmware is confirmed to expect
/// [`SHIFT_UP`] here.
pub const SHIFT_UP_WIRE: u8 = if cfg!(feature = "shift-up-b3") {
    SHIFT_UP
} else {
    SHIFT_DOWN
};

/// Number of operand bytes that follow `opcode`, or `None` for bytes that
/// are not in the table.
pub const fn operand_count(opcode: u8) -> Option<usize> {
    match opcode {
        SET_ALL | SHOW => Some(0),
        SET_LED => Some(1),
        SET_RANGE | INIT | COPY_LED => Some(2),
        SET_RGB | RGB_ORDER | SHIFT_UP | SHIFT_DOWN | REPEAT => Some(3),
        SET_RGBW | SET_HSV => Some(4),
        SET_RAINBOW => Some(7),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_counts_match_table() {
        assert_eq!(operand_count(SET_RGB), Some(3));
        assert_eq!(operand_count(SET_RAINBOW), Some(7));
        assert_eq!(operand_count(SHOW), Some(0));
        assert_eq!(operand_count(GRADIENT), None);
        assert_eq!(operand_count(0x00), None);
    }

    #[cfg(not(feature = "shift-up-b3"))]
    #[test]
    fn shift_up_defaults_to_reference_opcode() {
        assert_eq!(SHIFT_UP_WIRE, SHIFT_DOWN);
    }
}
