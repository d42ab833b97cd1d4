//! Pure command encoder.
//!
//! One function per logical operation. Functions that address LEDs take the
//! current [`StripBounds`] and return `None` when the request is outside
//! the strip; callers treat `None` as a silent no-op.

use smart_leds_trait::RGB8;

use super::{
    bounds::{DeviceConfig, StripBounds},
    color::{Hsv, Rgbw},
    frame::{Frame, Transfer},
    opcode,
};

/// Channel permutation sent after init when the strip is not GRB.
pub const RGB_ORDER_PAYLOAD: [u8; 3] = [3, 2, 1];

/// Transfers produced by initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSequence {
    pub bounds: StripBounds,
    pub setup: Transfer,
    pub order: Option<Transfer>,
}

impl InitSequence {
    pub fn transfers(&self) -> impl Iterator<Item = &Transfer> {
        core::iter::once(&self.setup).chain(self.order.as_ref())
    }
}

pub fn init(config: &DeviceConfig) -> InitSequence {
    let setup = Frame::new(
        opcode::INIT,
        &[config.wire_count(), config.led_type.wire_byte()],
    );
    let order: Option<Transfer> = config
        .needs_order_frame()
        .then(|| Frame::new(opcode::RGB_ORDER, &RGB_ORDER_PAYLOAD).into());
    InitSequence {
        bounds: config.bounds(),
        setup: setup.into(),
        order,
    }
}

pub fn rgb_frame(color: RGB8) -> Frame {
    Frame::new(opcode::SET_RGB, &[color.r, color.g, color.b])
}

pub fn set_rgb(color: RGB8) -> Transfer {
    rgb_frame(color).into()
}

pub fn set_rgbw(color: Rgbw) -> Transfer {
    Frame::new(opcode::SET_RGBW, &[color.r, color.g, color.b, color.w]).into()
}

pub fn set_hsv(color: Hsv) -> Transfer {
    let [lo, hi] = color.hue_bytes();
    Frame::new(opcode::SET_HSV, &[lo, hi, color.sat, color.val]).into()
}

pub fn led_frame(index: u8) -> Frame {
    Frame::new(opcode::SET_LED, &[index])
}

pub fn set_led(
    bounds: &StripBounds,
    index: u8,
) -> Option<Transfer> {
    bounds.contains(index).then(|| led_frame(index).into())
}

/// Fused `set_rgb(color)` + `set_led(index)`, assuming `index` is in range.
pub fn paint_led(
    color: RGB8,
    index: u8,
) -> Transfer {
    Transfer::fused(rgb_frame(color), led_frame(index))
}

pub fn clear_led(
    bounds: &StripBounds,
    index: u8,
) -> Option<Transfer> {
    bounds
        .contains(index)
        .then(|| paint_led(RGB8::default(), index))
}

pub fn set_all() -> Transfer {
    Frame::new(opcode::SET_ALL, &[]).into()
}

pub fn clear_all() -> Transfer {
    Transfer::fused(rgb_frame(RGB8::default()), Frame::new(opcode::SET_ALL, &[]))
}

pub fn set_range(
    bounds: &StripBounds,
    start: u8,
    end: u8,
) -> Option<Transfer> {
    bounds
        .contains_range(start, end)
        .then(|| Frame::new(opcode::SET_RANGE, &[start, end]).into())
}

pub fn set_rainbow(
    bounds: &StripBounds,
    color: Hsv,
    start: u8,
    end: u8,
    step: u8,
) -> Option<Transfer> {
    if !bounds.contains_range(start, end) {
        return None;
    }
    let [lo, hi] = color.hue_bytes();
    Some(
        Frame::new(
            opcode::SET_RAINBOW,
            &[lo, hi, color.sat, color.val, start, end, step],
        )
        .into(),
    )
}

fn range_op(
    op: u8,
    bounds: &StripBounds,
    start: u8,
    end: u8,
    count: u8,
) -> Option<Transfer> {
    bounds
        .contains_range(start, end)
        .then(|| Frame::new(op, &[start, end, count]).into())
}

/// Sends [`opcode::SHIFT_UP_WIRE`], which equals `SHIFT_DOWN` unless the
/// `shift-up-b3` feature is enabled.
pub fn shift_up(
    bounds: &StripBounds,
    start: u8,
    end: u8,
    count: u8,
) -> Option<Transfer> {
    range_op(opcode::SHIFT_UP_WIRE, bounds, start, end, count)
}

pub fn shift_down(
    bounds: &StripBounds,
    start: u8,
    end: u8,
    count: u8,
) -> Option<Transfer> {
    range_op(opcode::SHIFT_DOWN, bounds, start, end, count)
}

pub fn repeat(
    bounds: &StripBounds,
    start: u8,
    end: u8,
    count: u8,
) -> Option<Transfer> {
    range_op(opcode::REPEAT, bounds, start, end, count)
}

pub fn copy_led(
    bounds: &StripBounds,
    from: u8,
    to: u8,
) -> Option<Transfer> {
    (bounds.contains(from) && bounds.contains(to))
        .then(|| Frame::new(opcode::COPY_LED, &[from, to]).into())
}

pub fn show() -> Transfer {
    Frame::new(opcode::SHOW, &[]).into()
}
