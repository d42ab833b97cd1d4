//! Two-color gradients over a virtual LED range.
//!
//! The chip has no multi-color primitive, so the host streams one fused
//! `set_rgb` + `set_led` transfer per visible LED. Endpoints may lie before
//! index 0 or past the last LED; colors are interpolated across the whole
//! virtual span and only the overlap with the strip is emitted.
//!
//! # Example
//! ```rust
//! use ddb_core::utils::math::gradient::Gradient;
//! use ddb_core::utils::protocol::StripBounds;
//! use smart_leds_trait::RGB8;
//!
//! let g = Gradient::new(-2, 5, RGB8::new(0, 0, 0), RGB8::new(100, 100, 100));
//! let emitted = g.transfers(&StripBounds::new(4)).map(|t| t.count());
//! assert_eq!(emitted, Some(5));
//! ```
use core::ops::RangeInclusive;

use smart_leds_trait::RGB8;

use crate::utils::protocol::{encoder, StripBounds, Transfer};

/// Linear blend between two RGB colors across `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub start: i32,
    pub end: i32,
    pub from: RGB8,
    pub to: RGB8,
}

impl Gradient {
    pub const fn new(
        start: i32,
        end: i32,
        from: RGB8,
        to: RGB8,
    ) -> Self {
        Self {
            start,
            end,
            from,
            to,
        }
    }

    /// Width of the virtual span. Widened so `i32::MIN..=i32::MAX` fits.
    pub const fn steps(&self) -> i64 {
        self.end as i64 - self.start as i64
    }

    /// Color at offset `s` from `start`, truncating toward zero per channel.
    ///
    /// `steps()` must be non-zero.
    pub fn color_at(
        &self,
        s: i64,
    ) -> RGB8 {
        let steps = self.steps();
        RGB8 {
            r: lerp(self.from.r, self.to.r, s, steps),
            g: lerp(self.from.g, self.to.g, s, steps),
            b: lerp(self.from.b, self.to.b, s, steps),
        }
    }

    /// Offsets whose absolute index lands on the strip. Empty when the
    /// gradient lies entirely before index 0.
    pub fn visible_offsets(
        &self,
        bounds: &StripBounds,
    ) -> RangeInclusive<i64> {
        let (start, end) = (i64::from(self.start), i64::from(self.end));
        let last = i64::from(bounds.last_index());
        let first = (-start).max(0);
        let final_offset = self.steps() - (end - last).max(0);
        first..=final_offset
    }

    /// Transfers that render this gradient, or `None` when `start > end`
    /// or `start` is past the last LED.
    ///
    /// A zero-width gradient only loads `from` into the color register.
    pub fn transfers(
        &self,
        bounds: &StripBounds,
    ) -> Option<GradientTransfers> {
        if self.start > self.end || self.start > i32::from(bounds.last_index()) {
            return None;
        }
        if self.steps() == 0 {
            return Some(GradientTransfers::Point(Some(encoder::set_rgb(self.from))));
        }
        Some(GradientTransfers::Span {
            gradient: *self,
            offsets: self.visible_offsets(bounds),
        })
    }
}

fn lerp(
    from: u8,
    to: u8,
    s: i64,
    steps: i64,
) -> u8 {
    let (from, to) = (i64::from(from), i64::from(to));
    (from + (to - from) * s / steps) as u8
}

/// Iterator over the transfers of one gradient.
#[derive(Debug, Clone)]
pub enum GradientTransfers {
    Point(Option<Transfer>),
    Span {
        gradient: Gradient,
        offsets: RangeInclusive<i64>,
    },
}

impl Iterator for GradientTransfers {
    type Item = Transfer;

    fn next(&mut self) -> Option<Transfer> {
        match self {
            GradientTransfers::Point(t) => t.take(),
            GradientTransfers::Span { gradient, offsets } => {
                let s = offsets.next()?;
                let index = (i64::from(gradient.start) + s) as u8;
                Some(encoder::paint_led(gradient.color_at(s), index))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::protocol::opcode;

    const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    const GREY: RGB8 = RGB8 {
        r: 100,
        g: 100,
        b: 100,
    };

    fn indices(
        g: &Gradient,
        bounds: &StripBounds,
    ) -> ([u8; 256], usize) {
        let mut out = [0u8; 256];
        let mut n = 0;
        for t in g.transfers(bounds).into_iter().flatten() {
            out[n] = t.tail().unwrap().operands()[0];
            n += 1;
        }
        (out, n)
    }

    #[test]
    fn zero_width_only_sets_color() {
        let g = Gradient::new(2, 2, GREY, BLACK);
        let mut it = g.transfers(&StripBounds::new(4)).unwrap();
        let t = it.next().unwrap();
        assert!(!t.is_fused());
        assert_eq!(t.head().as_bytes(), &[opcode::SET_RGB, 100, 100, 100]);
        assert!(it.next().is_none());
    }

    #[test]
    fn clipped_on_both_sides() {
        let g = Gradient::new(-2, 5, BLACK, GREY);
        let bounds = StripBounds::new(4);
        assert_eq!(g.visible_offsets(&bounds), 2..=6);

        let (idx, n) = indices(&g, &bounds);
        assert_eq!(&idx[..n], &[0, 1, 2, 3, 4]);

        let first = g.transfers(&bounds).unwrap().next().unwrap();
        // 100 * 2 / 7 = 28
        assert_eq!(first.head().operands(), &[28, 28, 28]);
    }

    #[test]
    fn descending_channels_truncate_toward_zero() {
        let g = Gradient::new(0, 3, RGB8::new(10, 0, 255), RGB8::new(0, 10, 0));
        // 10 + (-10 * 1) / 3 = 10 - 3 = 7
        assert_eq!(g.color_at(1), RGB8::new(7, 3, 170));
        assert_eq!(g.color_at(3), RGB8::new(0, 10, 0));
        assert_eq!(g.color_at(0), RGB8::new(10, 0, 255));
    }

    #[test]
    fn rejects_reversed_or_offstrip_start() {
        let bounds = StripBounds::new(4);
        assert!(Gradient::new(3, 1, BLACK, GREY).transfers(&bounds).is_none());
        assert!(Gradient::new(5, 9, BLACK, GREY).transfers(&bounds).is_none());
    }

    #[test]
    fn entirely_before_strip_emits_nothing() {
        let bounds = StripBounds::new(4);
        let g = Gradient::new(-10, -3, BLACK, GREY);
        assert_eq!(g.transfers(&bounds).unwrap().count(), 0);
    }

    #[test]
    fn wide_virtual_span_does_not_overflow() {
        let bounds = StripBounds::new(255);
        let g = Gradient::new(-1_000_000, 1_000_000, BLACK, RGB8::new(255, 255, 255));
        let (idx, n) = indices(&g, &bounds);
        assert_eq!(n, 256);
        assert_eq!(idx[255], 255);
    }

    #[test]
    fn full_i32_span_is_clipped_without_overflow() {
        let bounds = StripBounds::new(4);
        let g = Gradient::new(i32::MIN, i32::MAX, BLACK, RGB8::new(255, 255, 255));
        assert_eq!(g.steps(), u32::MAX as i64);
        let offsets = g.visible_offsets(&bounds);
        assert_eq!(*offsets.start(), 1 << 31);
        assert_eq!(*offsets.end(), (1 << 31) + 4);

        let (idx, n) = indices(&g, &bounds);
        assert_eq!(&idx[..n], &[0, 1, 2, 3, 4]);

        // Midpoint of the span: 255 * 2^31 / (2^32 - 1) truncates to 127.
        let first = g.transfers(&bounds).unwrap().next().unwrap();
        assert_eq!(first.head().operands(), &[127, 127, 127]);
    }
}
