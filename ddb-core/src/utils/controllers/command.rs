//! Booster command messages.
//!
//! Commands arrive as JSON tagged with `"op"` and are delivered to the
//! driver task over `BOOSTER_CHANNEL`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
use serde::{Deserialize, Serialize};
use smart_leds_trait::RGB8;

use super::booster::{Booster, BoosterError};
use crate::utils::protocol::{DeviceConfig, Hsv, Rgbw};

/// Channel used to receive booster commands (`BoosterCommand` messages).
pub static BOOSTER_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    BoosterCommand,
    16,
> = embassy_sync::channel::Channel::new();

/// One driver operation.
///
/// Serialized as JSON with tag `"op"`, e.g.
/// `{"op":"set_range","start":0,"end":9}`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BoosterCommand {
    /// Re-initialize with a new strip configuration.
    Init(DeviceConfig),
    /// Hardware reset through the reset line, if wired.
    Reset,
    SetRgb { r: u8, g: u8, b: u8 },
    SetRgbw { r: u8, g: u8, b: u8, w: u8 },
    /// Hue in degrees, clamped to 359.
    SetHsv { h: u16, s: u8, v: u8 },
    SetLed { index: u8 },
    ClearLed { index: u8 },
    SetAll,
    ClearAll,
    SetRange { start: u8, end: u8 },
    SetRainbow {
        h: u16,
        s: u8,
        v: u8,
        start: u8,
        end: u8,
        step: u8,
    },
    /// Gradient over a virtual range; `start` may be negative.
    SetGradient {
        start: i32,
        end: i32,
        from: [u8; 3],
        to: [u8; 3],
    },
    ShiftUp { start: u8, end: u8, count: u8 },
    ShiftDown { start: u8, end: u8, count: u8 },
    CopyLed { from: u8, to: u8 },
    Repeat { start: u8, end: u8, count: u8 },
    /// Latch the buffer to the strip.
    Show,
}

fn rgb([r, g, b]: [u8; 3]) -> RGB8 {
    RGB8 { r, g, b }
}

impl<SPI, D, RST, SE, PE> Booster<SPI, D, RST>
where
    SPI: SpiDevice<Error = SE>,
    D: DelayNs,
    RST: OutputPin<Error = PE>,
    SE: core::fmt::Debug,
    PE: core::fmt::Debug,
{
    /// Execute an incoming `BoosterCommand`.
    ///
    /// Out-of-range requests are dropped and still return `Ok`.
    pub fn execute_command(
        &mut self,
        cmd: BoosterCommand,
    ) -> Result<(), BoosterError<SE, PE>> {
        match cmd {
            BoosterCommand::Init(config) => self.init(config),
            BoosterCommand::Reset => self.reset(),
            BoosterCommand::SetRgb { r, g, b } => self.set_rgb(RGB8 { r, g, b }),
            BoosterCommand::SetRgbw { r, g, b, w } => self.set_rgbw(Rgbw::new(r, g, b, w)),
            BoosterCommand::SetHsv { h, s, v } => self.set_hsv(Hsv::new(h, s, v)),
            BoosterCommand::SetLed { index } => self.set_led(index),
            BoosterCommand::ClearLed { index } => self.clear_led(index),
            BoosterCommand::SetAll => self.set_all(),
            BoosterCommand::ClearAll => self.clear_all(),
            BoosterCommand::SetRange { start, end } => self.set_range(start, end),
            BoosterCommand::SetRainbow {
                h,
                s,
                v,
                start,
                end,
                step,
            } => self.set_rainbow(Hsv::new(h, s, v), start, end, step),
            BoosterCommand::SetGradient {
                start,
                end,
                from,
                to,
            } => self.set_gradient(start, end, rgb(from), rgb(to)),
            BoosterCommand::ShiftUp { start, end, count } => self.shift_up(start, end, count),
            BoosterCommand::ShiftDown { start, end, count } => self.shift_down(start, end, count),
            BoosterCommand::CopyLed { from, to } => self.copy_led(from, to),
            BoosterCommand::Repeat { start, end, count } => self.repeat(start, end, count),
            BoosterCommand::Show => self.show(),
        }
    }
}
