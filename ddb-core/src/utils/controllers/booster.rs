//! SPI driver for the Digi-Dot-Booster.
//!
//! `Booster` owns an `embedded_hal::spi::SpiDevice` (which frames each
//! transaction with chip-select), a `DelayNs` for the settle delays the chip
//! needs, and an optional reset line. Every validated operation is one SPI
//! transaction followed by [`CMD_SETTLE_US`]. Requests outside the strip are
//! dropped without touching the bus.

use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
    spi::{Operation, SpiDevice},
};
use smart_leds_trait::{SmartLedsWrite, RGB8};

use crate::utils::{
    math::gradient::Gradient,
    protocol::{encoder, DeviceConfig, Hsv, Rgbw, StripBounds, Transfer},
};

/// Wait after every transaction.
pub const CMD_SETTLE_US: u32 = 500;
/// Per-LED wait after `show` while the chip clocks the strip out.
pub const LED_LATCH_US: u32 = 30;
/// Wait after init. Not documented by the vendor but required in practice.
pub const INIT_SETTLE_MS: u32 = 40;
/// Hold time for each edge of a hardware reset.
pub const RESET_HOLD_MS: u32 = 100;

/// Errors reported by the bus or the reset line.
#[derive(Debug)]
pub enum BoosterError<S: core::fmt::Debug, P: core::fmt::Debug> {
    Spi(S),
    Reset(P),
}

/// Stand-in for an unconnected reset line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// High-level driver for one Digi-Dot-Booster.
pub struct Booster<SPI, D, RST = NoResetPin> {
    spi: SPI,
    delay: D,
    reset: Option<RST>,
    bounds: StripBounds,
}

impl<SPI, D> Booster<SPI, D, NoResetPin> {
    /// Create a driver without a reset line.
    ///
    /// Until [`Booster::init`] runs only LED 0 is addressable.
    pub fn new(
        spi: SPI,
        delay: D,
    ) -> Self {
        Booster {
            spi,
            delay,
            reset: None,
            bounds: StripBounds::default(),
        }
    }
}

impl<SPI, D, RST> Booster<SPI, D, RST> {
    /// Attach the pin wired to the chip's RESET input.
    pub fn with_reset<R>(
        self,
        pin: R,
    ) -> Booster<SPI, D, R> {
        Booster {
            spi: self.spi,
            delay: self.delay,
            reset: Some(pin),
            bounds: self.bounds,
        }
    }

    /// Bounds set by the last `init`.
    pub fn bounds(&self) -> StripBounds {
        self.bounds
    }

    pub fn last_index(&self) -> u8 {
        self.bounds.last_index()
    }

    /// Give back the bus, delay and reset pin.
    pub fn release(self) -> (SPI, D, Option<RST>) {
        (self.spi, self.delay, self.reset)
    }
}

impl<SPI, D, RST, SE, PE> Booster<SPI, D, RST>
where
    SPI: SpiDevice<Error = SE>,
    D: DelayNs,
    RST: OutputPin<Error = PE>,
    SE: core::fmt::Debug,
    PE: core::fmt::Debug,
{
    /// Configure LED count, type and color order.
    ///
    /// Counts above 256 are clamped. RGB strips that are not GRB get a
    /// second transaction reprogramming the channel order.
    pub fn init(
        &mut self,
        config: DeviceConfig,
    ) -> Result<(), BoosterError<SE, PE>> {
        let seq = encoder::init(&config);
        self.bounds = seq.bounds;
        for transfer in seq.transfers() {
            self.submit(transfer)?;
        }
        self.delay.delay_ms(INIT_SETTLE_MS);
        tracing::info!(
            leds = self.bounds.led_count(),
            led_type = ?config.led_type,
            order = ?config.color_order,
            "booster initialized"
        );
        Ok(())
    }

    /// Toggle the reset line low then high. Does nothing without a pin.
    pub fn reset(&mut self) -> Result<(), BoosterError<SE, PE>> {
        let Some(pin) = self.reset.as_mut() else {
            tracing::debug!("reset requested but no reset pin configured");
            return Ok(());
        };
        pin.set_low().map_err(BoosterError::Reset)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        pin.set_high().map_err(BoosterError::Reset)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        Ok(())
    }

    pub fn set_rgb(
        &mut self,
        color: RGB8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::set_rgb(color))
    }

    pub fn set_rgbw(
        &mut self,
        color: Rgbw,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::set_rgbw(color))
    }

    /// Hue above 359 is clamped. The chip does the HSV conversion.
    pub fn set_hsv(
        &mut self,
        color: Hsv,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::set_hsv(color))
    }

    /// Assign the color register to one LED.
    pub fn set_led(
        &mut self,
        index: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::set_led(&self.bounds, index), "set_led")
    }

    /// Black out one LED. Also leaves black in the color register.
    pub fn clear_led(
        &mut self,
        index: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::clear_led(&self.bounds, index), "clear_led")
    }

    pub fn set_all(&mut self) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::set_all())
    }

    pub fn clear_all(&mut self) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::clear_all())
    }

    pub fn set_range(
        &mut self,
        start: u8,
        end: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::set_range(&self.bounds, start, end), "set_range")
    }

    /// Rainbow starting at `color.hue`, advancing `step` degrees per LED.
    pub fn set_rainbow(
        &mut self,
        color: Hsv,
        start: u8,
        end: u8,
        step: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        let transfer = encoder::set_rainbow(&self.bounds, color, start, end, step);
        self.submit_checked(transfer, "set_rainbow")
    }

    /// Blend `from` to `to` over `start..=end`; either end may be off the
    /// strip. Sends one transfer per visible LED.
    pub fn set_gradient(
        &mut self,
        start: i32,
        end: i32,
        from: RGB8,
        to: RGB8,
    ) -> Result<(), BoosterError<SE, PE>> {
        let Some(transfers) = Gradient::new(start, end, from, to).transfers(&self.bounds) else {
            tracing::debug!(
                start,
                end,
                last_index = self.bounds.last_index(),
                "set_gradient dropped"
            );
            return Ok(());
        };
        for transfer in transfers {
            self.submit(&transfer)?;
        }
        Ok(())
    }

    /// Shift `start..=end` by `count` positions.
    ///
    /// Sends [`opcode::SHIFT_UP_WIRE`](crate::utils::protocol::opcode::SHIFT_UP_WIRE):
    /// the same byte as `shift_down` unless the `shift-up-b3` feature is on.
    pub fn shift_up(
        &mut self,
        start: u8,
        end: u8,
        count: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::shift_up(&self.bounds, start, end, count), "shift_up")
    }

    pub fn shift_down(
        &mut self,
        start: u8,
        end: u8,
        count: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        let transfer = encoder::shift_down(&self.bounds, start, end, count);
        self.submit_checked(transfer, "shift_down")
    }

    pub fn copy_led(
        &mut self,
        from: u8,
        to: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::copy_led(&self.bounds, from, to), "copy_led")
    }

    /// Tile `start..=end` forward `count` times.
    pub fn repeat(
        &mut self,
        start: u8,
        end: u8,
        count: u8,
    ) -> Result<(), BoosterError<SE, PE>> {
        self.submit_checked(encoder::repeat(&self.bounds, start, end, count), "repeat")
    }

    /// Latch the chip's buffer to the strip and wait for it to clock out.
    pub fn show(&mut self) -> Result<(), BoosterError<SE, PE>> {
        self.submit(&encoder::show())?;
        self.delay
            .delay_us(LED_LATCH_US * u32::from(self.bounds.led_count()));
        Ok(())
    }

    /// Send arbitrary bytes as one transaction.
    pub fn send_raw(
        &mut self,
        bytes: &[u8],
    ) -> Result<(), BoosterError<SE, PE>> {
        self.spi.write(bytes).map_err(BoosterError::Spi)?;
        self.delay.delay_us(CMD_SETTLE_US);
        Ok(())
    }

    fn submit(
        &mut self,
        transfer: &Transfer,
    ) -> Result<(), BoosterError<SE, PE>> {
        let head = transfer.head().as_bytes();
        let sent = match transfer.tail() {
            Some(tail) => self
                .spi
                .transaction(&mut [Operation::Write(head), Operation::Write(tail.as_bytes())]),
            None => self.spi.transaction(&mut [Operation::Write(head)]),
        };
        sent.map_err(BoosterError::Spi)?;
        self.delay.delay_us(CMD_SETTLE_US);
        Ok(())
    }

    fn submit_checked(
        &mut self,
        transfer: Option<Transfer>,
        op: &'static str,
    ) -> Result<(), BoosterError<SE, PE>> {
        match transfer {
            Some(transfer) => self.submit(&transfer),
            None => {
                tracing::debug!(op, last_index = self.bounds.last_index(), "out-of-range request dropped");
                Ok(())
            }
        }
    }
}

/// Stream a whole frame of pixels, then latch it.
///
/// Pixel `i` becomes a fused `set_rgb` + `set_led(i)`. Pixels past the last
/// LED are ignored.
impl<SPI, D, RST, SE, PE> SmartLedsWrite for Booster<SPI, D, RST>
where
    SPI: SpiDevice<Error = SE>,
    D: DelayNs,
    RST: OutputPin<Error = PE>,
    SE: core::fmt::Debug,
    PE: core::fmt::Debug,
{
    type Error = BoosterError<SE, PE>;
    type Color = RGB8;

    fn write<T, I>(
        &mut self,
        iterator: T,
    ) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let count = usize::from(self.bounds.led_count());
        for (index, color) in iterator.into_iter().take(count).enumerate() {
            self.submit(&encoder::paint_led(color.into(), index as u8))?;
        }
        self.show()
    }
}
