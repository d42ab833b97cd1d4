//! Module Exports
//!
//! - `booster`: the SPI driver for the Digi-Dot-Booster
//! - `command`: serde command messages and the channel that carries them

pub mod booster;
pub mod command;

pub use booster::{Booster, BoosterError, NoResetPin};
pub use command::{BoosterCommand, BOOSTER_CHANNEL};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::utils::protocol::DeviceConfig;

/// Owns a `Booster` and feeds it commands from `BOOSTER_CHANNEL`.
pub struct BoosterController<SPI, D, RST = NoResetPin> {
    pub booster: Booster<SPI, D, RST>,
}

impl<SPI, D, RST, SE, PE> BoosterController<SPI, D, RST>
where
    SPI: SpiDevice<Error = SE>,
    D: DelayNs,
    RST: OutputPin<Error = PE>,
    SE: core::fmt::Debug,
    PE: core::fmt::Debug,
{
    /// Reset and initialize the chip.
    ///
    /// Bus failures are logged; the controller is still returned so later
    /// commands (including `init`) can retry.
    pub fn new(
        mut booster: Booster<SPI, D, RST>,
        config: DeviceConfig,
    ) -> Self {
        let ready = booster.reset().and_then(|()| booster.init(config));
        if let Err(e) = ready {
            tracing::warn!("booster init failed: {:?}", e);
        }
        BoosterController { booster }
    }

    fn handle(
        &mut self,
        cmd: BoosterCommand,
    ) {
        tracing::info!("Received Booster Command: {:?}", cmd);
        if let Err(e) = self.booster.execute_command(cmd) {
            tracing::error!("Booster command failed: {:?}", e);
        }
    }

    /// Execute every command already queued, without waiting.
    ///
    /// Returns how many were handled. Intended for superloop firmware.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(cmd) = BOOSTER_CHANNEL.try_receive() {
            self.handle(cmd);
            handled += 1;
        }
        handled
    }

    pub async fn booster_ch(&mut self) -> ! {
        loop {
            let cmd = BOOSTER_CHANNEL.receiver().receive().await;
            self.handle(cmd);
        }
    }
}
