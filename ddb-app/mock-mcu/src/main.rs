use clap::{Parser, ValueEnum};
use ddb_core::utils::protocol::{ColorOrder, DeviceConfig, LedType, SPI_FREQUENCY_HZ};
use ddb_core::utils::{Booster, BoosterCommand, BoosterController, BOOSTER_CHANNEL};
use embassy_executor::Executor;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use embedded_hal_mock::eh1::delay::StdSleep;
use static_cell::StaticCell;
use std::convert::Infallible;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{error, info, trace, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts
{
    /// number of LEDs on the strip (clamped to 1-256)
    #[clap(long, default_value_t = 16)]
    leds: u16,
    /// bits per LED
    #[clap(long, value_enum, default_value_t = Type::Rgb)]
    led_type: Type,
    /// channel order of the LEDs
    #[clap(long, value_enum, default_value_t = Order::Grb)]
    order: Order,
    /// JSON-lines command script, one `BoosterCommand` per line; stdin if omitted
    #[clap(long)]
    script: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Type {
    Rgb,
    Rgbw,
}

impl From<Type> for LedType {
    fn from(t: Type) -> Self {
        match t {
            Type::Rgb => LedType::Rgb,
            Type::Rgbw => LedType::Rgbw,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Rgb,
    Grb,
}

impl From<Order> for ColorOrder {
    fn from(o: Order) -> Self {
        match o {
            Order::Rgb => ColorOrder::Rgb,
            Order::Grb => ColorOrder::Grb,
        }
    }
}

/// SPI bus that logs every byte written instead of clocking it out.
struct LogBus;

impl embedded_hal::spi::ErrorType for LogBus {
    type Error = Infallible;
}

impl SpiBus for LogBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        info!("SPI: {:02X?}", words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        info!("SPI: {:02X?}", words);
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Output pin that logs its transitions.
struct LogPin(&'static str);

impl embedded_hal::digital::ErrorType for LogPin {
    type Error = Infallible;
}

impl OutputPin for LogPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        trace!("{}: low", self.0);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        trace!("{}: high", self.0);
        Ok(())
    }
}

type MockSpi = ExclusiveDevice<LogBus, LogPin, NoDelay>;

#[embassy_executor::task]
async fn booster_task(mut ctrl: BoosterController<MockSpi, StdSleep, LogPin>) -> ! {
    ctrl.booster_ch().await
}

#[embassy_executor::task]
async fn script_task(input: Box<dyn BufRead>) {
    for (n, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read script: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<BoosterCommand>(line) {
            Ok(cmd) => {
                BOOSTER_CHANNEL.sender().send(cmd).await;
                // let the booster task run before blocking on the next read
                embassy_futures::yield_now().await;
            }
            Err(e) => warn!(line = n + 1, "skipping invalid command: {}", e),
        }
    }
    embassy_futures::yield_now().await;
    info!("script finished");
    std::process::exit(0);
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts: Opts = Opts::parse();
    let config = DeviceConfig::new(opts.leds)
        .with_type(opts.led_type.into())
        .with_order(opts.order.into());

    let input: Box<dyn BufRead> = match &opts.script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                error!("cannot open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::stdin().lock()),
    };

    let spi = ExclusiveDevice::new_no_delay(LogBus, LogPin("cs")).unwrap();
    let booster = Booster::new(spi, StdSleep::new()).with_reset(LogPin("reset"));
    let ctrl = BoosterController::new(booster, config);
    info!(
        last_index = ctrl.booster.last_index(),
        spi_hz = SPI_FREQUENCY_HZ,
        "booster ready (target bus: 8-bit, MSB first, mode 0)"
    );

    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner.spawn(booster_task(ctrl)).unwrap();
        spawner.spawn(script_task(input)).unwrap();
    });
}
