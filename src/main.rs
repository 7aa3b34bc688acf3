#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use minimal_watchface::{App, BundledResources, ClockSource, MinimalWatchface};
use peripherals::{backlight::Backlight, display::Display};
use system::{
    config::{self, SystemConfig},
    time::{TimeManager, TimeReference},
};

// Others
use chrono::NaiveDateTime;

type Watch = App<MinimalWatchface, BundledResources, TimeManager>;

// Communication channels
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

/// Read the clock every second and hand the reading to the event loop.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        TIME.signal(clock.now());

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

/// Redraw the window area of the panel
fn draw(app: &Watch, display: &mut Display<'static, SPI2>) {
    if app.render(&mut display.window()).is_err() {
        defmt::warn!("Failed to draw window");
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight
    let _backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        config::BACKLIGHT_LEVEL,
    ));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Initialize clock from the build time
    let reference = unwrap!(TimeReference::from_epoch(
        config::BUILD_EPOCH,
        config::UTC_OFFSET
    ));
    let clock = TimeManager::init(reference, config::CLOCK_24H);

    // Push the watchface window, fail fast on missing resources
    let mut app = App::new(MinimalWatchface::new(), BundledResources::new(), clock);
    unwrap!(app.init());
    draw(&app, &mut display);

    defmt::info!("Initialization finished");

    // Ticks only start once the window is loaded
    unwrap!(spawner.spawn(update_time(clock)));

    // Event loop, the watch never leaves it
    loop {
        let now = TIME.wait().await;
        if app.handle_time(now) {
            draw(&app, &mut display);
        }
    }
}
