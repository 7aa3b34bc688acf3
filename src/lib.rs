//! Minimal digital watchface
//!
//! Background image, time label and date label on a 144x168 window,
//! refreshed once per minute. Hardware independent: the firmware binary
//! supplies the display, the clock and the event loop.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod app;
pub mod clock;
pub mod resources;
pub mod tick;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::{App, AppState};
pub use clock::ClockSource;
pub use resources::{BundledResources, ResourceId, ResourceProvider};
pub use tick::{TickTimerService, TimeUnits};
pub use ui::{minimal_watchface::MinimalWatchface, WatchFace};
