//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::{
    clock::ClockSource,
    resources::{self, ResourceProvider},
    tick::TimeUnits,
};

pub mod layer;
pub mod minimal_watchface;
pub mod window;

pub use layer::LayerId;
pub use window::Window;

/// Pixel format of the window
pub type ColorMode = Rgb565;

/// Window width in pixels
pub const WINDOW_WIDTH: u32 = 144;
/// Window height in pixels
pub const WINDOW_HEIGHT: u32 = 168;

/// Handlers the window framework calls over a watchface's lifetime.
///
/// `on_show` runs once when the window is pushed, `on_tick` on every
/// subscribed tick, `on_hide` once when the window is destroyed.
pub trait WatchFace {
    /// Build the layer tree and acquire resources
    fn on_show<R>(&mut self, window: &mut Window, resources: &mut R) -> Result<(), resources::Error>
    where
        R: ResourceProvider;

    /// Destroy layers and release every resource acquired in `on_show`
    fn on_hide<R>(&mut self, window: &mut Window, resources: &mut R)
    where
        R: ResourceProvider;

    /// Refresh the displayed state
    fn on_tick<C>(&mut self, clock: &C, units: TimeUnits)
    where
        C: ClockSource;

    /// Draw a single layer attached to the window
    fn draw_layer<D>(&self, id: LayerId, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}
