//! Minimal watchface: background image, time and date

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::RgbColor,
    primitives::Rectangle,
};
use embedded_text::alignment::HorizontalAlignment;

use super::{
    layer::{BitmapLayer, TextLayer},
    ColorMode, LayerId, WatchFace, Window, WINDOW_WIDTH,
};
use crate::{
    clock::{self, ClockSource, DATE_LEN, TIME_LEN},
    resources::{self, Font, ResourceId, ResourceProvider},
    tick::TimeUnits,
};

const BACKGROUND_LAYER: LayerId = LayerId(0);
const TIME_LAYER: LayerId = LayerId(1);
const DATE_LAYER: LayerId = LayerId(2);

/// Upper middle band of the window
const TIME_FRAME: Rectangle = Rectangle::new(Point::new(0, 45), Size::new(WINDOW_WIDTH, 50));
/// Below the time, running off the bottom of the window
const DATE_FRAME: Rectangle = Rectangle::new(Point::new(0, 95), Size::new(WINDOW_WIDTH, 168));

/// Basic watchface
///
/// Every handle is `None` outside of a load/unload pair.
#[derive(Default)]
pub struct MinimalWatchface {
    /// Full window background, owns the bitmap
    background_layer: Option<BitmapLayer>,
    /// Time label
    time_layer: Option<TextLayer<TIME_LEN>>,
    /// Date label
    date_layer: Option<TextLayer<DATE_LEN>>,
    time_font: Option<Font>,
    date_font: Option<Font>,
}

impl MinimalWatchface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the time label, if loaded
    pub fn time_text(&self) -> Option<&str> {
        self.time_layer.as_ref().map(TextLayer::text)
    }

    /// Text of the date label, if loaded
    pub fn date_text(&self) -> Option<&str> {
        self.date_layer.as_ref().map(TextLayer::text)
    }

    /// Whether any layer or font is currently held
    pub fn holds_handles(&self) -> bool {
        self.background_layer.is_some()
            || self.time_layer.is_some()
            || self.date_layer.is_some()
            || self.time_font.is_some()
            || self.date_font.is_some()
    }

    /// Write the current time into the time label
    pub fn update_time<C: ClockSource>(&mut self, clock: &C) {
        let Some(layer) = self.time_layer.as_mut() else {
            return;
        };

        let now = clock.now();
        let clock_24h = clock.is_24h_style();
        if layer
            .write_with(|buf| clock::format_time(&now, clock_24h, buf))
            .is_err()
        {
            warn!("Time does not fit its label");
        }
    }

    /// Write the current date into the date label
    pub fn update_date<C: ClockSource>(&mut self, clock: &C) {
        let Some(layer) = self.date_layer.as_mut() else {
            return;
        };

        let now = clock.now();
        if layer.write_with(|buf| clock::format_date(&now, buf)).is_err() {
            warn!("Date does not fit its label");
        }
    }
}

/// Centered white label on a transparent background
fn label<const N: usize>(frame: Rectangle, font: Font) -> TextLayer<N> {
    let mut layer = TextLayer::new(frame);
    layer.set_background_color(None);
    layer.set_text_color(ColorMode::WHITE);
    layer.set_font(font);
    layer.set_text_alignment(HorizontalAlignment::Center);
    layer
}

impl WatchFace for MinimalWatchface {
    fn on_show<R>(&mut self, window: &mut Window, resources: &mut R) -> Result<(), resources::Error>
    where
        R: ResourceProvider,
    {
        // Background
        let bitmap = resources.load_bitmap(ResourceId::Background)?;
        let mut background = BitmapLayer::new(window.bounds());
        background.set_bitmap(bitmap);
        self.background_layer = Some(background);
        window.add_child(BACKGROUND_LAYER);

        // Fonts
        let time_font = resources.load_font(ResourceId::TimeFont)?;
        self.time_font = Some(time_font);
        let date_font = resources.load_font(ResourceId::DateFont)?;
        self.date_font = Some(date_font);

        self.time_layer = Some(label(TIME_FRAME, time_font));
        window.add_child(TIME_LAYER);

        self.date_layer = Some(label(DATE_FRAME, date_font));
        window.add_child(DATE_LAYER);

        info!("Watchface loaded");
        Ok(())
    }

    fn on_hide<R>(&mut self, window: &mut Window, resources: &mut R)
    where
        R: ResourceProvider,
    {
        // Layers first, they reference the fonts and the bitmap
        if self.time_layer.take().is_some() {
            window.remove_child(TIME_LAYER);
        }
        if self.date_layer.take().is_some() {
            window.remove_child(DATE_LAYER);
        }
        let background_loaded = self.background_layer.take().is_some();
        if background_loaded {
            window.remove_child(BACKGROUND_LAYER);
        }

        if self.time_font.take().is_some() {
            resources.release(ResourceId::TimeFont);
        }
        if self.date_font.take().is_some() {
            resources.release(ResourceId::DateFont);
        }
        if background_loaded {
            resources.release(ResourceId::Background);
        }

        info!("Watchface unloaded");
    }

    fn on_tick<C>(&mut self, clock: &C, _units: TimeUnits)
    where
        C: ClockSource,
    {
        self.update_time(clock);
        self.update_date(clock);
    }

    fn draw_layer<D>(&self, id: LayerId, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        match id {
            BACKGROUND_LAYER => match &self.background_layer {
                Some(layer) => layer.draw(target),
                None => Ok(()),
            },
            TIME_LAYER => match &self.time_layer {
                Some(layer) => layer.draw(target),
                None => Ok(()),
            },
            DATE_LAYER => match &self.date_layer {
                Some(layer) => layer.draw(target),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }
}
