//! Fakes shared by the unit tests

use core::{cell::Cell, convert::Infallible};

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    primitives::{PointsIter, Rectangle},
    Pixel,
};

use crate::{
    clock::ClockSource,
    resources::{BundledResources, Bitmap, Error, Font, ResourceId, ResourceProvider},
    ui::{
        layer::{BitmapLayer, TextLayer},
        ColorMode, WINDOW_HEIGHT, WINDOW_WIDTH,
    },
};

thread_local! {
    /// Layers dropped on this test thread so far
    static LAYERS_DESTROYED: Cell<usize> = const { Cell::new(0) };
}

fn layers_destroyed() -> usize {
    LAYERS_DESTROYED.with(Cell::get)
}

fn layer_destroyed() {
    LAYERS_DESTROYED.with(|count| count.set(count.get() + 1));
}

impl Drop for BitmapLayer {
    fn drop(&mut self) {
        layer_destroyed();
    }
}

impl<const N: usize> Drop for TextLayer<N> {
    fn drop(&mut self) {
        layer_destroyed();
    }
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Clock that only moves when told to
pub struct FakeClock {
    now: Cell<NaiveDateTime>,
    clock_24h: bool,
}

impl FakeClock {
    pub fn new(now: NaiveDateTime, clock_24h: bool) -> Self {
        Self {
            now: Cell::new(now),
            clock_24h,
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl ClockSource for FakeClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }

    fn is_24h_style(&self) -> bool {
        self.clock_24h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceEvent {
    Loaded(ResourceId),
    /// Released, with the number of layers destroyed before the release
    Released(ResourceId, usize),
}

/// Bundled resources that log every call and can refuse one id
pub struct RecordingResources {
    inner: BundledResources,
    pub events: Vec<ResourceEvent>,
    missing: Option<ResourceId>,
    /// Layer drop count when the provider was created
    layers_baseline: usize,
}

impl RecordingResources {
    pub fn new() -> Self {
        Self {
            inner: BundledResources::new(),
            events: Vec::new(),
            missing: None,
            layers_baseline: layers_destroyed(),
        }
    }

    pub fn missing(id: ResourceId) -> Self {
        Self {
            missing: Some(id),
            ..Self::new()
        }
    }

    pub fn released(&self) -> Vec<ResourceId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ResourceEvent::Released(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// For each release, how many layers had already been destroyed
    pub fn layers_destroyed_at_release(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ResourceEvent::Released(_, layers) => Some(*layers),
                _ => None,
            })
            .collect()
    }

    pub fn loaded(&self) -> Vec<ResourceId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ResourceEvent::Loaded(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn check(&self, id: ResourceId) -> Result<(), Error> {
        match self.missing {
            Some(missing) if missing == id => Err(Error::ResourceUnavailable(id)),
            _ => Ok(()),
        }
    }
}

impl ResourceProvider for RecordingResources {
    fn load_bitmap(&mut self, id: ResourceId) -> Result<Bitmap, Error> {
        self.check(id)?;
        let bitmap = self.inner.load_bitmap(id)?;
        self.events.push(ResourceEvent::Loaded(id));
        Ok(bitmap)
    }

    fn load_font(&mut self, id: ResourceId) -> Result<Font, Error> {
        self.check(id)?;
        let font = self.inner.load_font(id)?;
        self.events.push(ResourceEvent::Loaded(id));
        Ok(font)
    }

    fn release(&mut self, id: ResourceId) {
        self.inner.release(id);
        let layers = layers_destroyed() - self.layers_baseline;
        self.events.push(ResourceEvent::Released(id, layers));
    }
}

/// In-memory window sized frame buffer
pub struct Frame {
    pixels: Vec<ColorMode>,
}

impl Frame {
    pub fn new(fill: ColorMode) -> Self {
        Self {
            pixels: vec![fill; (WINDOW_WIDTH * WINDOW_HEIGHT) as usize],
        }
    }

    pub fn pixel(&self, point: Point) -> ColorMode {
        self.pixels[(point.y as u32 * WINDOW_WIDTH + point.x as u32) as usize]
    }

    /// Number of pixels of `color` inside `area`, clipped to the frame
    pub fn count_in(&self, area: Rectangle, color: ColorMode) -> usize {
        area.intersection(&self.bounding_box())
            .points()
            .filter(|point| self.pixel(*point) == color)
            .count()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

impl DrawTarget for Frame {
    type Color = ColorMode;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                let index = (point.y as u32 * WINDOW_WIDTH + point.x as u32) as usize;
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}
