//! Bundled application resources
//!
//! Images and fonts are referenced by a fixed symbolic [`ResourceId`] and
//! handed out as handles. A handle that cannot be produced is reported as
//! [`Error::ResourceUnavailable`], there is no degraded fallback.

use embedded_graphics::{image::ImageRawLE, mono_font::MonoFont};
use profont::{PROFONT_14_POINT, PROFONT_24_POINT};

use crate::ui::{ColorMode, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Decoded bitmap handle
pub type Bitmap = ImageRawLE<'static, ColorMode>;

/// Font handle, shared and cached
pub type Font = &'static MonoFont<'static>;

/// Background image, raw little-endian RGB565
static BACKGROUND_DATA: &[u8] = include_bytes!("../assets/background.raw");

/// Bytes per RGB565 pixel
const BYTES_PER_PIXEL: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    /// Full-window background image
    Background,
    /// Large font used by the time label
    TimeFont,
    /// Small font used by the date label
    DateFont,
}

impl ResourceId {
    const fn bit(self) -> u8 {
        match self {
            Self::Background => 0b001,
            Self::TimeFont => 0b010,
            Self::DateFont => 0b100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The resource is missing, malformed or not of the requested kind
    ResourceUnavailable(ResourceId),
}

/// Source of bundled images and fonts
pub trait ResourceProvider {
    /// Load an image resource
    fn load_bitmap(&mut self, id: ResourceId) -> Result<Bitmap, Error>;

    /// Load a font resource
    fn load_font(&mut self, id: ResourceId) -> Result<Font, Error>;

    /// Release a previously loaded resource
    fn release(&mut self, id: ResourceId);
}

/// Wrap raw RGB565 pixel data, checking that it covers exactly `width` x `height`.
pub fn bitmap_from_raw(
    id: ResourceId,
    data: &'static [u8],
    width: u32,
    height: u32,
) -> Result<Bitmap, Error> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if width == 0 || data.len() != expected {
        warn!(
            "Resource {} has {} bytes, expected {}",
            id,
            data.len(),
            expected
        );
        return Err(Error::ResourceUnavailable(id));
    }

    Ok(ImageRawLE::new(data, width))
}

/// Resources compiled into the firmware image
#[derive(Default)]
pub struct BundledResources {
    /// Bit set of handles currently handed out
    outstanding: u8,
}

impl BundledResources {
    pub const fn new() -> Self {
        Self { outstanding: 0 }
    }

    /// Whether a handle for `id` is currently handed out
    pub fn is_loaded(&self, id: ResourceId) -> bool {
        self.outstanding & id.bit() != 0
    }

    fn acquire(&mut self, id: ResourceId) {
        if self.is_loaded(id) {
            warn!("Resource {} loaded twice", id);
        }
        self.outstanding |= id.bit();
        debug!("Loaded resource {}", id);
    }
}

impl ResourceProvider for BundledResources {
    fn load_bitmap(&mut self, id: ResourceId) -> Result<Bitmap, Error> {
        let bitmap = match id {
            ResourceId::Background => {
                bitmap_from_raw(id, BACKGROUND_DATA, WINDOW_WIDTH, WINDOW_HEIGHT)?
            }
            _ => return Err(Error::ResourceUnavailable(id)),
        };
        self.acquire(id);
        Ok(bitmap)
    }

    fn load_font(&mut self, id: ResourceId) -> Result<Font, Error> {
        let font: Font = match id {
            ResourceId::TimeFont => &PROFONT_24_POINT,
            ResourceId::DateFont => &PROFONT_14_POINT,
            _ => return Err(Error::ResourceUnavailable(id)),
        };
        self.acquire(id);
        Ok(font)
    }

    fn release(&mut self, id: ResourceId) {
        if !self.is_loaded(id) {
            warn!("Resource {} released while not loaded", id);
            return;
        }
        // Bundled data lives in flash, only the bookkeeping changes
        self.outstanding &= !id.bit();
        debug!("Released resource {}", id);
    }
}
