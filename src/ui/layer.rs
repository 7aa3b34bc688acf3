//! Bitmap and text layers

use core::fmt;

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    image::Image,
    mono_font::MonoTextStyleBuilder,
    primitives::Rectangle,
    Drawable,
};
use embedded_text::{alignment::HorizontalAlignment, TextBox};

use super::ColorMode;
use crate::resources::{Bitmap, Font};

/// Handle of a layer attached to a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(pub u8);

/// Layer showing a bitmap at its frame origin, clipped to the frame
pub struct BitmapLayer {
    frame: Rectangle,
    bitmap: Option<Bitmap>,
}

impl BitmapLayer {
    pub fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            bitmap: None,
        }
    }

    /// Hand the bitmap over to the layer
    pub fn set_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmap = Some(bitmap);
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if let Some(bitmap) = &self.bitmap {
            Image::new(bitmap, self.frame.top_left).draw(&mut target.clipped(&self.frame))?;
        }
        Ok(())
    }
}

/// Layer showing up to `N` bytes of text inside its frame
pub struct TextLayer<const N: usize> {
    frame: Rectangle,
    /// Displayed text, valid up to `len`
    str_buf: [u8; N],
    len: usize,
    font: Option<Font>,
    text_color: ColorMode,
    /// `None` leaves the layers below visible
    background_color: Option<ColorMode>,
    alignment: HorizontalAlignment,
}

impl<const N: usize> TextLayer<N> {
    /// Create an empty, left aligned layer with black text and no background
    pub fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            str_buf: [0; N],
            len: 0,
            font: None,
            text_color: ColorMode::new(0, 0, 0),
            background_color: None,
            alignment: HorizontalAlignment::Left,
        }
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    pub fn set_text_color(&mut self, color: ColorMode) {
        self.text_color = color;
    }

    pub fn set_background_color(&mut self, color: Option<ColorMode>) {
        self.background_color = color;
    }

    pub fn set_text_alignment(&mut self, alignment: HorizontalAlignment) {
        self.alignment = alignment;
    }

    /// Currently displayed text
    pub fn text(&self) -> &str {
        // Only ever filled from `&str`
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }

    /// Replace the displayed text. Fails if it is longer than `N` bytes.
    pub fn set_text(&mut self, text: &str) -> Result<(), fmt::Error> {
        self.write_with(|buf| format_no_std::show(buf, format_args!("{}", text)))
    }

    /// Replace the displayed text with whatever `write` puts into the buffer.
    ///
    /// The previous text is kept if `write` fails.
    pub fn write_with<F>(&mut self, write: F) -> Result<(), fmt::Error>
    where
        F: for<'b> FnOnce(&'b mut [u8]) -> Result<&'b str, fmt::Error>,
    {
        let mut scratch = [0u8; N];
        let len = write(&mut scratch)?.len();
        self.str_buf = scratch;
        self.len = len;
        Ok(())
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if let Some(color) = self.background_color {
            target.fill_solid(&self.frame, color)?;
        }

        let Some(font) = self.font else {
            return Ok(());
        };
        let character_style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(self.text_color)
            .build();

        TextBox::with_alignment(self.text(), self.frame, character_style, self.alignment)
            .draw(target)?;

        Ok(())
    }
}
