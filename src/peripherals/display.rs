//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{
    draw_target::{Cropped, DrawTargetExt},
    geometry::{Point, Size},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use mipidsi::{models::ST7789, Builder, Orientation};

use minimal_watchface::ui::{WINDOW_HEIGHT, WINDOW_WIDTH};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

/// Area of the panel the window is drawn into, centered
const WINDOW_AREA: Rectangle = Rectangle::new(
    Point::new(
        (LCD_W as i32 - WINDOW_WIDTH as i32) / 2,
        (LCD_H as i32 - WINDOW_HEIGHT as i32) / 2,
    ),
    Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
);

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'a, SPI>,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Initialize the panel and clear it
    pub fn init(
        spim: Spim<'a, SPI>,
        cs_pin: Output<'a, P0_25>,
        dc_pin: Output<'a, P0_18>,
        rst_pin: Output<'a, P0_26>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd };
        display.clear()?;
        Ok(display)
    }

    /// Clear the whole panel
    pub fn clear(&mut self) -> Result<(), Error> {
        self.lcd.clear(Rgb565::BLACK).map_err(|_| Error::Draw)
    }

    /// Draw target covering the window area, origin at its top left corner
    pub fn window(&mut self) -> Cropped<'_, Lcd<'a, SPI>> {
        self.lcd.cropped(&WINDOW_AREA)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not come up
    Init,
    /// Writing pixels failed
    Draw,
}
