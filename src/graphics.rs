//! Graphics support via embedded-graphics
//!
//! This module provides the [`Canvas`] struct, a print raster that
//! implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! trait from the embedded-graphics ecosystem, and
//! [`Printer::print_canvas`] to send it through the bitmap chunker.
//!
//! The buffer layout is exactly what the chunker consumes, so printing a
//! canvas copies nothing. [`BinaryColor::On`] is a printed dot.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use pos_printer::{Canvas, Rotation};
//!
//! // Full head width, 16 dot rows
//! let mut buffer = [0u8; 48 * 16];
//! let mut canvas = match Canvas::new(&mut buffer[..], 384, 16, Rotation::Rotate0) {
//!     Ok(canvas) => canvas,
//!     Err(_) => return,
//! };
//!
//! let _ = Line::new(Point::new(0, 8), Point::new(383, 8))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut canvas);
//!
//! assert_eq!(canvas.buffer()[8 * 48], 0xFF);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};
use embedded_hal::delay::DelayNs;

use crate::bitmap::row_stride;
use crate::error::{CanvasError, Error};
use crate::interface::PrinterInterface;
use crate::printer::Printer;
use crate::rotation::{Rotation, apply_rotation};

/// Print raster with embedded-graphics support
///
/// ## Type Parameters
///
/// * `B` - Buffer type implementing `AsRef<[u8]>` and `AsMut<[u8]>`, at least
///   `ceil(width / 8) * height` bytes
pub struct Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Raster bytes
    buffer: B,
    /// Physical width in dots
    width: u16,
    /// Physical height in dots
    height: u16,
    /// Drawing orientation
    rotation: Rotation,
}

impl<B> Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a canvas over `buffer`
    ///
    /// `width` and `height` are the physical raster dimensions, as printed;
    /// with a transposing rotation the drawing surface is `height` wide.
    ///
    /// # Errors
    ///
    /// Returns `CanvasError::BufferTooSmall` if the buffer is shorter than
    /// `ceil(width / 8) * height` bytes.
    pub fn new(
        buffer: B,
        width: u16,
        height: u16,
        rotation: Rotation,
    ) -> Result<Self, CanvasError> {
        let required = Self::buffer_size(width, height);
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(CanvasError::BufferTooSmall { required, provided });
        }
        Ok(Self {
            buffer,
            width,
            height,
            rotation,
        })
    }

    /// Bytes needed for a `width` x `height` raster
    pub fn buffer_size(width: u16, height: u16) -> usize {
        usize::from(row_stride(width)) * usize::from(height)
    }

    /// Fill the whole raster with one color
    pub fn clear(&mut self, color: BinaryColor) {
        let fill = match color {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        };
        self.buffer.as_mut().fill(fill);
    }

    /// Physical width in dots
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Physical height in dots
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Drawing orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change the drawing orientation; existing content is not moved
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Raster bytes in print order
    pub fn buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..Self::buffer_size(self.width, self.height)]
    }

    /// Give back the buffer
    pub fn release(self) -> B {
        self.buffer
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let (index, bit) = apply_rotation(
            x,
            y,
            u32::from(self.width),
            u32::from(self.height),
            self.rotation,
        );
        let Some(byte) = self.buffer.as_mut().get_mut(index) else {
            return;
        };
        match color {
            BinaryColor::On => *byte |= bit,
            BinaryColor::Off => *byte &= !bit,
        }
    }
}

impl<B> DrawTarget for Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x, y, color);
        }

        Ok(())
    }
}

impl<B> OriginDimensions for Canvas<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        if self.rotation.is_transposed() {
            Size::new(height, width)
        } else {
            Size::new(width, height)
        }
    }
}

impl<I> Printer<I>
where
    I: PrinterInterface,
{
    /// Print a canvas through the bitmap chunker
    pub fn print_canvas<B, D>(
        &mut self,
        canvas: &Canvas<B>,
        delay: &mut D,
    ) -> Result<(), Error<I>>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
        D: DelayNs,
    {
        self.print_bitmap(canvas.width(), canvas.height(), canvas.buffer(), delay)
    }
}
