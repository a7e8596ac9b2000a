/*
 *  display/framebuffer.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized RGB565 framebuffer with rotation and PPM snapshots
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use std::io::Write;

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::display::color;
use crate::display::traits::Rotation;

/// A runtime-sized RGB565 framebuffer for embedded-graphics.
///
/// Pixels are stored in panel order; drawing coordinates are logical and
/// mapped through the current rotation.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    buf: Vec<Rgb565>,
    w: usize,
    h: usize,
    rotation: Rotation,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, fill: Rgb565) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h, rotation: Rotation::Deg0 }
    }

    /// Panel width, independent of rotation
    pub fn width(&self) -> usize { self.w }
    /// Panel height, independent of rotation
    pub fn height(&self) -> usize { self.h }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Immutable raw access in panel order
    pub fn as_slice(&self) -> &[Rgb565] { &self.buf }

    /// Clear to a color
    pub fn clear_color(&mut self, color: Rgb565) {
        self.buf.fill(color);
    }

    /// Pixel at a logical position
    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        self.idx(p).map(|i| self.buf[i])
    }

    /// Map a logical point to a panel index; None when off screen
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        let Size { width, height } = self.size();
        if p.x < 0 || p.y < 0 || p.x >= width as i32 || p.y >= height as i32 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        let (px, py) = match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (self.w - 1 - y, x),
            Rotation::Deg180 => (self.w - 1 - x, self.h - 1 - y),
            Rotation::Deg270 => (y, self.h - 1 - x),
        };
        Some(py * self.w + px)
    }

    /// Write the panel contents as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.w, self.h)?;
        let mut row = Vec::with_capacity(self.w * 3);
        for line in self.buf.chunks(self.w.max(1)) {
            row.clear();
            for &c in line {
                let (r, g, b) = color::to_rgb888(c);
                row.extend_from_slice(&[r, g, b]);
            }
            out.write_all(&row)?;
        }
        out.flush()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        match self.rotation {
            Rotation::Deg0 | Rotation::Deg180 => Size::new(self.w as u32, self.h as u32),
            Rotation::Deg90 | Rotation::Deg270 => Size::new(self.h as u32, self.w as u32),
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }
}
