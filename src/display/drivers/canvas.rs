/*
 *  display/drivers/canvas.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory RGB565 panel drawn with embedded-graphics
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

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_9X18_BOLD, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::{Text, TextStyleBuilder};
use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{DisplaySurface, Rotation, TextStyle};

/// Font used for a text size step
///
/// ISO-8859-1 faces so the Spanish day labels render their accents.
fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 => &FONT_9X18_BOLD,
        _ => &FONT_10X20,
    }
}

/// Display surface backed by a framebuffer in host memory.
///
/// Used by the host runner in place of an SPI panel; the last frame can be
/// dumped to a PPM image for inspection.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    fb: FrameBuffer,
    initialized: bool,
    frames: u64,
}

impl CanvasSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fb: FrameBuffer::new(width, height, Rgb565::BLACK),
            initialized: false,
            frames: 0,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Number of flushes since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Write the current framebuffer to `path` as a PPM image
    pub fn snapshot(&self, path: &Path) -> Result<(), DisplayError> {
        let file = File::create(path)?;
        self.fb.write_ppm(BufWriter::new(file))?;
        info!("Frame snapshot written to {}", path.display());
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), DisplayError> {
        if self.initialized { Ok(()) } else { Err(DisplayError::NotInitialized) }
    }
}

impl DisplaySurface for CanvasSurface {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.fb.width() == 0 || self.fb.height() == 0 {
            return Err(DisplayError::InitializationFailed(format!(
                "zero sized panel {}x{}",
                self.fb.width(),
                self.fb.height()
            )));
        }
        self.initialized = true;
        debug!("Canvas {}x{} ready", self.fb.width(), self.fb.height());
        Ok(())
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.fb.set_rotation(rotation);
        Ok(())
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.fb.clear_color(color);
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.fb)
            .map_err(|_| DisplayError::DrawingError("circle".to_string()))
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        let character_style = MonoTextStyleBuilder::new()
            .font(font_for_size(style.size))
            .text_color(style.foreground)
            .background_color(style.background)
            .build();
        let (alignment, baseline) = style.datum.layout();
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        Text::with_text_style(text, position, character_style, text_style)
            .draw(&mut self.fb)
            .map(|_| ())
            .map_err(|_| DisplayError::DrawingError(format!("text '{}'", text)))
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ensure_ready()?;
        self.frames += 1;
        Ok(())
    }
}
