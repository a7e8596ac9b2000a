/*
 *  display/traits.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display surface abstraction
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

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::{Alignment, Baseline};

use crate::display::color;
use crate::display::error::DisplayError;

/// Panel orientation, quarter turns clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = DisplayError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(DisplayError::InvalidRotation(other)),
        }
    }
}

/// Anchor point of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDatum {
    MiddleCenter,
}

impl TextDatum {
    /// embedded-graphics alignment and baseline for this datum
    pub fn layout(self) -> (Alignment, Baseline) {
        match self {
            TextDatum::MiddleCenter => (Alignment::Center, Baseline::Middle),
        }
    }
}

/// Everything a text run needs besides its content and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Size step, 1 is the smallest font
    pub size: u8,
    pub datum: TextDatum,
    pub foreground: Rgb565,
    /// Matte painted behind the glyphs
    pub background: Rgb565,
}

impl TextStyle {
    pub fn centered(size: u8, foreground: Rgb565, background: Rgb565) -> Self {
        Self { size, datum: TextDatum::MiddleCenter, foreground, background }
    }
}

/// Minimal drawing capability the watch face needs from a panel.
///
/// Implementations are synchronous: every call blocks until the panel (or
/// framebuffer) has taken the operation. The face never calls into a surface
/// concurrently.
pub trait DisplaySurface: Send {
    /// Bring up the panel
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Set the panel orientation
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError>;

    /// Paint the whole screen with one color
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// One pixel wide circle outline
    fn draw_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw a text run anchored at `position` according to `style.datum`
    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) -> Result<(), DisplayError>;

    /// Blend `fg` over `bg` with an 8-bit weight.
    ///
    /// Panels with a hardware blender may override this.
    fn blend(&mut self, alpha: u8, fg: Rgb565, bg: Rgb565) -> Rgb565 {
        color::blend(alpha, fg, bg)
    }

    /// Push any buffered pixels to the panel
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}
