/*
 *  display/mod.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem: surface abstraction, color helpers and face components
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;
pub mod framebuffer;

// Surface implementations
pub mod drivers;

// Watch face components
pub mod components;

// Re-exports for convenience
pub use traits::{DisplaySurface, Rotation, TextDatum, TextStyle};
pub use error::DisplayError;
pub use framebuffer::FrameBuffer;
pub use drivers::canvas::CanvasSurface;
pub use drivers::mock::MockSurface;
