/*
 *  display/drivers/mock.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display surface for testing without hardware
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

use crate::display::color;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplaySurface, Rotation, TextStyle};

use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded surface operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Init,
    SetRotation(Rotation),
    FillScreen(Rgb565),
    DrawCircle { center: Point, radius: u32, color: Rgb565 },
    DrawText { text: String, position: Point, style: TextStyle },
    Flush,
}

/// Mock display surface for testing
///
/// Records every operation instead of drawing pixels. The recorded state is
/// shared behind an `Arc<Mutex<_>>` so a test can keep a handle after the
/// surface has been moved into the watch face.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    state: Arc<Mutex<MockSurfaceState>>,
}

/// Internal state for the mock surface (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockSurfaceState {
    /// Every call, in order
    pub calls: Vec<SurfaceCall>,

    /// Number of times blend() was called
    pub blend_count: usize,

    /// Simulate failures (for error testing)
    pub simulate_init_failure: bool,
    pub simulate_draw_failure: bool,
}

impl MockSurfaceState {
    pub fn fill_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SurfaceCall::FillScreen(_))).count()
    }

    /// Circles plus text runs
    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::DrawCircle { .. } | SurfaceCall::DrawText { .. }))
            .count()
    }

    pub fn flush_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SurfaceCall::Flush)).count()
    }

    /// Text runs drawn, in order
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Style used for the most recent run of `text`
    pub fn text_style(&self, wanted: &str) -> Option<TextStyle> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::DrawText { text, style, .. } if text == wanted => Some(*style),
            _ => None,
        })
    }

    pub fn circles(&self) -> Vec<(u32, Rgb565)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::DrawCircle { radius, color, .. } => Some((*radius, *color)),
                _ => None,
            })
            .collect()
    }
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockSurfaceState>> {
        Arc::clone(&self.state)
    }

    /// Forget recorded calls and counters, keep failure switches
    pub fn reset_calls(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.blend_count = 0;
    }

    fn lock(&self) -> MutexGuard<'_, MockSurfaceState> {
        // a poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&mut self, call: SurfaceCall) -> Result<(), DisplayError> {
        let mut state = self.lock();
        let failing = state.simulate_draw_failure
            && !matches!(call, SurfaceCall::Init | SurfaceCall::SetRotation(_));
        state.calls.push(call);
        if failing {
            return Err(DisplayError::Other("Simulated draw failure".to_string()));
        }
        Ok(())
    }
}

impl DisplaySurface for MockSurface {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.lock().simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }
        self.record(SurfaceCall::Init)
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.record(SurfaceCall::SetRotation(rotation))
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.record(SurfaceCall::FillScreen(color))
    }

    fn draw_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), DisplayError> {
        self.record(SurfaceCall::DrawCircle { center, radius, color })
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) -> Result<(), DisplayError> {
        self.record(SurfaceCall::DrawText { text: text.to_string(), position, style })
    }

    fn blend(&mut self, alpha: u8, fg: Rgb565, bg: Rgb565) -> Rgb565 {
        self.lock().blend_count += 1;
        color::blend(alpha, fg, bg)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.record(SurfaceCall::Flush)
    }
}
