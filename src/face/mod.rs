/*
 *  face/mod.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watch face controller: config updates, simulated time and redraw policy
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

pub mod theme;

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, trace, warn};
use serde_json::Value;
use thiserror::Error;

use crate::clock::{ClockReading, MonotonicUptime, Uptime};
use crate::constants::{DATE_LABEL, DAY_LABEL, IDLE_WAIT_MS};
use crate::decoder::{ConfigDecoder, DecodeError, JsonDecoder, kind_of};
use crate::display::components::{rings, stats, time};
use crate::display::error::DisplayError;
use crate::display::traits::{DisplaySurface, Rotation};
use crate::func_timer::FunctionTimer;
use crate::pacer::IdleDelay;

pub use theme::{ConfigChange, DerivedCache, FieldError, RejectedField, WatchConfig};

/// Payload rejected as a whole; nothing was applied
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("could not decode payload: {0}")]
    Decode(#[from] DecodeError),
    #[error("payload must be an object, got {0}")]
    NotAnObject(&'static str),
}

/// What a render pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same second, nothing pending: no surface calls were made
    Skipped,
    /// Full frame drawn
    Painted,
}

/// Transient state between ticks
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Second shown by the last painted frame
    pub last_rendered_second: Option<u8>,
    /// Forces the next pass to paint regardless of the second
    pub redraw_pending: bool,
    pub reading: ClockReading,
    pub day_label: &'static str,
    pub date_label: &'static str,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            last_rendered_second: None,
            redraw_pending: true,
            reading: ClockReading::default(),
            day_label: DAY_LABEL,
            date_label: DATE_LABEL,
        }
    }
}

/// The watch face controller.
///
/// Owns the configuration, the colors derived from it and the decision of
/// when to repaint. All operations are meant to be called in sequence from a
/// single driver loop.
pub struct WatchFace<S: DisplaySurface> {
    surface: S,
    decoder: Box<dyn ConfigDecoder>,
    uptime: Box<dyn Uptime>,
    idle: Box<dyn DelayNs + Send>,
    idle_ms: u32,
    rotation: Rotation,
    config: WatchConfig,
    cache: DerivedCache,
    render: RenderState,
}

impl<S: DisplaySurface> WatchFace<S> {
    /// Face with the "Galaxy" defaults, a JSON decoder, uptime counted from now
    /// and a sleeping idle wait.
    pub fn new(mut surface: S) -> Self {
        let config = WatchConfig::default();
        let cache = DerivedCache::compute(&config, &mut surface);
        Self {
            surface,
            decoder: Box::new(JsonDecoder::new()),
            uptime: Box::new(MonotonicUptime::new()),
            idle: Box::new(IdleDelay),
            idle_ms: IDLE_WAIT_MS,
            rotation: Rotation::Deg0,
            config,
            cache,
            render: RenderState::default(),
        }
    }

    pub fn with_decoder(mut self, decoder: impl ConfigDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_uptime(mut self, uptime: impl Uptime + 'static) -> Self {
        self.uptime = Box::new(uptime);
        self
    }

    /// Delay used when a render pass is skipped, and for how long
    pub fn with_idle(mut self, idle: impl DelayNs + Send + 'static, idle_ms: u32) -> Self {
        self.idle = Box::new(idle);
        self.idle_ms = idle_ms;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn cache(&self) -> &DerivedCache {
        &self.cache
    }

    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Bring up the panel and paint the background.
    ///
    /// Surface failures are logged; the face keeps running either way.
    pub fn initialize(&mut self) {
        let result = self
            .surface
            .init()
            .and_then(|_| self.surface.set_rotation(self.rotation))
            .and_then(|_| self.surface.fill_screen(self.config.background));
        match result {
            Ok(()) => info!("Watch face initialized, rotation {}°", self.rotation.degrees()),
            Err(e) => error!("Display initialization failed: {}", e),
        }
    }

    /// Validate an untrusted payload and merge it into the configuration.
    ///
    /// A payload that does not decode, or is not an object, is rejected whole.
    /// Otherwise each recognized field is applied or skipped on its own merit;
    /// skipped fields are listed in the returned change.
    pub fn update_config(&mut self, payload: &str) -> Result<ConfigChange, UpdateError> {
        let fields = match self.decoder.decode(payload) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                warn!("Config payload ignored: expected an object, got {}", kind_of(&other));
                return Err(UpdateError::NotAnObject(kind_of(&other)));
            }
            Err(e) => {
                warn!("Config payload ignored: {}", e);
                return Err(e.into());
            }
        };

        let change = self.config.merge(&fields);
        for rejected in &change.rejected {
            warn!("Config field '{}' ignored: {}", rejected.key, rejected.error);
        }

        if change.any() {
            self.cache = DerivedCache::compute(&self.config, &mut self.surface);
            self.render.redraw_pending = true;
            info!("Config updated (background changed: {})", change.background);
        } else {
            debug!("Config payload changed nothing");
        }

        // old matte colors would otherwise linger around text and rings
        if change.background {
            if let Err(e) = self.surface.fill_screen(self.config.background) {
                error!("Failed to clear screen to new background: {}", e);
            }
        }

        Ok(change)
    }

    /// Advance the simulated clock from uptime
    pub fn update_time(&mut self) {
        self.render.reading = ClockReading::from_elapsed_ms(self.uptime.elapsed_ms());
        self.render.day_label = DAY_LABEL;
        self.render.date_label = DATE_LABEL;
    }

    /// Paint the face if the visible second moved or a redraw is pending,
    /// otherwise idle briefly without touching the surface.
    pub fn render(&mut self) -> RenderOutcome {
        let second = self.render.reading.seconds;
        if self.render.last_rendered_second == Some(second) && !self.render.redraw_pending {
            trace!("Frame skipped, second {} already shown", second);
            self.idle.delay_ms(self.idle_ms);
            return RenderOutcome::Skipped;
        }

        self.render.last_rendered_second = Some(second);
        self.render.redraw_pending = false;

        let _timer = FunctionTimer::new("render");
        if let Err(e) = self.paint() {
            error!("Failed to render watch face frame: {}", e);
            // retry on the next tick rather than leave a partial frame up
            self.render.redraw_pending = true;
        }
        RenderOutcome::Painted
    }

    fn paint(&mut self) -> Result<(), DisplayError> {
        let surface = &mut self.surface;
        rings::draw_glow(surface, &self.cache)?;
        rings::draw_progress_rings(surface, &self.config, &self.cache)?;
        time::draw_time_block(surface, &self.config, &self.render)?;
        stats::draw_stats(surface, &self.config)?;
        surface.flush()
    }
}
