/*
 *  clock.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Simulated wall clock derived from uptime
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

use arrayvec::ArrayString;
use core::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of monotonically increasing milliseconds since start
pub trait Uptime: Send {
    fn elapsed_ms(&self) -> u64;
}

/// Uptime measured from the moment of construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicUptime {
    start: Instant,
}

impl MonotonicUptime {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicUptime {
    fn default() -> Self {
        Self::new()
    }
}

impl Uptime for MonotonicUptime {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Externally driven uptime; clones share the same counter.
///
/// Used for simulations and tests where time must advance on demand.
#[derive(Debug, Clone, Default)]
pub struct SharedUptime {
    ms: Arc<AtomicU64>,
}

impl SharedUptime {
    pub fn new(start_ms: u64) -> Self {
        Self { ms: Arc::new(AtomicU64::new(start_ms)) }
    }

    pub fn set(&self, ms: u64) {
        self.ms.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Uptime for SharedUptime {
    fn elapsed_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

/// Hours, minutes and seconds of the simulated clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReading {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockReading {
    /// No calendar or timezone: the day simply wraps every 24h of uptime.
    pub fn from_elapsed_ms(ms: u64) -> Self {
        Self {
            hours: ((ms / 3_600_000) % 24) as u8,
            minutes: ((ms / 60_000) % 60) as u8,
            seconds: ((ms / 1_000) % 60) as u8,
        }
    }

    /// Hour as shown on the dial: 0-23, or 1-12 in 12-hour mode
    pub fn display_hour(&self, twenty_four_hour: bool) -> u8 {
        if twenty_four_hour {
            return self.hours;
        }
        match self.hours % 12 {
            0 => 12,
            h => h,
        }
    }

    /// `HH:MM`, always zero padded
    pub fn hhmm(&self, twenty_four_hour: bool) -> ArrayString<8> {
        let mut buf = ArrayString::new();
        // two 2-digit fields and a colon always fit
        let _ = write!(buf, "{:02}:{:02}", self.display_hour(twenty_four_hour), self.minutes);
        buf
    }

    /// `SS`, always zero padded
    pub fn ss(&self) -> ArrayString<4> {
        let mut buf = ArrayString::new();
        let _ = write!(buf, "{:02}", self.seconds);
        buf
    }
}
