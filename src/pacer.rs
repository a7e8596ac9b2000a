/*
 *  pacer.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Idle wait between render passes
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

use embedded_hal::delay::DelayNs;
use std::thread;
use std::time::Duration;

/// Blocking delay backed by the OS scheduler.
///
/// The face calls this when a frame is skipped so the driver loop does not
/// spin; anything implementing `DelayNs` can stand in for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleDelay;

impl DelayNs for IdleDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }

    // the default impls loop in 1ms chunks, a single sleep is enough here
    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_idle_delay_sleeps_at_least_requested() {
        let mut delay = IdleDelay;
        let start = Instant::now();
        delay.delay_ms(5);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_zero_delay_returns() {
        let mut delay = IdleDelay;
        delay.delay_ms(0);
        delay.delay_us(0);
        delay.delay_ns(0);
    }
}
