/*
 *  display/components/rings.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Glow ring and progress rings
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

use crate::constants::{
    DIAL_CENTER, GLOW_RADIUS, INNER_PROGRESS_RADIUS, INNER_TRACK_RADIUS,
    OUTER_PROGRESS_RADIUS, OUTER_TRACK_RADIUS,
};
use crate::display::error::DisplayError;
use crate::display::traits::DisplaySurface;
use crate::face::theme::{DerivedCache, WatchConfig};

/// Outer ring simulating a soft glow around the dial
pub fn draw_glow<S>(surface: &mut S, cache: &DerivedCache) -> Result<(), DisplayError>
where
    S: DisplaySurface + ?Sized,
{
    surface.draw_circle(DIAL_CENTER, GLOW_RADIUS, cache.glow)
}

/// Outer (steps) and inner (battery) rings: a faint track with the accent
/// stroke drawn just outside it.
pub fn draw_progress_rings<S>(
    surface: &mut S,
    config: &WatchConfig,
    cache: &DerivedCache,
) -> Result<(), DisplayError>
where
    S: DisplaySurface + ?Sized,
{
    surface.draw_circle(DIAL_CENTER, OUTER_TRACK_RADIUS, cache.ring_track)?;
    surface.draw_circle(DIAL_CENTER, OUTER_PROGRESS_RADIUS, config.accent1)?;

    surface.draw_circle(DIAL_CENTER, INNER_TRACK_RADIUS, cache.ring_track)?;
    surface.draw_circle(DIAL_CENTER, INNER_PROGRESS_RADIUS, config.accent2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockSurface;

    #[test]
    fn test_rings_use_cached_and_live_colors() {
        let mut mock = MockSurface::new();
        let config = WatchConfig::default();
        let cache = DerivedCache::compute(&config, &mut mock);

        draw_glow(&mut mock, &cache).unwrap();
        draw_progress_rings(&mut mock, &config, &cache).unwrap();

        assert_eq!(
            mock.state().lock().unwrap().circles(),
            vec![
                (GLOW_RADIUS, cache.glow),
                (OUTER_TRACK_RADIUS, cache.ring_track),
                (OUTER_PROGRESS_RADIUS, config.accent1),
                (INNER_TRACK_RADIUS, cache.ring_track),
                (INNER_PROGRESS_RADIUS, config.accent2),
            ]
        );
    }
}
