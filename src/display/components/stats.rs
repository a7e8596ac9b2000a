/*
 *  display/components/stats.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Optional steps and heart rate panels
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
    BPM_LABEL, BPM_LABEL_POSITION, BPM_RED, BPM_VALUE, BPM_VALUE_POSITION,
    LABEL_GRAY, STAT_TEXT_SIZE, STEPS_LABEL, STEPS_LABEL_POSITION, STEPS_VALUE,
    STEPS_VALUE_POSITION,
};
use crate::display::color;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplaySurface, TextStyle};
use crate::face::theme::WatchConfig;

/// Mock stat values; there is no sensor behind either panel.
pub fn draw_stats<S>(surface: &mut S, config: &WatchConfig) -> Result<(), DisplayError>
where
    S: DisplaySurface + ?Sized,
{
    let bg = config.background;
    let label = TextStyle::centered(STAT_TEXT_SIZE, color::from_packed(LABEL_GRAY), bg);

    if config.show_steps {
        let value = TextStyle::centered(STAT_TEXT_SIZE, config.accent1, bg);
        surface.draw_text(STEPS_VALUE, STEPS_VALUE_POSITION, value)?;
        surface.draw_text(STEPS_LABEL, STEPS_LABEL_POSITION, label)?;
    }

    if config.show_bpm {
        let value = TextStyle::centered(STAT_TEXT_SIZE, color::from_packed(BPM_RED), bg);
        surface.draw_text(BPM_VALUE, BPM_VALUE_POSITION, value)?;
        surface.draw_text(BPM_LABEL, BPM_LABEL_POSITION, label)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockSurface;

    fn drawn(config: &WatchConfig) -> Vec<String> {
        let mut mock = MockSurface::new();
        draw_stats(&mut mock, config).unwrap();
        let state = mock.state();
        let texts = state.lock().unwrap().texts();
        texts
    }

    #[test]
    fn test_panels_follow_toggles() {
        let both = WatchConfig::default();
        assert_eq!(drawn(&both), vec![STEPS_VALUE, STEPS_LABEL, BPM_VALUE, BPM_LABEL]);

        let steps_only = WatchConfig { show_bpm: false, ..both };
        assert_eq!(drawn(&steps_only), vec![STEPS_VALUE, STEPS_LABEL]);

        let none = WatchConfig { show_steps: false, show_bpm: false, ..both };
        assert!(drawn(&none).is_empty());
    }

    #[test]
    fn test_labels_are_gray() {
        let mut mock = MockSurface::new();
        draw_stats(&mut mock, &WatchConfig::default()).unwrap();
        let state = mock.state();
        let state = state.lock().unwrap();
        assert_eq!(state.text_style(STEPS_LABEL).unwrap().foreground, color::from_packed(LABEL_GRAY));
        assert_eq!(state.text_style(BPM_VALUE).unwrap().foreground, color::from_packed(BPM_RED));
    }
}
