/*
 *  display/components/time.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Date label, HH:MM and seconds
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

use crate::constants::{
    DATE_POSITION, DATE_TEXT_SIZE, SECONDS_POSITION, SECONDS_TEXT_SIZE,
    TIME_POSITION, TIME_TEXT_SIZE,
};
use crate::display::error::DisplayError;
use crate::display::traits::{DisplaySurface, TextStyle};
use crate::face::RenderState;
use crate::face::theme::WatchConfig;

/// "DAY, DATE" line shown above the time
pub fn date_line(day: &str, date: &str) -> ArrayString<32> {
    let mut buf = ArrayString::new();
    if write!(buf, "{}, {}", day, date).is_err() {
        buf.clear();
    }
    buf
}

pub fn draw_time_block<S>(
    surface: &mut S,
    config: &WatchConfig,
    state: &RenderState,
) -> Result<(), DisplayError>
where
    S: DisplaySurface + ?Sized,
{
    let reading = &state.reading;
    let bg = config.background;

    let date = date_line(state.day_label, state.date_label);
    surface.draw_text(&date, DATE_POSITION, TextStyle::centered(DATE_TEXT_SIZE, config.text, bg))?;

    let hhmm = reading.hhmm(config.twenty_four_hour);
    surface.draw_text(&hhmm, TIME_POSITION, TextStyle::centered(TIME_TEXT_SIZE, config.text, bg))?;

    let ss = reading.ss();
    surface.draw_text(&ss, SECONDS_POSITION, TextStyle::centered(SECONDS_TEXT_SIZE, config.accent1, bg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockReading;
    use crate::display::drivers::mock::MockSurface;

    #[test]
    fn test_date_line() {
        assert_eq!(date_line("SÁB", "ENE 31").as_str(), "SÁB, ENE 31");
    }

    #[test]
    fn test_time_block_texts_and_colors() {
        let mut mock = MockSurface::new();
        let config = WatchConfig { twenty_four_hour: false, ..WatchConfig::default() };
        let state = RenderState {
            reading: ClockReading { hours: 0, minutes: 4, seconds: 9 },
            ..RenderState::default()
        };

        draw_time_block(&mut mock, &config, &state).unwrap();

        let recorded = mock.state();
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.texts(), vec!["SÁB, ENE 31", "12:04", "09"]);

        let time_style = recorded.text_style("12:04").unwrap();
        assert_eq!(time_style.size, TIME_TEXT_SIZE);
        assert_eq!(time_style.foreground, config.text);
        assert_eq!(time_style.background, config.background);

        let seconds_style = recorded.text_style("09").unwrap();
        assert_eq!(seconds_style.foreground, config.accent1);
        assert_eq!(seconds_style.size, SECONDS_TEXT_SIZE);
    }
}
