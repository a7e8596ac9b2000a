/*
 *  face/theme.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watch face configuration and the colors derived from it
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
use embedded_graphics::prelude::RgbColor;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::constants::{GLOW_ALPHA, RING_TRACK_ALPHA};
use crate::decoder::kind_of;
use crate::display::color::{self, ColorParseError};
use crate::display::traits::DisplaySurface;

// payload keys
pub const KEY_BG_COLOR: &str = "bgColor";
pub const KEY_ACCENT_COLOR_1: &str = "accentColor1";
pub const KEY_ACCENT_COLOR_2: &str = "accentColor2";
pub const KEY_TEXT_COLOR: &str = "textColor";
pub const KEY_SHOW_STEPS: &str = "showSteps";
pub const KEY_SHOW_BPM: &str = "showBPM";
pub const KEY_IS_24H: &str = "is24h";

/// Why a single payload field was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("expected a string, got {0}")]
    NotAString(&'static str),
    #[error("expected a boolean, got {0}")]
    NotABoolean(&'static str),
    #[error("invalid color: {0}")]
    BadColor(#[from] ColorParseError),
}

/// A field that was present but kept its previous value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedField {
    pub key: &'static str,
    pub error: FieldError,
}

/// What a payload actually changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigChange {
    /// Background color took a new value
    pub background: bool,
    /// Any other field took a new value
    pub other: bool,
    pub rejected: Vec<RejectedField>,
}

impl ConfigChange {
    pub fn any(&self) -> bool {
        self.background || self.other
    }
}

/// User facing face configuration.
///
/// Fields only ever hold validated values; a payload replaces them one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    pub background: Rgb565,
    pub accent1: Rgb565,
    pub accent2: Rgb565,
    pub text: Rgb565,
    pub show_steps: bool,
    pub show_bpm: bool,
    pub twenty_four_hour: bool,
}

impl Default for WatchConfig {
    /// "Galaxy" theme
    fn default() -> Self {
        Self {
            background: color::from_packed(0x0845),
            accent1: color::from_packed(0x069F),
            accent2: color::from_packed(0x9A97),
            text: Rgb565::WHITE,
            show_steps: true,
            show_bpm: true,
            twenty_four_hour: true,
        }
    }
}

fn color_field(value: &Value) -> Result<Rgb565, FieldError> {
    match value {
        Value::String(s) => Ok(color::parse_hex(s)?),
        other => Err(FieldError::NotAString(kind_of(other))),
    }
}

fn bool_field(value: &Value) -> Result<bool, FieldError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(FieldError::NotABoolean(kind_of(other))),
    }
}

/// Validate `key` if present and swap it into `slot`.
/// Returns true only when the stored value actually changed.
fn merge_field<T: PartialEq>(
    fields: &Map<String, Value>,
    key: &'static str,
    slot: &mut T,
    parse: fn(&Value) -> Result<T, FieldError>,
    rejected: &mut Vec<RejectedField>,
) -> bool {
    let Some(value) = fields.get(key) else {
        return false;
    };
    match parse(value) {
        Ok(v) if v != *slot => {
            *slot = v;
            true
        }
        Ok(_) => false,
        Err(error) => {
            rejected.push(RejectedField { key, error });
            false
        }
    }
}

impl WatchConfig {
    /// Merge recognized keys from a decoded payload object.
    ///
    /// Every field is validated on its own; a bad field is reported and skipped
    /// without affecting the others. Unknown keys are ignored.
    pub fn merge(&mut self, fields: &Map<String, Value>) -> ConfigChange {
        let mut change = ConfigChange::default();
        let rejected = &mut change.rejected;

        change.background = merge_field(fields, KEY_BG_COLOR, &mut self.background, color_field, rejected);

        let mut other = false;
        other |= merge_field(fields, KEY_ACCENT_COLOR_1, &mut self.accent1, color_field, rejected);
        other |= merge_field(fields, KEY_ACCENT_COLOR_2, &mut self.accent2, color_field, rejected);
        other |= merge_field(fields, KEY_TEXT_COLOR, &mut self.text, color_field, rejected);
        other |= merge_field(fields, KEY_SHOW_STEPS, &mut self.show_steps, bool_field, rejected);
        other |= merge_field(fields, KEY_SHOW_BPM, &mut self.show_bpm, bool_field, rejected);
        other |= merge_field(fields, KEY_IS_24H, &mut self.twenty_four_hour, bool_field, rejected);
        change.other = other;

        change
    }

    /// The configuration in payload form, as a companion app would send it
    pub fn to_payload(&self) -> Value {
        json!({
            KEY_BG_COLOR: color::to_hex(self.background),
            KEY_ACCENT_COLOR_1: color::to_hex(self.accent1),
            KEY_ACCENT_COLOR_2: color::to_hex(self.accent2),
            KEY_TEXT_COLOR: color::to_hex(self.text),
            KEY_SHOW_STEPS: self.show_steps,
            KEY_SHOW_BPM: self.show_bpm,
            KEY_IS_24H: self.twenty_four_hour,
        })
    }
}

/// Blended colors cached between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedCache {
    /// Accent 1 half-blended into the background
    pub glow: Rgb565,
    /// Faint white track behind the progress rings
    pub ring_track: Rgb565,
}

impl DerivedCache {
    /// Blending goes through the surface so panels with hardware blend agree
    /// with what they draw.
    pub fn compute<S: DisplaySurface + ?Sized>(config: &WatchConfig, surface: &mut S) -> Self {
        Self {
            glow: surface.blend(GLOW_ALPHA, config.accent1, config.background),
            ring_track: surface.blend(RING_TRACK_ALPHA, Rgb565::WHITE, config.background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockSurface;

    fn object(text: &str) -> Map<String, Value> {
        match serde_json::from_str(text).unwrap() {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_galaxy_defaults() {
        let cfg = WatchConfig::default();
        assert_eq!(color::to_packed(cfg.background), 0x0845);
        assert_eq!(color::to_packed(cfg.accent1), 0x069F);
        assert_eq!(color::to_packed(cfg.accent2), 0x9A97);
        assert_eq!(color::to_packed(cfg.text), 0xFFFF);
        assert!(cfg.show_steps && cfg.show_bpm && cfg.twenty_four_hour);
    }

    #[test]
    fn test_merge_tracks_background_separately() {
        let mut cfg = WatchConfig::default();
        let change = cfg.merge(&object(r##"{"bgColor":"#112233","is24h":false}"##));
        assert!(change.background);
        assert!(change.other);
        assert!(change.rejected.is_empty());
        assert_eq!(cfg.background, color::parse_hex("112233").unwrap());
        assert!(!cfg.twenty_four_hour);
        assert!(cfg.show_bpm);
    }

    #[test]
    fn test_bad_field_does_not_block_others() {
        let mut cfg = WatchConfig::default();
        let change = cfg.merge(&object(
            r##"{"accentColor1":"#12","textColor":"#000000","showSteps":"no","accentColor2":null}"##,
        ));
        assert!(!change.background);
        assert!(change.other);
        assert_eq!(cfg.text, Rgb565::BLACK);
        assert_eq!(cfg.accent1, WatchConfig::default().accent1);
        assert!(cfg.show_steps);

        let keys: Vec<_> = change.rejected.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![KEY_ACCENT_COLOR_1, KEY_ACCENT_COLOR_2, KEY_SHOW_STEPS]);
        assert_eq!(change.rejected[0].error, FieldError::BadColor(ColorParseError::WrongLength(2)));
        assert_eq!(change.rejected[1].error, FieldError::NotAString("null"));
        assert_eq!(change.rejected[2].error, FieldError::NotABoolean("string"));
    }

    #[test]
    fn test_same_value_is_not_a_change() {
        let mut cfg = WatchConfig::default();
        let change = cfg.merge(&object(r##"{"bgColor":"#0845","showBPM":true}"##));
        // "#0845" is malformed; showBPM already true
        assert!(!change.any());
        assert_eq!(change.rejected.len(), 1);

        let bg = color::to_hex(cfg.background);
        let change = cfg.merge(&object(&format!(r#"{{"bgColor":"{bg}"}}"#)));
        assert!(!change.any());
        assert!(change.rejected.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut cfg = WatchConfig::default();
        let change = cfg.merge(&object(r#"{"brightness": 7, "theme": "galaxy"}"#));
        assert_eq!(change, ConfigChange::default());
        assert_eq!(cfg, WatchConfig::default());
    }

    #[test]
    fn test_payload_export_merges_back_to_same_config() {
        let mut source = WatchConfig::default();
        source.merge(&object(r##"{"accentColor2":"#00b875","showSteps":false}"##));

        let exported = source.to_payload();
        assert_eq!(exported[KEY_ACCENT_COLOR_2], Value::String(color::to_hex(source.accent2)));
        assert_eq!(exported[KEY_SHOW_STEPS], Value::Bool(false));

        let mut copy = WatchConfig::default();
        let Value::Object(fields) = exported else { panic!("export is not an object") };
        copy.merge(&fields);
        assert_eq!(copy, source);
    }

    #[test]
    fn test_derived_cache_blends_through_surface() {
        let mut mock = MockSurface::new();
        let cfg = WatchConfig::default();
        let cache = DerivedCache::compute(&cfg, &mut mock);
        assert_eq!(mock.state().lock().unwrap().blend_count, 2);
        assert_eq!(cache.glow, color::blend(GLOW_ALPHA, cfg.accent1, cfg.background));
        assert_eq!(cache.ring_track, color::blend(RING_TRACK_ALPHA, Rgb565::WHITE, cfg.background));
    }
}
