/*
 *  display/color.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  565 color helpers: hex parsing, packing and alpha blending
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

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use thiserror::Error;

/// Why a hex color string was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0} characters")]
    WrongLength(usize),
    #[error("'{0}' is not a hex digit")]
    NotHex(char),
}

/// Build a color from its packed 16-bit form
pub fn from_packed(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Packed 16-bit form (RRRRRGGGGGGBBBBB)
pub fn to_packed(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

/// Map 8 bits per channel down to 5/6/5, truncating the low bits.
pub fn from_rgb888(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Expand to 8 bits per channel by replicating the high bits into the low ones.
pub fn to_rgb888(color: Rgb565) -> (u8, u8, u8) {
    let (r, g, b) = (color.r(), color.g(), color.b());
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

/// Parse `#RRGGBB` or `RRGGBB` (either case) into a 565 color.
///
/// Only a single leading `#` is stripped; everything else must be exactly
/// six hex digits. Signs, whitespace and `0x` prefixes are refused.
pub fn parse_hex(text: &str) -> Result<Rgb565, ColorParseError> {
    let digits = text.strip_prefix('#').unwrap_or(text);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorParseError::NotHex(bad));
    }
    if digits.len() != 6 {
        return Err(ColorParseError::WrongLength(digits.len()));
    }

    let rgb = u32::from_str_radix(digits, 16)
        .map_err(|_| ColorParseError::WrongLength(digits.len()))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(from_rgb888(r, g, b))
}

/// `#RRGGBB` (upper case) for a 565 color
pub fn to_hex(color: Rgb565) -> String {
    let (r, g, b) = to_rgb888(color);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

#[inline]
fn mix(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8
}

/// Linear interpolation of `fg` over `bg`, channel by channel in 565 space.
/// `alpha = 255` yields `fg`, `alpha = 0` yields `bg`.
pub fn blend(alpha: u8, fg: Rgb565, bg: Rgb565) -> Rgb565 {
    Rgb565::new(
        mix(fg.r(), bg.r(), alpha),
        mix(fg.g(), bg.g(), alpha),
        mix(fg.b(), bg.b(), alpha),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        let a = parse_hex("#112233").unwrap();
        let b = parse_hex("112233").unwrap();
        assert_eq!(a, b);
        assert_eq!(to_packed(a), (0x11 >> 3) << 11 | (0x22 >> 2) << 5 | (0x33 >> 3));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_hex("#00d2ff"), parse_hex("#00D2FF"));
    }

    #[test]
    fn test_channels_truncate() {
        assert_eq!(to_packed(parse_hex("#FF0000").unwrap()), 0xF800);
        assert_eq!(to_packed(parse_hex("#00FF00").unwrap()), 0x07E0);
        assert_eq!(to_packed(parse_hex("#0000FF").unwrap()), 0x001F);
        // low bits dropped, never rounded up
        assert_eq!(to_packed(parse_hex("#070307").unwrap()), 0x0000);
        assert_eq!(to_packed(parse_hex("#FFFFFF").unwrap()), 0xFFFF);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_hex(""), Err(ColorParseError::WrongLength(0)));
        assert_eq!(parse_hex("#"), Err(ColorParseError::WrongLength(0)));
        assert_eq!(parse_hex("#12345"), Err(ColorParseError::WrongLength(5)));
        assert_eq!(parse_hex("#1234567"), Err(ColorParseError::WrongLength(7)));
        assert_eq!(parse_hex("##112233"), Err(ColorParseError::NotHex('#')));
        assert_eq!(parse_hex("+12345"), Err(ColorParseError::NotHex('+')));
        assert_eq!(parse_hex(" 112233"), Err(ColorParseError::NotHex(' ')));
        assert_eq!(parse_hex("0x1122"), Err(ColorParseError::NotHex('x')));
        assert_eq!(parse_hex("not-a-color"), Err(ColorParseError::NotHex('n')));
    }

    #[test]
    fn test_packed_round_trip() {
        for raw in [0x0000u16, 0x0845, 0x069F, 0x9A97, 0xFFFF] {
            assert_eq!(to_packed(from_packed(raw)), raw);
        }
    }

    #[test]
    fn test_hex_export_reparses_to_same_color() {
        let c = from_packed(0x9A97);
        assert_eq!(parse_hex(&to_hex(c)).unwrap(), c);
        assert_eq!(to_hex(Rgb565::WHITE), "#FFFFFF");
        assert_eq!(to_hex(Rgb565::BLACK), "#000000");
    }

    #[test]
    fn test_blend_endpoints() {
        let fg = from_packed(0x069F);
        let bg = from_packed(0x0845);
        assert_eq!(blend(255, fg, bg), fg);
        assert_eq!(blend(0, fg, bg), bg);
    }

    #[test]
    fn test_blend_midpoint() {
        let c = blend(128, Rgb565::WHITE, Rgb565::BLACK);
        assert_eq!((c.r(), c.g(), c.b()), (15, 31, 15));
    }
}
