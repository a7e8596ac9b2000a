//! This module contains global constants used across the watch face and display modules.

use embedded_graphics::prelude::Point;

/// Panel width in pixels (round 240x240 TFT).
pub const DISPLAY_WIDTH: u32 = 240;
/// Panel height in pixels.
pub const DISPLAY_HEIGHT: u32 = 240;

/// Largest panel side the runner will allocate a framebuffer for.
pub const MAX_PANEL_DIMENSION: u32 = 1024;

/// Center of the dial; every ring is concentric on it.
pub const DIAL_CENTER: Point = Point::new(120, 120);

// Ring radii
pub const GLOW_RADIUS: u32 = 110;
pub const OUTER_TRACK_RADIUS: u32 = 100;
/// Outer progress stroke sits one pixel outside its track.
pub const OUTER_PROGRESS_RADIUS: u32 = 101;
pub const INNER_TRACK_RADIUS: u32 = 90;
pub const INNER_PROGRESS_RADIUS: u32 = 91;

/// Weight of accent 1 over the background for the glow ring.
pub const GLOW_ALPHA: u8 = 128;
/// Weight of white over the background for the ring tracks.
pub const RING_TRACK_ALPHA: u8 = 32;

// Time block
pub const DATE_POSITION: Point = Point::new(120, 70);
pub const TIME_POSITION: Point = Point::new(110, 120);
pub const SECONDS_POSITION: Point = Point::new(175, 130);
pub const DATE_TEXT_SIZE: u8 = 1;
pub const TIME_TEXT_SIZE: u8 = 4;
pub const SECONDS_TEXT_SIZE: u8 = 2;

/// Placeholder day label; there is no calendar behind it.
pub const DAY_LABEL: &str = "SÁB";
/// Placeholder date label.
pub const DATE_LABEL: &str = "ENE 31";

// Stat panels
pub const STAT_TEXT_SIZE: u8 = 1;
pub const STEPS_VALUE_POSITION: Point = Point::new(90, 170);
pub const STEPS_LABEL_POSITION: Point = Point::new(90, 185);
pub const BPM_VALUE_POSITION: Point = Point::new(150, 170);
pub const BPM_LABEL_POSITION: Point = Point::new(150, 185);

/// Mock step count, no sensor behind it.
pub const STEPS_VALUE: &str = "8.2k";
pub const STEPS_LABEL: &str = "STEPS";
/// Mock heart rate, no sensor behind it.
pub const BPM_VALUE: &str = "85";
pub const BPM_LABEL: &str = "BPM";

/// Packed gray used for stat labels.
pub const LABEL_GRAY: u16 = 0x7BEF;
/// Packed red used for the heart rate value.
pub const BPM_RED: u16 = 0xF800;

/// Idle wait when a render pass is skipped, in milliseconds.
pub const IDLE_WAIT_MS: u32 = 10;

/// Largest payload accepted by the JSON decoder, in bytes.
pub const MAX_PAYLOAD_BYTES: usize = 1024;
