/*
 *  tests/canvas_render.rs
 *
 *  Watch face drawn into the in-memory canvas
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 */

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor};
use std::fs;

use lywatch::clock::SharedUptime;
use lywatch::constants::{DIAL_CENTER, GLOW_RADIUS};
use lywatch::display::{CanvasSurface, DisplaySurface, Rotation};
use lywatch::face::{RenderOutcome, WatchFace};

fn painted_face() -> WatchFace<CanvasSurface> {
    let mut face = WatchFace::new(CanvasSurface::new(240, 240)).with_uptime(SharedUptime::new(0));
    face.initialize();
    face.update_time();
    assert_eq!(face.render(), RenderOutcome::Painted);
    face
}

#[test]
fn test_background_and_glow_pixels() {
    let face = painted_face();
    let fb = face.surface().framebuffer();
    let bg = face.config().background;
    let glow = face.cache().glow;

    assert_eq!(fb.pixel(Point::new(0, 0)), Some(bg));
    assert_eq!(fb.pixel(Point::new(239, 239)), Some(bg));

    let top = DIAL_CENTER.y - GLOW_RADIUS as i32;
    let hit = (top - 1..=top + 1).any(|y| fb.pixel(Point::new(DIAL_CENTER.x, y)) == Some(glow));
    assert!(hit, "no glow pixel near the top of the dial");
    assert_eq!(face.surface().frames(), 1);
}

#[test]
fn test_background_change_repaints_corners() {
    let mut face = painted_face();
    face.update_config(r##"{"bgColor":"#204060"}"##).unwrap();
    let bg = face.config().background;
    assert_eq!(face.surface().framebuffer().pixel(Point::new(0, 0)), Some(bg));
}

#[test]
fn test_snapshot_writes_ppm() {
    let face = painted_face();
    let path = std::env::temp_dir().join(format!("lywatch-{}.ppm", std::process::id()));
    face.surface().snapshot(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let header = b"P6\n240 240\n255\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len(), header.len() + 240 * 240 * 3);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_drawing_before_init_fails() {
    let mut canvas = CanvasSurface::new(240, 240);
    assert!(canvas.fill_screen(Rgb565::BLACK).is_err());
    canvas.init().unwrap();
    canvas.set_rotation(Rotation::Deg90).unwrap();
    assert!(canvas.draw_circle(DIAL_CENTER, 10, Rgb565::RED).is_ok());
}
