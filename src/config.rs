/*
 *  config.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runner configuration: defaults, YAML file and CLI overrides
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

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, IDLE_WAIT_MS, MAX_PANEL_DIMENSION};
use crate::display::traits::Rotation;

/// Driver loop tick when nothing is configured, in milliseconds
pub const DEFAULT_TICK_MS: u64 = 50;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level runner configuration; every field is optional so layers can
/// be stacked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// e.g. "info" | "debug"
    pub log_level: Option<String>,
    /// driver loop tick in milliseconds
    pub tick_ms: Option<u64>,
    /// wait when a frame is skipped, in milliseconds
    pub idle_ms: Option<u32>,
    /// final frame written here as PPM on shutdown
    pub frame_dump: Option<PathBuf>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotate_deg: Option<u16>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.unwrap_or(DEFAULT_TICK_MS)
    }

    pub fn idle_ms(&self) -> u32 {
        self.idle_ms.unwrap_or(IDLE_WAIT_MS)
    }

    pub fn width(&self) -> u32 {
        self.display.as_ref().and_then(|d| d.width).unwrap_or(DISPLAY_WIDTH)
    }

    pub fn height(&self) -> u32 {
        self.display.as_ref().and_then(|d| d.height).unwrap_or(DISPLAY_HEIGHT)
    }

    /// Only meaningful after `validate`; an unchecked angle falls back to 0°.
    pub fn rotation(&self) -> Rotation {
        self.display
            .as_ref()
            .and_then(|d| d.rotate_deg)
            .and_then(|deg| Rotation::try_from(deg).ok())
            .unwrap_or_default()
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "LyWatch", about = "LyWatch face simulator", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub tick_ms: Option<u64>,
    #[arg(long)]
    pub idle_ms: Option<u32>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub frame_dump: Option<PathBuf>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_rotate_deg: Option<u16>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Defaults, then YAML (explicit path or search), then CLI, then validate.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = cli.config.as_ref() {
        if !p.exists() {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
        merge(&mut cfg, read_yaml(p)?);
    } else if let Some(p) = find_config_file() {
        merge(&mut cfg, read_yaml(&p)?);
    }

    apply_cli_overrides(&mut cfg, cli);
    validate(&cfg)?;
    Ok(cfg)
}

/// Effective config as YAML, for `--dump-config`
pub fn to_yaml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/lywatch/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lywatch.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["lywatch.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(text: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()  { dst.log_level = src.log_level; }
    if src.tick_ms.is_some()    { dst.tick_ms = src.tick_ms; }
    if src.idle_ms.is_some()    { dst.idle_ms = src.idle_ms; }
    if src.frame_dump.is_some() { dst.frame_dump = src.frame_dump; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()      { dst.width = src.width; }
    if src.height.is_some()     { dst.height = src.height; }
    if src.rotate_deg.is_some() { dst.rotate_deg = src.rotate_deg; }
}

pub fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                { cfg.log_level = Some("debug".into()); }
    if cli.tick_ms.is_some()    { cfg.tick_ms = cli.tick_ms; }
    if cli.idle_ms.is_some()    { cfg.idle_ms = cli.idle_ms; }
    if cli.frame_dump.is_some() { cfg.frame_dump = cli.frame_dump.clone(); }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_rotate_deg.is_some();

    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_width.is_some()      { display.width = cli.display_width; }
        if cli.display_height.is_some()     { display.height = cli.display_height; }
        if cli.display_rotate_deg.is_some() { display.rotate_deg = cli.display_rotate_deg; }
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.tick_ms == Some(0) {
        return Err(ConfigError::Validation("tick_ms must be > 0".into()));
    }
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        let oversized = |side: Option<u32>| side.is_some_and(|v| v > MAX_PANEL_DIMENSION);
        if oversized(display.width) || oversized(display.height) {
            return Err(ConfigError::Validation(format!(
                "display width/height must be <= {}",
                MAX_PANEL_DIMENSION
            )));
        }
        if let Some(rot) = display.rotate_deg {
            if Rotation::try_from(rot).is_err() {
                return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["lywatch"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.log_level(), "info");
        assert_eq!(cfg.tick_ms(), DEFAULT_TICK_MS);
        assert_eq!(cfg.idle_ms(), IDLE_WAIT_MS);
        assert_eq!((cfg.width(), cfg.height()), (240, 240));
        assert_eq!(cfg.rotation(), Rotation::Deg0);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_yaml_then_cli_precedence() {
        let mut cfg = Config::default();
        let yaml = "log_level: warn\ntick_ms: 100\ndisplay:\n  width: 320\n  rotate_deg: 90\n";
        merge(&mut cfg, parse_yaml(yaml).unwrap());
        assert_eq!(cfg.tick_ms(), 100);
        assert_eq!(cfg.rotation(), Rotation::Deg90);

        apply_cli_overrides(&mut cfg, &cli(&["--tick-ms", "20", "--display-height", "200"]));
        assert_eq!(cfg.tick_ms(), 20);
        assert_eq!(cfg.log_level(), "warn");
        assert_eq!((cfg.width(), cfg.height()), (320, 200));
    }

    #[test]
    fn test_debug_flag_wins_over_log_level() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--log-level", "warn", "--debug"]));
        assert_eq!(cfg.log_level(), "debug");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut cfg = Config { tick_ms: Some(0), ..Config::default() };
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        cfg.tick_ms = None;
        apply_cli_overrides(&mut cfg, &cli(&["--display-rotate-deg", "45"]));
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let cfg = parse_yaml("display:\n  width: 0\n").unwrap();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_panel() {
        let huge = cli(&["--display-width", "4000000000", "--display-height", "4000000000"]);
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &huge);
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("<= 1024"), "{err}");

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--display-width", "1025"]));
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--display-width", "1024", "--display-height", "1024"]));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_from(&cli(&["--config", "/nonexistent/lywatch.yaml"])).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_dump_roundtrip() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--frame-dump", "/tmp/face.ppm", "--idle-ms", "5"]));
        let text = to_yaml(&cfg).unwrap();
        assert_eq!(parse_yaml(&text).unwrap(), cfg);
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(parse_yaml("tick_ms: [oops"), Err(ConfigError::Yaml(_))));
    }
}
