/*
 *  main.rs
 *
 *  LyWatch - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host runner: JSON payloads on stdin, face ticked on an interval
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

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use lywatch::config::{self, Cli};
use lywatch::display::CanvasSurface;
use lywatch::face::{RenderOutcome, WatchFace};
use lywatch::pacer::IdleDelay;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for a SIGINT, SIGTERM, or SIGHUP signal, logs it and returns.
#[cfg(unix)]
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_from(&cli).context("loading configuration")?;

    if cli.dump_config {
        println!("{}", config::to_yaml(&cfg)?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("This {} worth the Squeeze", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);
    debug!("Effective config: {:?}", cfg);

    let surface = CanvasSurface::new(cfg.width(), cfg.height());
    let mut face = WatchFace::new(surface)
        .with_rotation(cfg.rotation())
        .with_idle(IdleDelay, cfg.idle_ms());
    face.initialize();

    let mut ticker = tokio::time::interval(Duration::from_millis(cfg.tick_ms()));
    let mut payloads = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut painted: u64 = 0;

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = &mut shutdown => {
                res?;
                break;
            }
            _ = ticker.tick() => {
                face.update_time();
                if face.render() == RenderOutcome::Painted {
                    painted += 1;
                }
            }
            line = payloads.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        // rejections are already logged by the face
                        if let Ok(change) = face.update_config(line) {
                            if change.any() {
                                info!("Active config: {}", face.config().to_payload());
                            }
                        }
                    }
                    Ok(None) => {
                        info!("Payload input closed; face keeps running");
                        stdin_open = false;
                    }
                    Err(e) => {
                        warn!("Payload input failed: {}", e);
                        stdin_open = false;
                    }
                }
            }
        }
    }

    info!("Painted {} frames", painted);
    if let Some(path) = cfg.frame_dump.as_ref() {
        face.surface()
            .snapshot(path)
            .with_context(|| format!("writing frame to {}", path.display()))?;
    }
    Ok(())
}
