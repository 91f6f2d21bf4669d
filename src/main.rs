//! raypick - pointer ray picking over a small animated 3D scene
//!
//! Headless driver: loads the scene config, optionally replays scripted
//! pointer input, and writes hover/click events to a JSONL log.

mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::SceneConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting raypick v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match cli.config.as_deref() {
        Some(path) => SceneConfig::load_from_path(path),
        None => SceneConfig::load(),
    };
    if let Some((width, height)) = cli.resolution {
        config.width = width;
        config.height = height;
    }
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if cli.no_model {
        config.model_path = None;
    } else if let Some(path) = cli.model.clone() {
        config.model_path = Some(path);
    }

    if let Some(path) = cli.save_config.as_deref() {
        config.save_to_path(path)?;
        info!(path = %path.display(), "Saved effective config");
        return Ok(());
    }

    if cli.exit_when_script_finished && cli.scripted_input.is_none() {
        tracing::warn!("--exit-when-script-finished has no effect without --scripted-input");
    }

    let summary = headless::run(headless::HeadlessConfig {
        config,
        scripted_input: cli.scripted_input,
        event_log: cli.event_log,
        max_frames: cli.max_frames,
        exit_when_script_finished: cli.exit_when_script_finished,
    })?;

    info!(frames = summary.frames, "raypick shutting down");
    Ok(())
}

#[derive(Clone, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    save_config: Option<PathBuf>,
    model: Option<PathBuf>,
    no_model: bool,
    scripted_input: Option<PathBuf>,
    event_log: Option<PathBuf>,
    max_frames: Option<u64>,
    fps: Option<u32>,
    resolution: Option<(u32, u32)>,
    exit_when_script_finished: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--save-config" => {
                    if let Some(path) = args.next() {
                        opts.save_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-config requires a file path");
                    }
                }
                "--model" => {
                    if let Some(path) = args.next() {
                        opts.model = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--model requires a file path");
                    }
                }
                "--no-model" => opts.no_model = true,
                "--scripted-input" => {
                    if let Some(path) = args.next() {
                        opts.scripted_input = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--scripted-input requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--max-frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_frames = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-frames requires an integer");
                    }
                }
                "--fps" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u32>() {
                            Ok(value) => opts.fps = Some(value.max(1)),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--fps must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--fps requires an integer");
                    }
                }
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match parse_resolution(&raw) {
                            Some(resolution) => opts.resolution = Some(resolution),
                            None => {
                                tracing::error!(value = %raw, "--resolution must be like 1280x720");
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires a value like 1280x720");
                    }
                }
                "--exit-when-script-finished" => opts.exit_when_script_finished = true,
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}

fn parse_resolution(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.split_once('x')?;
    match (w.parse::<u32>(), h.parse::<u32>()) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Some((width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_values() {
        let opts = parse(&[
            "--scripted-input",
            "script.json",
            "--max-frames",
            "120",
            "--resolution",
            "800x600",
            "--exit-when-script-finished",
        ]);
        assert_eq!(opts.scripted_input, Some(PathBuf::from("script.json")));
        assert_eq!(opts.max_frames, Some(120));
        assert_eq!(opts.resolution, Some((800, 600)));
        assert!(opts.exit_when_script_finished);
    }

    #[test]
    fn bad_values_are_dropped() {
        let opts = parse(&["--max-frames", "lots", "--resolution", "0x600", "--fps"]);
        assert_eq!(opts.max_frames, None);
        assert_eq!(opts.resolution, None);
        assert_eq!(opts.fps, None);
    }

    #[test]
    fn resolution_needs_both_sides() {
        assert_eq!(parse_resolution("1280x720"), Some((1280, 720)));
        assert_eq!(parse_resolution("1280"), None);
        assert_eq!(parse_resolution("x720"), None);
    }
}
