use crate::config::SceneConfig;
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use raypick_app::{FrameClock, FrameReport, PickingSession};
use raypick_core::FrameTick;
use raypick_interaction::HoverEvent;
use raypick_testkit::{EventRecord, JsonlSink};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct HeadlessConfig {
    pub config: SceneConfig,
    pub scripted_input: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub max_frames: Option<u64>,
    pub exit_when_script_finished: bool,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub hover_events: u64,
    pub clicks: u64,
}

/// Event log plus running counts.
struct EventRecorder {
    sink: Option<JsonlSink>,
    summary: RunSummary,
}

impl EventRecorder {
    fn record(&mut self, frame: FrameTick, kind: &str, target: Option<String>) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write(&EventRecord::new(frame, kind, target))?;
        }
        Ok(())
    }

    fn record_frame(&mut self, session: &PickingSession, report: &FrameReport) -> Result<()> {
        for event in report.transition.clone().into_events() {
            let (kind, id) = match event {
                HoverEvent::Enter(id) => ("enter", id),
                HoverEvent::Leave(id) => ("leave", id),
            };
            self.summary.hover_events += 1;
            self.record(report.tick, kind, Some(session.label(id)))?;
        }
        Ok(())
    }
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let HeadlessConfig {
        config,
        scripted_input,
        event_log,
        max_frames,
        exit_when_script_finished,
    } = cfg;

    let mut script = scripted_input
        .as_deref()
        .map(|path| {
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load scripted input {}", path.display()))
        })
        .transpose()?;
    if script.is_none() && max_frames.is_none() {
        warn!("no --scripted-input or --max-frames given; running until interrupted");
    }

    let sink = event_log.as_deref().map(JsonlSink::create).transpose()?;
    let mut recorder = EventRecorder {
        sink,
        summary: RunSummary::default(),
    };

    let mut session = PickingSession::new(config.scene, config.width, config.height);
    if let Some(path) = config.model_path.as_deref() {
        match session.load_model(path) {
            Ok(root) => {
                recorder.record(session.frame(), "model_loaded", Some(session.label(root)))?;
            }
            Err(err) => {
                warn!(%err, path = %path.display(), "Model failed to load; continuing without it");
            }
        }
    }

    let mut clock = FrameClock::from_fps(config.fps);
    loop {
        if max_frames.is_some_and(|max| clock.frames() >= max) {
            break;
        }

        if let Some(pointer) = script.as_mut().map(|player| player.poll()) {
            if let Some((width, height)) = pointer.resize {
                session.resized(width, height);
            }
            session.pointer_moved(pointer.x, pointer.y);
            if pointer.click {
                session.pointer_clicked();
            }
        }

        let report = session.tick(clock.elapsed());
        recorder.record_frame(&session, &report)?;

        for outcome in session.resolve_pending_clicks() {
            recorder.summary.clicks += 1;
            recorder.record(report.tick, "click", Some(session.label(outcome.owner)))?;
        }

        clock.advance();
        if let Some(player) = script.as_mut() {
            player.advance(clock.dt());
            if exit_when_script_finished && player.finished() {
                break;
            }
        }
    }

    if let Some(sink) = recorder.sink.as_mut() {
        sink.flush()?;
    }
    recorder.summary.frames = clock.frames();
    info!(
        frames = recorder.summary.frames,
        hover_events = recorder.summary.hover_events,
        clicks = recorder.summary.clicks,
        "headless run finished"
    );
    Ok(recorder.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raypick_testkit::{read_events, unique_temp_path, write_temp_file};

    fn config_without_model() -> SceneConfig {
        SceneConfig {
            width: 800,
            height: 600,
            fps: 30,
            model_path: None,
            ..SceneConfig::default()
        }
    }

    #[test]
    fn max_frames_bounds_an_unscripted_run() {
        let summary = run(HeadlessConfig {
            config: config_without_model(),
            scripted_input: None,
            event_log: None,
            max_frames: Some(5),
            exit_when_script_finished: false,
        })
        .expect("run succeeds");
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.clicks, 0);
    }

    #[test]
    fn scripted_click_on_centre_primitive_is_logged() {
        let script = write_temp_file(
            "script",
            "json",
            r#"{"steps": [
                {"duration": 0.1, "x": 410, "y": 295, "click": true},
                {"duration": 0.1, "x": 5, "y": 5}
            ]}"#,
        )
        .expect("script written");
        let log = unique_temp_path("events", "jsonl");

        let summary = run(HeadlessConfig {
            config: config_without_model(),
            scripted_input: Some(script),
            event_log: Some(log.clone()),
            max_frames: Some(600),
            exit_when_script_finished: true,
        })
        .expect("run succeeds");
        assert!(summary.frames < 600);
        assert_eq!(summary.clicks, 1);

        let events = read_events(&log).expect("log readable");
        assert_eq!(
            events[0],
            EventRecord::new(FrameTick(0), "enter", Some("sphere 2".into()))
        );
        assert_eq!(
            events[1],
            EventRecord::new(FrameTick(0), "click", Some("sphere 2".into()))
        );
        let last = events.last().expect("events recorded");
        assert_eq!(last.kind, "leave");
        assert_eq!(last.target.as_deref(), Some("sphere 2"));
    }

    #[test]
    fn missing_model_is_not_fatal() {
        let mut config = config_without_model();
        config.model_path = Some(unique_temp_path("absent-model", "json"));
        let summary = run(HeadlessConfig {
            config,
            scripted_input: None,
            event_log: None,
            max_frames: Some(1),
            exit_when_script_finished: false,
        })
        .expect("run continues without model");
        assert_eq!(summary.frames, 1);
    }
}
