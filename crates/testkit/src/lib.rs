#![warn(missing_docs)]
//! Test surfaces: newline-delimited JSON event logs and scene fixtures.

mod fixtures;

use anyhow::{Context, Result};
use raypick_core::FrameTick;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use fixtures::*;

/// Interaction event captured by headless runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Frame when the event occurred.
    pub frame: FrameTick,
    /// Event kind (`enter`, `leave`, `click`, `model_loaded`, ...).
    pub kind: String,
    /// Label of the target involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl EventRecord {
    /// Build a record.
    pub fn new(frame: FrameTick, kind: impl Into<String>, target: Option<String>) -> Self {
        Self {
            frame,
            kind: kind.into(),
            target,
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered events to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every record from a JSONL event log. Blank lines are skipped.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}: bad record on line {}", path.display(), i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_log_roundtrips_through_disk() {
        let path = unique_temp_path("eventlog", "jsonl");
        let records = vec![
            EventRecord::new(FrameTick(0), "enter", Some("sphere 2".into())),
            EventRecord::new(FrameTick(4), "click", None),
        ];

        let mut sink = JsonlSink::create(&path).expect("sink create");
        for record in &records {
            sink.write(record).expect("write succeeds");
        }
        sink.flush().expect("flush succeeds");

        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
        assert!(!contents.lines().nth(1).unwrap_or_default().contains("target"));
        assert_eq!(read_events(&path).expect("log parses"), records);
    }

    #[test]
    fn read_events_reports_bad_lines() {
        let path = unique_temp_path("badlog", "jsonl");
        fs::write(&path, "{\"frame\":0,\"kind\":\"enter\"}\nnot json\n").expect("write");
        let err = read_events(&path).expect_err("second line is invalid");
        assert!(format!("{err:#}").contains("line 2"));
    }
}
