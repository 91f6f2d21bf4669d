use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedStep {
    duration: f32,
    /// Pointer position in window pixels; omitted axes keep the previous value.
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    click: bool,
    #[serde(default)]
    resize: Option<[u32; 2]>,
}

/// Pointer input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedPointer {
    pub x: f32,
    pub y: f32,
    /// Set on the first frame of a clicking step only.
    pub click: bool,
    /// Set on the first frame of a resizing step only.
    pub resize: Option<(u32, u32)>,
}

/// Plays back a JSON list of timed pointer steps.
///
/// A step shorter than one frame can be skipped entirely, click included.
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    position: (f32, f32),
    fresh: bool,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            position: (0.0, 0.0),
            fresh: true,
            finished: false,
        })
    }

    /// Input for the current frame.
    pub fn poll(&mut self) -> ScriptedPointer {
        let step = &self.steps[self.index];
        if let Some(x) = step.x {
            self.position.0 = x;
        }
        if let Some(y) = step.y {
            self.position.1 = y;
        }
        let fresh = std::mem::take(&mut self.fresh);
        ScriptedPointer {
            x: self.position.0,
            y: self.position.1,
            click: fresh && step.click,
            resize: step.resize.filter(|_| fresh).map(|[w, h]| (w, h)),
        }
    }

    /// Move `dt` seconds through the script.
    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
                self.fresh = true;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }
    }

    /// Whether the last step's duration has fully elapsed.
    pub fn finished(&self) -> bool {
        self.finished
    }
}
