#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod color;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use color::{ColorParseError, Rgb};

/// Frame counter advanced once per scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

impl fmt::Display for FrameTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.0)
    }
}

/// Opaque identity of a hit-testable object.
///
/// Two ids compare equal only if they name the same object; the numeric
/// value carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A hit-testable object: identity plus an optional debug label.
///
/// Equality is by identity only, labels are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Stable identity.
    pub id: TargetId,
    /// Human-readable label used in logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Target {
    /// Create an unlabeled target.
    pub fn new(id: TargetId) -> Self {
        Self { id, label: None }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label if present, otherwise the id.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.id.to_string(),
        }
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Target {}
