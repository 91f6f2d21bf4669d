#![warn(missing_docs)]
//! Pointer picking demo: bobbing primitives plus a loaded model, driven one
//! frame at a time.
//!
//! The host owns scheduling. It calls [`PickingSession::tick`] once per
//! frame and [`PickingSession::handle_click`] whenever a click arrives
//! between frames.

pub mod clock;
pub mod demo;
pub mod feedback;
pub mod session;
pub mod settings;

pub use clock::FrameClock;
pub use demo::{DemoScene, Primitive};
pub use session::{FrameReport, PickingSession};
pub use settings::{PrimitiveSettings, SceneSettings};
