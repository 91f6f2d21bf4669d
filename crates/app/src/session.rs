//! Frame-driven picking session.
//!
//! Owns the scene, camera, pointer, hover detector, and click router. Nothing
//! here is global: a host creates a session and drives it with `tick` and
//! `handle_click`.

use crate::demo::DemoScene;
use crate::feedback::{apply_highlight, apply_model_scale};
use crate::settings::SceneSettings;
use glam::Vec3;
use raypick_camera::Camera;
use raypick_core::{FrameTick, TargetId};
use raypick_input::PointerState;
use raypick_interaction::{
    screen_to_ray, ClickOutcome, ClickRouter, HoverDetector, HoverEvent, HoverTransition, Ray,
};
use raypick_scene::{ModelDescriptor, ModelLoadError, SceneGraph};
use std::path::Path;
use tracing::{debug, info};

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame that produced this report.
    pub tick: FrameTick,
    /// Seconds since the session started.
    pub elapsed: f32,
    /// Hover edge among the primitives.
    pub transition: HoverTransition<TargetId>,
    /// Primitive nearest to the pointer, if any.
    pub hovered: Option<TargetId>,
    /// Every primitive the pointer ray crosses.
    pub highlighted: Vec<TargetId>,
    /// Whether the pointer ray touches any part of the model.
    pub model_hovered: bool,
}

/// A running picking scene.
pub struct PickingSession {
    settings: SceneSettings,
    demo: DemoScene,
    camera: Camera,
    pointer: PointerState,
    hover: HoverDetector<TargetId>,
    clicks: ClickRouter<TargetId>,
    tick: FrameTick,
}

impl PickingSession {
    /// Build the primitives and camera for a `width` x `height` viewport.
    ///
    /// Each primitive gets a click handler that logs its label.
    pub fn new(settings: SceneSettings, width: u32, height: u32) -> Self {
        let demo = DemoScene::build(&settings);
        let camera = Camera::perspective(
            settings.fov_degrees,
            width,
            height,
            settings.near,
            settings.far,
        )
        .with_position(Vec3::from(settings.camera_position))
        .looking_at(Vec3::from(settings.camera_target));

        let mut session = Self {
            settings,
            demo,
            camera,
            pointer: PointerState::new(width, height),
            hover: HoverDetector::new(),
            clicks: ClickRouter::new(),
            tick: FrameTick::ZERO,
        };
        for id in session.demo.primitive_ids() {
            session.register_logging_handler(id);
        }
        session
    }

    fn register_logging_handler(&mut self, id: TargetId) {
        let label = self.demo.scene.target(id).display_name();
        self.clicks.register(id, move |_: &TargetId| {
            info!(target_label = %label, "clicked {label}");
        });
    }

    /// Load the model file once and attach it to the scene.
    ///
    /// On failure the scene is left untouched; there is no retry.
    pub fn load_model(&mut self, path: &Path) -> Result<TargetId, ModelLoadError> {
        let model = ModelDescriptor::from_file(path)?;
        Ok(self.attach_model(&model))
    }

    /// Attach an already-parsed model and register its click handler.
    pub fn attach_model(&mut self, model: &ModelDescriptor) -> TargetId {
        let root = self
            .demo
            .attach_model(model, Vec3::from(self.settings.model_position));
        self.register_logging_handler(root);
        info!(model = %model.name, nodes = model.node_count(), "model loaded");
        root
    }

    /// Replace the click handler for `target`.
    pub fn on_click(&mut self, target: TargetId, handler: impl FnMut(&TargetId) + 'static) {
        self.clicks.register(target, handler);
    }

    /// Pointer moved, in window pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer.on_cursor_moved(x, y);
    }

    /// Viewport resized; the camera aspect follows on the next frame or click.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.pointer.on_resized(width, height);
    }

    fn sync_viewport(&mut self) {
        if let Some((width, height)) = self.pointer.take_resize() {
            self.camera.set_aspect(width, height);
            debug!(width, height, "viewport resized");
        }
    }

    fn pointer_ray(&self) -> Ray {
        screen_to_ray(
            self.pointer.ndc(),
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(),
        )
    }

    /// Advance one frame at `elapsed` seconds since start.
    pub fn tick(&mut self, elapsed: f32) -> FrameReport {
        self.sync_viewport();
        self.demo.animate(elapsed);

        let ray = self.pointer_ray();
        let primitive_ids = self.demo.primitive_ids();
        let hits = self.demo.scene.intersect_objects(&ray, &primitive_ids, true);

        let highlighted = apply_highlight(
            &mut self.demo.scene,
            &primitive_ids,
            &hits,
            self.settings.idle_color,
            self.settings.hover_color,
        );

        let mut model_hovered = false;
        if let Some(model) = self.demo.model {
            model_hovered = !self.demo.scene.intersect_object(&ray, model, true).is_empty();
            apply_model_scale(
                &mut self.demo.scene,
                model,
                model_hovered,
                self.settings.hover_scale,
            );
        }

        let transition = self.hover.update_hover(&hits);
        for event in transition.clone().into_events() {
            match event {
                HoverEvent::Enter(id) => {
                    info!(frame = self.tick.0, target_label = %self.label(id), "mouse enter");
                }
                HoverEvent::Leave(id) => {
                    info!(frame = self.tick.0, target_label = %self.label(id), "mouse leave");
                }
            }
        }

        let report = FrameReport {
            tick: self.tick,
            elapsed,
            transition,
            hovered: self.hover.hovered().copied(),
            highlighted,
            model_hovered,
        };
        self.tick = self.tick.advance(1);
        report
    }

    /// Resolve a click at the current pointer position.
    ///
    /// The ray test is re-run now against primitives and the model; hover
    /// state is neither read nor changed. Hits on model parts are reported as
    /// the model.
    pub fn handle_click(&mut self) -> Option<ClickOutcome<TargetId>> {
        self.sync_viewport();
        let ray = self.pointer_ray();
        let roots = self.demo.clickable_roots();
        let hits = self.demo.scene.intersect_objects(&ray, &roots, true);
        let outcome = self.clicks.handle_click(&hits, &self.demo.scene);
        if outcome.is_none() {
            debug!(frame = self.tick.0, "click hit nothing");
        }
        outcome
    }

    /// Latch a click at the current pointer position.
    pub fn pointer_clicked(&mut self) {
        self.pointer.on_click();
    }

    /// Resolve every latched click, in arrival order.
    ///
    /// Clicks that hit nothing are dropped from the result.
    pub fn resolve_pending_clicks(&mut self) -> Vec<ClickOutcome<TargetId>> {
        let mut outcomes = Vec::new();
        while self.pointer.take_click() {
            outcomes.extend(self.handle_click());
        }
        outcomes
    }

    /// Label of a scene node, or its id.
    pub fn label(&self, id: TargetId) -> String {
        self.demo.scene.target(id).display_name()
    }

    /// Currently hovered primitive.
    pub fn hovered(&self) -> Option<TargetId> {
        self.hover.hovered().copied()
    }

    /// Primitive ids in settings order.
    pub fn primitive_ids(&self) -> Vec<TargetId> {
        self.demo.primitive_ids()
    }

    /// Loaded model root.
    pub fn model(&self) -> Option<TargetId> {
        self.demo.model
    }

    /// Scene, for inspection.
    pub fn scene(&self) -> &SceneGraph {
        &self.demo.scene
    }

    /// Camera, for inspection.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Next frame to be produced.
    pub fn frame(&self) -> FrameTick {
        self.tick
    }
}
