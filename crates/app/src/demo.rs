//! Demo scene assembly.

use crate::settings::SceneSettings;
use glam::Vec3;
use raypick_core::TargetId;
use raypick_scene::{Bob, Geometry, ModelDescriptor, Node, SceneGraph};

/// A bobbing, hover-tracked primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Scene node.
    pub id: TargetId,
    /// Rest position; the bob offsets its Y.
    pub base: Vec3,
    /// Bob motion.
    pub bob: Bob,
}

/// Scene plus the handles the session animates and tests against.
#[derive(Debug, Clone)]
pub struct DemoScene {
    /// All nodes.
    pub scene: SceneGraph,
    /// Hover-tracked primitives, in settings order.
    pub primitives: Vec<Primitive>,
    /// Root of the loaded model, once loading succeeded.
    pub model: Option<TargetId>,
}

impl DemoScene {
    /// Build the primitives described by `settings`. No model is attached.
    pub fn build(settings: &SceneSettings) -> Self {
        let mut scene = SceneGraph::new();
        let primitives = settings
            .primitives
            .iter()
            .map(|p| {
                let base = Vec3::new(p.x, 0.0, 0.0);
                let id = scene.add(
                    Node::new(p.label.clone())
                        .with_geometry(&Geometry::octahedron(p.radius))
                        .with_color(settings.idle_color)
                        .with_position(base),
                    None,
                );
                Primitive {
                    id,
                    base,
                    bob: Bob::new(p.speed, settings.bob_amplitude),
                }
            })
            .collect();

        Self {
            scene,
            primitives,
            model: None,
        }
    }

    /// Ids of the hover-tracked primitives.
    pub fn primitive_ids(&self) -> Vec<TargetId> {
        self.primitives.iter().map(|p| p.id).collect()
    }

    /// Move every primitive to its bob height at `elapsed` seconds.
    pub fn animate(&mut self, elapsed: f32) {
        for primitive in &self.primitives {
            let position = primitive.base + Vec3::Y * primitive.bob.height_at(elapsed);
            self.scene.set_position(primitive.id, position);
        }
    }

    /// Insert `model` with its root at `position` and return the root.
    pub fn attach_model(&mut self, model: &ModelDescriptor, position: Vec3) -> TargetId {
        let root = model.instantiate(&mut self.scene, None);
        self.scene.set_position(root, position);
        self.model = Some(root);
        root
    }

    /// Everything a click can land on: primitives, then the model root.
    pub fn clickable_roots(&self) -> Vec<TargetId> {
        let mut roots = self.primitive_ids();
        roots.extend(self.model);
        roots
    }
}
