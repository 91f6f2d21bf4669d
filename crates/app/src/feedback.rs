//! Visual hover feedback written back into the scene.

use raypick_core::{Rgb, TargetId};
use raypick_interaction::Intersection;
use raypick_scene::SceneGraph;

/// Reset `targets` to `idle`, then paint every hit target with `hover`.
///
/// Every intersected target is highlighted, not only the nearest. Returns the
/// highlighted ids in hit order without duplicates.
pub fn apply_highlight(
    scene: &mut SceneGraph,
    targets: &[TargetId],
    hits: &[Intersection<TargetId>],
    idle: Rgb,
    hover: Rgb,
) -> Vec<TargetId> {
    for &target in targets {
        scene.set_color(target, idle);
    }

    let mut highlighted = Vec::with_capacity(hits.len());
    for hit in hits {
        if !highlighted.contains(&hit.target) {
            scene.set_color(hit.target, hover);
            highlighted.push(hit.target);
        }
    }
    highlighted
}

/// Scale the model root up while hovered and back to 1 otherwise.
pub fn apply_model_scale(scene: &mut SceneGraph, model: TargetId, hovered: bool, hover_scale: f32) {
    let scale = if hovered { hover_scale } else { 1.0 };
    scene.set_uniform_scale(model, scale);
}
