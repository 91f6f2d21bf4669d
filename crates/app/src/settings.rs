//! Tunable scene parameters, deserialized from the `[scene]` config table.

use raypick_core::Rgb;
use serde::{Deserialize, Serialize};

/// One bobbing primitive.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrimitiveSettings {
    /// Label used in click/hover logs.
    pub label: String,
    /// X position; primitives sit on the X axis.
    pub x: f32,
    /// Bob angular speed in radians per second.
    pub speed: f32,
    /// Octahedron radius.
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_radius() -> f32 {
    0.5
}

impl PrimitiveSettings {
    fn new(label: &str, x: f32, speed: f32) -> Self {
        Self {
            label: label.to_string(),
            x,
            speed,
            radius: default_radius(),
        }
    }
}

/// Scene layout and hover feedback parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera eye position.
    pub camera_position: [f32; 3],
    /// Point the camera looks at.
    pub camera_target: [f32; 3],
    /// Colour of primitives not under the pointer.
    pub idle_color: Rgb,
    /// Colour of every primitive the pointer ray crosses.
    pub hover_color: Rgb,
    /// Uniform scale applied to the model while hovered.
    pub hover_scale: f32,
    /// Peak bob displacement shared by all primitives.
    pub bob_amplitude: f32,
    /// Where the loaded model's root is placed.
    pub model_position: [f32; 3],
    /// Bobbing primitives, in registration order.
    pub primitives: Vec<PrimitiveSettings>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            camera_position: [0.0, 0.0, 4.0],
            camera_target: [0.0, 0.0, 0.0],
            idle_color: Rgb::GREY,
            hover_color: Rgb::BLUE,
            hover_scale: 1.2,
            bob_amplitude: 1.5,
            model_position: [2.0, 0.0, -1.5],
            primitives: vec![
                PrimitiveSettings::new("sphere 1", -2.0, 1.5),
                PrimitiveSettings::new("sphere 2", 0.0, 2.0),
                PrimitiveSettings::new("sphere 3", 2.0, 3.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_three_primitives() {
        let settings = SceneSettings::default();
        let speeds: Vec<f32> = settings.primitives.iter().map(|p| p.speed).collect();
        assert_eq!(speeds, vec![1.5, 2.0, 3.0]);
        assert_eq!(settings.idle_color.to_string(), "#808080");
        assert_eq!(settings.hover_color.to_string(), "#0000ff");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: SceneSettings =
            toml::from_str("hover_scale = 1.5\nhover_color = \"#ff0000\"\n").expect("valid toml");
        assert_eq!(settings.hover_scale, 1.5);
        assert_eq!(settings.hover_color, Rgb::new(0xff, 0, 0));
        assert_eq!(settings.fov_degrees, 75.0);
        assert_eq!(settings.primitives.len(), 3);
    }

    #[test]
    fn primitive_radius_defaults() {
        let settings: SceneSettings = toml::from_str(
            "[[primitives]]\nlabel = \"only\"\nx = 0.0\nspeed = 1.0\n",
        )
        .expect("valid toml");
        assert_eq!(settings.primitives.len(), 1);
        assert_eq!(settings.primitives[0].radius, 0.5);
    }
}
