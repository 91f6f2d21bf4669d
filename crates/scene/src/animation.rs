//! Time-driven vertical bobbing.

use serde::{Deserialize, Serialize};

/// Sine-wave bob along the Y axis: `y = sin(elapsed * speed) * amplitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bob {
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Peak displacement.
    pub amplitude: f32,
}

impl Bob {
    /// Create a bob.
    pub fn new(speed: f32, amplitude: f32) -> Self {
        Self { speed, amplitude }
    }

    /// Height at `elapsed` seconds.
    pub fn height_at(&self, elapsed: f32) -> f32 {
        (elapsed * self.speed).sin() * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn starts_at_rest() {
        assert_eq!(Bob::new(1.5, 1.5).height_at(0.0), 0.0);
    }

    #[test]
    fn peaks_at_quarter_period() {
        let bob = Bob::new(2.0, 1.5);
        let quarter = PI / 2.0 / bob.speed;
        assert!((bob.height_at(quarter) - 1.5).abs() < 1e-5);
        assert!((bob.height_at(3.0 * quarter) + 1.5).abs() < 1e-5);
    }
}
