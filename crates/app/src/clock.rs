//! Fixed-step frame clock.

/// Accumulates elapsed time in fixed steps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    elapsed: f32,
    frames: u64,
}

impl FrameClock {
    /// Clock advancing `1 / fps` seconds per frame. `fps` of zero is treated as one.
    pub fn from_fps(fps: u32) -> Self {
        Self::with_step(1.0 / fps.max(1) as f32)
    }

    /// Clock advancing `dt` seconds per frame.
    pub fn with_step(dt: f32) -> Self {
        Self {
            dt,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Step length in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds since the first frame.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames advanced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame and return the new elapsed time.
    ///
    /// Elapsed is recomputed from the frame count so it does not drift.
    pub fn advance(&mut self) -> f32 {
        self.frames += 1;
        self.elapsed = self.frames as f32 * self.dt;
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_in_fixed_steps() {
        let mut clock = FrameClock::from_fps(60);
        assert_eq!(clock.elapsed(), 0.0);
        for _ in 0..60 {
            clock.advance();
        }
        assert_eq!(clock.frames(), 60);
        assert!((clock.elapsed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        let clock = FrameClock::from_fps(0);
        assert_eq!(clock.dt(), 1.0);
    }
}
