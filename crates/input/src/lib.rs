#![warn(missing_docs)]
//! Pointer input: cursor position in normalized device coordinates plus click latching.

use glam::Vec2;

/// Pointer state tracked across frames.
///
/// Cursor positions arrive in window pixels and are stored as normalized
/// device coordinates (`-1..1`, y up). Clicks are latched until
/// [`PointerState::take_click`] consumes them.
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Viewport size in pixels.
    viewport: (u32, u32),
    /// Last cursor position in pixels, if the cursor has moved at all.
    cursor_px: Option<(f32, f32)>,
    /// Cursor position in NDC.
    ndc: Vec2,
    /// Clicks received since the last `take_click`.
    pending_clicks: u32,
    /// Set when the viewport changed since the last `take_resize`.
    resized: bool,
}

impl PointerState {
    /// Create pointer state for a viewport. The pointer starts at the screen centre.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width.max(1), height.max(1)),
            cursor_px: None,
            ndc: Vec2::ZERO,
            pending_clicks: 0,
            resized: false,
        }
    }

    /// Record a cursor move in window pixels.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor_px = Some((x, y));
        self.ndc = pixels_to_ndc(x, y, self.viewport);
    }

    /// Record a click at the current cursor position.
    pub fn on_click(&mut self) {
        self.pending_clicks = self.pending_clicks.saturating_add(1);
    }

    /// Record a viewport resize; recomputes NDC from the last pixel position.
    pub fn on_resized(&mut self, width: u32, height: u32) {
        let viewport = (width.max(1), height.max(1));
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.resized = true;
        if let Some((x, y)) = self.cursor_px {
            self.ndc = pixels_to_ndc(x, y, viewport);
        }
    }

    /// Cursor in normalized device coordinates.
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    /// Current viewport size in pixels.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Consume one pending click, if any.
    pub fn take_click(&mut self) -> bool {
        if self.pending_clicks == 0 {
            return false;
        }
        self.pending_clicks -= 1;
        true
    }

    /// Consume the resize flag, returning the new viewport when it changed.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        if std::mem::take(&mut self.resized) {
            Some(self.viewport)
        } else {
            None
        }
    }
}

/// Convert window pixels (origin top-left, y down) to NDC (origin centre, y up).
pub fn pixels_to_ndc(x: f32, y: f32, viewport: (u32, u32)) -> Vec2 {
    let width = viewport.0.max(1) as f32;
    let height = viewport.1.max(1) as f32;
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}
