//! Shared scene fixtures for integration tests.

use glam::Vec3;
use raypick_camera::Camera;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// The demo duck model shipped in `assets/models/duck.json`.
pub const DUCK_MODEL_JSON: &str = include_str!("../../../assets/models/duck.json");

/// Window pixel where `point` appears for `camera` in a `width` x `height` viewport.
pub fn world_to_pixel(camera: &Camera, point: Vec3, width: u32, height: u32) -> (f32, f32) {
    let ndc = camera.view_projection_matrix().project_point3(point);
    (
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// A path in the temp dir that no other test run will reuse.
pub fn unique_temp_path(stem: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!(
        "raypick-{stem}-{}-{nanos}.{extension}",
        std::process::id()
    ))
}

/// Write `contents` to a fresh temp file and return its path.
pub fn write_temp_file(stem: &str, extension: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = unique_temp_path(stem, extension);
    std::fs::write(&path, contents)?;
    Ok(path)
}
