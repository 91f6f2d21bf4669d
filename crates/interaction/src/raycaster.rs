//! Ray casting primitives - build pointer rays and test them against geometry.

use glam::{Mat4, Vec2, Vec3};
use std::cmp::Ordering;

const EPSILON: f32 = 1e-7;

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A ray hit against some target.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<T> {
    /// What was hit.
    pub target: T,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl<T> Intersection<T> {
    /// Create an intersection record.
    pub fn new(target: T, distance: f32, point: Vec3) -> Self {
        Self {
            target,
            distance,
            point,
        }
    }

    /// Replace the target, keeping distance and point.
    pub fn map_target<U>(self, f: impl FnOnce(T) -> U) -> Intersection<U> {
        Intersection {
            target: f(self.target),
            distance: self.distance,
            point: self.point,
        }
    }
}

fn by_distance<T>(a: &Intersection<T>, b: &Intersection<T>) -> Ordering {
    a.distance.total_cmp(&b.distance)
}

/// Sort intersections nearest first. Equal distances keep their input order.
pub fn sort_nearest_first<T>(intersections: &mut [Intersection<T>]) {
    intersections.sort_by(by_distance);
}

/// Nearest intersection regardless of input order.
///
/// Ties resolve to the earliest element, which matches "sort then take
/// index 0" for an already-sorted input.
pub fn nearest<T>(intersections: &[Intersection<T>]) -> Option<&Intersection<T>> {
    intersections.iter().min_by(|a, b| by_distance(a, b))
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from center position and size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Test if a ray intersects this AABB.
    /// Returns distance to intersection point if hit.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = ray.direction.recip();

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Box entirely behind the ray origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        // Origin inside the box
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// Ray/triangle test (Möller–Trumbore).
///
/// Triangles are counter-clockwise when seen from their front side. With
/// `cull_back_faces` set, hits on the back side are ignored. Returns the
/// distance along the ray.
pub fn intersect_triangle(
    ray: &Ray,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    cull_back_faces: bool,
) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let pvec = ray.direction.cross(edge2);
    let det = edge1.dot(pvec);

    if cull_back_faces {
        if det < EPSILON {
            return None;
        }
    } else if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < 0.0 {
        return None;
    }

    Some(t)
}

/// Build a world-space ray through a point given in normalized device
/// coordinates (`-1..1`, y up).
///
/// The ray starts at the camera position, so hit distances are measured
/// from the eye.
pub fn screen_to_ray(ndc: Vec2, view_matrix: &Mat4, projection_matrix: &Mat4) -> Ray {
    let inv_view = view_matrix.inverse();
    let inv_view_proj = (*projection_matrix * *view_matrix).inverse();

    let origin = inv_view.transform_point3(Vec3::ZERO);
    let far_point = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

    Ray::new(origin, far_point - origin)
}
