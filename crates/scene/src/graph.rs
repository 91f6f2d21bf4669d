//! Scene graph: named nodes with transforms, materials, and optional geometry.
//!
//! Nodes live in a flat arena indexed by [`TargetId`]. Parent/child links form
//! a forest; top-level nodes are the logical objects a user interacts with
//! (a primitive, or the root of a loaded model).

use crate::geometry::{Geometry, TriangleMesh};
use glam::{Mat4, Quat, Vec3};
use raypick_core::{Rgb, Target, TargetId};
use raypick_interaction::{
    intersect_triangle, sort_nearest_first, Aabb, Intersection, OwnerResolver, Ray,
};

/// Local transform: scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base colour.
    pub color: Rgb,
    /// Hit both faces of each triangle instead of only the front.
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            double_sided: false,
        }
    }
}

/// A scene node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug label.
    pub name: String,
    /// Local transform.
    pub transform: Transform,
    /// Appearance; ignored for nodes without geometry.
    pub material: Material,
    mesh: Option<TriangleMesh>,
    parent: Option<TargetId>,
    children: Vec<TargetId>,
}

impl Node {
    /// Create an empty group node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            material: Material::default(),
            mesh: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attach geometry, making the node hit-testable.
    pub fn with_geometry(mut self, geometry: &Geometry) -> Self {
        self.mesh = Some(geometry.to_mesh());
        self
    }

    /// Set the base colour.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.material.color = color;
        self
    }

    /// Set the local position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Replace the whole local transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set whether back faces are hit-testable.
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.material.double_sided = double_sided;
        self
    }

    /// Parent node, `None` for top-level nodes.
    pub fn parent(&self) -> Option<TargetId> {
        self.parent
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[TargetId] {
        &self.children
    }

    /// Whether the node carries geometry.
    pub fn has_geometry(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Arena of nodes forming a forest.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or at the top level) and return its id.
    ///
    /// An unknown parent id inserts the node at the top level.
    pub fn add(&mut self, mut node: Node, parent: Option<TargetId>) -> TargetId {
        let id = TargetId(self.nodes.len() as u32);
        node.parent = parent.filter(|p| self.contains(*p));
        node.children.clear();
        if let Some(parent) = node.parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    /// Whether `id` names a node in this scene.
    pub fn contains(&self, id: TargetId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn node(&self, id: TargetId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Look up a node mutably.
    pub fn node_mut(&mut self, id: TargetId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Labelled target handle for `id`.
    pub fn target(&self, id: TargetId) -> Target {
        match self.node(id) {
            Some(node) => Target::new(id).with_label(node.name.clone()),
            None => Target::new(id),
        }
    }

    /// Ids of all top-level nodes.
    pub fn roots(&self) -> Vec<TargetId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(i, _)| TargetId(i as u32))
            .collect()
    }

    /// Set a node's local position. Unknown ids are ignored.
    pub fn set_position(&mut self, id: TargetId, position: Vec3) {
        if let Some(node) = self.node_mut(id) {
            node.transform.position = position;
        }
    }

    /// Set a node's uniform scale. Unknown ids are ignored.
    pub fn set_uniform_scale(&mut self, id: TargetId, scale: f32) {
        if let Some(node) = self.node_mut(id) {
            node.transform.scale = Vec3::splat(scale);
        }
    }

    /// Set a node's colour. Unknown ids are ignored.
    pub fn set_color(&mut self, id: TargetId, color: Rgb) {
        if let Some(node) = self.node_mut(id) {
            node.material.color = color;
        }
    }

    /// Local-to-world matrix of a node.
    pub fn world_matrix(&self, id: TargetId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = self.node(id);
        while let Some(node) = cursor {
            matrix = node.transform.matrix() * matrix;
            cursor = node.parent.and_then(|parent| self.node(parent));
        }
        matrix
    }

    /// Every node below `id`, depth first, excluding `id` itself.
    pub fn descendants(&self, id: TargetId) -> Vec<TargetId> {
        let mut out = Vec::new();
        let mut stack: Vec<TargetId> = self
            .node(id)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.node(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: TargetId, id: TargetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).and_then(|node| node.parent);
        }
        false
    }

    /// Closest front-facing hit on a single node's own geometry.
    fn intersect_node(&self, ray: &Ray, id: TargetId) -> Option<Intersection<TargetId>> {
        let node = self.node(id)?;
        let mesh = node.mesh.as_ref()?;
        let world = self.world_matrix(id);

        let world_positions: Vec<Vec3> = mesh
            .positions
            .iter()
            .map(|p| world.transform_point3(Vec3::from(*p)))
            .collect();

        // Cheap reject before the per-triangle loop.
        let bounds = Aabb::from_points(world_positions.iter().copied())?;
        bounds.ray_intersection(ray)?;

        let cull = !node.material.double_sided;
        let closest = mesh
            .indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let a = *world_positions.get(tri[0] as usize)?;
                let b = *world_positions.get(tri[1] as usize)?;
                let c = *world_positions.get(tri[2] as usize)?;
                intersect_triangle(ray, a, b, c, cull)
            })
            .min_by(f32::total_cmp)?;

        Some(Intersection::new(id, closest, ray.at(closest)))
    }

    /// Intersect one object, optionally including all of its descendants.
    ///
    /// Results are sorted nearest first.
    pub fn intersect_object(
        &self,
        ray: &Ray,
        id: TargetId,
        recursive: bool,
    ) -> Vec<Intersection<TargetId>> {
        self.intersect_objects(ray, &[id], recursive)
    }

    /// Intersect a set of objects. Results are sorted nearest first.
    pub fn intersect_objects(
        &self,
        ray: &Ray,
        ids: &[TargetId],
        recursive: bool,
    ) -> Vec<Intersection<TargetId>> {
        let mut hits = Vec::new();
        for &id in ids {
            hits.extend(self.intersect_node(ray, id));
            if recursive {
                hits.extend(
                    self.descendants(id)
                        .into_iter()
                        .filter_map(|child| self.intersect_node(ray, child)),
                );
            }
        }
        sort_nearest_first(&mut hits);
        hits
    }

    /// Top-level ancestor of `hit_part`; unknown ids map to themselves.
    pub fn top_level_owner(&self, hit_part: TargetId) -> TargetId {
        let mut current = hit_part;
        while let Some(parent) = self.node(current).and_then(|node| node.parent) {
            current = parent;
        }
        current
    }
}

impl OwnerResolver<TargetId> for SceneGraph {
    fn resolve_logical_owner(&self, hit_part: &TargetId) -> TargetId {
        self.top_level_owner(*hit_part)
    }
}
