//! Hierarchical model files.
//!
//! A model is a JSON tree of named nodes. Loading is a single attempt: the
//! caller gets either a fully inserted subtree or an error, never a partial
//! model in the scene.

use crate::geometry::Geometry;
use crate::graph::{Node, SceneGraph, Transform};
use glam::{Quat, Vec3};
use raypick_core::{Rgb, TargetId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a model.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// Wrap IO failures when reading model files.
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap JSON parsing issues, including malformed colours.
    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),
    /// A mesh node failed validation.
    #[error("invalid mesh in node `{node}`: {reason}")]
    InvalidMesh {
        /// Offending node name.
        node: String,
        /// What was wrong.
        reason: String,
    },
}

/// Top-level model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model name, used as the label of the inserted root.
    pub name: String,
    /// Root of the node tree.
    pub root: NodeDescriptor,
}

/// One node in a model file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node name.
    pub name: String,
    /// Local translation.
    #[serde(default)]
    pub translation: Option<[f32; 3]>,
    /// Local rotation quaternion `[x, y, z, w]`.
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
    /// Local scale.
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
    /// Surface colour.
    #[serde(default)]
    pub color: Option<Rgb>,
    /// Whether back faces are hit-testable.
    #[serde(default)]
    pub double_sided: bool,
    /// Optional shape.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    fn transform(&self) -> Transform {
        let defaults = Transform::default();
        Transform {
            position: self.translation.map(Vec3::from).unwrap_or(defaults.position),
            rotation: self
                .rotation
                .map(|q| Quat::from_array(q).normalize())
                .unwrap_or(defaults.rotation),
            scale: self.scale.map(Vec3::from).unwrap_or(defaults.scale),
        }
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if let Some(Geometry::Mesh(mesh)) = &self.geometry {
            mesh.validate().map_err(|reason| ModelLoadError::InvalidMesh {
                node: self.name.clone(),
                reason,
            })?;
        }
        self.children.iter().try_for_each(NodeDescriptor::validate)
    }

    fn to_node(&self) -> Node {
        let mut node = Node::new(self.name.clone())
            .with_transform(self.transform())
            .with_double_sided(self.double_sided);
        if let Some(color) = self.color {
            node = node.with_color(color);
        }
        if let Some(geometry) = &self.geometry {
            node = node.with_geometry(geometry);
        }
        node
    }
}

impl ModelDescriptor {
    /// Parse and validate a model from JSON text.
    pub fn from_json(input: &str) -> Result<Self, ModelLoadError> {
        let model: ModelDescriptor = serde_json::from_str(input)?;
        model.root.validate()?;
        Ok(model)
    }

    /// Read, parse, and validate a model file.
    pub fn from_file(path: &Path) -> Result<Self, ModelLoadError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Total node count.
    pub fn node_count(&self) -> usize {
        fn count(node: &NodeDescriptor) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Insert the model under `parent` (or at the top level).
    ///
    /// The inserted root is labelled with the model name and returned.
    pub fn instantiate(&self, scene: &mut SceneGraph, parent: Option<TargetId>) -> TargetId {
        let mut root = self.root.to_node();
        root.name = self.name.clone();
        let root_id = scene.add(root, parent);

        let mut stack: Vec<(&NodeDescriptor, TargetId)> =
            self.root.children.iter().rev().map(|c| (c, root_id)).collect();
        while let Some((desc, parent_id)) = stack.pop() {
            let id = scene.add(desc.to_node(), Some(parent_id));
            stack.extend(desc.children.iter().rev().map(|c| (c, id)));
        }

        tracing::debug!(model = %self.name, nodes = self.node_count(), "model instantiated");
        root_id
    }
}

/// Load a model file and insert it into `scene` in one attempt.
pub fn load_model(
    scene: &mut SceneGraph,
    path: &Path,
    parent: Option<TargetId>,
) -> Result<TargetId, ModelLoadError> {
    let model = ModelDescriptor::from_file(path)?;
    Ok(model.instantiate(scene, parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PART_MODEL: &str = r##"{
        "name": "duck",
        "root": {
            "name": "duck-root",
            "translation": [2.0, 0.0, -1.5],
            "children": [
                {
                    "name": "body",
                    "color": "#f2c230",
                    "geometry": {"box": {"size": [1.0, 0.6, 0.8]}},
                    "children": [
                        {"name": "beak", "translation": [0.6, 0.2, 0.0],
                         "geometry": {"box": {"size": [0.2, 0.1, 0.2]}}}
                    ]
                }
            ]
        }
    }"##;

    #[test]
    fn parses_and_counts_nodes() {
        let model = ModelDescriptor::from_json(TWO_PART_MODEL).expect("valid model");
        assert_eq!(model.name, "duck");
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.root.children[0].color, Some(Rgb::new(0xf2, 0xc2, 0x30)));
    }

    #[test]
    fn instantiate_preserves_hierarchy() {
        let model = ModelDescriptor::from_json(TWO_PART_MODEL).expect("valid model");
        let mut scene = SceneGraph::new();
        let root = model.instantiate(&mut scene, None);

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.node(root).map(|n| n.name.as_str()), Some("duck"));
        let descendants = scene.descendants(root);
        assert_eq!(descendants.len(), 2);
        for part in descendants {
            assert_eq!(scene.top_level_owner(part), root);
        }
        let root_pos = scene.node(root).map(|n| n.transform.position);
        assert_eq!(root_pos, Some(Vec3::new(2.0, 0.0, -1.5)));
    }

    #[test]
    fn rejects_bad_mesh() {
        let json = r#"{"name": "bad", "root": {"name": "r",
            "geometry": {"mesh": {"positions": [[0,0,0],[1,0,0]], "indices": [0,1,2]}}}}"#;
        let err = ModelDescriptor::from_json(json).expect_err("mesh index out of range");
        assert!(matches!(err, ModelLoadError::InvalidMesh { ref node, .. } if node == "r"));
    }

    #[test]
    fn rejects_bad_colour() {
        let json = r#"{"name": "bad", "root": {"name": "r", "color": "yellow"}}"#;
        let err = ModelDescriptor::from_json(json).expect_err("colour must be hex");
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut scene = SceneGraph::new();
        let path = std::env::temp_dir().join("raypick-missing-model.json");
        let err = load_model(&mut scene, &path, None).expect_err("file does not exist");
        assert!(matches!(err, ModelLoadError::Io(_)));
        assert!(scene.is_empty());
    }
}
