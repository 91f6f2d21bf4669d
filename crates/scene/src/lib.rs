#![warn(missing_docs)]
//! Scene graph with ray-castable meshes and hierarchical models.

pub mod animation;
pub mod geometry;
pub mod graph;
pub mod model;

pub use animation::Bob;
pub use geometry::{Geometry, TriangleMesh};
pub use graph::{Material, Node, SceneGraph, Transform};
pub use model::{load_model, ModelDescriptor, ModelLoadError, NodeDescriptor};
