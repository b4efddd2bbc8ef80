//! # Scene Management Module
//!
//! The scene owns everything the renderer draws: objects, materials, lights
//! and the camera. Objects are created through the builder methods on
//! [`Scene`] (procedural primitives) or by instantiating loaded model data.
//!
//! Handles returned from the builders ([`ObjectHandle`]) are what the motion
//! animator tracks; the scene keeps ownership of the objects themselves.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawMesh, Mesh, MeshTopology, Object, Transform};
pub use scene::{ObjectBuilder, ObjectHandle, Scene};
pub use vertex::Vertex3D;
