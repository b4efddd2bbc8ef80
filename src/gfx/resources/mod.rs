//! GPU resource management
//!
//! Materials, textures and the global per-frame uniform bindings shared by
//! every object in a scene.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, Light, Lighting};
pub use material::{Material, MaterialManager};
pub use texture_resource::TextureResource;
