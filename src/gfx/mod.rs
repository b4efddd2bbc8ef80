//! # Graphics Module
//!
//! Everything the renderer is made of: camera system, procedural geometry,
//! the forward rendering pipeline, scene management and GPU resources.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with mouse controls
//! - **Geometry** ([`geometry`]) - Procedural primitives and edge outlines
//! - **Rendering Pipeline** ([`rendering`]) - Forward pass on wgpu
//! - **Scene Management** ([`scene`]) - Objects, transforms, handles
//! - **Resource Management** ([`resources`]) - Materials, textures, uniforms
//!
//! The scene is the seam between the animation core and the GPU: the motion
//! animator mutates object transforms through [`scene::ObjectHandle`]s, the
//! renderer reads them back out during the frame.
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
