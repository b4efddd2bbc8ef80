//! # Rendering Module
//!
//! The wgpu forward renderer: surface/device management, pipeline creation
//! and the per-frame draw pass. Two pipelines share one shader: "Forward"
//! for triangle meshes and "Lines" for edge outlines.

pub mod pipeline_manager;
pub mod render_engine;

pub use render_engine::RenderEngine;
