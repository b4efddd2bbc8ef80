//! # Maquette Prelude
//!
//! One-stop import for typical applications:
//!
//! ```rust
//! use maquette::prelude::*;
//! ```

// Re-export core application types
pub use crate::app::MaquetteApp;
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraManager, OrbitCamera};
pub use crate::gfx::geometry::{
    generate_box, generate_cube, generate_cylinder, generate_plane, generate_sphere, GeometryData,
};
pub use crate::gfx::resources::{Light, Lighting, Material};
pub use crate::gfx::scene::{ObjectHandle, Scene};

// Re-export the animation core
pub use crate::animation::{MotionAnimator, MotionProfile, OscillationAxis};

// Re-export asset loading
pub use crate::assets::{AssetLoader, ModelData};

// Re-export UI types and panels
pub use crate::ui::{animation_panel, default_scene_panel};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
pub use imgui::Ui;
