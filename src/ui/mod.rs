//! # User Interface Module
//!
//! Dear ImGui overlay for the engine: input capture, frame management and
//! the built-in panels (scene object editor, animation controls).
//!
//! The UI runs in two phases per frame: `UiManager::update_logic` builds the
//! widgets (and may mutate the scene/animator), then after the 3D pass
//! `UiManager::render_display_only` draws the overlay. Input events that
//! imgui captures never reach the camera controller.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{animation_panel, default_scene_panel};
