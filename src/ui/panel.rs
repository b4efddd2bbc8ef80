// src/ui/panel.rs
//! Built-in UI panels
//!
//! The scene panel selects objects and edits their transform, material color
//! and visibility; the animation panel controls the motion animator.

use std::f32::consts::PI;

use crate::animation::MotionAnimator;
use crate::gfx::scene::Scene;

/// Object list and transform editor
///
/// # Arguments
/// * `ui` - ImGui frame
/// * `scene` - Scene whose objects are edited
/// * `selected_index` - Currently selected object index, mutated on click
pub fn default_scene_panel(ui: &imgui::Ui, scene: &mut Scene, selected_index: &mut Option<usize>) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Scene")
        .size([360.0, 480.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            let object_names = scene.get_object_names();

            ui.text(format!("Objects: {}", object_names.len()));
            ui.separator();

            ui.child_window("object_list")
                .size([0.0, 140.0])
                .build(|| {
                    for (i, object_name) in object_names.iter().enumerate() {
                        let is_selected = *selected_index == Some(i);
                        if ui
                            .selectable_config(object_name)
                            .selected(is_selected)
                            .build()
                        {
                            *selected_index = Some(i);
                        }
                    }
                });

            ui.separator();

            let Some(index) = *selected_index else {
                ui.text_disabled("Select an object to edit it");
                return;
            };

            // Material edit needs the id before the object borrow ends
            let material_id = scene
                .get_object(index)
                .and_then(|object| object.material_id.clone());

            if let Some(object) = scene.get_object_mut(index) {
                ui.text(format!("Selected: {}", object.name));
                ui.spacing();

                if ui.collapsing_header("Position", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                    ui.slider("X##pos", -25.0, 25.0, &mut object.transform.position.x);
                    ui.slider("Y##pos", -25.0, 25.0, &mut object.transform.position.y);
                    ui.slider("Z##pos", -25.0, 25.0, &mut object.transform.position.z);
                }

                if ui.collapsing_header("Rotation", imgui::TreeNodeFlags::empty()) {
                    ui.slider("X##rot", -PI, PI, &mut object.transform.rotation.x);
                    ui.slider("Y##rot", -PI, PI, &mut object.transform.rotation.y);
                    ui.slider("Z##rot", -PI, PI, &mut object.transform.rotation.z);
                }

                if ui.collapsing_header("Scale", imgui::TreeNodeFlags::empty()) {
                    ui.slider("X##scale", 0.05, 5.0, &mut object.transform.scale.x);
                    ui.slider("Y##scale", 0.05, 5.0, &mut object.transform.scale.y);
                    ui.slider("Z##scale", 0.05, 5.0, &mut object.transform.scale.z);
                }

                ui.checkbox("Visible", &mut object.visible);
            }

            if let Some(material_id) = material_id {
                if let Some(material) = scene.material_manager.get_material_mut(&material_id) {
                    ui.spacing();
                    ui.text(format!("Material: {}", material.name));
                    ui.color_edit4("Color", &mut material.base_color);
                }
            }
        });
}

/// Motion animator controls: play/pause and the registry listing
pub fn animation_panel(ui: &imgui::Ui, animator: &mut MotionAnimator, clock: f32) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = 300.0;
    let panel_x = display_size[0] - panel_width - 20.0;

    ui.window("Animation")
        .size([panel_width, 220.0], imgui::Condition::FirstUseEver)
        .position([panel_x, 20.0], imgui::Condition::FirstUseEver)
        .build(|| {
            let label = if animator.is_running() {
                "Pause"
            } else {
                "Play"
            };
            if ui.button(label) {
                let running = animator.is_running();
                animator.set_running(!running);
            }
            ui.same_line();
            ui.text(format!("clock: {:.2}s", clock));

            ui.separator();
            ui.text(format!("Tracked objects: {}", animator.len()));

            for (i, entry) in animator.entries().iter().enumerate() {
                ui.text(format!(
                    "#{} object {} - {}",
                    i,
                    entry.target.index(),
                    entry.profile.kind_name()
                ));
            }
        });
}
