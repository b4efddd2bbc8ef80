//! Widget wiring demo
//!
//! A single cube with a custom control panel: position and rotation sliders,
//! a color picker, a visibility toggle and a spin button. The spin is a
//! zero-radius circular profile: the object stays at the origin while its
//! heading advances every tick.

use imgui::Condition;
use maquette::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = maquette::default();
    app.look_from([1.0, 0.0, 3.0], [0.0, 0.0, 0.0]);

    app.app_state
        .scene
        .add_material_rgb("box_red", 1.0, 0.0, 0.0, 0.0, 0.8);

    let cube = app
        .add_cube()
        .with_material("box_red")
        .with_name("box")
        .handle();

    let mut spin_registered = false;
    app.set_ui(move |ui, scene, animator, _selected| {
        ui.window("Box Controls")
            .size([340.0, 280.0], Condition::FirstUseEver)
            .position([20.0, 20.0], Condition::FirstUseEver)
            .build(|| {
                if let Some(object) = scene.object_mut(cube) {
                    ui.slider("Position Y", -3.0, 3.0, &mut object.transform.position.y);
                    ui.slider("Rotation Z", -3.0, 3.0, &mut object.transform.rotation.z);
                    ui.checkbox("Visible?", &mut object.visible);
                }

                if let Some(material) = scene.material_manager.get_material_mut("box_red") {
                    ui.color_edit4("Select Color", &mut material.base_color);
                }

                ui.separator();
                let label = if !spin_registered {
                    "Start Spin"
                } else if animator.is_running() {
                    "Pause Spin"
                } else {
                    "Resume Spin"
                };
                if ui.button(label) {
                    if spin_registered {
                        let running = animator.is_running();
                        animator.set_running(!running);
                    } else {
                        animator.track(cube, MotionProfile::circular(0.0, 0.1));
                        spin_registered = true;
                    }
                }
            });
    });

    app.run();
    Ok(())
}
