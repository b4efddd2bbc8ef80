//! Classroom demo
//!
//! An inside-out room with ceiling and floor covers, a 3x3 grid of chairs
//! instantiated from a glTF model once it finishes loading, a teacher's
//! chair from OBJ/MTL facing the class, and photo textures standing in for
//! the windows and the blackboard.

use std::f32::consts::{FRAC_PI_2, PI};

use maquette::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = maquette::default();
    app.look_from([0.0, 2.0, 10.0], [0.0, 0.0, 0.0]);
    app.app_state.scene.background = [0.0, 0.0, 0.0];

    // Soft ambient fill plus one bulb in the middle of the ceiling
    {
        let lighting = &mut app.app_state.scene.lighting;
        lighting.lights.clear();
        lighting.set_ambient([1.0, 1.0, 1.0], 0.5);
        lighting.add_point([0.0, 5.0, 0.0], [1.0, 1.0, 1.0], 0.8);
    }

    {
        let scene = &mut app.app_state.scene;
        scene.add_material_rgb("walls", 0.37, 0.27, 0.13, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("ceiling", 1.0, 1.0, 1.0, 0.0, 0.9);
        scene.add_material_rgb("floor", 0.27, 0.27, 0.27, 0.0, 0.9);

        let window = scene.add_material_rgb("window_view", 1.0, 1.0, 1.0, 0.0, 1.0);
        window.unlit = true;
        window.texture = Some("window_view".to_string());

        let board = scene.add_material_rgb("board", 1.0, 1.0, 1.0, 0.0, 1.0);
        board.unlit = true;
        board.texture = Some("board".to_string());
    }

    // The room itself, seen from the inside
    app.add_box(10.0, 3.0, 10.0)
        .with_material("walls")
        .with_name("room")
        .inside_out()
        .handle();

    // Thin covers hide the flat-shaded ceiling and floor of the room box
    app.add_box(10.0, 0.01, 10.0)
        .with_material("ceiling")
        .with_name("ceiling")
        .at([0.0, 1.5, 0.0])
        .handle();
    app.add_box(10.0, 0.01, 10.0)
        .with_material("floor")
        .with_name("floor")
        .at([0.0, -1.5, 0.0])
        .handle();

    // Student chairs: 3x3 grid instantiated when the model arrives
    app.load_model("demos/assets/chair.gltf", |scene, _animator, model| {
        let start_x = -2.0;
        let start_z = -2.0;
        let spacing = 2.0;

        for row in 0..3 {
            for col in 0..3 {
                scene
                    .instantiate(model)
                    .with_name(&format!("chair_{}_{}", row, col))
                    .at([
                        start_x + col as f32 * spacing,
                        -1.5,
                        start_z + row as f32 * spacing + 1.0,
                    ])
                    .handle();
            }
        }
    });

    // The teacher's chair faces the students
    app.load_model("demos/assets/chair.obj", |scene, _animator, model| {
        scene
            .instantiate(model)
            .with_name("teachers_chair")
            .at([-3.0, -1.5, -3.5])
            .with_rotation([0.0, PI, 0.0])
            .with_scale(0.1)
            .handle();
    });

    // Window photos on the west wall
    app.load_texture("demos/assets/window_view.png", "window_view");
    app.add_plane(1.2, 1.2, 1, 1)
        .with_material("window_view")
        .with_name("window_1")
        .at([-4.98, 0.0, -2.0])
        .with_rotation([0.0, FRAC_PI_2, 0.0])
        .handle();
    app.add_plane(1.5, 1.2, 1, 1)
        .with_material("window_view")
        .with_name("window_2")
        .at([-4.98, 0.0, 2.0])
        .with_rotation([0.0, FRAC_PI_2, 0.0])
        .handle();

    // Blackboard on the north wall, created once its photo is in
    app.app_state.loader.request_texture_with(
        "demos/assets/board.png",
        "board",
        |scene, _animator| {
            scene
                .add_plane(2.5, 1.3, 1, 1)
                .with_material("board")
                .with_name("board")
                .at([0.0, 0.0, -4.98])
                .handle();
        },
    );

    app.run();
    Ok(())
}
