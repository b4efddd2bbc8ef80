//! Aquarium demo
//!
//! A seabed plane, twenty bubbles drifting upward (wrapping back to the
//! bottom), and four fish loaded from OBJ swimming in circles at different
//! radii and speeds, facing along their paths.

use std::f32::consts::FRAC_PI_2;

use maquette::prelude::*;
use rand::Rng;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = maquette::default();
    app.look_from([0.0, 5.0, 20.0], [0.0, 2.0, 0.0]);
    app.app_state.scene.background = [0.0, 0.02, 0.05];

    {
        let lighting = &mut app.app_state.scene.lighting;
        lighting.lights.clear();
        lighting.set_ambient([0.25, 0.25, 0.25], 2.0);
        lighting.add_directional([-10.0, -10.0, -10.0], [1.0, 1.0, 1.0], 1.5);
    }

    {
        let scene = &mut app.app_state.scene;
        scene.add_material_rgb("seabed", 0.13, 0.55, 0.13, 0.0, 0.9);
        scene.add_material_rgb("bubble", 1.0, 1.0, 1.0, 0.0, 0.3);
        scene.add_material_rgb("rock", 0.45, 0.40, 0.35, 0.0, 1.0);
    }

    // Seabed
    app.add_plane(50.0, 50.0, 1, 1)
        .with_material("seabed")
        .with_name("seabed")
        .with_rotation([-FRAC_PI_2, 0.0, 0.0])
        .handle();

    // A few rock columns for the fish to circle past
    for (i, (x, z, height)) in [(-9.0, -6.0, 3.0), (10.0, 4.0, 4.5), (-3.0, 9.0, 2.0)]
        .iter()
        .enumerate()
    {
        app.add_cylinder(0.8, *height, 12)
            .with_material("rock")
            .with_name(&format!("rock_{}", i))
            .at([*x, *height / 2.0, *z])
            .handle();
    }

    // Bubbles rise and wrap back to the bottom
    let mut rng = rand::rng();
    for i in 0..20 {
        let bubble = app
            .add_sphere(0.1, 16, 16)
            .with_material("bubble")
            .with_name(&format!("bubble_{}", i))
            .at([
                rng.random_range(-5.0..5.0),
                rng.random_range(0.0..10.0),
                rng.random_range(-5.0..5.0),
            ])
            .handle();
        app.track(bubble, MotionProfile::ascending(0.05, 10.0, 0.0));
    }

    // Fish circle the tank at staggered radii, phases and speeds
    let fish_profiles = [
        (5.0_f32, 0.030_f32, 0.0_f32, 1.0_f32),
        (6.5, 0.022, 1.6, 2.0),
        (8.0, 0.015, 3.1, 2.5),
        (4.0, 0.040, 4.7, 1.5),
    ];
    app.load_model("demos/assets/fish.obj", move |scene, animator, model| {
        for (i, (radius, speed, phase, height)) in fish_profiles.iter().enumerate() {
            let handle = scene
                .instantiate(model)
                .with_name(&format!("fish_{}", i))
                .at([*radius, *height, 0.0])
                .with_scale(0.5)
                .handle();
            animator.track(
                handle,
                MotionProfile::circular_from(*radius, *speed, *phase),
            );
        }
    });

    app.run();
    Ok(())
}
