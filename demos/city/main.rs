//! City blocks demo
//!
//! A grass slab crossed by two roads, six box buildings with black edge
//! outlines (one stacked pair), and two spheres endlessly sweeping across
//! the lot. Drag to orbit, scroll to zoom, shift-drag to pan.

use maquette::prelude::*;

const GROUND_SIZE: f32 = 100.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = maquette::default();
    app.look_from([30.0, 30.0, 30.0], [0.0, 0.0, 0.0]);
    app.app_state.scene.background = [0.0, 0.0, 0.0];

    // Flat-colored materials for the cardboard-model look
    {
        let scene = &mut app.app_state.scene;
        scene.add_material_rgb("grass", 0.0, 1.0, 0.0, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("road", 0.33, 0.33, 0.33, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("building_white", 1.0, 1.0, 1.0, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("building_blue", 0.0, 0.0, 1.0, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("building_steel", 0.0, 0.4, 0.8, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("building_gray", 0.50, 0.50, 0.50, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("building_gray_light", 0.56, 0.56, 0.56, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("sphere_red", 1.0, 0.0, 0.0, 0.0, 1.0).unlit = true;
        scene.add_material_rgb("sphere_yellow", 1.0, 0.94, 0.0, 0.0, 1.0).unlit = true;
    }

    // Grass slab with thickness, top face at y = 0
    app.add_box(GROUND_SIZE, 1.0, GROUND_SIZE)
        .with_material("grass")
        .with_name("grass")
        .at([0.0, -0.5, 0.0])
        .handle();

    // Crossing roads, laid flat just above the grass
    app.add_plane(10.0, GROUND_SIZE, 1, 1)
        .with_material("road")
        .with_name("road_ns")
        .at([0.0, 0.01, 0.0])
        .with_rotation([-std::f32::consts::FRAC_PI_2, 0.0, 0.0])
        .handle();
    app.add_plane(GROUND_SIZE, 10.0, 1, 1)
        .with_material("road")
        .with_name("road_ew")
        .at([0.0, 0.01, 0.0])
        .with_rotation([-std::f32::consts::FRAC_PI_2, 0.0, 0.0])
        .handle();

    // Outlined buildings
    let black = [0.0, 0.0, 0.0];
    app.add_box(10.0, 10.0, 10.0)
        .with_material("building_white")
        .with_name("building_1")
        .at([-15.0, 5.0, -15.0])
        .with_edges(black)
        .handle();
    app.add_box(10.0, 10.0, 20.0)
        .with_material("building_white")
        .with_name("building_2")
        .at([15.0, 5.0, -20.0])
        .with_edges(black)
        .handle();
    app.add_box(20.0, 10.0, 10.0)
        .with_material("building_blue")
        .with_name("building_3")
        .at([20.0, 5.0, 15.0])
        .with_edges(black)
        .handle();

    // Stacked pair
    app.add_box(12.0, 8.0, 15.0)
        .with_material("building_gray")
        .with_name("building_4")
        .at([-15.0, 4.0, 20.0])
        .with_edges(black)
        .handle();
    app.add_box(12.0, 8.0, 15.0)
        .with_material("building_gray_light")
        .with_name("building_5")
        .at([-15.0, 12.0, 20.0])
        .with_edges(black)
        .handle();

    app.add_box(12.0, 8.0, 10.0)
        .with_material("building_steel")
        .with_name("building_6")
        .at([17.0, 4.0, 27.0])
        .with_edges(black)
        .handle();

    // Two spheres sweeping across the lot, one per axis
    let red_sphere = app
        .add_sphere(2.0, 32, 32)
        .with_material("sphere_red")
        .with_name("sweeper_x")
        .at([-20.0, 2.0, 0.0])
        .handle();
    app.track(
        red_sphere,
        MotionProfile::oscillating(OscillationAxis::X, 0.2, 0.63),
    );

    let yellow_sphere = app
        .add_sphere(2.0, 32, 32)
        .with_material("sphere_yellow")
        .with_name("sweeper_z")
        .at([0.0, 2.0, -20.0])
        .handle();
    app.track(
        yellow_sphere,
        MotionProfile::oscillating_cosine(OscillationAxis::Z, 0.2, 0.63),
    );

    app.run();
    Ok(())
}
