//! The per-frame motion animator
//!
//! Owns the registry of tracked objects and advances every entry once per
//! rendered frame. Entries are appended by scene setup code and by
//! asset-load completion callbacks; they are never removed.

use std::f32::consts::TAU;

use crate::gfx::scene::{ObjectHandle, Scene};

use super::profile::{MotionProfile, OscillationAxis};

/// One registry entry: which object moves and how
pub struct TrackEntry {
    pub target: ObjectHandle,
    pub profile: MotionProfile,
}

/// Registry of moving objects, advanced once per frame
///
/// Update order is insertion order. Entries mutate their target's transform
/// in place through the scene; the animator itself holds no references into
/// the scene, only handles, so appends between ticks are always safe.
pub struct MotionAnimator {
    entries: Vec<TrackEntry>,
    running: bool,
}

impl MotionAnimator {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            running: true,
        }
    }

    /// Registers an object for animation
    ///
    /// The same handle may be tracked more than once; every entry is applied
    /// each tick, in registration order.
    pub fn track(&mut self, target: ObjectHandle, profile: MotionProfile) {
        self.entries.push(TrackEntry { target, profile });
    }

    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advances every tracked object by one tick
    ///
    /// `clock` is the animation clock in seconds, supplied by the host loop;
    /// only oscillating profiles read it. Circular angles step by a fixed
    /// amount per tick, so motion speed is tied to the frame rate of the
    /// host loop rather than to wall time.
    pub fn advance(&mut self, clock: f32, scene: &mut Scene) {
        for entry in &mut self.entries {
            let Some(object) = scene.object_mut(entry.target) else {
                continue;
            };

            match &mut entry.profile {
                MotionProfile::Circular {
                    radius,
                    angular_speed,
                    angle,
                } => {
                    *angle = (*angle + *angular_speed).rem_euclid(TAU);
                    object.transform.position.x = *radius * angle.cos();
                    object.transform.position.z = *radius * angle.sin();

                    // Face along the direction of travel; -angle brought back
                    // into [0, 2π)
                    let mut heading = -*angle;
                    if heading < 0.0 {
                        heading += TAU;
                    }
                    object.transform.rotation.y = heading;
                }
                MotionProfile::Oscillating {
                    axis,
                    amplitude,
                    frequency,
                    cosine_phase,
                } => {
                    let phase = clock * *frequency;
                    let wave = if *cosine_phase {
                        phase.cos()
                    } else {
                        phase.sin()
                    };
                    let step = *amplitude * wave;
                    match axis {
                        OscillationAxis::X => object.transform.position.x += step,
                        OscillationAxis::Z => object.transform.position.z += step,
                    }
                }
                MotionProfile::Ascending {
                    speed,
                    ceiling,
                    floor,
                } => {
                    object.transform.position.y += *speed;
                    if object.transform.position.y > *ceiling {
                        object.transform.position.y = *floor;
                    }
                }
            }
        }
    }
}

impl Default for MotionAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::Vector3;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    fn circular_state(animator: &MotionAnimator, index: usize) -> (f32, f32) {
        match animator.entries()[index].profile {
            MotionProfile::Circular {
                angular_speed,
                angle,
                ..
            } => (angular_speed, angle),
            _ => panic!("expected circular profile"),
        }
    }

    #[test]
    fn circular_angle_accumulates_and_wraps() {
        let mut scene = test_scene();
        let handle = scene.add_cube().with_name("swimmer").handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(10.0, 0.03));

        let ticks = 300;
        for _ in 0..ticks {
            animator.advance(0.0, &mut scene);
        }

        let (_, angle) = circular_state(&animator, 0);
        let expected = (0.03f32 * ticks as f32).rem_euclid(TAU);
        assert!((angle - expected).abs() < 1.0e-3);
        assert!((0.0..TAU).contains(&angle));

        let object = scene.object(handle).unwrap();
        assert!((object.transform.position.x - 10.0 * expected.cos()).abs() < 1.0e-3);
        assert!((object.transform.position.z - 10.0 * expected.sin()).abs() < 1.0e-3);
    }

    #[test]
    fn circular_single_tick_matches_reference_values() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(10.0, 0.03));
        animator.advance(0.0, &mut scene);

        let (_, angle) = circular_state(&animator, 0);
        assert!((angle - 0.03).abs() < 1.0e-6);

        let object = scene.object(handle).unwrap();
        assert!((object.transform.position.x - 10.0 * 0.03f32.cos()).abs() < 1.0e-5);
        assert!((object.transform.position.z - 10.0 * 0.03f32.sin()).abs() < 1.0e-5);
    }

    #[test]
    fn heading_stays_in_unit_circle_range() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(3.0, 0.7));

        for _ in 0..1000 {
            animator.advance(0.0, &mut scene);
            let heading = scene.object(handle).unwrap().transform.rotation.y;
            assert!((0.0..TAU).contains(&heading), "heading {heading} escaped");
        }
    }

    #[test]
    fn angle_stays_bounded_over_long_runs() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(1.0, 1.9));

        for _ in 0..100_000 {
            animator.advance(0.0, &mut scene);
        }
        let (_, angle) = circular_state(&animator, 0);
        assert!(angle.is_finite());
        assert!((0.0..TAU).contains(&angle));
    }

    #[test]
    fn zero_ticks_leaves_objects_untouched() {
        let mut scene = test_scene();
        let handle = scene.add_cube().at([1.0, 2.0, 3.0]).handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(10.0, 0.03));
        animator.track(
            handle,
            MotionProfile::oscillating(OscillationAxis::X, 2.0, 1.0),
        );

        let object = scene.object(handle).unwrap();
        assert_eq!(object.transform.position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn mid_run_registration_does_not_disturb_existing_entries() {
        let mut scene_a = test_scene();
        let first_a = scene_a.add_cube().handle();
        let mut animator_a = MotionAnimator::new();
        animator_a.track(first_a, MotionProfile::circular(5.0, 0.11));

        let mut scene_b = test_scene();
        let first_b = scene_b.add_cube().handle();
        let mut animator_b = MotionAnimator::new();
        animator_b.track(first_b, MotionProfile::circular(5.0, 0.11));

        for _ in 0..10 {
            animator_a.advance(0.0, &mut scene_a);
            animator_b.advance(0.0, &mut scene_b);
        }

        // Registry B gains a second entry mid-run; the first entry's motion
        // must be identical to the undisturbed registry A
        let second_b = scene_b.add_sphere(1.0, 8, 8).handle();
        animator_b.track(second_b, MotionProfile::circular(2.0, 0.5));

        for _ in 0..10 {
            animator_a.advance(0.0, &mut scene_a);
            animator_b.advance(0.0, &mut scene_b);
        }

        let a = scene_a.object(first_a).unwrap().transform;
        let b = scene_b.object(first_b).unwrap().transform;
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
    }

    #[test]
    fn identical_setups_are_deterministic() {
        let build = || {
            let mut scene = test_scene();
            let circle = scene.add_cube().handle();
            let sweep = scene.add_cube().at([0.0, 2.0, -20.0]).handle();
            let bubble = scene.add_sphere(0.1, 8, 8).at([0.5, 0.0, 0.5]).handle();

            let mut animator = MotionAnimator::new();
            animator.track(circle, MotionProfile::circular_from(7.0, 0.05, 1.0));
            animator.track(
                sweep,
                MotionProfile::oscillating(OscillationAxis::Z, 0.4, 2.0),
            );
            animator.track(bubble, MotionProfile::ascending(0.05, 10.0, 0.0));
            (scene, animator, [circle, sweep, bubble])
        };

        let (mut scene_a, mut animator_a, handles_a) = build();
        let (mut scene_b, mut animator_b, handles_b) = build();

        for tick in 0..500 {
            let clock = tick as f32 * (1.0 / 60.0);
            animator_a.advance(clock, &mut scene_a);
            animator_b.advance(clock, &mut scene_b);
        }

        for (ha, hb) in handles_a.iter().zip(handles_b.iter()) {
            let a = scene_a.object(*ha).unwrap().transform;
            let b = scene_b.object(*hb).unwrap().transform;
            assert_eq!(a.position, b.position);
            assert_eq!(a.rotation, b.rotation);
        }
    }

    #[test]
    fn oscillation_accumulates_rather_than_assigns() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        animator.track(
            handle,
            MotionProfile::oscillating(OscillationAxis::X, 2.0, 1.0),
        );

        // Same clock value twice: an absolute assignment would land on the
        // same position, the incremental design moves twice as far
        animator.advance(0.5, &mut scene);
        let after_one = scene.object(handle).unwrap().transform.position.x;
        animator.advance(0.5, &mut scene);
        let after_two = scene.object(handle).unwrap().transform.position.x;

        assert!((after_two - 2.0 * after_one).abs() < 1.0e-5);
    }

    #[test]
    fn ascending_wraps_at_the_ceiling() {
        let mut scene = test_scene();
        let handle = scene.add_sphere(0.1, 8, 8).at([0.0, 9.9, 0.0]).handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::ascending(0.05, 10.0, 0.0));

        for _ in 0..3 {
            animator.advance(0.0, &mut scene);
        }
        let y = scene.object(handle).unwrap().transform.position.y;
        assert!(y < 1.0, "bubble should have wrapped to the floor, y = {y}");
    }

    #[test]
    fn zero_radius_spins_in_place() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        animator.track(handle, MotionProfile::circular(0.0, 0.1));

        for _ in 0..40 {
            animator.advance(0.0, &mut scene);
        }

        let object = scene.object(handle).unwrap();
        assert_eq!(object.transform.position.x, 0.0);
        assert_eq!(object.transform.position.z, 0.0);
        assert!(object.transform.rotation.y > 0.0);
    }

    #[test]
    fn entries_update_in_insertion_order() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        // Two entries on the same object: the second one sees (and keeps)
        // the position the first one wrote this tick
        animator.track(handle, MotionProfile::circular(4.0, 0.25));
        animator.track(handle, MotionProfile::ascending(0.5, 100.0, 0.0));

        animator.advance(0.0, &mut scene);

        let object = scene.object(handle).unwrap();
        assert!((object.transform.position.x - 4.0 * 0.25f32.cos()).abs() < 1.0e-5);
        assert_eq!(object.transform.position.y, 0.5);
    }

    #[test]
    fn stale_handles_are_skipped() {
        let mut scene = test_scene();
        let handle = scene.add_cube().handle();

        let mut animator = MotionAnimator::new();
        // Handle pointing past the end of the object list
        animator.track(ObjectHandle(99), MotionProfile::circular(1.0, 0.1));
        animator.track(handle, MotionProfile::circular(2.0, 0.1));

        animator.advance(0.0, &mut scene);
        let object = scene.object(handle).unwrap();
        assert!((object.transform.position.x - 2.0 * 0.1f32.cos()).abs() < 1.0e-5);
    }
}
