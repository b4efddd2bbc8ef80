//! # Motion Animation System
//!
//! Drives the per-frame motion of scene objects. The [`MotionAnimator`]
//! keeps an ordered registry of (object handle, motion profile) pairs and is
//! advanced once per rendered frame by the application shell; each entry
//! writes the object's position and Y orientation in place.
//!
//! Profiles are plain data with their mutable state (the circular angle
//! accumulator) stored inside the registry entry, so motion is fully
//! deterministic and unit-testable without a window or GPU.

pub mod animator;
pub mod profile;

pub use animator::MotionAnimator;
pub use profile::{MotionProfile, OscillationAxis};
