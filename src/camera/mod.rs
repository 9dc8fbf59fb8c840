//! Camera system for orbiting a loaded model.
//!
//! Provides a perspective camera, a per-asset framing-distance table, and
//! an orbital rig with inertial damping, zoom, and keyboard dolly.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Fixed per-asset framing-distance lookup.
pub mod framing;
/// Orbital camera rig: rotation, zoom, damping, reframing.
pub mod rig;

pub use self::core::{Camera, CameraUniform};
pub use self::framing::framing_distance;
pub use self::rig::OrbitRig;
