//! Orbital camera rig.
//!
//! The rig parameterizes the camera as an orientation + distance around a
//! focus point, which keeps rotation and zoom numerically stable. Pointer drags feed an angular
//! velocity that is integrated once per frame with inertial damping, and
//! the arrow keys dolly the eye along the world depth axis.

use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::camera::framing::framing_distance;
use crate::options::CameraOptions;

/// Fraction of angular velocity removed per frame by damping.
pub const DAMPING_FACTOR: f32 = 0.25;

/// World-space step applied to the eye depth coordinate per arrow-key
/// press.
pub const DOLLY_STEP: f32 = 0.3;

/// Orbital camera rig: rotation, zoom, and inertial damping around a focus
/// point.
pub struct OrbitRig {
    orientation: Quat,
    distance: f32,
    focus: Vec3,
    /// Pending angular velocity from pointer drags, decayed by damping.
    velocity: Vec2,

    /// The camera whose pose this rig drives.
    pub camera: Camera,

    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitRig {
    /// Create a rig with the default framing (distance 10 toward +XZ) and
    /// the given viewport aspect ratio.
    #[must_use]
    pub fn new(aspect: f32, options: &CameraOptions) -> Self {
        let focus = Vec3::ZERO;
        let offset = Vec3::new(10.0, 5.0, 10.0);

        let camera = Camera {
            eye: focus + offset,
            target: focus,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut rig = Self {
            orientation: Quat::from_rotation_arc(Vec3::Z, offset.normalize()),
            distance: offset.length(),
            focus,
            velocity: Vec2::ZERO,
            camera,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
        };
        rig.update_camera_pos();
        rig
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus + dir * self.distance;
        self.camera.target = self.focus;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Re-derive the orbit parameters from an explicit eye position,
    /// keeping the current focus.
    fn set_eye(&mut self, eye: Vec3) {
        let rel = eye - self.focus;
        let len = rel.length();
        if len > f32::EPSILON {
            self.distance = len;
            self.orientation = Quat::from_rotation_arc(Vec3::Z, rel / len);
        }
        self.update_camera_pos();
    }

    /// Frame the camera around a freshly loaded model.
    ///
    /// Looks up the per-asset framing distance `d` for `path` and places
    /// the eye at `center + (d, d/2, d)` looking at `center`. Orbit state
    /// (orientation, pending velocity) is reset.
    pub fn reframe(&mut self, center: Vec3, path: &str) {
        let d = framing_distance(path);
        self.focus = center;
        self.velocity = Vec2::ZERO;
        self.set_eye(center + Vec3::new(d, d / 2.0, d));
    }

    /// Update the aspect ratio from the current viewport dimensions. Must
    /// be called on every surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
    }

    /// Feed a pointer-drag delta into the rig's angular velocity.
    pub fn rotate(&mut self, delta: Vec2) {
        self.velocity += delta * self.rotate_speed;
    }

    /// Zoom toward/away from the focus point (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(0.1, 1000.0);
        self.update_camera_pos();
    }

    /// Dolly the eye along the world depth axis: `"ArrowUp"` moves it
    /// closer (eye.z − 0.3), `"ArrowDown"` further (eye.z + 0.3). All
    /// other keys are ignored.
    pub fn handle_key(&mut self, key: &str) {
        let step = match key {
            "ArrowUp" => -DOLLY_STEP,
            "ArrowDown" => DOLLY_STEP,
            _ => return,
        };
        let eye = self.camera.eye + Vec3::new(0.0, 0.0, step);
        self.set_eye(eye);
    }

    /// Advance the damping integration by one frame: apply the pending
    /// angular velocity, then decay it.
    pub fn update(&mut self) {
        if self.velocity.length_squared() > 1e-10 {
            // Horizontal rotation around the rig's up axis
            let up = self.orientation * Vec3::Y;
            let horizontal = Quat::from_axis_angle(up, -self.velocity.x);
            self.orientation = horizontal * self.orientation;

            // Vertical rotation around the rig's right axis
            let right = self.orientation * Vec3::X;
            let vertical = Quat::from_axis_angle(right, -self.velocity.y);
            self.orientation = vertical * self.orientation;

            self.update_camera_pos();
        }
        self.velocity *= 1.0 - DAMPING_FACTOR;
    }

    /// Current pending angular velocity (for diagnostics).
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> OrbitRig {
        OrbitRig::new(1.0, &CameraOptions::default())
    }

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < 1e-4,
            "expected {b:?}, got {a:?} (delta {})",
            (a - b).length()
        );
    }

    #[test]
    fn reframe_places_eye_at_offset_from_center() {
        let mut rig = rig();
        let center = Vec3::new(1.0, 2.0, 3.0);
        rig.reframe(center, "forest_house/scene.gltf");
        assert_vec3_eq(rig.camera.eye, center + Vec3::new(15.0, 7.5, 15.0));
        assert_vec3_eq(rig.camera.target, center);
    }

    #[test]
    fn reframe_unknown_path_uses_default_distance() {
        let mut rig = rig();
        rig.reframe(Vec3::ZERO, "something/else.gltf");
        assert_vec3_eq(rig.camera.eye, Vec3::new(10.0, 5.0, 10.0));
    }

    #[test]
    fn arrow_up_decreases_eye_depth_by_step() {
        let mut rig = rig();
        rig.reframe(Vec3::ZERO, "2x2_cube/scene.gltf");
        let before = rig.camera.eye;
        rig.handle_key("ArrowUp");
        assert_vec3_eq(rig.camera.eye, before + Vec3::new(0.0, 0.0, -0.3));
    }

    #[test]
    fn arrow_down_increases_eye_depth_by_step() {
        let mut rig = rig();
        rig.reframe(Vec3::ZERO, "2x2_cube/scene.gltf");
        let before = rig.camera.eye;
        rig.handle_key("ArrowDown");
        assert_vec3_eq(rig.camera.eye, before + Vec3::new(0.0, 0.0, 0.3));
    }

    #[test]
    fn other_keys_leave_camera_unchanged() {
        let mut rig = rig();
        rig.reframe(Vec3::ZERO, "2x2_cube/scene.gltf");
        let before = rig.camera.eye;
        rig.handle_key("KeyA");
        rig.handle_key("Space");
        rig.handle_key("");
        assert_eq!(rig.camera.eye, before);
    }

    #[test]
    fn damping_decays_velocity_geometrically() {
        let mut rig = rig();
        rig.rotate(Vec2::new(100.0, 0.0));
        let v0 = rig.velocity().length();
        assert!(v0 > 0.0);
        rig.update();
        let v1 = rig.velocity().length();
        assert!((v1 - v0 * (1.0 - DAMPING_FACTOR)).abs() < 1e-6);
        // Velocity eventually vanishes
        for _ in 0..200 {
            rig.update();
        }
        assert!(rig.velocity().length() < 1e-6);
    }

    #[test]
    fn zoom_moves_eye_toward_focus() {
        let mut rig = rig();
        rig.reframe(Vec3::ZERO, "sugarcube_corner/scene.gltf");
        let before = (rig.camera.eye - rig.camera.target).length();
        rig.zoom(1.0);
        let after = (rig.camera.eye - rig.camera.target).length();
        assert!(after < before);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut rig = rig();
        rig.resize(1920, 1080);
        assert!((rig.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
