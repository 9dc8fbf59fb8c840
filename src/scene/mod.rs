//! Authoritative scene: the single active model, the fixed sun light, and
//! the turntable rotation.
//!
//! The scene holds at most one [`Model`] at a time; attaching a new one
//! detaches the previous. The directional (sun) light is invariant — the
//! day/night toggle only changes ambient intensity and background color
//! (see [`crate::lighting`]).

pub mod loader;
mod model;

use glam::{Mat4, Vec3};
pub use loader::ModelLoader;
pub use model::{Aabb, Mesh, MeshData, Model};

/// Turntable rotation advance per animation tick, in radians.
pub const TURNTABLE_STEP: f32 = 0.003;

/// Fixed directional (sun) light parameters, including the orthographic
/// shadow frustum bounds. Never mutated by the lighting mode toggle.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Light position in world space.
    pub position: Vec3,
    /// Point the light is aimed at.
    pub target: Vec3,
    /// Half-extent of the orthographic shadow frustum (left/right/
    /// bottom/top at ±extent).
    pub shadow_extent: f32,
    /// Near plane of the shadow frustum.
    pub shadow_near: f32,
    /// Far plane of the shadow frustum.
    pub shadow_far: f32,
}

impl DirectionalLight {
    /// The scene's sun: high and off-axis so shadows read clearly, with a
    /// frustum generous enough for every bundled asset.
    pub const SUN: Self = Self {
        position: Vec3::new(10.0, 20.0, 10.0),
        target: Vec3::ZERO,
        shadow_extent: 20.0,
        shadow_near: 0.1,
        shadow_far: 60.0,
    };

    /// Normalized direction the light travels (position toward target).
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// View-projection matrix for shadow-map rendering.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let e = self.shadow_extent;
        let proj = Mat4::orthographic_rh(
            -e,
            e,
            -e,
            e,
            self.shadow_near,
            self.shadow_far,
        );
        proj * view
    }
}

/// The scene graph: 0 or 1 attached model plus the fixed sun light.
pub struct SceneGraph {
    model: Option<Model>,
    sun: DirectionalLight,
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: None,
            sun: DirectionalLight::SUN,
        }
    }

    /// Attach a model, detaching and returning the previous one if
    /// present.
    pub fn attach(&mut self, model: Model) -> Option<Model> {
        log::info!(
            "attaching model {:?} ({} vertices, {} meshes)",
            model.source,
            model.vertex_count(),
            model.meshes.len()
        );
        self.model.replace(model)
    }

    /// Detach the current model, if any.
    pub fn detach(&mut self) -> Option<Model> {
        self.model.take()
    }

    /// The attached model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Whether a model is attached.
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Advance the turntable by one tick: rotate the attached model by
    /// [`TURNTABLE_STEP`] radians around the vertical axis. A no-op when
    /// no model is attached.
    pub fn advance_turntable(&mut self) {
        if let Some(model) = &mut self.model {
            model.yaw += TURNTABLE_STEP;
        }
    }

    /// The fixed directional light.
    #[must_use]
    pub fn sun(&self) -> &DirectionalLight {
        &self.sun
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(source: &str) -> Model {
        Model::new(
            source,
            vec![MeshData {
                positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                indices: vec![0, 1, 2],
                base_color: [1.0; 4],
            }],
        )
    }

    #[test]
    fn attach_replaces_previous_model() {
        let mut scene = SceneGraph::new();
        assert!(scene.attach(model("a")).is_none());
        let detached = scene.attach(model("b"));
        assert_eq!(detached.map(|m| m.source), Some("a".to_owned()));
        assert_eq!(
            scene.model().map(|m| m.source.as_str()),
            Some("b"),
            "exactly the newest model must remain attached"
        );
    }

    #[test]
    fn turntable_advances_by_fixed_step() {
        let mut scene = SceneGraph::new();
        let _ = scene.attach(model("a"));
        scene.advance_turntable();
        scene.advance_turntable();
        let yaw = scene.model().map_or(0.0, |m| m.yaw);
        assert!((yaw - 2.0 * TURNTABLE_STEP).abs() < 1e-9);
    }

    #[test]
    fn turntable_without_model_is_a_noop() {
        let mut scene = SceneGraph::new();
        scene.advance_turntable();
        assert!(!scene.has_model());
    }

    #[test]
    fn sun_is_invariant() {
        let scene = SceneGraph::new();
        let sun = scene.sun();
        assert_eq!(sun.position, Vec3::new(10.0, 20.0, 10.0));
        // Direction points down toward the origin
        assert!(sun.direction().y < 0.0);
    }
}
