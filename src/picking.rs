//! CPU hover picking.
//!
//! Converts a pointer position to normalized device coordinates, unprojects
//! it into a world-space ray, and tests the ray against the attached
//! model's mesh bounding boxes (slab method). The result drives the hover
//! flag and cursor style only — there is no selection, so box precision is
//! plenty.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;
use crate::scene::{Aabb, Model};

/// Cursor feedback derived from the hover flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Nothing under the pointer.
    #[default]
    Default,
    /// The pointer is over the model.
    Glow,
}

impl CursorStyle {
    /// Style for a given hover flag.
    #[must_use]
    pub fn from_hover(hovering: bool) -> Self {
        if hovering {
            Self::Glow
        } else {
            Self::Default
        }
    }
}

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Normalized ray direction.
    pub direction: Vec3,
}

/// Convert a pointer position in physical pixels to normalized device
/// coordinates in `[-1, 1]` (y up).
#[must_use]
pub fn screen_to_ndc(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new(2.0 * x / w - 1.0, 1.0 - 2.0 * y / h)
}

/// Unproject an NDC point into a world-space ray from the camera.
#[must_use]
pub fn camera_ray(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.build_matrix().inverse();
    // wgpu clip space: z in [0, 1]
    let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
    let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    Ray {
        origin: near,
        direction: (far - near).normalize(),
    }
}

/// Slab-method ray/AABB intersection test.
#[must_use]
pub fn ray_hits_aabb(ray: &Ray, aabb: &Aabb) -> bool {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let min = aabb.min[axis];
        let max = aabb.max[axis];

        if dir.abs() < f32::EPSILON {
            if origin < min || origin > max {
                return false;
            }
        } else {
            let t0 = (min - origin) / dir;
            let t1 = (max - origin) / dir;
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }

    t_max >= 0.0
}

/// Whether a ray from the camera through `ndc` intersects any mesh of the
/// model. The ray is transformed into model space to account for the
/// turntable rotation.
#[must_use]
pub fn hover_test(camera: &Camera, ndc: Vec2, model: &Model) -> bool {
    let ray = camera_ray(camera, ndc);

    let inv_model: Mat4 = model.transform().inverse();
    let local = Ray {
        origin: inv_model.transform_point3(ray.origin),
        direction: inv_model.transform_vector3(ray.direction).normalize(),
    };

    model
        .meshes
        .iter()
        .any(|mesh| ray_hits_aabb(&local, &mesh.bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshData;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    fn unit_cube_model() -> Model {
        let mut positions = Vec::new();
        for x in [-0.5, 0.5] {
            for y in [-0.5, 0.5] {
                for z in [-0.5, 0.5] {
                    positions.push([x, y, z]);
                }
            }
        }
        Model::new(
            "cube",
            vec![MeshData {
                positions,
                indices: (0..8).collect(),
                base_color: [1.0; 4],
            }],
        )
    }

    #[test]
    fn screen_center_maps_to_ndc_origin() {
        let ndc = screen_to_ndc(400.0, 300.0, 800, 600);
        assert!(ndc.length() < 1e-6);
        // Top-left corner maps to (-1, 1)
        let corner = screen_to_ndc(0.0, 0.0, 800, 600);
        assert!((corner - Vec2::new(-1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn center_ray_hits_centered_model() {
        let camera = test_camera();
        let model = unit_cube_model();
        assert!(hover_test(&camera, Vec2::ZERO, &model));
    }

    #[test]
    fn corner_ray_misses_centered_model() {
        // At 45° fovy and 10 units distance, the edge of the frustum is
        // ~4.1 units off-axis — far outside a half-unit cube.
        let camera = test_camera();
        let model = unit_cube_model();
        assert!(!hover_test(&camera, Vec2::new(1.0, 1.0), &model));
    }

    #[test]
    fn turntable_rotation_does_not_break_center_hit() {
        let camera = test_camera();
        let mut model = unit_cube_model();
        model.yaw = 1.2;
        assert!(hover_test(&camera, Vec2::ZERO, &model));
    }

    #[test]
    fn ray_behind_origin_misses() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::Z,
        };
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        assert!(!ray_hits_aabb(&ray, &aabb));
    }

    #[test]
    fn cursor_style_follows_hover_flag() {
        assert_eq!(CursorStyle::from_hover(true), CursorStyle::Glow);
        assert_eq!(CursorStyle::from_hover(false), CursorStyle::Default);
    }
}
