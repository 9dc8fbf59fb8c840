//! CPU-side model data: meshes, bounds, shadow flags.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An empty box that grows from the first point added.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Grow the box to include a point.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box to include another box.
    pub fn union(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Geometric center of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether any point was ever added.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x
    }

    /// Build a box around a point slice.
    #[must_use]
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.grow(Vec3::from_array(*p));
        }
        aabb
    }
}

/// Raw mesh geometry as produced by the asset parser, before model-level
/// post-processing.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Vertex positions in model space (node transforms already baked).
    pub positions: Vec<[f32; 3]>,
    /// Triangle-list indices.
    pub indices: Vec<u32>,
    /// Base color factor from the material (linear RGBA).
    pub base_color: [f32; 4],
}

/// One mesh of a loaded model.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions in model space.
    pub positions: Vec<[f32; 3]>,
    /// Triangle-list indices.
    pub indices: Vec<u32>,
    /// Base color factor (linear RGBA).
    pub base_color: [f32; 4],
    /// Model-space bounding box.
    pub bounds: Aabb,
    /// Whether this mesh renders into the shadow map.
    pub casts_shadow: bool,
    /// Whether this mesh samples the shadow map.
    pub receives_shadow: bool,
    /// Rendered without back-face culling.
    pub double_sided: bool,
}

/// The currently displayed 3D asset: a flat list of meshes plus the
/// turntable rotation.
///
/// Construction recenters the geometry so the model's bounding-box center
/// sits at the origin, and marks every mesh as both shadow caster and
/// shadow receiver with a double-sided flat-shaded material.
#[derive(Debug, Clone)]
pub struct Model {
    /// Source path the asset was loaded from (the model's identity).
    pub source: String,
    /// All meshes of the model subtree, flattened.
    pub meshes: Vec<Mesh>,
    /// Model-space bounding box after recentering.
    pub bounds: Aabb,
    /// Bounding-box center of the geometry as it arrived from the asset,
    /// before recentering.
    pub original_center: Vec3,
    /// Turntable rotation angle around the vertical axis, in radians.
    pub yaw: f32,
}

impl Model {
    /// Build a model from parsed mesh data.
    #[must_use]
    pub fn new(source: impl Into<String>, meshes: Vec<MeshData>) -> Self {
        let mut bounds = Aabb::EMPTY;
        for mesh in &meshes {
            bounds.union(&Aabb::from_points(&mesh.positions));
        }
        let center = if bounds.is_valid() {
            bounds.center()
        } else {
            Vec3::ZERO
        };

        let meshes = meshes
            .into_iter()
            .map(|data| {
                let positions: Vec<[f32; 3]> = data
                    .positions
                    .into_iter()
                    .map(|p| (Vec3::from_array(p) - center).to_array())
                    .collect();
                let bounds = Aabb::from_points(&positions);
                Mesh {
                    positions,
                    indices: data.indices,
                    base_color: data.base_color,
                    bounds,
                    casts_shadow: true,
                    receives_shadow: true,
                    double_sided: true,
                }
            })
            .collect::<Vec<_>>();

        let mut recentered = Aabb::EMPTY;
        for mesh in &meshes {
            recentered.union(&mesh.bounds);
        }

        Self {
            source: source.into(),
            meshes,
            bounds: recentered,
            original_center: center,
            yaw: 0.0,
        }
    }

    /// Current model-to-world transform (turntable rotation around Y).
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }

    /// Total vertex count across all meshes.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_mesh(offset: [f32; 3]) -> MeshData {
        let [ox, oy, oz] = offset;
        let mut positions = Vec::new();
        for x in [-0.5, 0.5] {
            for y in [-0.5, 0.5] {
                for z in [-0.5, 0.5] {
                    positions.push([x + ox, y + oy, z + oz]);
                }
            }
        }
        MeshData {
            positions,
            indices: (0..8).collect(),
            base_color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn new_recenters_geometry_at_origin() {
        let model = Model::new("test", vec![cube_mesh([5.0, -2.0, 3.0])]);
        let center = model.bounds.center();
        assert!(center.length() < 1e-6, "center {center:?} not at origin");
        assert_eq!(model.original_center, Vec3::new(5.0, -2.0, 3.0));
    }

    #[test]
    fn new_marks_meshes_as_shadow_participants() {
        let model = Model::new(
            "test",
            vec![cube_mesh([0.0, 0.0, 0.0]), cube_mesh([4.0, 0.0, 0.0])],
        );
        for mesh in &model.meshes {
            assert!(mesh.casts_shadow);
            assert!(mesh.receives_shadow);
            assert!(mesh.double_sided);
        }
    }

    #[test]
    fn multi_mesh_center_uses_combined_bounds() {
        // Two unit cubes at x=0 and x=4: combined center is x=2
        let model = Model::new(
            "test",
            vec![cube_mesh([0.0, 0.0, 0.0]), cube_mesh([4.0, 0.0, 0.0])],
        );
        assert_eq!(model.original_center, Vec3::new(2.0, 0.0, 0.0));
        assert!(model.bounds.center().length() < 1e-6);
    }

    #[test]
    fn empty_model_has_no_valid_bounds() {
        let model = Model::new("empty", Vec::new());
        assert!(!model.bounds.is_valid());
        assert_eq!(model.vertex_count(), 0);
    }
}
