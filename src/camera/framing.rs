//! Fixed per-asset framing-distance lookup.
//!
//! Framing distances are a data-driven heuristic: each bundled asset has a
//! hand-tuned scalar controlling how far the camera sits from the model
//! center, rather than a computed bounding-sphere fit.

/// Framing distance used for paths not present in [`FRAMING_TABLE`].
pub const DEFAULT_FRAMING_DISTANCE: f32 = 10.0;

/// Known asset paths and their hand-tuned framing distances.
pub const FRAMING_TABLE: [(&str, f32); 4] = [
    ("lowpoly_backpack/scene.gltf", 1.0),
    ("sugarcube_corner/scene.gltf", 5.0),
    ("2x2_cube/scene.gltf", 2.0),
    ("forest_house/scene.gltf", 15.0),
];

/// Look up the framing distance for a model path.
///
/// Matches on whole trailing path components so
/// `assets/models/2x2_cube/scene.gltf` resolves the same as
/// `2x2_cube/scene.gltf`, while `not_2x2_cube/scene.gltf` does not.
/// Unknown paths fall back to [`DEFAULT_FRAMING_DISTANCE`].
#[must_use]
pub fn framing_distance(path: &str) -> f32 {
    FRAMING_TABLE
        .iter()
        .find(|(known, _)| {
            path.strip_suffix(known).is_some_and(|prefix| {
                prefix.is_empty() || prefix.ends_with('/')
            })
        })
        .map_or(DEFAULT_FRAMING_DISTANCE, |&(_, d)| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_use_table_distances() {
        assert_eq!(framing_distance("lowpoly_backpack/scene.gltf"), 1.0);
        assert_eq!(framing_distance("sugarcube_corner/scene.gltf"), 5.0);
        assert_eq!(framing_distance("2x2_cube/scene.gltf"), 2.0);
        assert_eq!(framing_distance("forest_house/scene.gltf"), 15.0);
    }

    #[test]
    fn unknown_paths_use_default() {
        assert_eq!(framing_distance("mystery/scene.gltf"), 10.0);
        assert_eq!(framing_distance(""), 10.0);
    }

    #[test]
    fn prefixed_paths_match_by_suffix() {
        assert_eq!(
            framing_distance("assets/models/forest_house/scene.gltf"),
            15.0
        );
    }

    #[test]
    fn partial_directory_names_do_not_match() {
        // The table entry must align with a full path component, not a
        // coincidental tail of a longer directory name.
        assert_eq!(framing_distance("my_forest_house/scene.gltf"), 10.0);
        assert_eq!(framing_distance("not_2x2_cube/scene.gltf"), 10.0);
        assert_eq!(framing_distance("xsugarcube_corner/scene.gltf"), 10.0);
    }
}
