//! Asynchronous model loading with last-wins sequencing.
//!
//! Each `begin` spawns a background thread that fetches and parses the
//! asset, then delivers the result over a channel tagged with a generation
//! number. `poll` (called once per frame on the UI thread) applies only
//! results matching the latest generation, so overlapping loads cannot
//! clobber a newer model with a stale response: the last `begin` wins
//! regardless of completion order.
//!
//! A failed load is logged and dropped — the previously attached model, if
//! any, stays visible.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use glam::Mat4;

use super::model::{MeshData, Model};
use crate::error::ViewerError;

/// A completed load attempt, tagged with its request generation.
struct LoadResult {
    generation: u64,
    path: String,
    outcome: Result<Model, ViewerError>,
}

/// Sequences asynchronous model loads.
pub struct ModelLoader {
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
    /// Generation of the most recent `begin` call; only results carrying
    /// this value are applied.
    latest: u64,
}

impl ModelLoader {
    /// Create an idle loader.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, latest: 0 }
    }

    /// Start loading the asset at `path` on a background thread.
    ///
    /// Supersedes any load still in flight: earlier results will be
    /// discarded when they arrive.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ThreadSpawn`] if the worker thread cannot be
    /// created.
    pub fn begin(&mut self, path: &str) -> Result<(), ViewerError> {
        self.latest += 1;
        let generation = self.latest;
        let tx = self.tx.clone();
        let path = path.to_owned();
        log::info!("loading model {path:?} (generation {generation})");

        let builder = thread::Builder::new().name("model-loader".into());
        let _handle = builder
            .spawn(move || {
                let outcome = load_model(&path);
                // Receiver dropped means the viewer is shutting down.
                let _ = tx.send(LoadResult {
                    generation,
                    path,
                    outcome,
                });
            })
            .map_err(ViewerError::ThreadSpawn)?;
        Ok(())
    }

    /// Drain completed loads and return the newest applicable model, if
    /// any. Stale and failed results are logged and discarded.
    pub fn poll(&mut self) -> Option<Model> {
        let mut applied = None;
        while let Ok(result) = self.rx.try_recv() {
            applied = self.accept(result).or(applied);
        }
        applied
    }

    /// Generation of the most recent `begin` call.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.latest
    }

    fn accept(&self, result: LoadResult) -> Option<Model> {
        if result.generation != self.latest {
            log::debug!(
                "dropping stale load result for {:?} (generation {} < {})",
                result.path,
                result.generation,
                self.latest
            );
            return None;
        }
        match result.outcome {
            Ok(model) => Some(model),
            Err(e) => {
                log::error!("failed to load model {:?}: {e}", result.path);
                None
            }
        }
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

// ── Asset fetching & parsing ─────────────────────────────────────────────

/// Fetch and parse the glTF asset at `path` (local file or http(s) URL).
fn load_model(path: &str) -> Result<Model, ViewerError> {
    let (document, buffers) =
        if path.starts_with("http://") || path.starts_with("https://") {
            let bytes = fetch_remote(path)?;
            let (document, buffers, _images) = gltf::import_slice(&bytes)
                .map_err(|e| ViewerError::AssetLoad(e.to_string()))?;
            (document, buffers)
        } else {
            let (document, buffers, _images) = gltf::import(path)
                .map_err(|e| ViewerError::AssetLoad(e.to_string()))?;
            (document, buffers)
        };

    let meshes = extract_meshes(&document, &buffers);
    if meshes.is_empty() {
        return Err(ViewerError::AssetLoad(format!(
            "{path}: no triangle geometry found"
        )));
    }
    Ok(Model::new(path, meshes))
}

/// Download a remote asset into memory.
fn fetch_remote(url: &str) -> Result<Vec<u8>, ViewerError> {
    log::info!("fetching {url}");
    ureq::get(url)
        .call()
        .map_err(|e| ViewerError::AssetLoad(e.to_string()))?
        .into_body()
        .read_to_vec()
        .map_err(|e| ViewerError::AssetLoad(e.to_string()))
}

/// Flatten the document's default scene into per-primitive mesh data with
/// node transforms baked into the positions.
fn extract_meshes(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Vec<MeshData> {
    let mut meshes = Vec::new();
    let scene = document.default_scene().or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            visit_node(&node, Mat4::IDENTITY, buffers, &mut meshes);
        }
    }
    meshes
}

fn visit_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<MeshData>,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global = parent * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(data) = read_primitive(&primitive, global, buffers) {
                out.push(data);
            }
        }
    }

    for child in node.children() {
        visit_node(&child, global, buffers, out);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Option<MeshData> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return None;
    }

    let reader =
        primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()?
        .map(|p| transform.transform_point3(p.into()).to_array())
        .collect();
    if positions.is_empty() {
        return None;
    }

    let indices = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |idx| idx.into_u32().collect(),
    );

    let base_color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    Some(MeshData {
        positions,
        indices,
        base_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model(source: &str) -> Model {
        Model::new(
            source,
            vec![MeshData {
                positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                indices: vec![0, 1, 2],
                base_color: [1.0; 4],
            }],
        )
    }

    fn result(
        generation: u64,
        outcome: Result<Model, ViewerError>,
    ) -> LoadResult {
        LoadResult {
            generation,
            path: "test".into(),
            outcome,
        }
    }

    #[test]
    fn latest_generation_is_applied() {
        let mut loader = ModelLoader::new();
        loader.latest = 1;
        loader.tx.send(result(1, Ok(test_model("a")))).ok();
        let applied = loader.poll();
        assert_eq!(applied.map(|m| m.source), Some("a".to_owned()));
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut loader = ModelLoader::new();
        loader.latest = 2;
        loader.tx.send(result(1, Ok(test_model("old")))).ok();
        assert!(loader.poll().is_none());
    }

    #[test]
    fn last_begin_wins_regardless_of_completion_order() {
        let mut loader = ModelLoader::new();
        loader.latest = 2;
        // Newer request completes first, older one afterwards
        loader.tx.send(result(2, Ok(test_model("new")))).ok();
        loader.tx.send(result(1, Ok(test_model("old")))).ok();
        let applied = loader.poll();
        assert!(applied.is_some());
        // The stale generation-1 result must not surface on later polls
        assert!(loader.poll().is_none());
    }

    #[test]
    fn failed_load_yields_nothing() {
        let mut loader = ModelLoader::new();
        loader.latest = 1;
        loader
            .tx
            .send(result(1, Err(ViewerError::AssetLoad("nope".into()))))
            .ok();
        assert!(loader.poll().is_none());
    }

    #[test]
    fn begin_bumps_generation_and_reports_missing_file() {
        let mut loader = ModelLoader::new();
        loader.begin("definitely/not/a/real/file.gltf").ok();
        assert_eq!(loader.generation(), 1);
        // The spawned thread reports failure; poll never surfaces a model
        // and the loader remains usable.
        let deadline = std::time::Instant::now()
            + std::time::Duration::from_secs(5);
        loop {
            if let Ok(result) = loader.rx.try_recv() {
                assert!(loader.accept(result).is_none());
                break;
            }
            assert!(std::time::Instant::now() < deadline, "load never finished");
            thread::yield_now();
        }
    }
}
