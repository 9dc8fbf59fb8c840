//! The core viewer engine.
//!
//! [`ViewerEngine`] owns the GPU context, the scene, the orbit camera rig,
//! lighting, audio, and the background model loader, and ties them together
//! behind a single command-dispatch entry point. Platform layers (the winit
//! shell, tests) never reach into subsystems directly; they issue
//! [`ViewerCommand`]s and call [`update`](ViewerEngine::update) /
//! [`render`](ViewerEngine::render) once per frame.

mod command;
mod input;

use glam::{Vec2, Vec3};

pub use self::command::ViewerCommand;
use crate::audio::{AmbientSound, NullSound};
use crate::camera::OrbitRig;
use crate::error::ViewerError;
use crate::gpu::RenderContext;
use crate::input::InputProcessor;
use crate::lighting::{LightingMode, LightingState};
use crate::options::Options;
use crate::picking::{self, CursorStyle};
use crate::renderer::ModelRenderer;
use crate::scene::{ModelLoader, SceneGraph};

/// The core engine for interactive model viewing.
///
/// Manages the full frame loop: background glTF loading, orbit camera with
/// inertial damping, day/night lighting, turntable rotation, hover picking,
/// and ambient sound. See the module docs for the command-dispatch contract.
pub struct ViewerEngine {
    context: RenderContext,
    renderer: ModelRenderer,
    scene: SceneGraph,
    rig: OrbitRig,
    lighting: LightingMode,
    loader: ModelLoader,
    input: InputProcessor,
    audio: Box<dyn AmbientSound>,
    options: Options,
    /// Last pointer position in NDC, if the pointer is over the viewport.
    pointer_ndc: Option<Vec2>,
    hovering: bool,
}

impl ViewerEngine {
    /// Create an engine rendering to `window`.
    ///
    /// Sound starts as a silent stub; the platform layer installs a real
    /// backend via [`set_sound`](Self::set_sound) once a device exists.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if surface or device creation fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, initial_size).await?;
        let renderer = ModelRenderer::new(&context);
        let rig = OrbitRig::new(context.aspect(), &options.camera);

        Ok(Self {
            context,
            renderer,
            scene: SceneGraph::new(),
            rig,
            lighting: LightingMode::new(),
            loader: ModelLoader::new(),
            input: InputProcessor::new(),
            audio: Box::new(NullSound),
            options,
            pointer_ndc: None,
            hovering: false,
        })
    }

    /// Replace the ambient sound backend.
    pub fn set_sound(&mut self, sound: Box<dyn AmbientSound>) {
        self.audio = sound;
    }

    // ── Command dispatch ────────────────────────────────────────────

    /// Execute a single command.
    ///
    /// Infallible by design: recoverable problems (an unloadable model, a
    /// key with no binding) are logged or ignored rather than propagated,
    /// so the event loop never has to unwind.
    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::LoadModel { path } => {
                if let Err(e) = self.loader.begin(&path) {
                    log::error!("could not start model load: {e}");
                }
            }
            ViewerCommand::PointerMove { x, y } => {
                let ndc = picking::screen_to_ndc(
                    x,
                    y,
                    self.context.config.width,
                    self.context.config.height,
                );
                self.pointer_ndc = Some(ndc);
                self.refresh_hover();
            }
            ViewerCommand::PointerEnter => self.audio.play(),
            ViewerCommand::PointerLeave => {
                self.pointer_ndc = None;
                self.hovering = false;
                self.audio.pause();
            }
            ViewerCommand::KeyDown { key } => self.dispatch_key(&key),
            ViewerCommand::ToggleLighting => {
                self.lighting.toggle();
                log::info!(
                    "lighting: {}",
                    if self.lighting.is_night() { "night" } else { "day" }
                );
            }
            ViewerCommand::RotateCamera { delta } => self.rig.rotate(delta),
            ViewerCommand::Zoom { delta } => self.rig.zoom(delta),
            ViewerCommand::Resize { width, height } => {
                self.context.resize(width, height);
                self.rig.resize(width, height);
                self.renderer.resize(&self.context);
            }
        }
    }

    /// Resolve a key press: bound keys become commands, everything else
    /// falls through to the camera rig (arrow-key dolly).
    fn dispatch_key(&mut self, key: &str) {
        if let Some(command) = self.options.keybindings.lookup(key) {
            self.execute(command);
        } else {
            self.rig.handle_key(key);
        }
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Advance simulation by one frame: apply any finished model load,
    /// step the turntable, and settle the camera.
    pub fn update(&mut self) {
        if let Some(model) = self.loader.poll() {
            let path = model.source.clone();
            self.renderer.upload_model(&self.context, &model);
            let _ = self.scene.attach(model);
            // The model is recentered on load, so the focus is the origin.
            self.rig.reframe(Vec3::ZERO, &path);
            self.refresh_hover();
        }

        self.scene.advance_turntable();
        self.rig.update();
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the swapchain is lost or outdated;
    /// the caller reconfigures by issuing a [`ViewerCommand::Resize`].
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(
            &self.context,
            &self.scene,
            &self.rig.camera,
            self.lighting.state(),
        )
    }

    /// Re-run the hover test at the last known pointer position.
    fn refresh_hover(&mut self) {
        self.hovering = match (self.pointer_ndc, self.scene.model()) {
            (Some(ndc), Some(model)) => {
                picking::hover_test(&self.rig.camera, ndc, model)
            }
            _ => false,
        };
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Cursor style derived from the current hover state.
    #[must_use]
    pub fn cursor_style(&self) -> CursorStyle {
        CursorStyle::from_hover(self.hovering)
    }

    /// Whether the pointer is currently over the model.
    #[must_use]
    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Current lighting state (background color, ambient, indicator).
    #[must_use]
    pub fn lighting_state(&self) -> LightingState {
        self.lighting.state()
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The orbit camera rig.
    #[must_use]
    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }
}
