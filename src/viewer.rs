//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use maquette::Viewer;
//! Viewer::builder()
//!     .with_path("assets/models/sugarcube_corner/scene.gltf")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    audio::RodioSound, engine::ViewerCommand, error::ViewerError,
    lighting::Indicator, options::Options, picking::CursorStyle, InputEvent,
    MouseButton, ViewerEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<String>,
    options: Option<Options>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            path: None,
            options: None,
        }
    }

    /// Set the glTF asset to load on startup (local path or `http(s)` URL).
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            path: self.path,
            options: self.options,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a model on a turntable.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<String>,
    options: Option<Options>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            path: self.path,
            options: self.options.unwrap_or_default(),
            cursor: CursorStyle::Default,
            indicator: Indicator::Sun,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    path: Option<String>,
    options: Options,
    /// Last cursor style pushed to the window.
    cursor: CursorStyle,
    /// Last lighting indicator reflected in the window title.
    indicator: Indicator,
}

/// Clamp a window size to a nonzero wgpu surface size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Push cursor style and title changes to the window. Both are cheap
    /// to compute but not to set, so only deltas are applied.
    fn sync_window_state(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine)
        else {
            return;
        };

        let cursor = engine.cursor_style();
        if cursor != self.cursor {
            self.cursor = cursor;
            window.set_cursor(match cursor {
                CursorStyle::Glow => CursorIcon::Pointer,
                CursorStyle::Default => CursorIcon::Default,
            });
        }

        let indicator = engine.lighting_state().indicator;
        if indicator != self.indicator {
            self.indicator = indicator;
            let suffix = match indicator {
                Indicator::Sun => "day",
                Indicator::Moon => "night",
            };
            window.set_title(&format!(
                "{} [{suffix}]",
                self.options.window.title
            ));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.options.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes()
                .with_title(&self.options.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.options.window.width,
                    self.options.window.height,
                ))
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let mut engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            (vp_w, vp_h),
            self.options.clone(),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        engine.set_sound(Box::new(RodioSound::new(
            self.options.audio.ambient_track.as_deref(),
        )));

        if let Some(path) = self.path.take() {
            engine.execute(ViewerCommand::LoadModel { path });
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.execute(ViewerCommand::Resize {
                        width: vp_w,
                        height: vp_h,
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    engine.update();
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = self
                                .window
                                .as_ref()
                                .map(|w| w.inner_size());
                            if let Some(inner) = inner {
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.execute(ViewerCommand::Resize {
                                    width: vp_w,
                                    height: vp_h,
                                });
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                self.sync_window_state();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                self.sync_window_state();
            }

            WindowEvent::CursorEntered { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorEntered);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorLeft);
                }
                self.sync_window_state();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine
                        .handle_input(InputEvent::Scroll { delta: scroll_delta });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                let key_str = format!("{code:?}");
                if let Some(engine) = &mut self.engine {
                    engine.handle_key_press(&key_str);
                }
                self.sync_window_state();
            }

            _ => (),
        }
    }
}
