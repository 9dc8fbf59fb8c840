//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, mouse
//! gesture, or programmatic call, is represented as a `ViewerCommand`.
//! Consumers construct commands and pass them to
//! [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// This is the single, centralized description of what the engine can do
/// interactively. The engine never cares *how* a command was triggered;
/// keyboard, mouse, and API calls all look identical:
///
/// ```ignore
/// engine.execute(ViewerCommand::ToggleLighting);
/// engine.execute(ViewerCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Scene ───────────────────────────────────────────────────────
    /// Begin loading a model from a local path or `http(s)` URL. The load
    /// runs on a background thread; a newer `LoadModel` supersedes any
    /// in-flight one.
    LoadModel {
        /// Local filesystem path or remote URL of a glTF asset.
        path: String,
    },

    // ── Pointer ─────────────────────────────────────────────────────
    /// Pointer moved to an absolute viewport position, in physical pixels.
    /// Drives the hover test that selects the cursor style.
    PointerMove {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Pointer entered the viewport. Resumes the ambient track.
    PointerEnter,
    /// Pointer left the viewport. Pauses the ambient track.
    PointerLeave,

    // ── Keyboard ────────────────────────────────────────────────────
    /// A physical key was pressed. `key` uses the
    /// `winit::keyboard::KeyCode` debug format (`"KeyN"`, `"ArrowUp"`).
    /// Bound keys resolve through [`KeyBindings`](crate::input::KeyBindings);
    /// unbound keys fall through to the camera rig.
    KeyDown {
        /// Physical key identifier.
        key: String,
    },
    /// Flip between day and night lighting presets.
    ToggleLighting,

    // ── Camera ──────────────────────────────────────────────────────
    /// Apply an orbit impulse from a pointer drag, in pixels.
    RotateCamera {
        /// Drag delta since the previous pointer position.
        delta: Vec2,
    },
    /// Zoom toward (positive) or away from (negative) the focus point.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Surface ─────────────────────────────────────────────────────
    /// The drawable surface was resized.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}
