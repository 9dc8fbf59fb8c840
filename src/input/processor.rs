//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient pointer state (last cursor
//! position, drag tracking). It is the only thing that sits between raw
//! window events and the engine's
//! [`execute`](crate::engine::ViewerEngine::execute) method, which keeps
//! the command path unit-testable without a real window.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::ViewerCommand;

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format: `"KeyN"`,
/// `"ArrowUp"`, `"Escape"`, etc. Only discrete, parameterless commands
/// make sense as key bindings; the arrow-key camera dolly is handled by
/// the rig itself and needs no entry here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Flip between day and night lighting.
    ToggleLighting,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::ToggleLighting => ViewerCommand::ToggleLighting,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings =
            HashMap::from([("KeyN".into(), KeyCommandTag::ToggleLighting)]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).copied().map(KeyCommandTag::to_command)
    }
}

// ─────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`ViewerCommand`]s.
///
/// Owns transient pointer state (cursor position, primary-button drag).
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// for cmd in input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last known cursor position in physical pixels.
    last_pos: Option<(f32, f32)>,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
}

impl InputProcessor {
    /// Create a new processor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_pos: None,
            mouse_pressed: false,
        }
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Process a raw input event and return the resulting commands in
    /// dispatch order.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::CursorEntered => vec![ViewerCommand::PointerEnter],
            InputEvent::CursorLeft => {
                self.last_pos = None;
                vec![ViewerCommand::PointerLeave]
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
                Vec::new()
            }
            InputEvent::Scroll { delta } => {
                vec![ViewerCommand::Zoom { delta }]
            }
        }
    }

    /// Cursor moved — always a hover probe, plus an orbit drag while the
    /// primary button is held.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Vec<ViewerCommand> {
        let (delta_x, delta_y) = self
            .last_pos
            .map_or((0.0, 0.0), |(lx, ly)| (x - lx, y - ly));
        self.last_pos = Some((x, y));

        let mut commands = vec![ViewerCommand::PointerMove { x, y }];
        if self.mouse_pressed && (delta_x != 0.0 || delta_y != 0.0) {
            commands.push(ViewerCommand::RotateCamera {
                delta: Vec2::new(delta_x, delta_y),
            });
        }
        commands
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_move_produces_pointer_move() {
        let mut p = InputProcessor::new();
        let cmds = p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        assert_eq!(cmds, vec![ViewerCommand::PointerMove { x: 10.0, y: 20.0 }]);
    }

    #[test]
    fn dragging_adds_rotate_command() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let cmds = p.handle_event(InputEvent::CursorMoved { x: 13.0, y: 21.0 });
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            ViewerCommand::RotateCamera {
                delta: Vec2::new(3.0, 1.0)
            }
        );
    }

    #[test]
    fn release_stops_rotation() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        let _ = p.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let cmds = p.handle_event(InputEvent::CursorMoved { x: 5.0, y: 5.0 });
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn enter_and_leave_map_to_audio_commands() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::CursorEntered),
            vec![ViewerCommand::PointerEnter]
        );
        assert_eq!(
            p.handle_event(InputEvent::CursorLeft),
            vec![ViewerCommand::PointerLeave]
        );
    }

    #[test]
    fn scroll_maps_to_zoom() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 1.5 }),
            vec![ViewerCommand::Zoom { delta: 1.5 }]
        );
    }

    #[test]
    fn default_bindings_toggle_lighting_on_key_n() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.lookup("KeyN"),
            Some(ViewerCommand::ToggleLighting)
        );
        assert_eq!(bindings.lookup("ArrowUp"), None);
    }
}
