//! Raw-event entry points for `ViewerEngine`.

use super::{ViewerCommand, ViewerEngine};
use crate::input::InputEvent;

impl ViewerEngine {
    /// Process a platform-agnostic input event.
    ///
    /// This is the primary pointer entry point. Consumers forward raw
    /// window events as [`InputEvent`] variants; the processor turns them
    /// into commands which are executed immediately.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        for command in self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Process a physical key press. `key` uses the
    /// `winit::keyboard::KeyCode` debug format (`"KeyN"`, `"ArrowUp"`).
    pub fn handle_key_press(&mut self, key: &str) {
        self.execute(ViewerCommand::KeyDown { key: key.into() });
    }
}
