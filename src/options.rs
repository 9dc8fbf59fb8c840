//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (window, camera speeds, ambient audio, key
//! bindings) are consolidated here. Options serialize to/from TOML; every
//! sub-struct uses `#[serde(default)]` so partial files (e.g. only
//! overriding `[camera]`) work correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::input::KeyBindings;

/// Window creation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title.
    pub title: String,
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Maquette".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Camera projection and control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Rotation sensitivity multiplier (radians per pixel of drag).
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            rotate_speed: 0.01,
            zoom_speed: 0.05,
        }
    }
}

/// Ambient sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AudioOptions {
    /// Path to the looping ambient track played while the pointer is over
    /// the viewport. `None` disables sound.
    pub ambient_track: Option<String>,
}

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window creation parameters.
    pub window: WindowOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Ambient sound configuration.
    pub audio: AudioOptions,
    /// Keyboard binding options.
    pub keybindings: KeyBindings,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read, or
    /// [`ViewerError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        toml::from_str(&content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails, or
    /// [`ViewerError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewerCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
fovy = 60.0

[audio]
ambient_track = "assets/sound/forest.ogg"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.window.title, "Maquette");
        assert_eq!(
            opts.audio.ambient_track.as_deref(),
            Some("assets/sound/forest.ogg")
        );
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyN"),
            Some(ViewerCommand::ToggleLighting)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }
}
