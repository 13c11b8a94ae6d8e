//! # Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file) yields a working 640x480 window at 60 frames per second.
//!
//! ```toml
//! [render]
//! frame_cap = 144
//!
//! [window]
//! title = "viewer"
//! width = 1280
//! height = 720
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::Path;

use lumen_core::{LumenError, LumenResult, DEFAULT_FRAME_CAP};
use serde::{Deserialize, Serialize};

/// Render loop settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target frames per second. Must be greater than zero.
    pub frame_cap: i32,
    /// Log the measured frame rate once per second.
    pub log_fps: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_cap: DEFAULT_FRAME_CAP,
            log_fps: true,
        }
    }
}

/// Window creation hints, handed to whatever creates the window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct WindowConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Title bar text.
    pub title: String,
    /// Synchronise presentation with the display refresh.
    pub vsync: bool,
    /// Take input focus on creation.
    pub focused: bool,
    /// Draw the platform border and title bar.
    pub decorated: bool,
    /// Start maximized.
    pub maximized: bool,
    /// Allow the user to resize.
    pub resizable: bool,
    /// Start fullscreen on the primary monitor.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: String::from("lumen"),
            vsync: true,
            focused: true,
            decorated: true,
            maximized: false,
            resizable: true,
            fullscreen: false,
        }
    }
}

/// Log output settings, used by binaries that install a subscriber.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Colour the output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            ansi: true,
        }
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumenConfig {
    /// `[render]` table.
    pub render: RenderConfig,
    /// `[window]` table.
    pub window: WindowConfig,
    /// `[logging]` table.
    pub logging: LoggingConfig,
}

impl LumenConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` on malformed TOML or out-of-range values.
    pub fn from_toml_str(source: &str) -> LumenResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| LumenError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the file cannot be read or is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> LumenResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            LumenError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serializes back to TOML.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if serialization fails.
    pub fn to_toml_string(&self) -> LumenResult<String> {
        toml::to_string_pretty(self).map_err(|e| LumenError::InvalidConfiguration(e.to_string()))
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first offending value.
    pub fn validate(&self) -> LumenResult<()> {
        if self.render.frame_cap <= 0 {
            return Err(LumenError::InvalidConfiguration(format!(
                "invalid frame cap {}: should be greater than zero",
                self.render.frame_cap
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(LumenError::InvalidConfiguration(format!(
                "invalid window size {}x{}: both dimensions must be non-zero",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
