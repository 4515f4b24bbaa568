//! Configuration management for voice-note.
//!
//! Loads and saves the TOML configuration file from the platform config
//! directory, fills missing sections with defaults, writes atomically and
//! converts the result into the controller's [`RecordPolicy`].

use crate::{
    AppError, AppResult,
    config::{AmplitudeConfig, BackendConfig, GestureConfig, LockConfig, TimingConfig},
};

use voice_note_core::RecordPolicy;

use std::{
    fmt::Display,
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Gesture classification thresholds.
    #[serde(default)]
    pub gesture: GestureConfig,
    /// Slide-to-lock thresholds.
    #[serde(default)]
    pub lock: LockConfig,
    /// Display tick and duration ceilings.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Amplitude smoothing.
    #[serde(default)]
    pub amplitude: AmplitudeConfig,
    /// Simulated capture device.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating a default file there if
    /// it does not exist yet.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(config_path = ?path, "No config found, creating default");
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|e| config_error("read", e))?;
        let config: Config = toml::from_str(&contents).map_err(|e| config_error("parse", e))?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to `path` through a temp file and rename.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| config_error("serialize", e))?;

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir)?;
            debug!(config_dir = ?dir, "Created config directory");
        }

        // Rename is atomic on the same filesystem; a crash leaves only the .tmp.
        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| config_error("create", e))?;
        temp_file
            .write_all(contents.as_bytes())
            .and_then(|()| temp_file.sync_all())
            .map_err(|e| config_error("write", e))?;
        drop(temp_file);
        fs::rename(&temp_path, path).map_err(|e| config_error("replace", e))?;

        info!(config_path = ?path, "Configuration saved");

        Ok(())
    }

    /// Build and validate the controller policy.
    #[track_caller]
    pub fn to_policy(&self) -> AppResult<RecordPolicy> {
        let policy = RecordPolicy {
            gesture: (&self.gesture).into(),
            lock: (&self.lock).into(),
            timing: (&self.timing).into(),
            amplitude: (&self.amplitude).into(),
        };

        policy.validate().map_err(|e| config_error("validate", e))?;

        Ok(policy)
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "voice-note", "Voice-Note").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[track_caller]
fn config_error(action: &str, e: impl Display) -> AppError {
    AppError::ConfigError {
        reason: format!("Failed to {action} config: {e}"),
        location: ErrorLocation::from(Location::caller()),
    }
}
