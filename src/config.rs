use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::physics::Bounds;
use crate::session::SessionConfig;
use crate::ui::DEFAULT_GLYPH;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub cursor_glyph: String,
    /// Hold time for keys on terminals without release events
    pub key_hold_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            cursor_glyph: DEFAULT_GLYPH.to_string(),
            key_hold_ms: 700,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [("canvas_width", self.canvas_width), ("canvas_height", self.canvas_height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")));
            }
        }
        if self.cursor_glyph.is_empty() {
            return Err(ConfigError::Invalid("cursor_glyph must not be empty".into()));
        }
        Ok(())
    }

    /// Session settings; `release_events` tells whether the terminal reports
    /// key releases, in which case keys are never expired.
    pub fn session_config(&self, release_events: bool) -> SessionConfig {
        SessionConfig {
            bounds: Bounds::new(self.canvas_width, self.canvas_height),
            key_hold: (!release_events).then(|| Duration::from_millis(self.key_hold_ms)),
        }
    }
}

pub trait ConfigStore {
    /// Missing file yields the default config.
    fn load(&self) -> Result<Config, ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "glide") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("glide_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(self.io_error(e)),
        };

        let cfg: Config = serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "canvas_width": 320, "canvas_height": 240, "cursor_glyph": "@", "key_hold_ms": 250 }"#,
        )
        .unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(
            cfg,
            Config {
                canvas_width: 320.0,
                canvas_height: 240.0,
                cursor_glyph: "@".into(),
                key_hold_ms: 250,
            }
        );
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "canvas_width": 400 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load().unwrap();
        assert_eq!(cfg.canvas_width, 400.0);
        assert_eq!(cfg.canvas_height, 600.0);
        assert_eq!(cfg.cursor_glyph, DEFAULT_GLYPH);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ConfigError::Parse { .. })
        );
    }

    #[test]
    fn non_positive_canvas_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "canvas_height": 0 }"#).unwrap();

        assert_matches!(
            FileConfigStore::with_path(&path).load(),
            Err(ConfigError::Invalid(_))
        );
    }

    #[test]
    fn session_config_expires_keys_only_without_release_events() {
        let cfg = Config::default();
        assert_eq!(cfg.session_config(true).key_hold, None);
        assert_eq!(
            cfg.session_config(false).key_hold,
            Some(Duration::from_millis(700))
        );
        assert_eq!(cfg.session_config(true).bounds, Bounds::new(800.0, 600.0));
    }
}
