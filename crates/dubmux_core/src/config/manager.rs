//! Config manager for loading and saving settings.
//!
//! Key features:
//! - Missing file means defaults, nothing is written implicitly
//! - Atomic writes (write to temp file, then rename)
//! - Commented output, one table per section

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_default()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Changes made here are only in memory until `save()` is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager, returning the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", self.config_path.display());
        Ok(())
    }

    /// Load config from file, keeping defaults if it doesn't exist.
    ///
    /// Returns whether a file was read.
    pub fn load_or_default(&mut self) -> ConfigResult<bool> {
        match self.load() {
            Ok(()) => Ok(true),
            Err(ConfigError::NotFound(path)) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                self.settings = Settings::default();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        tracing::debug!("Wrote config to {}", self.config_path.display());
        Ok(())
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# dubmux configuration\n");
        output.push_str("# Every key is optional; missing keys use built-in defaults.\n\n");

        for section in ConfigSection::ALL {
            let body = match section {
                ConfigSection::Tools => toml::to_string_pretty(&self.settings.tools)?,
                ConfigSection::Download => toml::to_string_pretty(&self.settings.download)?,
                ConfigSection::Mux => toml::to_string_pretty(&self.settings.mux)?,
                ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            };

            output.push_str(&format!("# {}\n", section.description()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        Ok(output)
    }

    /// Write content to config file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults_without_writing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dubmux").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        assert!(!manager.load_or_default().unwrap());

        assert_eq!(manager.settings(), &Settings::default());
        assert!(!config_path.exists());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("nope.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_preserves_existing_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(&config_path, "[tools]\nmedia_tool = \"/opt/ffmpeg/bin/ffmpeg\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        assert!(manager.load_or_default().unwrap());

        assert_eq!(manager.settings().tools.media_tool, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(manager.settings().tools.downloader, "yt-dlp");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(&config_path, "[tools\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        assert!(matches!(
            manager.load_or_default(),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn save_round_trips() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.settings_mut().download.extra_languages = vec!["audio_fr".to_string()];
        manager.settings_mut().mux.overwrite = false;
        manager.save().unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[tools]"));
        assert!(content.contains("[download]"));
        assert!(content.contains("[logging]"));

        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings(), manager.settings());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        ConfigManager::new(&config_path).save().unwrap();

        assert!(config_path.exists());
        assert!(!config_path.with_extension("toml.tmp").exists());
    }
}
