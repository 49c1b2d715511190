//! Configuration management for dubmux.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Per-field defaults, so a partial file is always valid
//! - Atomic file writes (write to temp, then rename)
//!
//! # Example
//!
//! ```no_run
//! use dubmux_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("settings.toml");
//! config.load_or_default().unwrap();
//!
//! println!("Downloader: {}", config.settings().tools.downloader);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, DownloadSettings, LoggingSettings, MuxSettings, Settings, ToolSettings};
