//! dubmux core - backend logic for the `dubmux` command.
//!
//! Downloads an episode plus alternate-language audio tracks with yt-dlp
//! and muxes everything into one Matroska file with ffmpeg. This crate has
//! no CLI dependencies; the binary lives in `dubmux_cli`.

pub mod config;
pub mod io;
pub mod languages;
pub mod locator;
pub mod logging;
pub mod models;
pub mod mux;
pub mod orchestrator;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
