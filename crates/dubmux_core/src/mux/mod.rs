//! Muxing module for ffmpeg integration.
//!
//! Converts the downloaded files of a job into ffmpeg command tokens.

mod options_builder;

pub use options_builder::{format_tokens_pretty, FfmpegOptionsBuilder};
