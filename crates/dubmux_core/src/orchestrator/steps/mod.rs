//! Pipeline step implementations.
//!
//! Each step handles one phase of the download-and-mux pipeline.

mod download_audio;
mod download_video;
mod mux;

pub use download_audio::DownloadAudioStep;
pub use download_video::DownloadVideoStep;
pub use mux::MuxStep;
