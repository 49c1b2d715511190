//! Data models for dubmux jobs.

mod jobs;

pub use jobs::{AudioTrack, JobPaths, JobSpec, PRIMARY_FILE_NAME};
