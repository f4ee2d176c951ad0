//! Video encoding of a rendered frame sequence.

/// `ffmpeg` command construction (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
