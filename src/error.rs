//! Error types for the edges of the system.
//!
//! The music core itself never returns these: a bad track is dropped and a
//! bad command is ignored, both with a logged warning. Errors only surface
//! where the host touches the outside world (files, devices, show configs).

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading an audio asset from disk
#[derive(Error, Debug)]
pub enum AssetError {
    /// WAV decoding failed (missing file, bad header, truncated data)
    #[error("Failed to decode WAV {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// File decoded but contains no usable audio
    #[error("Audio asset {0} is empty")]
    Empty(PathBuf),
}

/// Errors in host-supplied configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Spectrum resolution must be at least 1")]
    ZeroResolution,

    #[error("Spectrum clamp must be positive and finite, got {0}")]
    InvalidClamp(f32),

    #[error("Spectrum window must be positive and finite, got {0}s")]
    InvalidWindow(f32),

    #[error("Spectrum power factor must be non-negative and finite, got {0}")]
    InvalidPowerFactor(f32),

    #[error("FFT size must be power of 2, got {0}")]
    FftSizeNotPowerOfTwo(usize),

    #[error("Start percent must be within [0, 1], got {0}")]
    InvalidStartPercent(f32),

    #[error("Failed to read show file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse show file: {0}")]
    Parse(String),
}

/// Errors opening or driving the audio output device
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("No audio output device found")]
    NoDevice,

    #[error("Failed to get audio config: {0}")]
    Config(String),

    #[error("Failed to build audio stream: {0}")]
    StreamBuild(String),

    #[error("Failed to start audio stream: {0}")]
    StreamPlay(String),
}
