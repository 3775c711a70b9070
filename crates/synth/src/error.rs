//! Error types for wavelab synth

use thiserror::Error;

/// Synthesis error types
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: u32 },

    #[error("Invalid duration: {duration} (must be finite and > 0)")]
    InvalidDuration { duration: f64 },

    #[error("Invalid noise level: {noise} (must be finite and >= 0)")]
    InvalidNoise { noise: f64 },

    #[error("Invalid tone #{index}: {msg}")]
    InvalidTone { index: usize, msg: String },

    #[error("Signal has no samples: {sample_rate} Hz for {duration} s")]
    EmptySignal { sample_rate: u32, duration: f64 },

    #[error("Signal too long: {sample_rate} Hz for {duration} s exceeds {max} samples")]
    TooManySamples { sample_rate: u32, duration: f64, max: usize },

    #[error("Core error: {0}")]
    Core(#[from] wavelab_core::CoreError),
}

/// Result type for wavelab synth operations
pub type Result<T> = std::result::Result<T, SynthError>;
