//! Error types for wavelab core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: f64 },

    #[error("Empty input: at least one sample is required")]
    EmptyInput,

    #[error("FFT length must be a power of two, got {len}")]
    NotPowerOfTwo { len: usize },

    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type for wavelab core operations
pub type Result<T> = std::result::Result<T, CoreError>;
