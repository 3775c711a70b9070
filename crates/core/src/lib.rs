//! wavelab core - complex arithmetic, FFT and spectrum analysis
//!
//! This crate provides the numerical half of the wavelab pipeline: a small
//! complex value type, a radix-2 Cooley-Tukey FFT, sample buffers with
//! zero-padding, and the mapping from a real signal to its positive-frequency
//! magnitude spectrum.

pub mod buffer;
pub mod complex;
pub mod error;
pub mod fft;
pub mod spectrum;

pub use error::{CoreError, Result};
pub use spectrum::analyze;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        buffer::{next_power_of_two, SampleBuffer},
        complex::Complex,
        error::{CoreError, Result},
        fft::{fft, fft_recursive, window::Window, FftPlan},
        spectrum::{analyze, AnalyzerConfig, Spectrum, SpectrumAnalyzer},
    };
}
