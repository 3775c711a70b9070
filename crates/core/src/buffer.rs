//! Sample buffer management and zero-padding

use crate::{complex::Complex, CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Smallest power of two greater than or equal to `len`.
///
/// Starts at 1 and doubles, so `0` and `1` both map to `1`.
pub fn next_power_of_two(len: usize) -> usize {
    let mut n = 1;
    while n < len {
        n <<= 1;
    }
    n
}

/// Real-valued time-domain samples taken at a fixed sample rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBuffer {
    data: Vec<f64>,
    sample_rate: f64,
}

impl SampleBuffer {
    /// Create a buffer of `len` zero samples
    pub fn new(len: usize, sample_rate: f64) -> Result<Self> {
        Self::from_data(vec![0.0; len], sample_rate)
    }

    /// Create a buffer from existing data
    pub fn from_data(data: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(CoreError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(Self { data, sample_rate })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Duration covered by the samples, in seconds
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.sample_rate
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a mutable reference to the underlying data
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }

    /// Largest absolute sample value, 0 for an empty buffer
    pub fn peak_amplitude(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    /// Copy of the samples extended with zeros to the next power of two
    pub fn zero_padded(&self) -> Vec<Complex> {
        pad_to_complex(&self.data)
    }
}

impl Index<usize> for SampleBuffer {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl AsRef<[f64]> for SampleBuffer {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

/// Lift real samples onto the real axis, zero-padded to the next power of two
pub fn pad_to_complex(samples: &[f64]) -> Vec<Complex> {
    let padded_len = next_power_of_two(samples.len());
    let mut out = Vec::with_capacity(padded_len);
    out.extend(samples.iter().map(|&s| Complex::from_real(s)));
    out.resize(padded_len, Complex::ZERO);
    out
}
