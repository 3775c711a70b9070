//! Magnitude spectrum of a real signal

use crate::{
    buffer::pad_to_complex,
    complex::Complex,
    fft::{window::Window, FftPlan},
    CoreError, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::{hash_map::Entry, HashMap};
use tracing::debug;

/// Positive-frequency half of a real signal's spectrum.
///
/// `frequencies` and `magnitudes` are parallel and hold `padded_len / 2`
/// bins. Bin `k` sits at `k * sample_rate / padded_len` Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
    pub sample_rate: f64,
    pub original_len: usize,
    pub padded_len: usize,
}

impl Spectrum {
    /// Map a full-length FFT result to the positive-frequency half.
    ///
    /// `gain` divides out window attenuation; pass 1.0 for an unwindowed signal.
    fn from_transform(transform: &[Complex], sample_rate: f64, original_len: usize, gain: f64) -> Self {
        let n = transform.len();
        let bins = n / 2;
        let scale = 2.0 / (n as f64 * gain);

        let frequencies = (0..bins).map(|k| k as f64 * sample_rate / n as f64).collect();
        let magnitudes = transform[..bins].iter().map(|c| c.magnitude() * scale).collect();

        Self {
            frequencies,
            magnitudes,
            sample_rate,
            original_len,
            padded_len: n,
        }
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Spacing between adjacent bins in Hz
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.padded_len as f64
    }

    /// Highest representable frequency
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Bin with the largest magnitude as `(frequency, magnitude)`, first wins on ties
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_index().map(|k| (self.frequencies[k], self.magnitudes[k]))
    }

    pub fn peak_index(&self) -> Option<usize> {
        self.magnitudes
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (k, &m)| match best {
                Some((_, best_m)) if best_m >= m => best,
                _ => Some((k, m)),
            })
            .map(|(k, _)| k)
    }

    /// Iterate over `(frequency, magnitude)` pairs
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies.iter().copied().zip(self.magnitudes.iter().copied())
    }
}

fn validate(samples: &[f64], sample_rate: f64) -> Result<()> {
    if samples.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(CoreError::InvalidSampleRate { rate: sample_rate });
    }
    Ok(())
}

/// Zero-pad `samples` to the next power of two, transform them, and return
/// the positive-frequency magnitude spectrum.
pub fn analyze(samples: &[f64], sample_rate: f64) -> Result<Spectrum> {
    validate(samples, sample_rate)?;

    let mut data = pad_to_complex(samples);
    debug!("Padded {} samples to {}", samples.len(), data.len());

    let plan = FftPlan::new(data.len())?;
    plan.forward(&mut data)?;

    Ok(Spectrum::from_transform(&data, sample_rate, samples.len(), 1.0))
}

/// Analyzer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub window: Window,
}

/// Reusable analyzer that keeps one [`FftPlan`] per transform size.
///
/// With the default rectangular window its output is identical to [`analyze`].
#[derive(Debug, Default)]
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    plans: HashMap<usize, FftPlan>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            plans: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Number of distinct transform sizes planned so far
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    pub fn analyze(&mut self, samples: &[f64], sample_rate: f64) -> Result<Spectrum> {
        validate(samples, sample_rate)?;

        let window = self.config.window;
        let mut windowed = samples.to_vec();
        window.apply(&mut windowed);
        let gain = window.coherent_gain(samples.len());

        let mut data = pad_to_complex(&windowed);
        let n = data.len();
        let plan = match self.plans.entry(n) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(FftPlan::new(n)?),
        };
        plan.forward(&mut data)?;

        Ok(Spectrum::from_transform(&data, sample_rate, samples.len(), gain))
    }
}
