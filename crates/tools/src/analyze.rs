//! Spectrum reporting and export

use crate::common::FileFormat;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;
use wavelab_core::prelude::{AnalyzerConfig, SampleBuffer, Spectrum, SpectrumAnalyzer};

/// One spectral bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub frequency: f64,
    pub magnitude: f64,
}

/// Summary of one analysis pass
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub sample_count: usize,
    pub padded_len: usize,
    pub bin_width: f64,
    pub peak_amplitude: f64,
    pub rms: f64,
    pub peak: Option<Bin>,
    /// Strongest bins, largest first
    pub strongest: Vec<Bin>,
    #[serde(skip)]
    pub spectrum: Spectrum,
}

impl AnalysisResult {
    pub fn new(buffer: &SampleBuffer, spectrum: Spectrum, top: usize) -> Self {
        let peak = spectrum.peak().map(|(frequency, magnitude)| Bin { frequency, magnitude });

        Self {
            sample_count: buffer.len(),
            padded_len: spectrum.padded_len,
            bin_width: spectrum.bin_width(),
            peak_amplitude: buffer.peak_amplitude(),
            rms: rms(buffer.data()),
            peak,
            strongest: strongest_bins(&spectrum, top),
            spectrum,
        }
    }
}

/// Run the analyzer over a buffer and summarise the result
pub fn analyze_buffer(buffer: &SampleBuffer, config: &AnalyzerConfig, top: usize) -> Result<AnalysisResult> {
    let mut analyzer = SpectrumAnalyzer::new(config.clone());
    let spectrum = analyzer.analyze(buffer.data(), buffer.sample_rate())?;

    let result = AnalysisResult::new(buffer, spectrum, top);
    if let Some(peak) = result.peak {
        info!("Peak at {:.3} Hz, magnitude {:.4}", peak.frequency, peak.magnitude);
    }
    Ok(result)
}

fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

/// The `count` bins with the largest magnitude, largest first
pub fn strongest_bins(spectrum: &Spectrum, count: usize) -> Vec<Bin> {
    let mut bins: Vec<Bin> = spectrum
        .bins()
        .map(|(frequency, magnitude)| Bin { frequency, magnitude })
        .collect();
    bins.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    bins.truncate(count);
    bins
}

/// `frequency,magnitude` lines with a header
pub fn spectrum_csv(spectrum: &Spectrum) -> String {
    let mut out = String::from("frequency,magnitude\n");
    for (frequency, magnitude) in spectrum.bins() {
        let _ = writeln!(out, "{},{}", frequency, magnitude);
    }
    out
}

/// Write the full spectrum as JSON or CSV
pub fn write_spectrum(spectrum: &Spectrum, path: &Path) -> Result<()> {
    let content = match FileFormat::from_path(path) {
        Some(FileFormat::Json) => serde_json::to_string_pretty(spectrum).context("Failed to serialize spectrum")?,
        Some(FileFormat::Csv) => spectrum_csv(spectrum),
        _ => bail!("Spectrum output must be .json or .csv: {:?}", path),
    };

    std::fs::write(path, content).with_context(|| format!("Failed to write spectrum: {:?}", path))?;
    info!("Wrote {} bins to {:?}", spectrum.len(), path);
    Ok(())
}
