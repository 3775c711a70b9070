//! Sample buffer export

use crate::{common::FileFormat, wav::write_wav};
use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;
use wavelab_core::buffer::SampleBuffer;

/// `time,value` lines with a header
pub fn samples_csv(buffer: &SampleBuffer) -> String {
    let mut out = String::from("time,value\n");
    for (i, value) in buffer.data().iter().enumerate() {
        let _ = writeln!(out, "{},{}", i as f64 / buffer.sample_rate(), value);
    }
    out
}

/// Write samples as WAV, JSON or CSV depending on the extension
pub fn write_samples(buffer: &SampleBuffer, path: &Path) -> Result<()> {
    let content = match FileFormat::from_path(path) {
        Some(FileFormat::Wav) => return write_wav(buffer, path),
        Some(FileFormat::Json) => serde_json::to_string_pretty(buffer).context("Failed to serialize samples")?,
        Some(FileFormat::Csv) => samples_csv(buffer),
        _ => bail!("Sample output must be .wav, .json or .csv: {:?}", path),
    };

    std::fs::write(path, content).with_context(|| format!("Failed to write samples: {:?}", path))?;
    info!("Wrote {} samples to {:?}", buffer.len(), path);
    Ok(())
}
