//! WAV file I/O

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;
use wavelab_core::buffer::SampleBuffer;

/// Write samples as mono 32-bit float WAV
pub fn write_wav(buffer: &SampleBuffer, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate().round() as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    for &sample in buffer.data() {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    info!("Wrote {} samples to {:?}", buffer.len(), path);
    Ok(())
}

/// Read the first channel of a WAV file, scaled to [-1, 1] for integer formats
pub fn read_wav(path: &Path) -> Result<SampleBuffer> {
    let mut reader = hound::WavReader::open(path).with_context(|| format!("Failed to open WAV file: {:?}", path))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .context("Failed to read audio samples")?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                bail!("Unsupported bit depth: {}", spec.bits_per_sample);
            }
            let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<Result<_, _>>()
                .context("Failed to read audio samples")?
        }
    };

    let samples: Vec<f64> = interleaved.into_iter().step_by(channels).collect();
    info!("Read {} samples from {:?}", samples.len(), path);

    Ok(SampleBuffer::from_data(samples, spec.sample_rate as f64)?)
}
