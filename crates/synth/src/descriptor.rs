//! Waveform descriptor and its validation

use crate::{
    waveform::{Tone, WaveformKind},
    Result, SynthError,
};
use serde::{Deserialize, Serialize};

/// Upper bound on synthesized buffer length (about 46 minutes at 48 kHz)
pub const MAX_SAMPLES: usize = 1 << 27;

/// Everything needed to synthesize one signal buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformDescriptor {
    /// Samples per second
    pub sample_rate: u32,
    /// Seconds
    pub duration: f64,
    /// Peak amplitude of the additive uniform noise
    #[serde(default)]
    pub noise: f64,
    /// Components summed sample by sample
    #[serde(default)]
    pub tones: Vec<Tone>,
}

impl WaveformDescriptor {
    pub fn new(sample_rate: u32, duration: f64) -> Self {
        Self {
            sample_rate,
            duration,
            noise: 0.0,
            tones: Vec::new(),
        }
    }

    /// Descriptor with a single tone
    pub fn single(
        kind: WaveformKind,
        amplitude: f64,
        frequency: f64,
        phase: f64,
        sample_rate: u32,
        duration: f64,
        noise: f64,
    ) -> Self {
        Self::new(sample_rate, duration)
            .with_tone(Tone::new(kind, amplitude, frequency, phase))
            .with_noise(noise)
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tones.push(tone);
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// `floor(sample_rate * duration)`, saturating for lengths past `usize`
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as f64 * self.duration).floor() as usize
    }

    /// Check every field before any buffer is allocated
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate { rate: self.sample_rate });
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SynthError::InvalidDuration { duration: self.duration });
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(SynthError::InvalidNoise { noise: self.noise });
        }

        for (index, tone) in self.tones.iter().enumerate() {
            let fields = [
                ("amplitude", tone.amplitude),
                ("frequency", tone.frequency),
                ("phase", tone.phase),
            ];
            if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(SynthError::InvalidTone {
                    index,
                    msg: format!("{} must be finite, got {}", name, value),
                });
            }
        }

        let count = (self.sample_rate as f64 * self.duration).floor();
        if count > MAX_SAMPLES as f64 {
            return Err(SynthError::TooManySamples {
                sample_rate: self.sample_rate,
                duration: self.duration,
                max: MAX_SAMPLES,
            });
        }
        if self.num_samples() == 0 {
            return Err(SynthError::EmptySignal {
                sample_rate: self.sample_rate,
                duration: self.duration,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_builder() {
        let d = WaveformDescriptor::single(WaveformKind::Square, 0.5, 10.0, 0.1, 100, 2.0, 0.2);
        assert_eq!(d.tones.len(), 1);
        assert_eq!(d.tones[0].kind, WaveformKind::Square);
        assert_eq!(d.noise, 0.2);
        assert_eq!(d.num_samples(), 200);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_num_samples_floors() {
        let d = WaveformDescriptor::new(10, 0.35);
        assert_eq!(d.num_samples(), 3);
    }

    #[test]
    fn test_validation_errors() {
        let ok = WaveformDescriptor::new(256, 1.0).with_tone(Tone::sine(1.0, 5.0));

        let mut d = ok.clone();
        d.sample_rate = 0;
        assert!(matches!(d.validate(), Err(SynthError::InvalidSampleRate { rate: 0 })));

        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut d = ok.clone();
            d.duration = duration;
            assert!(matches!(d.validate(), Err(SynthError::InvalidDuration { .. })));
        }

        let d = ok.clone().with_noise(-0.1);
        assert!(matches!(d.validate(), Err(SynthError::InvalidNoise { .. })));

        let d = ok.clone().with_tone(Tone::sine(f64::NAN, 1.0));
        assert!(matches!(d.validate(), Err(SynthError::InvalidTone { index: 1, .. })));

        let d = WaveformDescriptor::new(10, 0.05);
        assert!(matches!(d.validate(), Err(SynthError::EmptySignal { .. })));
    }

    #[test]
    fn test_oversized_signal_is_rejected() {
        for (rate, duration) in [(u32::MAX, 1e300), (48_000, 1e9)] {
            let d = WaveformDescriptor::new(rate, duration).with_tone(Tone::sine(1.0, 5.0));
            assert!(matches!(
                d.validate(),
                Err(SynthError::TooManySamples { max: MAX_SAMPLES, .. })
            ));
        }

        let at_limit = WaveformDescriptor::new(1 << 20, (MAX_SAMPLES >> 20) as f64);
        assert_eq!(at_limit.num_samples(), MAX_SAMPLES);
        assert!(!matches!(at_limit.validate(), Err(SynthError::TooManySamples { .. })));

        let past_limit = WaveformDescriptor::new(1 << 20, (MAX_SAMPLES >> 20) as f64 + 1.0);
        assert!(matches!(past_limit.validate(), Err(SynthError::TooManySamples { .. })));
    }

    #[test]
    fn test_toml_descriptor() {
        let text = r#"
            sample_rate = 256
            duration = 1.0
            noise = 0.1

            [[tones]]
            amplitude = 1.0
            frequency = 5.0
            kind = "sine"

            [[tones]]
            amplitude = 0.5
            frequency = 20.0
            phase = 1.5
            kind = "square"
        "#;

        let d: WaveformDescriptor = toml::from_str(text).unwrap();
        assert_eq!(d.sample_rate, 256);
        assert_eq!(d.tones.len(), 2);
        assert_eq!(d.tones[0].phase, 0.0);
        assert_eq!(d.tones[1].kind, WaveformKind::Square);
        assert!(d.validate().is_ok());

        let round_trip: WaveformDescriptor = toml::from_str(&toml::to_string(&d).unwrap()).unwrap();
        assert_eq!(round_trip, d);
    }
}
