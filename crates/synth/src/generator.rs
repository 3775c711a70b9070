//! Sample generation from a descriptor

use crate::{descriptor::WaveformDescriptor, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tracing::debug;
use wavelab_core::buffer::SampleBuffer;

/// Reproducible noise source for [`synthesize_with`]
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Synthesize with fresh, unseeded noise. Every call yields a different buffer
/// unless the descriptor's noise level is zero.
pub fn synthesize(descriptor: &WaveformDescriptor) -> Result<SampleBuffer> {
    synthesize_with(descriptor, &mut rand::thread_rng())
}

/// Synthesize `floor(sample_rate * duration)` samples, drawing noise from `rng`.
///
/// Each sample is the sum of every tone at `t = i / sample_rate`, plus
/// `(U - 0.5) * noise * 2` with `U` uniform in `[0, 1)`.
pub fn synthesize_with<R: Rng + ?Sized>(descriptor: &WaveformDescriptor, rng: &mut R) -> Result<SampleBuffer> {
    descriptor.validate()?;

    let num_samples = descriptor.num_samples();
    let sample_rate = descriptor.sample_rate as f64;
    debug!(
        "Synthesizing {} samples from {} tone(s), noise {}",
        num_samples,
        descriptor.tones.len(),
        descriptor.noise
    );

    let mut samples = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let t = i as f64 / sample_rate;
        let mut value: f64 = descriptor.tones.iter().map(|tone| tone.sample(t)).sum();
        if descriptor.noise > 0.0 {
            value += (rng.gen::<f64>() - 0.5) * descriptor.noise * 2.0;
        }
        samples.push(value);
    }

    Ok(SampleBuffer::from_data(samples, sample_rate)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        waveform::{Tone, WaveformKind},
        SynthError,
    };
    use quickcheck_macros::quickcheck;
    use wavelab_core::analyze;

    fn single(kind: WaveformKind, amplitude: f64, frequency: f64) -> WaveformDescriptor {
        WaveformDescriptor::single(kind, amplitude, frequency, 0.0, 256, 1.0, 0.0)
    }

    #[test]
    fn test_length_is_floor_of_rate_times_duration() {
        let d = WaveformDescriptor::new(1000, 0.0125).with_tone(Tone::sine(1.0, 50.0));
        let buffer = synthesize(&d).unwrap();
        assert_eq!(buffer.len(), 12);
        assert_eq!(buffer.sample_rate(), 1000.0);
    }

    #[test]
    fn test_sine_stays_within_amplitude() {
        let buffer = synthesize(&single(WaveformKind::Sine, 0.7, 13.0)).unwrap();
        assert!(buffer.data().iter().all(|s| s.abs() <= 0.7 + 1e-12));
    }

    #[test]
    fn test_square_is_exactly_plus_minus_amplitude_or_zero() {
        let buffer = synthesize(&single(WaveformKind::Square, 0.4, 8.0)).unwrap();
        assert!(buffer.data().iter().all(|&s| s == 0.4 || s == -0.4 || s == 0.0));
        // t = 0 with zero phase is an exact crossing
        assert_eq!(buffer[0], 0.0);
        assert!(buffer.data().iter().any(|&s| s == 0.4));
        assert!(buffer.data().iter().any(|&s| s == -0.4));
    }

    #[test]
    fn test_sawtooth_within_amplitude() {
        let buffer = synthesize(&single(WaveformKind::Sawtooth, 1.5, 3.0)).unwrap();
        assert!(buffer.data().iter().all(|s| (-1.5..=1.5).contains(s)));
        assert_eq!(buffer[0], -1.5);
    }

    #[test]
    fn test_unknown_kind_is_silent() {
        let buffer = synthesize(&single(WaveformKind::from("triangle"), 1.0, 3.0)).unwrap();
        assert!(buffer.data().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tones_are_summed() {
        let a = Tone::sine(1.0, 5.0);
        let b = Tone::sawtooth(0.5, 11.0).with_phase(0.3);
        let d = WaveformDescriptor::new(128, 0.5).with_tone(a.clone()).with_tone(b.clone());
        let buffer = synthesize(&d).unwrap();
        for (i, &s) in buffer.data().iter().enumerate() {
            let t = i as f64 / 128.0;
            assert!((s - (a.sample(t) + b.sample(t))).abs() < 1e-12);
        }
    }

    #[test]
    fn test_noise_only_signal_is_bounded() {
        let d = WaveformDescriptor::new(512, 1.0).with_noise(0.25);
        let buffer = synthesize_with(&d, &mut seeded_rng(7)).unwrap();
        assert!(buffer.data().iter().all(|s| (-0.25..0.25).contains(s)));
        assert!(buffer.data().iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let d = single(WaveformKind::Sine, 1.0, 5.0).with_noise(0.3);
        let a = synthesize_with(&d, &mut seeded_rng(42)).unwrap();
        let b = synthesize_with(&d, &mut seeded_rng(42)).unwrap();
        let c = synthesize_with(&d, &mut seeded_rng(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unseeded_noise_differs_between_calls() {
        let d = single(WaveformKind::Sine, 1.0, 5.0).with_noise(0.3);
        assert_ne!(synthesize(&d).unwrap(), synthesize(&d).unwrap());
    }

    #[test]
    fn test_invalid_descriptor_is_rejected() {
        let d = WaveformDescriptor::new(0, 1.0);
        assert!(matches!(synthesize(&d), Err(SynthError::InvalidSampleRate { .. })));
        let d = WaveformDescriptor::new(100, 0.001);
        assert!(matches!(synthesize(&d), Err(SynthError::EmptySignal { .. })));
        let d = WaveformDescriptor::new(u32::MAX, 1e300).with_tone(Tone::sine(1.0, 5.0));
        assert!(matches!(synthesize(&d), Err(SynthError::TooManySamples { .. })));
    }

    #[test]
    fn test_five_hertz_sine_scenario() {
        let d = WaveformDescriptor::single(WaveformKind::Sine, 1.0, 5.0, 0.0, 256, 1.0, 0.0);
        let buffer = synthesize(&d).unwrap();
        assert_eq!(buffer.len(), 256);

        let spectrum = analyze(buffer.data(), 256.0).unwrap();
        assert_eq!(spectrum.padded_len, 256);
        let (freq, mag) = spectrum.peak().unwrap();
        assert!((freq - 5.0).abs() < 1e-9);
        assert!((mag - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_square_spectrum_has_odd_harmonics() {
        // A small phase offset keeps the edges between samples
        let d = WaveformDescriptor::single(WaveformKind::Square, 1.0, 8.0, 0.1, 256, 1.0, 0.0);
        let buffer = synthesize(&d).unwrap();
        let spectrum = analyze(buffer.data(), 256.0).unwrap();
        // Bin width is 1 Hz: fundamental at 8, third harmonic at 24 is about a third as strong
        let fundamental = spectrum.magnitudes[8];
        let third = spectrum.magnitudes[24];
        let second = spectrum.magnitudes[16];
        assert!((fundamental - 4.0 / std::f64::consts::PI).abs() < 0.1);
        assert!((third / fundamental - 1.0 / 3.0).abs() < 0.05);
        assert!(second < 0.05);
    }

    #[quickcheck]
    fn prop_sine_peak_within_one_bin(freq_tenths: u16, amp_hundredths: u8) -> bool {
        // 2.0 Hz to 100.0 Hz at 1 kHz for 2 s
        let frequency = 2.0 + (freq_tenths % 980) as f64 / 10.0;
        let amplitude = 0.1 + amp_hundredths as f64 / 100.0;
        let d = WaveformDescriptor::single(WaveformKind::Sine, amplitude, frequency, 0.0, 1000, 2.0, 0.0);

        let buffer = synthesize(&d).unwrap();
        let spectrum = analyze(buffer.data(), 1000.0).unwrap();
        match spectrum.peak() {
            // Off-bin tones lose up to ~36% to rectangular scalloping
            Some((freq, mag)) => {
                (freq - frequency).abs() <= spectrum.bin_width() && mag <= amplitude * 1.1 && mag >= amplitude * 0.55
            }
            None => false,
        }
    }
}
