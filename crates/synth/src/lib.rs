//! wavelab synth - parametric waveform synthesis
//!
//! Turns a [`WaveformDescriptor`] (one or more tones plus sample rate,
//! duration and noise level) into a real-valued [`SampleBuffer`] ready for
//! spectral analysis.
//!
//! [`SampleBuffer`]: wavelab_core::buffer::SampleBuffer

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod waveform;

pub use descriptor::{WaveformDescriptor, MAX_SAMPLES};
pub use error::{Result, SynthError};
pub use generator::{seeded_rng, synthesize, synthesize_with};
pub use waveform::{Tone, WaveformKind};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        descriptor::{WaveformDescriptor, MAX_SAMPLES},
        error::{Result, SynthError},
        generator::{seeded_rng, synthesize, synthesize_with},
        waveform::{Tone, WaveformKind},
    };
}
