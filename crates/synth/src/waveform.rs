//! Waveform shapes and tone components

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Periodic waveform shape.
///
/// Names that are not one of the known shapes parse to `Unknown` and
/// synthesize as silence rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WaveformKind {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Unknown(String),
}

impl WaveformKind {
    pub const KNOWN: [WaveformKind; 3] = [WaveformKind::Sine, WaveformKind::Square, WaveformKind::Sawtooth];

    pub fn name(&self) -> &str {
        match self {
            WaveformKind::Sine => "sine",
            WaveformKind::Square => "square",
            WaveformKind::Sawtooth => "sawtooth",
            WaveformKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WaveformKind::Unknown(_))
    }

    /// Unit-amplitude value at time `t` seconds
    pub fn evaluate(&self, frequency: f64, phase: f64, t: f64) -> f64 {
        match self {
            WaveformKind::Sine => (2.0 * PI * frequency * t + phase).sin(),
            WaveformKind::Square => sign((2.0 * PI * frequency * t + phase).sin()),
            WaveformKind::Sawtooth => {
                let u = (t * frequency + phase / (2.0 * PI)).rem_euclid(1.0);
                2.0 * u - 1.0
            }
            WaveformKind::Unknown(_) => 0.0,
        }
    }
}

/// -1, 0 or 1. Unlike `f64::signum`, zero (of either sign) maps to 0.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl From<&str> for WaveformKind {
    fn from(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "sine" | "sin" => WaveformKind::Sine,
            "square" => WaveformKind::Square,
            "sawtooth" | "saw" => WaveformKind::Sawtooth,
            _ => WaveformKind::Unknown(name.to_string()),
        }
    }
}

impl From<String> for WaveformKind {
    fn from(name: String) -> Self {
        WaveformKind::from(name.as_str())
    }
}

impl From<WaveformKind> for String {
    fn from(kind: WaveformKind) -> Self {
        kind.name().to_string()
    }
}

impl FromStr for WaveformKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WaveformKind::from(s))
    }
}

impl fmt::Display for WaveformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One periodic component of a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub amplitude: f64,
    /// Hz
    pub frequency: f64,
    /// Radians
    #[serde(default)]
    pub phase: f64,
    #[serde(default)]
    pub kind: WaveformKind,
}

impl Tone {
    pub fn new(kind: WaveformKind, amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            kind,
        }
    }

    pub fn sine(amplitude: f64, frequency: f64) -> Self {
        Self::new(WaveformKind::Sine, amplitude, frequency, 0.0)
    }

    pub fn square(amplitude: f64, frequency: f64) -> Self {
        Self::new(WaveformKind::Square, amplitude, frequency, 0.0)
    }

    pub fn sawtooth(amplitude: f64, frequency: f64) -> Self {
        Self::new(WaveformKind::Sawtooth, amplitude, frequency, 0.0)
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Value of this tone at time `t` seconds
    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * self.kind.evaluate(self.frequency, self.phase, t)
    }
}
