//! Configuration management for wavelab tools

use crate::common::{load_config, save_config};
use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wavelab_core::prelude::{AnalyzerConfig, Window};
use wavelab_synth::{WaveformDescriptor, WaveformKind};

/// Recompute cadence for the live loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Milliseconds between recomputations
    pub interval_ms: u64,
    /// Number of recomputations before stopping
    pub ticks: u32,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            ticks: 10,
        }
    }
}

/// Everything a session file can describe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed noise seed; fresh noise on every call when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub signal: WaveformDescriptor,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub live: LiveConfig,
}

impl SessionConfig {
    pub fn new(signal: WaveformDescriptor) -> Self {
        Self {
            seed: None,
            signal,
            analyzer: AnalyzerConfig::default(),
            live: LiveConfig::default(),
        }
    }

    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path)
    }

    /// Save configuration to a TOML or JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }
}

/// Signal parameters shared by every subcommand.
///
/// `--config` takes precedence; the remaining flags describe a single tone.
#[derive(Args, Debug, Clone)]
pub struct SignalArgs {
    /// Session file (TOML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Waveform shape: sine, square or sawtooth
    #[arg(short, long, default_value = "sine")]
    pub waveform: String,

    /// Peak amplitude
    #[arg(short, long, default_value = "1.0")]
    pub amplitude: f64,

    /// Frequency in Hz
    #[arg(short, long, default_value = "5.0")]
    pub frequency: f64,

    /// Phase in radians
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub phase: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "256")]
    pub sample_rate: u32,

    /// Duration in seconds
    #[arg(short, long, default_value = "1.0")]
    pub duration: f64,

    /// Amplitude of additive uniform noise
    #[arg(short, long, default_value = "0.0")]
    pub noise: f64,

    /// Seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Analysis window: rectangular, hann, hamming or blackman
    #[arg(long)]
    pub window: Option<Window>,
}

impl SignalArgs {
    /// Resolve the flags into a session, loading `--config` when given.
    /// `--seed` and `--window` override the file.
    pub fn to_session(&self) -> Result<SessionConfig> {
        let mut session = match &self.config {
            Some(path) => SessionConfig::from_file(path)?,
            None => SessionConfig::new(WaveformDescriptor::single(
                WaveformKind::from(self.waveform.as_str()),
                self.amplitude,
                self.frequency,
                self.phase,
                self.sample_rate,
                self.duration,
                self.noise,
            )),
        };

        if self.seed.is_some() {
            session.seed = self.seed;
        }
        if let Some(window) = self.window {
            session.analyzer.window = window;
        }

        Ok(session)
    }
}
