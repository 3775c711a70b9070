//! Periodic re-synthesis and analysis
//!
//! Each tick draws fresh noise, synthesizes a new buffer and analyzes it.
//! Ticks are independent; nothing but the latest frame is kept.

use crate::config::{LiveConfig, SessionConfig};
use anyhow::Result;
use rand::RngCore;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use wavelab_core::prelude::{SampleBuffer, Spectrum, SpectrumAnalyzer};
use wavelab_synth::{seeded_rng, synthesize_with, WaveformDescriptor};

/// Result of one recomputation
#[derive(Debug, Clone)]
pub struct Frame {
    pub tick: u32,
    pub samples: SampleBuffer,
    pub spectrum: Spectrum,
    pub elapsed: Duration,
}

pub struct LiveSession {
    descriptor: WaveformDescriptor,
    analyzer: SpectrumAnalyzer,
    live: LiveConfig,
    rng: Box<dyn RngCore>,
    tick: u32,
}

impl LiveSession {
    pub fn new(session: SessionConfig) -> Self {
        let rng: Box<dyn RngCore> = match session.seed {
            Some(seed) => Box::new(seeded_rng(seed)),
            None => Box::new(rand::thread_rng()),
        };

        Self {
            descriptor: session.signal,
            analyzer: SpectrumAnalyzer::new(session.analyzer),
            live: session.live,
            rng,
            tick: 0,
        }
    }

    pub fn live_config(&self) -> &LiveConfig {
        &self.live
    }

    /// Synthesize and analyze once
    pub fn tick(&mut self) -> Result<Frame> {
        let start = Instant::now();
        let samples = synthesize_with(&self.descriptor, &mut *self.rng)?;
        let spectrum = self.analyzer.analyze(samples.data(), samples.sample_rate())?;

        let frame = Frame {
            tick: self.tick,
            samples,
            spectrum,
            elapsed: start.elapsed(),
        };
        debug!("Tick {} computed in {:?}", frame.tick, frame.elapsed);

        self.tick += 1;
        Ok(frame)
    }

    /// Run the configured number of ticks, sleeping out the rest of each interval
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&Frame),
    {
        let interval = Duration::from_millis(self.live.interval_ms);
        info!("Running {} ticks every {:?}", self.live.ticks, interval);

        for _ in 0..self.live.ticks {
            let frame = self.tick()?;
            on_frame(&frame);

            if let Some(remaining) = interval.checked_sub(frame.elapsed) {
                thread::sleep(remaining);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavelab_synth::{Tone, WaveformKind};

    fn session(seed: Option<u64>, noise: f64) -> SessionConfig {
        let signal = WaveformDescriptor::single(WaveformKind::Sine, 1.0, 5.0, 0.0, 256, 1.0, noise);
        let mut session = SessionConfig::new(signal);
        session.seed = seed;
        session.live = LiveConfig {
            interval_ms: 0,
            ticks: 4,
        };
        session
    }

    #[test]
    fn test_ticks_count_up() {
        let mut live = LiveSession::new(session(None, 0.0));
        assert_eq!(live.tick().unwrap().tick, 0);
        assert_eq!(live.tick().unwrap().tick, 1);
    }

    #[test]
    fn test_each_tick_gets_fresh_noise() {
        let mut live = LiveSession::new(session(Some(1), 0.2));
        let a = live.tick().unwrap();
        let b = live.tick().unwrap();
        assert_ne!(a.samples, b.samples);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let mut first = LiveSession::new(session(Some(5), 0.2));
        let mut second = LiveSession::new(session(Some(5), 0.2));
        for _ in 0..3 {
            assert_eq!(first.tick().unwrap().samples, second.tick().unwrap().samples);
        }
    }

    #[test]
    fn test_run_reports_every_frame() {
        let mut live = LiveSession::new(session(Some(3), 0.05));
        let mut peaks = Vec::new();
        live.run(|frame| peaks.push(frame.spectrum.peak().unwrap())).unwrap();

        assert_eq!(peaks.len(), 4);
        for (freq, mag) in peaks {
            assert!((freq - 5.0).abs() < 1e-9);
            assert!((mag - 1.0).abs() < 0.1);
        }
    }

    #[test]
    fn test_invalid_signal_stops_the_loop() {
        let mut config = session(None, 0.0);
        config.signal = WaveformDescriptor::new(256, 0.0).with_tone(Tone::sine(1.0, 5.0));
        let mut live = LiveSession::new(config);
        let mut frames = 0;
        assert!(live.run(|_| frames += 1).is_err());
        assert_eq!(frames, 0);
    }
}
