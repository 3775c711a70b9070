//! wavelab - waveform synthesis and spectrum analysis from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use wavelab_core::prelude::Window;
use wavelab_synth::{seeded_rng, synthesize, synthesize_with, WaveformKind};
use wavelab_tools::{
    analyze_buffer, init_logging, read_wav, write_samples, write_spectrum, AnalysisResult, LiveSession,
    SessionConfig, SignalArgs,
};

/// wavelab signal tool
#[derive(Parser)]
#[command(name = "wavelab")]
#[command(about = "Synthesize waveforms and inspect their spectra")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a signal and write it to disk
    Synth(SynthCommand),
    /// Compute the magnitude spectrum of a file or a synthesized signal
    Analyze(AnalyzeCommand),
    /// Recompute signal and spectrum on a fixed cadence
    Live(LiveCommand),
    /// Write a session file from the signal flags
    Init(InitCommand),
    /// Show supported waveforms and windows
    Info,
}

#[derive(Args)]
struct SynthCommand {
    /// Output file (.wav, .json or .csv)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    signal: SignalArgs,
}

#[derive(Args)]
struct AnalyzeCommand {
    /// WAV file to analyze instead of synthesizing
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the full spectrum (.json or .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of strongest bins to report
    #[arg(long, default_value = "5")]
    top: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    signal: SignalArgs,
}

#[derive(Args)]
struct LiveCommand {
    /// Milliseconds between recomputations
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Number of recomputations
    #[arg(long)]
    ticks: Option<u32>,

    #[command(flatten)]
    signal: SignalArgs,
}

#[derive(Args)]
struct InitCommand {
    /// Session file to create (.toml or .json)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    signal: SignalArgs,
}

fn run_synth(command: SynthCommand) -> Result<()> {
    let session = command.signal.to_session()?;
    let buffer = match session.seed {
        Some(seed) => synthesize_with(&session.signal, &mut seeded_rng(seed))?,
        None => synthesize(&session.signal)?,
    };

    write_samples(&buffer, &command.output)?;
    println!(
        "✓ Synthesized {} samples at {} Hz to {:?}",
        buffer.len(),
        buffer.sample_rate(),
        command.output
    );
    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    println!(
        "Samples: {} (padded to {}), bin width {:.4} Hz",
        result.sample_count, result.padded_len, result.bin_width
    );
    println!("Peak amplitude: {:.4}, RMS: {:.4}", result.peak_amplitude, result.rms);
    match result.peak {
        Some(peak) => println!("Peak: {:.3} Hz at magnitude {:.4}", peak.frequency, peak.magnitude),
        None => println!("Peak: none (fewer than two samples)"),
    }
    if !result.strongest.is_empty() {
        println!("Strongest bins:");
        for (i, bin) in result.strongest.iter().enumerate() {
            println!("  {}: {:>10.3} Hz  {:.4}", i + 1, bin.frequency, bin.magnitude);
        }
    }
}

fn run_analyze(command: AnalyzeCommand) -> Result<()> {
    let session = command.signal.to_session()?;
    let buffer = match &command.input {
        Some(path) => read_wav(path)?,
        None => match session.seed {
            Some(seed) => synthesize_with(&session.signal, &mut seeded_rng(seed))?,
            None => synthesize(&session.signal)?,
        },
    };

    let result = analyze_buffer(&buffer, &session.analyzer, command.top)?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&result).context("Failed to serialize summary")?);
    } else {
        print_summary(&result);
    }

    if let Some(output) = &command.output {
        write_spectrum(&result.spectrum, output)?;
        println!("✓ Spectrum written to {:?}", output);
    }
    Ok(())
}

fn run_live(command: LiveCommand) -> Result<()> {
    let mut session = command.signal.to_session()?;
    if let Some(interval_ms) = command.interval_ms {
        session.live.interval_ms = interval_ms;
    }
    if let Some(ticks) = command.ticks {
        session.live.ticks = ticks;
    }

    let mut live = LiveSession::new(session);
    live.run(|frame| match frame.spectrum.peak() {
        Some((frequency, magnitude)) => println!(
            "[{:>4}] peak {:>10.3} Hz  {:.4}  ({:?})",
            frame.tick, frequency, magnitude, frame.elapsed
        ),
        None => println!("[{:>4}] no bins", frame.tick),
    })
}

fn run_init(command: InitCommand) -> Result<()> {
    let session: SessionConfig = command.signal.to_session()?;
    session.signal.validate()?;
    session.save_to_file(&command.output)?;
    println!("✓ Session written to {:?}", command.output);
    Ok(())
}

fn show_info() {
    println!("\n=== wavelab ===");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    println!("\n=== Waveforms ===");
    for kind in WaveformKind::KNOWN {
        println!("  • {}", kind);
    }
    println!("  (any other name synthesizes silence)");

    println!("\n=== Analysis windows ===");
    for window in Window::ALL {
        println!("  • {}", window);
    }

    println!("\n=== Example Usage ===");
    println!("  Synthesize: wavelab synth -o tone.wav -w square -f 440 --sample-rate 48000");
    println!("  Analyze:    wavelab analyze -f 5 --sample-rate 256 -o spectrum.csv");
    println!("  From file:  wavelab analyze -i tone.wav --window hann");
    println!("  Live:       wavelab live -n 0.2 --interval-ms 100 --ticks 20");
    println!("  Session:    wavelab init -o session.toml -f 12 -n 0.1");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    info!("wavelab starting");

    match cli.command {
        Commands::Synth(command) => run_synth(command),
        Commands::Analyze(command) => run_analyze(command),
        Commands::Live(command) => run_live(command),
        Commands::Init(command) => run_init(command),
        Commands::Info => {
            show_info();
            Ok(())
        }
    }
}
