//! Common utilities for the wavelab tools

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File format chosen from an output path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Wav,
    Json,
    Csv,
    Toml,
}

impl FileFormat {
    /// Detect format from file extension, `None` if unrecognised
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("wav") => Some(FileFormat::Wav),
            Some("json") => Some(FileFormat::Json),
            Some("csv") => Some(FileFormat::Csv),
            Some("toml") => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Wav => "wav",
            FileFormat::Json => "json",
            FileFormat::Csv => "csv",
            FileFormat::Toml => "toml",
        }
    }
}

/// Initialize logging: WARN by default, INFO when verbose, DEBUG when debugging
pub fn init_logging(verbose: bool, debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();
}

/// Load a TOML or JSON file, picking the parser from the extension
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    match FileFormat::from_path(path) {
        Some(FileFormat::Json) => {
            serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON config: {:?}", path))
        }
        _ => toml::from_str(&content).with_context(|| format!("Failed to parse TOML config: {:?}", path)),
    }
}

/// Save to TOML, or JSON when the path ends in `.json`
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = match FileFormat::from_path(path) {
        Some(FileFormat::Json) => serde_json::to_string_pretty(config).context("Failed to serialize config")?,
        _ => toml::to_string_pretty(config).context("Failed to serialize config")?,
    };

    std::fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_path(&PathBuf::from("out.wav")), Some(FileFormat::Wav));
        assert_eq!(FileFormat::from_path(&PathBuf::from("out.JSON")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(&PathBuf::from("bins.csv")), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_path(&PathBuf::from("signal.toml")), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_path(&PathBuf::from("noext")), None);
        assert_eq!(FileFormat::Csv.extension(), "csv");
    }
}
