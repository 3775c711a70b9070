//! wavelab tools library

pub mod analyze;
pub mod common;
pub mod config;
pub mod export;
pub mod live;
pub mod wav;

pub use analyze::{analyze_buffer, write_spectrum, AnalysisResult, Bin};
pub use common::{init_logging, load_config, save_config, FileFormat};
pub use config::{LiveConfig, SessionConfig, SignalArgs};
pub use export::write_samples;
pub use live::{Frame, LiveSession};
pub use wav::{read_wav, write_wav};
