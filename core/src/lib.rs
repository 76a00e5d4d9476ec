// Voxpipe Core Library
// Text-to-speech synthesis and postprocessing pipeline

pub mod config;
pub mod filter;
pub mod pipeline;
pub mod process;
pub mod prosody;
pub mod temp;
pub mod voice;

pub(crate) mod utils;

// Export core types
pub use config::TtsConfig;
pub use filter::build_filter_chain;
pub use pipeline::{SpeakRequest, Synthesizer};
pub use process::{ProcessCommand, ProcessRunner, RunOutput, SystemRunner};
pub use voice::{list_voices, resolve_voice, VoiceProfile};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("text is empty after trimming")]
    EmptyText,

    #[error("synthesis engine binary or default model not found")]
    EngineNotConfigured,

    #[error("synthesis engine exited with failure: {0}")]
    SynthesisFailed(String),

    #[error("transcoder exited with failure: {0}")]
    TranscodeFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TtsError {
    /// Machine-readable error code reported to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            TtsError::EmptyText => "empty_text",
            TtsError::EngineNotConfigured => "engine_not_configured",
            TtsError::SynthesisFailed(_) => "synthesis_failed",
            TtsError::TranscodeFailed(_) => "transcode_failed",
            TtsError::Io(_) => "io_error",
        }
    }

    /// Captured diagnostic text (external-process stderr), when present.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TtsError::SynthesisFailed(detail) | TtsError::TranscodeFailed(detail) => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TtsError>;
