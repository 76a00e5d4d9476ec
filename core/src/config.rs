//! Process-wide synthesis configuration.
//!
//! Read once from the environment at startup and passed into the pipeline
//! by value; nothing here is mutated after process start, so concurrent
//! requests share it without locking.
//!
//! Env overrides:
//! - PIPER_BIN, PIPER_MODEL, PIPER_CONFIG, PIPER_VOICES_DIR
//! - FFMPEG_BIN
//! - TTS_TARGET_RATE, TTS_TARGET_CHANNELS
//! - TTS_TEMP_DIR

use std::path::PathBuf;

/// Immutable configuration for the synthesis pipeline.
#[derive(Clone, Debug)]
pub struct TtsConfig {
    /// Path to the Piper synthesis binary.
    pub piper_bin: PathBuf,
    /// Default voice model used when no voice is requested or resolvable.
    pub default_model: PathBuf,
    /// Default model config paired with the default model.
    pub default_config: Option<PathBuf>,
    /// Root directory holding per-voice subdirectories.
    pub voices_dir: PathBuf,
    /// Path to the ffmpeg transcoder binary.
    pub ffmpeg_bin: PathBuf,
    /// Output sample rate in Hz.
    pub target_rate: u32,
    /// Output channel count.
    pub target_channels: u16,
    /// Directory for per-request temp WAV files.
    pub temp_dir: PathBuf,
}

impl Default for TtsConfig {
    fn default() -> Self {
        let piper_bin = std::env::var("PIPER_BIN")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/piper/piper"));
        let default_model = std::env::var("PIPER_MODEL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/piper/model.onnx"));
        // An explicitly empty PIPER_CONFIG disables the config flag entirely.
        let default_config = match std::env::var("PIPER_CONFIG") {
            Ok(s) if s.is_empty() => None,
            Ok(s) => Some(PathBuf::from(s)),
            Err(_) => Some(PathBuf::from("/piper/model.onnx.json")),
        };
        let voices_dir = std::env::var("PIPER_VOICES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/piper/voices"));
        let ffmpeg_bin = std::env::var("FFMPEG_BIN")
            .map(PathBuf::from)
            .ok()
            .or_else(|| find_on_path("ffmpeg"))
            .unwrap_or_else(|| PathBuf::from("ffmpeg"));
        let target_rate = std::env::var("TTS_TARGET_RATE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(48_000);
        let target_channels = std::env::var("TTS_TARGET_CHANNELS")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(2);
        let temp_dir = std::env::var("TTS_TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        Self {
            piper_bin,
            default_model,
            default_config,
            voices_dir,
            ffmpeg_bin,
            target_rate,
            target_channels,
            temp_dir,
        }
    }
}

impl TtsConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Whether the synthesis engine is usable: both the Piper binary and the
    /// default model must be present on disk. Checked per request before any
    /// temp resource is allocated.
    pub fn engine_configured(&self) -> bool {
        self.piper_bin.exists() && self.default_model.exists()
    }
}

/// Search PATH portably for a binary name.
fn find_on_path(bin: &str) -> Option<PathBuf> {
    if let Some(paths_os) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&paths_os) {
            let candidate = dir.join(bin);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }
    None
}
