//! Voice resolution.
//!
//! Maps a requested voice id to a model/config pair beneath the voices root,
//! falling back to the process-wide default profile. Resolution never fails:
//! an unknown voice yields the default profile rather than an error.

use std::path::PathBuf;

use tracing::debug;

use crate::config::TtsConfig;

/// Model file expected inside each voice directory.
const VOICE_MODEL_FILE: &str = "model.onnx";
/// Config file optionally co-located with the model.
const VOICE_CONFIG_FILE: &str = "model.onnx.json";

/// A voice model plus its (optional) engine config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceProfile {
    pub model_path: PathBuf,
    pub config_path: Option<PathBuf>,
}

/// Resolve a requested voice id to a concrete profile.
///
/// Empty or whitespace-only ids yield the default profile. Otherwise the
/// candidate directory `<voices_dir>/<voice>` is probed: the model is
/// adopted only if it exists, and the co-located config only if it also
/// exists (otherwise the default config stays in effect, so a voice model
/// may end up paired with the default config).
pub fn resolve_voice(cfg: &TtsConfig, voice: &str) -> VoiceProfile {
    let mut profile = VoiceProfile {
        model_path: cfg.default_model.clone(),
        config_path: cfg.default_config.clone(),
    };

    let voice = voice.trim();
    if voice.is_empty() {
        return profile;
    }

    let vdir = cfg.voices_dir.join(voice);
    let cand_model = vdir.join(VOICE_MODEL_FILE);
    let cand_config = vdir.join(VOICE_CONFIG_FILE);
    if cand_model.exists() {
        profile.model_path = cand_model;
        if cand_config.exists() {
            profile.config_path = Some(cand_config);
        }
    } else {
        debug!(target = "tts", voice = %voice, "Voice model not found; using default profile");
    }

    profile
}

/// List voice ids under the voices root that carry a model file.
pub fn list_voices(cfg: &TtsConfig) -> Vec<String> {
    let mut voices = Vec::new();
    let entries = match std::fs::read_dir(&cfg.voices_dir) {
        Ok(entries) => entries,
        Err(_) => return voices,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() && path.join(VOICE_MODEL_FILE).exists() {
            if let Some(name) = entry.file_name().to_str() {
                voices.push(name.to_string());
            }
        }
    }
    voices.sort();
    voices
}
