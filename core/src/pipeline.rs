//! Synthesis orchestration.
//!
//! Drives one request end to end: validate, resolve the voice, clamp
//! prosody, derive the filter chain, synthesize with Piper, transcode with
//! ffmpeg, read the result bytes. Stages run strictly in sequence and the
//! first failure short-circuits the rest; the two temp WAV guards make
//! cleanup unconditional on every exit path, so no temp file outlives its
//! request.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, info};

use crate::config::TtsConfig;
use crate::filter::build_filter_chain;
use crate::process::{ProcessCommand, ProcessRunner, SystemRunner};
use crate::prosody::effective_factor;
use crate::temp::TempWav;
use crate::voice::{resolve_voice, VoiceProfile};
use crate::{Result, TtsError};

/// One synthesis request.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
}

/// The synthesis-and-postprocessing orchestrator.
///
/// Holds the immutable process-wide configuration and the process runner
/// seam. One instance serves all requests; each call is self-contained.
pub struct Synthesizer {
    cfg: TtsConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl Synthesizer {
    pub fn new(cfg: TtsConfig) -> Self {
        Self::with_runner(cfg, Arc::new(SystemRunner))
    }

    pub fn with_runner(cfg: TtsConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { cfg, runner }
    }

    pub fn config(&self) -> &TtsConfig {
        &self.cfg
    }

    /// Synthesize a request into normalized WAV bytes at the configured
    /// target rate and channel count.
    ///
    /// The blocking subprocess sequence runs on the blocking thread pool;
    /// there is no timeout on the external invocations.
    pub async fn speak(&self, req: SpeakRequest) -> Result<Vec<u8>> {
        let cfg = self.cfg.clone();
        let runner = Arc::clone(&self.runner);
        task::spawn_blocking(move || run_pipeline(&cfg, runner.as_ref(), &req))
            .await
            .map_err(|e| TtsError::Io(std::io::Error::other(e)))?
    }
}

fn run_pipeline(cfg: &TtsConfig, runner: &dyn ProcessRunner, req: &SpeakRequest) -> Result<Vec<u8>> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(TtsError::EmptyText);
    }
    if !cfg.engine_configured() {
        return Err(TtsError::EngineNotConfigured);
    }

    let profile = resolve_voice(cfg, req.voice.as_deref().unwrap_or(""));
    let speed = effective_factor(req.speed);
    let pitch = effective_factor(req.pitch);
    let filters = build_filter_chain(speed, pitch);

    debug!(
        target = "tts",
        model = ?profile.model_path,
        speed,
        pitch,
        stages = filters.len(),
        "Starting synthesis"
    );

    // Both guards are held until the bytes are read; their Drop removes the
    // files whether we return early or not.
    let raw = TempWav::allocate(&cfg.temp_dir, "raw");
    let out = TempWav::allocate(&cfg.temp_dir, "out");

    let output = runner.run(&synthesis_command(cfg, &profile, text, raw.path()))?;
    if !output.success() {
        return Err(TtsError::SynthesisFailed(output.stderr));
    }

    let output = runner.run(&transcode_command(cfg, raw.path(), &filters, out.path()))?;
    if !output.success() {
        return Err(TtsError::TranscodeFailed(output.stderr));
    }

    let audio = std::fs::read(out.path())?;
    info!(
        target = "tts",
        bytes = audio.len(),
        rate = cfg.target_rate,
        channels = cfg.target_channels,
        "Synthesis complete"
    );
    Ok(audio)
}

/// Piper invocation: model and output file as flags, text over stdin.
fn synthesis_command(
    cfg: &TtsConfig,
    profile: &VoiceProfile,
    text: &str,
    raw_out: &Path,
) -> ProcessCommand {
    let mut cmd = ProcessCommand::new(cfg.piper_bin.clone())
        .arg("--model")
        .arg(profile.model_path.clone())
        .arg("--output_file")
        .arg(raw_out.to_path_buf());
    if let Some(config) = &profile.config_path {
        cmd = cmd.arg("--config").arg(config.clone());
    }
    cmd.stdin_bytes(text.as_bytes().to_vec())
}

/// ffmpeg invocation: resample to the target rate/channels at 16-bit depth.
/// The filter flag is attached only when the chain is non-empty, so an
/// identity request passes through without a filter stage.
fn transcode_command(
    cfg: &TtsConfig,
    raw: &Path,
    filters: &[String],
    out: &Path,
) -> ProcessCommand {
    let mut cmd = ProcessCommand::new(cfg.ffmpeg_bin.clone())
        .arg("-y")
        .arg("-i")
        .arg(raw.to_path_buf());
    if !filters.is_empty() {
        cmd = cmd.arg("-filter:a").arg(filters.join(","));
    }
    cmd.arg("-ar")
        .arg(cfg.target_rate.to_string())
        .arg("-ac")
        .arg(cfg.target_channels.to_string())
        .arg("-sample_fmt")
        .arg("s16")
        .arg(out.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockProcessRunner;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn unconfigured() -> TtsConfig {
        TtsConfig {
            piper_bin: PathBuf::from("/nonexistent/piper"),
            default_model: PathBuf::from("/nonexistent/model.onnx"),
            default_config: Some(PathBuf::from("/nonexistent/model.onnx.json")),
            voices_dir: PathBuf::from("/nonexistent/voices"),
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            target_rate: 48_000,
            target_channels: 2,
            temp_dir: std::env::temp_dir(),
        }
    }

    #[tokio::test]
    async fn empty_text_spawns_no_process() {
        // MockProcessRunner panics on any unexpected run() call.
        let synth = Synthesizer::with_runner(unconfigured(), Arc::new(MockProcessRunner::new()));
        let err = synth
            .speak(SpeakRequest {
                text: "   \n\t".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyText));
    }

    #[tokio::test]
    async fn missing_engine_spawns_no_process() {
        let synth = Synthesizer::with_runner(unconfigured(), Arc::new(MockProcessRunner::new()));
        let err = synth
            .speak(SpeakRequest {
                text: "hello".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EngineNotConfigured));
    }

    #[test]
    fn synthesis_command_pipes_text_and_flags_config() {
        let cfg = unconfigured();
        let profile = VoiceProfile {
            model_path: PathBuf::from("/voices/amy/model.onnx"),
            config_path: Some(PathBuf::from("/voices/amy/model.onnx.json")),
        };
        let cmd = synthesis_command(&cfg, &profile, "hello", Path::new("/tmp/raw.wav"));
        assert_eq!(cmd.program, cfg.piper_bin);
        assert_eq!(cmd.stdin.as_deref(), Some(b"hello".as_slice()));
        assert!(cmd.args.contains(&OsString::from("--config")));
    }

    #[test]
    fn synthesis_command_omits_config_flag_when_absent() {
        let mut cfg = unconfigured();
        cfg.default_config = None;
        let profile = VoiceProfile {
            model_path: cfg.default_model.clone(),
            config_path: None,
        };
        let cmd = synthesis_command(&cfg, &profile, "hi", Path::new("/tmp/raw.wav"));
        assert!(!cmd.args.contains(&OsString::from("--config")));
    }

    #[test]
    fn transcode_command_omits_filter_flag_for_identity() {
        let cfg = unconfigured();
        let cmd = transcode_command(&cfg, Path::new("/tmp/raw.wav"), &[], Path::new("/tmp/out.wav"));
        assert!(!cmd.args.contains(&OsString::from("-filter:a")));
        assert!(cmd.args.contains(&OsString::from("48000")));
        assert!(cmd.args.contains(&OsString::from("s16")));
    }

    #[test]
    fn transcode_command_joins_filters_into_one_argument() {
        let cfg = unconfigured();
        let filters = vec![
            "asetrate=sample_rate*0.5,atempo=2".to_string(),
            "atempo=2".to_string(),
        ];
        let cmd = transcode_command(
            &cfg,
            Path::new("/tmp/raw.wav"),
            &filters,
            Path::new("/tmp/out.wav"),
        );
        let pos = cmd
            .args
            .iter()
            .position(|a| a.to_str() == Some("-filter:a"))
            .expect("filter flag present");
        assert_eq!(
            cmd.args[pos + 1],
            OsString::from("asetrate=sample_rate*0.5,atempo=2,atempo=2")
        );
    }
}
