//! Audio filter chain derivation.
//!
//! Builds the ordered ffmpeg `-filter:a` expressions from clamped prosody
//! factors. The pitch stage rescales the sample rate by the pitch factor and
//! compensates tempo by the inverse factor in the same stage, so pitch moves
//! without changing duration. The speed stage is a plain tempo scale and
//! must come after the pitch stage, whose compensation term assumes no prior
//! tempo change.

/// Build the ordered filter expressions for the given clamped factors.
///
/// Neutral factors contribute nothing; a fully neutral request yields an
/// empty chain, and the transcoder invocation must then omit the filter
/// flag entirely so an identity request never pays a filter pass.
pub fn build_filter_chain(speed: f64, pitch: f64) -> Vec<String> {
    let mut filters = Vec::new();
    if pitch != 1.0 {
        filters.push(format!(
            "asetrate=sample_rate*{},atempo={}",
            pitch,
            1.0 / pitch
        ));
    }
    if speed != 1.0 {
        filters.push(format!("atempo={}", speed));
    }
    filters
}
