//! Prosody parameter clamping.
//!
//! Speed and pitch are bounded independently to a safe operating range
//! before any filter is derived from them. Clamping is total: every input,
//! including absent, non-finite, zero or negative values, maps to a usable
//! factor.

/// Lower bound of the safe speed/pitch range.
pub const MIN_FACTOR: f64 = 0.5;
/// Upper bound of the safe speed/pitch range.
pub const MAX_FACTOR: f64 = 2.0;

/// Neutral factor used for absent or unusable inputs.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Clamp a factor into `[MIN_FACTOR, MAX_FACTOR]`.
#[inline]
pub fn clamp_factor(x: f64) -> f64 {
    x.clamp(MIN_FACTOR, MAX_FACTOR)
}

/// Map a raw request parameter to its effective factor: absent, non-finite,
/// zero or negative values become neutral; everything else is clamped.
pub fn effective_factor(raw: Option<f64>) -> f64 {
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => clamp_factor(v),
        _ => NEUTRAL_FACTOR,
    }
}
