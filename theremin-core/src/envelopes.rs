//! Per-buffer envelope for the FM modulation depth.
//!
//! `DecayEnvelope` ramps linearly from `peak` to zero over a whole number of
//! buffers and then snaps back to `peak`, which gives the pulsing FM timbre.
//! It is ticked once per buffer, not per sample, and never allocates.

use crate::config::SynthConfig;
use crate::dsp;
use crate::error::ConfigError;

/// Linear decay-then-reset envelope, stepped once per buffer.
///
/// The value is derived from an integer step counter so the zero crossing
/// lands exactly on `steps` regardless of float accumulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecayEnvelope {
    peak: f64,
    steps: u32,
    step: u32,
}

impl DecayEnvelope {
    /// `steps` is clamped to at least one buffer.
    pub fn new(peak: f64, steps: u32) -> Result<Self, ConfigError> {
        if !peak.is_finite() || peak < 0.0 {
            return Err(ConfigError::InvalidDepth(peak));
        }
        Ok(Self { peak, steps: steps.max(1), step: 0 })
    }

    /// Envelope that decays over `decay_secs` at the config's buffer cadence.
    pub fn from_decay(peak: f64, decay_secs: f64, config: &SynthConfig) -> Result<Self, ConfigError> {
        Self::new(peak, decay_steps(decay_secs, config)?)
    }

    /// Current depth: `peak · (steps − step) / steps`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.peak * f64::from(self.steps - self.step) / f64::from(self.steps)
    }

    /// Amount removed per buffer while decaying.
    #[inline]
    pub fn decrement(&self) -> f64 {
        self.peak / f64::from(self.steps)
    }

    #[inline] pub fn peak(&self) -> f64 { self.peak }
    #[inline] pub fn steps(&self) -> u32 { self.steps }

    /// Advance after one buffer: decay while above zero, otherwise snap back to peak.
    #[inline]
    pub fn tick(&mut self) {
        if self.value() > 0.0 {
            self.step += 1;
        } else {
            self.step = 0;
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }
}

/// Number of buffers in `decay_secs`, rounded, at least one.
pub fn decay_steps(decay_secs: f64, config: &SynthConfig) -> Result<u32, ConfigError> {
    if !decay_secs.is_finite() || decay_secs <= 0.0 {
        return Err(ConfigError::InvalidDecay(decay_secs));
    }
    let steps = dsp::round(decay_secs * config.buffers_per_second());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = if steps >= f64::from(u32::MAX) { u32::MAX } else { steps as u32 };
    Ok(steps.max(1))
}

// ------------------------------------ Tests --------------------------------------
