//! Stream geometry supplied at initialization.
//!
//! The sink negotiates the actual rate and buffer size with the device; the
//! synthesis code only ever reads them from here.

use crate::error::ConfigError;

/// Preferred sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Preferred buffer size: 48000 / 800 = 60 buffers per second, one per video frame.
pub const DEFAULT_BUFFER_FRAMES: u32 = 800;

/// Sample rate and buffer size of the negotiated stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SynthConfig {
    sample_rate_hz: u32,
    buffer_frames: u32,
}

impl SynthConfig {
    pub fn new(sample_rate_hz: u32, buffer_frames: u32) -> Result<Self, ConfigError> {
        if sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if buffer_frames == 0 {
            return Err(ConfigError::ZeroBufferFrames);
        }
        Ok(Self { sample_rate_hz, buffer_frames })
    }

    #[inline] pub fn sample_rate_hz(&self) -> u32 { self.sample_rate_hz }
    #[inline] pub fn buffer_frames(&self) -> u32 { self.buffer_frames }

    /// Buffer cadence in Hz (60 at the defaults).
    #[inline]
    pub fn buffers_per_second(&self) -> f64 {
        f64::from(self.sample_rate_hz) / f64::from(self.buffer_frames)
    }

    /// Seconds covered by one buffer (≈16.67 ms at the defaults).
    #[inline]
    pub fn buffer_period_secs(&self) -> f64 {
        f64::from(self.buffer_frames) / f64::from(self.sample_rate_hz)
    }

    /// Highest representable frequency.
    #[inline]
    pub fn nyquist_hz(&self) -> u32 {
        self.sample_rate_hz / 2
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { sample_rate_hz: DEFAULT_SAMPLE_RATE, buffer_frames: DEFAULT_BUFFER_FRAMES }
    }
}
