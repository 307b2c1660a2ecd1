//! Setup-time validation errors. The fill path itself cannot fail.

/// Rejected synthesis configuration.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,

    #[error("buffer frame count must be non-zero")]
    ZeroBufferFrames,

    #[error("modulation depth must be finite and non-negative, got {0}")]
    InvalidDepth(f64),

    #[error("decay time must be finite and positive, got {0} s")]
    InvalidDecay(f64),

    #[error("sweep step must be non-zero")]
    ZeroSweepStep,
}
