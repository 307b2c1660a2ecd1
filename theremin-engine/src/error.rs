//! Error types for the engine crate.

use crate::control::Command;

/// The control queue is full; the audio thread has not caught up yet.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ControlError {
    #[error("control queue full, dropped {0:?}")]
    QueueFull(Command),
}

/// Offline rendering failed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("WAV output failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("{frames} frames x {channels} channels does not fit in a WAV file")]
    TooLong { frames: usize, channels: u16 },
}

/// Opening or driving an output device failed.
#[cfg(feature = "realtime")]
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("no default output device")]
    NoDefaultDevice,

    #[error("requested device not found: {0}")]
    DeviceNotFound(String),

    #[error("unsupported device sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("could not enumerate devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("could not read device name: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),

    #[error("could not query default config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("could not query supported configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("could not build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("could not start stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("could not pause stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),

    #[error("negotiated stream rejected: {0}")]
    Synth(#[from] theremin_core::ConfigError),
}
