//! Theremin Engine: realtime glue around `theremin-core`.
//!
//! Crate layout:
//! - [`engine`]   : `Engine`, the fixed-block adapter between host callbacks and `Synth::fill`
//! - [`control`]  : lock-free command queue (UI → audio) and `Telemetry` (audio → UI)
//! - [`render`]   : offline rendering to WAV
//! - [`realtime`] : cpal device negotiation, audio callback, mute (feature `realtime`)
//! - [`error`]    : error types
//!
//! The audio thread never allocates, locks or logs. Anything outside it talks
//! to the synth through a `Controller`, never by touching the state directly.

pub mod control;
pub mod engine;
pub mod error;
#[cfg(feature = "realtime")]
pub mod realtime;
pub mod render;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use control::{channel, Command, Controller, Telemetry, TelemetrySnapshot};
pub use engine::Engine;
#[cfg(feature = "realtime")]
pub use error::PlayerError;
pub use error::{ControlError, RenderError};
#[cfg(feature = "realtime")]
pub use realtime::{list_output_devices, Negotiated, Player, StreamRequest};
pub use theremin_core;
