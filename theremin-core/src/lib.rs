#![cfg_attr(not(feature = "std"), no_std)]
//! Theremin Core: phase-continuous block synthesis, no_std-ready.
//!
//! Features
//! - `std`      : (default) use the Rust standard library
//! - `no-std`   : build with `#![no_std]` and use `libm` for `sin`/`round`
//! - `fast-math`: polynomial sine in the fill loop
//!
//! Modules
//! - [`dsp`]       : math backend, phase wrap/advance helpers
//! - [`config`]    : negotiated sample rate and buffer size
//! - [`envelopes`] : per-buffer decay-reset envelope for FM depth
//! - [`synth`]     : `SynthState`, `Waveform` policies and `Synth::fill`
//! - [`error`]     : setup-time `ConfigError`
//!
//! Design
//! - No heap allocations, no locks, no I/O; `fill` is O(n) in the buffer size
//! - State is an explicit object mutated only by `fill` and its setters

pub mod config;
pub mod dsp;
pub mod envelopes;
pub mod error;
pub mod synth;

pub use config::SynthConfig;
pub use error::ConfigError;
pub use synth::{FmParams, Patch, SweepCeiling, SweepParams, Synth, SynthState, Waveform};

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::config::{SynthConfig, DEFAULT_BUFFER_FRAMES, DEFAULT_SAMPLE_RATE};
    pub use crate::dsp::{advance_phase, phase_increment, wrap_phase, TAU};
    pub use crate::envelopes::DecayEnvelope;
    pub use crate::error::ConfigError;
    pub use crate::synth::{
        FmParams, Operator, Patch, SweepCeiling, SweepParams, Synth, SynthState, Waveform, DEFAULT_CARRIER_HZ,
        DEFAULT_MAX_DEPTH, DEFAULT_MODULATOR_HZ,
    };
}
