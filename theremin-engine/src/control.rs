//! Cross-thread control and display plumbing.
//!
//! The audio thread is the only writer of the synthesis state. Other threads
//! talk to it through two lock-free paths:
//! - `Controller` → `ControlInbox`: SPSC ring of [`Command`]s, drained at the
//!   start of the next block (pending-parameter handoff)
//! - [`Telemetry`]: atomics the audio thread publishes after every block, read
//!   by anyone for display
//!
//! Neither side blocks; a full queue is reported to the sender instead.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use theremin_core::SynthState;

use crate::error::ControlError;

/// Default number of pending commands the queue can hold.
pub const DEFAULT_CONTROL_CAPACITY: usize = 64;

/// A parameter change requested from outside the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetCarrierHz(u32),
    NudgeCarrierHz(i32),
    SetModulatorHz(u32),
    /// Output gain, clamped to `[0, 1]`.
    SetGain(f32),
}

/// Create a connected controller/inbox pair sharing one [`Telemetry`].
pub fn channel(capacity: usize) -> (Controller, ControlInbox) {
    let capacity = capacity.max(1);
    let (producer, consumer) = HeapRb::<Command>::new(capacity).split();
    let telemetry = Arc::new(Telemetry::default());
    (
        Controller { producer, telemetry: Arc::clone(&telemetry) },
        ControlInbox { consumer, capacity, telemetry },
    )
}

/// Sending half, owned by the UI/control thread.
pub struct Controller {
    producer: HeapProd<Command>,
    telemetry: Arc<Telemetry>,
}

impl Controller {
    /// Queue a command for the next block. Never blocks.
    pub fn send(&mut self, command: Command) -> Result<(), ControlError> {
        self.producer.try_push(command).map_err(ControlError::QueueFull)
    }

    #[inline] pub fn set_carrier_hz(&mut self, hz: u32) -> Result<(), ControlError> { self.send(Command::SetCarrierHz(hz)) }
    #[inline] pub fn nudge_carrier_hz(&mut self, delta: i32) -> Result<(), ControlError> { self.send(Command::NudgeCarrierHz(delta)) }
    #[inline] pub fn set_modulator_hz(&mut self, hz: u32) -> Result<(), ControlError> { self.send(Command::SetModulatorHz(hz)) }
    #[inline] pub fn set_gain(&mut self, gain: f32) -> Result<(), ControlError> { self.send(Command::SetGain(gain)) }

    /// Shared read-only view of the latest published parameters.
    pub fn telemetry(&self) -> Arc<Telemetry> {
        Arc::clone(&self.telemetry)
    }
}

impl core::fmt::Debug for Controller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller").field("telemetry", &self.telemetry.snapshot()).finish()
    }
}

/// Receiving half, moved into the audio thread together with the engine.
pub struct ControlInbox {
    consumer: HeapCons<Command>,
    capacity: usize,
    telemetry: Arc<Telemetry>,
}

impl ControlInbox {
    /// Pop at most one queue's worth of commands, so a busy sender cannot
    /// keep the audio thread looping.
    #[inline]
    pub(crate) fn drain(&mut self, mut apply: impl FnMut(Command)) {
        for _ in 0..self.capacity {
            match self.consumer.try_pop() {
                Some(cmd) => apply(cmd),
                None => break,
            }
        }
    }

    #[inline]
    pub(crate) fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }
}

/// Latest synthesis parameters, published by the audio thread after each block.
#[derive(Debug, Default)]
pub struct Telemetry {
    carrier_hz: AtomicU32,
    modulator_hz: AtomicU32,
    depth_bits: AtomicU64,
    peak_bits: AtomicU32,
    gain_bits: AtomicU32,
    blocks: AtomicU64,
}

impl Telemetry {
    #[inline]
    pub(crate) fn publish(&self, state: &SynthState, peak: f32, gain: f32, blocks: u64) {
        self.carrier_hz.store(state.carrier_hz(), Ordering::Relaxed);
        self.modulator_hz.store(state.modulator_hz(), Ordering::Relaxed);
        self.depth_bits.store(state.modulator_amplitude().to_bits(), Ordering::Relaxed);
        self.peak_bits.store(peak.to_bits(), Ordering::Relaxed);
        self.gain_bits.store(gain.to_bits(), Ordering::Relaxed);
        self.blocks.store(blocks, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            carrier_hz: self.carrier_hz.load(Ordering::Relaxed),
            modulator_hz: self.modulator_hz.load(Ordering::Relaxed),
            modulator_amplitude: f64::from_bits(self.depth_bits.load(Ordering::Relaxed)),
            peak: f32::from_bits(self.peak_bits.load(Ordering::Relaxed)),
            gain: f32::from_bits(self.gain_bits.load(Ordering::Relaxed)),
            blocks_rendered: self.blocks.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`Telemetry`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TelemetrySnapshot {
    pub carrier_hz: u32,
    pub modulator_hz: u32,
    /// FM depth the next block will use.
    pub modulator_amplitude: f64,
    /// Peak absolute sample of the last block, after gain.
    pub peak: f32,
    pub gain: f32,
    pub blocks_rendered: u64,
}
