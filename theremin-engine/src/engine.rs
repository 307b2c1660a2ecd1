//! Fixed-block realtime engine.
//!
//! `Engine` owns a [`Synth`] and one block of `buffer_frames` samples that is
//! allocated up front. Host callbacks of any size are served out of that block;
//! the synth is asked for a new block only when the previous one is used up, so
//! the per-buffer evolution (sweep step, depth decay) keeps its configured
//! cadence even when the device picks a different callback size.
//!
//! Design goals
//! - No dynamic allocations in the audio thread
//! - Control commands applied only at block boundaries
//! - Telemetry published once per block, never logged from here

use theremin_core::Synth;

use crate::control::{Command, ControlInbox};

/// Realtime wrapper that owns the synth; lives on the audio thread.
pub struct Engine {
    synth: Synth,
    inbox: ControlInbox,
    block: Vec<f32>,
    cursor: usize,
    gain: f32,
    blocks: u64,
}

impl Engine {
    /// Allocate the block buffer and publish the initial parameters.
    pub fn new(synth: Synth, inbox: ControlInbox) -> Self {
        let frames = synth.config().buffer_frames() as usize;
        let engine = Self {
            synth,
            inbox,
            block: vec![0.0; frames],
            // start exhausted so the first sample triggers a fill
            cursor: frames,
            gain: 1.0,
            blocks: 0,
        };
        engine.inbox.telemetry().publish(&engine.synth.state(), 0.0, engine.gain, 0);
        engine
    }

    /// Next mono sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.cursor >= self.block.len() {
            self.refill();
        }
        let s = self.block[self.cursor];
        self.cursor += 1;
        s
    }

    /// Fill a mono buffer of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        let mut written = 0;
        while written < out.len() {
            if self.cursor >= self.block.len() {
                self.refill();
            }
            let take = (out.len() - written).min(self.block.len() - self.cursor);
            out[written..written + take].copy_from_slice(&self.block[self.cursor..self.cursor + take]);
            self.cursor += take;
            written += take;
        }
    }

    /// Fill an interleaved buffer, duplicating the mono signal to every channel.
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            frame.fill(s);
        }
    }

    #[inline] pub fn synth(&self) -> &Synth { &self.synth }
    #[inline] pub fn gain(&self) -> f32 { self.gain }
    #[inline] pub fn blocks_rendered(&self) -> u64 { self.blocks }

    fn refill(&mut self) {
        let Self { synth, inbox, gain, .. } = self;
        inbox.drain(|cmd| apply(synth, gain, cmd));

        self.synth.fill(&mut self.block);

        let mut peak = 0.0_f32;
        for s in &mut self.block {
            *s *= self.gain;
            peak = peak.max(s.abs());
        }

        self.blocks += 1;
        self.cursor = 0;
        self.inbox.telemetry().publish(&self.synth.state(), peak, self.gain, self.blocks);
    }
}

#[inline]
fn apply(synth: &mut Synth, gain: &mut f32, cmd: Command) {
    match cmd {
        Command::SetCarrierHz(hz) => synth.set_carrier_hz(hz),
        Command::NudgeCarrierHz(delta) => synth.nudge_carrier_hz(delta),
        Command::SetModulatorHz(hz) => synth.set_modulator_hz(hz),
        Command::SetGain(g) => {
            if g.is_finite() {
                *gain = g.clamp(0.0, 1.0);
            }
        }
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.synth.state())
            .field("gain", &self.gain)
            .field("blocks", &self.blocks)
            .finish()
    }
}
