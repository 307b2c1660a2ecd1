//! Block synthesis: state, waveform policies and the `fill` contract.
//!
//! `Synth::fill` is called once per audio buffer from the real-time thread. It
//! writes exactly `out.len()` samples in `[-1, 1]` and then advances the state
//! so the next call continues the waveform without a discontinuity:
//!
//! ```text
//! plain / swept : y[i] = sin(fc·2π·i/sr + φc)
//! fm            : y[i] = sin(A·sin(fm·2π·i/sr + φm) + fc·2π·i/sr + φc)
//! after buffer  : φ' = (f·2π·n/sr + φ) mod 2π
//! ```
//!
//! The work is O(n), branch-free per sample, with no allocation or locking.

use num_traits::{FromPrimitive, Zero};

use crate::config::SynthConfig;
use crate::dsp::{advance_phase, phase_at, sine, wrap_phase};
use crate::envelopes::DecayEnvelope;
use crate::error::ConfigError;

/// Default carrier pitch.
pub const DEFAULT_CARRIER_HZ: u32 = 1000;
/// Default modulator pitch (FM).
pub const DEFAULT_MODULATOR_HZ: u32 = 500;
/// Maximum FM modulation depth.
pub const DEFAULT_MAX_DEPTH: f64 = 0.4;
/// Time for the depth to decay from maximum to zero.
pub const DEFAULT_DECAY_SECS: f64 = 1.0;

// --------------------------------- Operators --------------------------------------

/// One sine operator: integer pitch plus the phase the next buffer starts at.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Operator {
    hz: u32,
    phase: f64,
}

impl Operator {
    #[inline] pub fn new(hz: u32) -> Self { Self { hz, phase: 0.0 } }
    #[inline] pub fn hz(&self) -> u32 { self.hz }
    #[inline] pub fn phase(&self) -> f64 { self.phase }

    #[inline]
    fn arg(&self, index: usize, sample_rate: u32) -> f64 {
        phase_at(self.hz, self.phase, index, sample_rate)
    }

    #[inline]
    fn advance(&mut self, frames: usize, sample_rate: u32) {
        self.phase = advance_phase(self.hz, self.phase, frames, sample_rate);
    }
}

// --------------------------------- State ------------------------------------------

/// Mutable synthesis parameters carried from one buffer to the next.
///
/// Fields are private: only `fill` and the setters on [`Synth`] write them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SynthState {
    carrier: Operator,
    modulator: Operator,
    depth: DecayEnvelope,
}

impl SynthState {
    pub fn new(carrier_hz: u32, modulator_hz: u32, depth: DecayEnvelope) -> Self {
        Self { carrier: Operator::new(carrier_hz), modulator: Operator::new(modulator_hz), depth }
    }

    /// Start from explicit phases (wrapped into `[0, 2π)`).
    #[must_use]
    pub fn with_phases(mut self, carrier_phase: f64, modulator_phase: f64) -> Self {
        self.carrier.phase = wrap_phase(carrier_phase);
        self.modulator.phase = wrap_phase(modulator_phase);
        self
    }

    #[inline] pub fn carrier(&self) -> Operator { self.carrier }
    #[inline] pub fn modulator(&self) -> Operator { self.modulator }
    #[inline] pub fn carrier_hz(&self) -> u32 { self.carrier.hz }
    #[inline] pub fn carrier_phase(&self) -> f64 { self.carrier.phase }
    #[inline] pub fn modulator_hz(&self) -> u32 { self.modulator.hz }
    #[inline] pub fn modulator_phase(&self) -> f64 { self.modulator.phase }
    /// Modulation depth applied to the next buffer.
    #[inline] pub fn modulator_amplitude(&self) -> f64 { self.depth.value() }
    #[inline] pub fn envelope(&self) -> DecayEnvelope { self.depth }
}

// --------------------------------- Policies ---------------------------------------

/// Where a sweep stops climbing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SweepCeiling {
    /// Half the sample rate of whatever stream the synth ends up running at.
    #[default]
    Nyquist,
    /// A fixed pitch in Hz.
    Hz(u32),
    /// No ceiling; the pitch saturates at `u32::MAX`.
    Unbounded,
}

impl SweepCeiling {
    /// Concrete ceiling for `config`, `None` when unbounded.
    #[inline]
    pub fn resolve(self, config: &SynthConfig) -> Option<u32> {
        match self {
            SweepCeiling::Nyquist => Some(config.nyquist_hz()),
            SweepCeiling::Hz(hz) => Some(hz),
            SweepCeiling::Unbounded => None,
        }
    }
}

/// Upward pitch sweep applied after every buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepParams {
    /// Hz added per buffer.
    pub step_hz: u32,
    pub ceiling: SweepCeiling,
}

impl Default for SweepParams {
    /// One Hz per buffer, clamped at Nyquist.
    fn default() -> Self {
        Self { step_hz: 1, ceiling: SweepCeiling::Nyquist }
    }
}

impl SweepParams {
    #[inline]
    fn next_hz(&self, hz: u32, config: &SynthConfig) -> u32 {
        let swept = hz.saturating_add(self.step_hz);
        match self.ceiling.resolve(config) {
            Some(ceiling) => swept.min(ceiling.max(hz)),
            None => swept,
        }
    }
}

/// Frequency modulation parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FmParams {
    pub modulator_hz: u32,
    /// Depth at the top of each decay cycle.
    pub max_depth: f64,
    /// Seconds from `max_depth` down to zero.
    pub decay_secs: f64,
}

impl Default for FmParams {
    fn default() -> Self {
        Self {
            modulator_hz: DEFAULT_MODULATOR_HZ,
            max_depth: DEFAULT_MAX_DEPTH,
            decay_secs: DEFAULT_DECAY_SECS,
        }
    }
}

/// Synthesis policy, fixed for the lifetime of a [`Synth`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Waveform {
    Plain,
    Swept(SweepParams),
    Fm(FmParams),
}

impl Waveform {
    /// Write `out.len()` samples from `state`, then advance `state` past them.
    ///
    /// An empty `out` leaves the state untouched.
    pub fn fill<S>(&self, state: &mut SynthState, config: &SynthConfig, out: &mut [S])
    where
        S: FromPrimitive + Zero + Copy,
    {
        if out.is_empty() {
            return;
        }
        let sr = config.sample_rate_hz();
        let n = out.len();

        match self {
            Waveform::Plain | Waveform::Swept(_) => {
                let carrier = state.carrier;
                for (i, y) in out.iter_mut().enumerate() {
                    *y = to_sample(sine(carrier.arg(i, sr)));
                }
            }
            Waveform::Fm(_) => {
                let carrier = state.carrier;
                let modulator = state.modulator;
                let depth = state.depth.value();
                for (i, y) in out.iter_mut().enumerate() {
                    let m = depth * sine(modulator.arg(i, sr));
                    *y = to_sample(sine(m + carrier.arg(i, sr)));
                }
            }
        }

        state.carrier.advance(n, sr);
        match self {
            Waveform::Plain => {}
            Waveform::Swept(sweep) => {
                state.carrier.hz = sweep.next_hz(state.carrier.hz, config);
            }
            Waveform::Fm(_) => {
                state.modulator.advance(n, sr);
                state.depth.tick();
            }
        }
    }
}

#[inline]
fn to_sample<S: FromPrimitive + Zero>(x: f64) -> S {
    S::from_f64(x).unwrap_or_else(S::zero)
}

// --------------------------------- Patch ------------------------------------------

/// Everything needed to build a [`Synth`] once the stream geometry is known.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Patch {
    pub carrier_hz: u32,
    pub waveform: Waveform,
}

impl Patch {
    pub fn plain(carrier_hz: u32) -> Self {
        Self { carrier_hz, waveform: Waveform::Plain }
    }

    pub fn swept(carrier_hz: u32, sweep: SweepParams) -> Self {
        Self { carrier_hz, waveform: Waveform::Swept(sweep) }
    }

    pub fn fm(carrier_hz: u32, fm: FmParams) -> Self {
        Self { carrier_hz, waveform: Waveform::Fm(fm) }
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::plain(DEFAULT_CARRIER_HZ)
    }
}

// --------------------------------- Synth ------------------------------------------

/// Owns the stream geometry, the policy and the state; the only writer of the state.
#[derive(Copy, Clone, Debug)]
pub struct Synth {
    config: SynthConfig,
    waveform: Waveform,
    state: SynthState,
}

impl Synth {
    /// Validate `patch` against `config` and start at phase zero, full depth.
    pub fn new(config: SynthConfig, patch: Patch) -> Result<Self, ConfigError> {
        let state = match patch.waveform {
            Waveform::Plain => {
                SynthState::new(patch.carrier_hz, DEFAULT_MODULATOR_HZ, DecayEnvelope::new(0.0, 1)?)
            }
            Waveform::Swept(sweep) => {
                if sweep.step_hz == 0 {
                    return Err(ConfigError::ZeroSweepStep);
                }
                SynthState::new(patch.carrier_hz, DEFAULT_MODULATOR_HZ, DecayEnvelope::new(0.0, 1)?)
            }
            Waveform::Fm(fm) => SynthState::new(
                patch.carrier_hz,
                fm.modulator_hz,
                DecayEnvelope::from_decay(fm.max_depth, fm.decay_secs, &config)?,
            ),
        };
        Ok(Self { config, waveform: patch.waveform, state })
    }

    /// Build around an existing state, e.g. to resume from a snapshot.
    pub fn from_state(config: SynthConfig, waveform: Waveform, state: SynthState) -> Self {
        Self { config, waveform, state }
    }

    /// Fill one buffer; `out.len()` is the sample count.
    #[inline]
    pub fn fill<S>(&mut self, out: &mut [S])
    where
        S: FromPrimitive + Zero + Copy,
    {
        self.waveform.fill(&mut self.state, &self.config, out);
    }

    #[inline] pub fn config(&self) -> &SynthConfig { &self.config }
    #[inline] pub fn waveform(&self) -> &Waveform { &self.waveform }
    #[inline] pub fn state(&self) -> SynthState { self.state }

    /// Change the carrier pitch; the phase carries over.
    #[inline]
    pub fn set_carrier_hz(&mut self, hz: u32) {
        self.state.carrier.hz = hz;
    }

    /// Shift the carrier pitch, saturating at 0 and `u32::MAX`.
    #[inline]
    pub fn nudge_carrier_hz(&mut self, delta: i32) {
        let hz = self.state.carrier.hz;
        self.state.carrier.hz = if delta >= 0 {
            hz.saturating_add(delta.unsigned_abs())
        } else {
            hz.saturating_sub(delta.unsigned_abs())
        };
    }

    /// Change the modulator pitch; the phase carries over.
    #[inline]
    pub fn set_modulator_hz(&mut self, hz: u32) {
        self.state.modulator.hz = hz;
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::TAU;

    const SR: u32 = 48_000;
    const FRAMES: usize = 800;

    fn cfg() -> SynthConfig {
        SynthConfig::default()
    }

    fn render(synth: &mut Synth, buffers: usize) -> Vec<f64> {
        let mut all = Vec::with_capacity(buffers * FRAMES);
        let mut buf = vec![0.0_f64; FRAMES];
        for _ in 0..buffers {
            synth.fill(&mut buf);
            all.extend_from_slice(&buf);
        }
        all
    }

    #[test]
    fn plain_sine_scenario() {
        let mut synth = Synth::new(cfg(), Patch::plain(1000)).unwrap();
        let mut buf = [0.0_f64; FRAMES];
        synth.fill(&mut buf);

        assert_eq!(buf[0], 0.0);
        assert!((buf[1] - (1000.0 * TAU / 48_000.0).sin()).abs() < 1e-15);
        assert!((buf[1] - 0.130_526).abs() < 1e-5, "sample[1]={}", buf[1]);

        // 1000 Hz · 800 / 48000 = 16⅔ cycles, so the phase lands on 4π/3.
        let expected = (1000.0 * TAU * 800.0 / 48_000.0) % TAU;
        assert!((synth.state().carrier_phase() - expected).abs() < 1e-12);
        assert!((synth.state().carrier_phase() - 4.0 * core::f64::consts::PI / 3.0).abs() < 1e-9);
        assert_eq!(synth.state().carrier_hz(), 1000);
    }

    #[test]
    fn buffers_concatenate_into_one_continuous_sine() {
        let mut synth = Synth::new(cfg(), Patch::plain(1000)).unwrap();
        let blocks = render(&mut synth, 12);
        for (n, y) in blocks.iter().enumerate() {
            let direct = (1000.0 * TAU * n as f64 / f64::from(SR)).sin();
            assert!((y - direct).abs() < 1e-9, "n={n} y={y} direct={direct}");
        }
    }

    #[test]
    fn boundary_phase_step_is_one_sample() {
        let mut synth = Synth::new(cfg(), Patch::plain(440)).unwrap();
        let step = 440.0 * TAU / f64::from(SR);
        for _ in 0..5 {
            let before = synth.state();
            let last_arg = phase_at(440, before.carrier_phase(), FRAMES - 1, SR);
            let mut buf = [0.0_f32; FRAMES];
            synth.fill(&mut buf);
            let first_next = synth.state().carrier_phase();
            let gap = wrap_phase(first_next - last_arg);
            assert!((gap - step).abs() < 1e-9, "gap={gap} step={step}");
        }
    }

    #[test]
    fn odd_sized_requests_stay_continuous() {
        let mut synth = Synth::new(cfg(), Patch::plain(733)).unwrap();
        let mut all = Vec::new();
        for size in [1_usize, 7, 800, 13, 256, 999] {
            let mut buf = vec![0.0_f64; size];
            synth.fill(&mut buf);
            all.extend_from_slice(&buf);
        }
        for (n, y) in all.iter().enumerate() {
            let direct = (733.0 * TAU * n as f64 / f64::from(SR)).sin();
            assert!((y - direct).abs() < 1e-9, "n={n}");
        }
    }

    #[test]
    fn empty_request_is_a_no_op() {
        let mut synth = Synth::new(cfg(), Patch::fm(1000, FmParams::default())).unwrap();
        let before = synth.state();
        let mut empty: [f32; 0] = [];
        synth.fill(&mut empty);
        assert_eq!(synth.state(), before);
    }

    #[test]
    fn every_policy_stays_in_unit_range() {
        let patches = [
            Patch::plain(1000),
            Patch::swept(20, SweepParams { step_hz: 97, ceiling: SweepCeiling::Unbounded }),
            Patch::fm(1000, FmParams::default()),
            Patch::fm(3_517, FmParams { modulator_hz: 11_000, max_depth: 25.0, decay_secs: 0.3 }),
        ];
        for patch in patches {
            let mut synth = Synth::new(cfg(), patch).unwrap();
            for y in render(&mut synth, 150) {
                assert!((-1.0..=1.0).contains(&y), "{patch:?} y={y}");
            }
        }
    }

    #[test]
    fn identical_runs_are_bit_identical() {
        let patch = Patch::fm(1000, FmParams::default());
        let a = render(&mut Synth::new(cfg(), patch).unwrap(), 90);
        let b = render(&mut Synth::new(cfg(), patch).unwrap(), 90);
        assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn sweep_adds_one_hz_per_buffer() {
        let sweep = SweepParams { step_hz: 1, ceiling: SweepCeiling::Unbounded };
        let mut synth = Synth::new(cfg(), Patch::swept(1000, sweep)).unwrap();
        let mut buf = [0.0_f32; FRAMES];
        for k in 1..=250 {
            synth.fill(&mut buf);
            assert_eq!(synth.state().carrier_hz(), 1000 + k);
        }
    }

    #[test]
    fn sweep_uses_old_pitch_for_phase_update() {
        let sweep = SweepParams { step_hz: 1, ceiling: SweepCeiling::Unbounded };
        let mut synth = Synth::new(cfg(), Patch::swept(1000, sweep)).unwrap();
        let mut buf = [0.0_f64; FRAMES];
        synth.fill(&mut buf);
        let expected = advance_phase(1000, 0.0, FRAMES, SR);
        assert_eq!(synth.state().carrier_phase(), expected);
        synth.fill(&mut buf);
        let expected = advance_phase(1001, expected, FRAMES, SR);
        assert!((synth.state().carrier_phase() - expected).abs() < 1e-12);
    }

    #[test]
    fn sweep_clamps_at_ceiling() {
        let sweep = SweepParams { step_hz: 3, ceiling: SweepCeiling::Hz(1010) };
        let mut synth = Synth::new(cfg(), Patch::swept(1000, sweep)).unwrap();
        let mut buf = [0.0_f32; 64];
        for _ in 0..10 {
            synth.fill(&mut buf);
        }
        assert_eq!(synth.state().carrier_hz(), 1010);
    }

    #[test]
    fn sweep_never_drops_pitch_already_above_ceiling() {
        let sweep = SweepParams { step_hz: 1, ceiling: SweepCeiling::Hz(500) };
        let mut synth = Synth::new(cfg(), Patch::swept(800, sweep)).unwrap();
        let mut buf = [0.0_f32; 16];
        synth.fill(&mut buf);
        assert_eq!(synth.state().carrier_hz(), 800);
    }

    #[test]
    fn default_sweep_stops_at_nyquist() {
        let sweep = SweepParams::default();
        assert_eq!(sweep.ceiling.resolve(&cfg()), Some(24_000));
        let mut synth = Synth::new(cfg(), Patch::swept(23_998, sweep)).unwrap();
        let mut buf = [0.0_f32; 8];
        for _ in 0..5 {
            synth.fill(&mut buf);
        }
        assert_eq!(synth.state().carrier_hz(), 24_000);
    }

    #[test]
    fn nyquist_ceiling_follows_the_running_rate() {
        // 48 kHz asked for, 44.1 kHz granted
        let cfg = SynthConfig::new(44_100, 735).unwrap();
        let mut synth = Synth::new(cfg, Patch::swept(22_040, SweepParams::default())).unwrap();
        let mut buf = [0.0_f32; 16];
        for _ in 0..40 {
            synth.fill(&mut buf);
        }
        assert_eq!(synth.state().carrier_hz(), 22_050);
    }

    #[test]
    fn unbounded_sweep_saturates() {
        let sweep = SweepParams { step_hz: 10, ceiling: SweepCeiling::Unbounded };
        let mut synth = Synth::new(cfg(), Patch::swept(u32::MAX - 15, sweep)).unwrap();
        let mut buf = [0.0_f32; 4];
        synth.fill(&mut buf);
        synth.fill(&mut buf);
        assert_eq!(synth.state().carrier_hz(), u32::MAX);
    }

    #[test]
    fn fm_depth_cycle_is_sixty_buffers() {
        let mut synth = Synth::new(cfg(), Patch::fm(1000, FmParams::default())).unwrap();
        assert_eq!(synth.state().modulator_amplitude(), 0.4);
        let mut buf = [0.0_f32; FRAMES];
        let mut previous = 0.4;
        for fill in 1..=60 {
            synth.fill(&mut buf);
            let depth = synth.state().modulator_amplitude();
            assert!(depth < previous, "fill {fill}: {depth} !< {previous}");
            previous = depth;
            if fill < 60 {
                assert!(depth > 0.0, "fill {fill} hit zero early");
            }
        }
        assert!(synth.state().modulator_amplitude() <= 0.0);
        synth.fill(&mut buf);
        assert_eq!(synth.state().modulator_amplitude(), 0.4);
    }

    #[test]
    fn fm_depth_decrement_matches_cadence() {
        let mut synth = Synth::new(cfg(), Patch::fm(1000, FmParams::default())).unwrap();
        let mut buf = [0.0_f32; FRAMES];
        synth.fill(&mut buf);
        let drop = 0.4 - synth.state().modulator_amplitude();
        assert!((drop - 0.4 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn fm_matches_closed_form_per_buffer() {
        let fm = FmParams::default();
        let mut synth = Synth::new(cfg(), Patch::fm(1000, fm)).unwrap();
        let mut buf = [0.0_f64; FRAMES];
        for block in 0..4_usize {
            let depth = synth.state().modulator_amplitude();
            synth.fill(&mut buf);
            for (i, y) in buf.iter().enumerate() {
                let n = (block * FRAMES + i) as f64;
                let m = depth * (500.0 * TAU * n / f64::from(SR)).sin();
                let direct = (m + 1000.0 * TAU * n / f64::from(SR)).sin();
                assert!((y - direct).abs() < 1e-9, "block={block} i={i}");
            }
        }
    }

    #[test]
    fn fm_advances_both_phases() {
        let mut synth = Synth::new(cfg(), Patch::fm(1000, FmParams::default())).unwrap();
        let mut buf = [0.0_f32; FRAMES];
        synth.fill(&mut buf);
        let s = synth.state();
        assert_eq!(s.carrier_phase(), advance_phase(1000, 0.0, FRAMES, SR));
        assert_eq!(s.modulator_phase(), advance_phase(500, 0.0, FRAMES, SR));
    }

    #[test]
    fn plain_leaves_modulator_alone() {
        let mut synth = Synth::new(cfg(), Patch::plain(1000)).unwrap();
        let mut buf = [0.0_f32; FRAMES];
        synth.fill(&mut buf);
        assert_eq!(synth.state().modulator_phase(), 0.0);
        assert_eq!(synth.state().modulator_amplitude(), 0.0);
    }

    #[test]
    fn pitch_change_keeps_phase() {
        let mut synth = Synth::new(cfg(), Patch::plain(1000)).unwrap();
        let mut buf = [0.0_f64; FRAMES];
        synth.fill(&mut buf);
        let phase = synth.state().carrier_phase();
        synth.set_carrier_hz(1500);
        assert_eq!(synth.state().carrier_phase(), phase);
        synth.fill(&mut buf);
        assert!((buf[0] - phase.sin()).abs() < 1e-15);
        assert_eq!(synth.state().carrier_hz(), 1500);
    }

    #[test]
    fn nudge_saturates_at_zero() {
        let mut synth = Synth::new(cfg(), Patch::plain(10)).unwrap();
        synth.nudge_carrier_hz(-25);
        assert_eq!(synth.state().carrier_hz(), 0);
        synth.nudge_carrier_hz(40);
        assert_eq!(synth.state().carrier_hz(), 40);
        synth.set_modulator_hz(321);
        assert_eq!(synth.state().modulator_hz(), 321);
    }

    #[test]
    fn invalid_patches_are_rejected() {
        let zero_step = SweepParams { step_hz: 0, ceiling: SweepCeiling::Unbounded };
        assert_eq!(Synth::new(cfg(), Patch::swept(1000, zero_step)).unwrap_err(), ConfigError::ZeroSweepStep);
        let bad_depth = FmParams { max_depth: -1.0, ..FmParams::default() };
        assert!(matches!(Synth::new(cfg(), Patch::fm(1000, bad_depth)), Err(ConfigError::InvalidDepth(_))));
        let bad_decay = FmParams { decay_secs: f64::INFINITY, ..FmParams::default() };
        assert!(matches!(Synth::new(cfg(), Patch::fm(1000, bad_decay)), Err(ConfigError::InvalidDecay(_))));
    }

    #[test]
    fn substituted_rate_is_honoured() {
        let cfg = SynthConfig::new(44_100, 735).unwrap();
        let mut synth = Synth::new(cfg, Patch::fm(1000, FmParams::default())).unwrap();
        assert_eq!(synth.state().envelope().steps(), 60);
        let mut buf = [0.0_f64; 735];
        synth.fill(&mut buf);
        let expected = advance_phase(1000, 0.0, 735, 44_100);
        assert_eq!(synth.state().carrier_phase(), expected);
    }

    #[test]
    fn resumed_state_continues_where_it_left_off() {
        let mut a = Synth::new(cfg(), Patch::plain(660)).unwrap();
        let mut buf = [0.0_f64; FRAMES];
        a.fill(&mut buf);
        let mut b = Synth::from_state(*a.config(), *a.waveform(), a.state());
        let mut next_a = [0.0_f64; FRAMES];
        let mut next_b = [0.0_f64; FRAMES];
        a.fill(&mut next_a);
        b.fill(&mut next_b);
        assert_eq!(next_a, next_b);
        let seeded = SynthState::new(660, 0, DecayEnvelope::new(0.0, 1).unwrap()).with_phases(TAU + 1.0, -1.0);
        assert!((seeded.carrier_phase() - 1.0).abs() < 1e-12);
        assert!((seeded.modulator_phase() - (TAU - 1.0)).abs() < 1e-12);
    }
}
