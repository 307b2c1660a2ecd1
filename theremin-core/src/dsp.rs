//! Math backend and phase helpers.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Phase arithmetic in `f64` so long sessions do not drift
//! - Optional `fast-math` sine for the hot path
//!
//! Conventions:
//! - Phases are in radians and live in `[0, TAU)` between buffers.
//! - Frequencies are integer Hz, sample rates integer Hz.

#![allow(clippy::excessive_precision)]

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // std backend
    if #[cfg(feature = "std")] {
        #[cfg_attr(feature = "fast-math", allow(dead_code))]
        #[inline] fn m_sin(x: f64) -> f64 { x.sin() }
        #[inline] fn m_round(x: f64) -> f64 { x.round() }
    // libm (C math) in no_std
    } else if #[cfg(feature = "no-std")] {
        #[cfg_attr(feature = "fast-math", allow(dead_code))]
        #[inline] fn m_sin(x: f64) -> f64 { libm::sin(x) }
        #[inline] fn m_round(x: f64) -> f64 { libm::round(x) }
    } else {
        compile_error!("theremin-core needs either the `std` or the `no-std` feature");
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π
pub const TAU: f64 = core::f64::consts::TAU;

// --------------------------------- Sine ------------------------------------------

/// Sine used by every waveform policy.
///
/// With `fast-math` this is a range-reduced 7th-order odd polynomial (max abs error
/// ~2e-4), clamped so
/// the result never leaves `[-1, 1]`; otherwise it is the backend's exact `sin`.
#[inline]
pub fn sine(x: f64) -> f64 {
    cfg_if! {
        if #[cfg(feature = "fast-math")] {
            use core::f64::consts::{FRAC_PI_2, PI};
            // range-reduce to [-π, π]
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            let k = (x / TAU) as i64 as f64;
            let mut xr = x - k * TAU;
            if xr > PI {
                xr -= TAU;
            } else if xr < -PI {
                xr += TAU;
            }
            // fold to [-π/2, π/2] where the polynomial is accurate
            if xr > FRAC_PI_2 {
                xr = PI - xr;
            } else if xr < -FRAC_PI_2 {
                xr = -PI - xr;
            }
            let x2 = xr * xr;
            let y = xr
                * (1.0
                    + x2 * (-1.0 / 6.0 + x2 * (1.0 / 120.0 + x2 * (-1.0 / 5040.0))));
            clamp_unit(y)
        } else {
            m_sin(x)
        }
    }
}

/// Round half away from zero on either backend.
#[inline]
pub fn round(x: f64) -> f64 {
    m_round(x)
}

/// Clamp into the unit range `[-1, 1]`.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

// --------------------------------- Phase -----------------------------------------

/// Fold an angle into `[0, TAU)` with a floating-point remainder.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let r = phase % TAU;
    if r < 0.0 {
        // `r + TAU` can round up to exactly TAU for tiny negative r
        let up = r + TAU;
        if up >= TAU { 0.0 } else { up }
    } else {
        r
    }
}

/// Instantaneous phase argument of sample `index` for an operator at `hz`
/// starting from `phase`: `hz·2π·index/sr + phase`.
#[inline]
pub fn phase_at(hz: u32, phase: f64, index: usize, sample_rate: u32) -> f64 {
    f64::from(hz) * TAU * index as f64 / f64::from(sample_rate) + phase
}

/// Radians advanced per sample at `hz`.
#[inline]
pub fn phase_increment(hz: u32, sample_rate: u32) -> f64 {
    f64::from(hz) * TAU / f64::from(sample_rate)
}

/// Phase after `frames` samples, wrapped: `(hz·2π·frames/sr + phase) mod 2π`.
#[inline]
pub fn advance_phase(hz: u32, phase: f64, frames: usize, sample_rate: u32) -> f64 {
    wrap_phase(phase_at(hz, phase, frames, sample_rate))
}

// --------------------------------- Tests (std only) ------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_phase_stays_in_range() {
        for p in [-20.0, -TAU, -1e-18, 0.0, 1.0, TAU, 3.0 * TAU + 0.5, 1.0e6] {
            let w = wrap_phase(p);
            assert!((0.0..TAU).contains(&w), "p={p} w={w}");
        }
    }

    #[test]
    fn wrap_phase_is_a_true_remainder() {
        let p = 16.0 * TAU + 0.25;
        assert!((wrap_phase(p) - 0.25).abs() < 1e-12);
        assert!((wrap_phase(-0.25) - (TAU - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn advance_matches_increment_sum() {
        let sr = 48_000;
        let mut stepped = 0.0;
        for _ in 0..800 {
            stepped += phase_increment(440, sr);
        }
        let direct = advance_phase(440, 0.0, 800, sr);
        assert!((wrap_phase(stepped) - direct).abs() < 1e-9);
    }

    #[test]
    fn round_goes_half_away_from_zero() {
        assert_eq!(round(59.5), 60.0);
        assert_eq!(round(60.49), 60.0);
        assert_eq!(round(-2.5), -3.0);
        assert_eq!(round(0.0), 0.0);
    }

    #[test]
    fn sine_is_bounded() {
        let mut x = -50.0;
        while x < 50.0 {
            let y = sine(x);
            assert!((-1.0..=1.0).contains(&y), "x={x} y={y}");
            x += 0.013;
        }
    }
}
