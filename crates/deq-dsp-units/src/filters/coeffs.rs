// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad coefficient design.
//!
//! - [`FilterKind::HighPass`] / [`FilterKind::LowPass`]: second-order
//!   Butterworth, obtained from the analog prototype
//!   `1 / (s^2 + sqrt(2)*s + 1)` by the bilinear transform with the cutoff
//!   pre-warped, so the -3 dB point lands exactly on `frequency_hz`.
//! - [`FilterKind::Peak`]: constant-Q peaking section from the RBJ Audio EQ
//!   Cookbook. The linear gain `10^(gain_db/20)` is split as `A^2` between
//!   numerator and denominator, which puts exactly `gain_db` at the centre
//!   and 0 dB at DC and Nyquist.
//!
//! Returned coefficients are normalized (`a0 == 1`).

use std::f64::consts::{PI, SQRT_2};

use deq_dsp_lib::types::BiquadCoeffs;

use super::spec::{FilterKind, FilterSpec};
use crate::error::{EqError, Result};
use crate::units::{db_to_gain, hz_to_omega};

/// Analog second-order section normalized to a unit cutoff:
/// `(num[0] + num[1]*s + num[2]*s^2) / (den[0] + den[1]*s + den[2]*s^2)`.
#[derive(Debug, Clone, Copy)]
struct AnalogSection {
    num: [f64; 3],
    den: [f64; 3],
}

/// Butterworth second-order denominator `s^2 + sqrt(2)*s + 1`.
const BUTTERWORTH_DEN: [f64; 3] = [1.0, SQRT_2, 1.0];

const BUTTERWORTH_LOWPASS: AnalogSection = AnalogSection {
    num: [1.0, 0.0, 0.0],
    den: BUTTERWORTH_DEN,
};

const BUTTERWORTH_HIGHPASS: AnalogSection = AnalogSection {
    num: [0.0, 0.0, 1.0],
    den: BUTTERWORTH_DEN,
};

/// Design the biquad for `spec` at `sample_rate`.
///
/// # Errors
///
/// - [`EqError::InvalidParameter`] if any field of `spec` is out of range,
///   including `frequency_hz >= sample_rate / 2` and `q_factor <= 0`.
/// - [`EqError::DesignFailure`] if the resulting filter has a non-finite
///   coefficient, a zero leading feedback coefficient, or poles on or
///   outside the unit circle.
pub fn design(spec: FilterSpec, sample_rate: f64) -> Result<BiquadCoeffs> {
    spec.validate(sample_rate)?;

    let raw = match spec.kind {
        FilterKind::LowPass => bilinear(BUTTERWORTH_LOWPASS, sample_rate, spec.frequency_hz),
        FilterKind::HighPass => bilinear(BUTTERWORTH_HIGHPASS, sample_rate, spec.frequency_hz),
        FilterKind::Peak => peaking(sample_rate, spec.frequency_hz, spec.q_factor, spec.gain_db),
    };

    check_coeffs(&raw)
}

/// Map a unit-cutoff analog section to the z-plane with the bilinear
/// transform, pre-warping so that analog `w = 1` lands on `cutoff` Hz.
///
/// Substitutes `s = c * (1 - z^-1) / (1 + z^-1)` with
/// `c = 1 / tan(pi * cutoff / sample_rate)`.
fn bilinear(section: AnalogSection, sample_rate: f64, cutoff: f64) -> BiquadCoeffs {
    let c = 1.0 / (PI * cutoff / sample_rate).tan();
    let c2 = c * c;

    let map = |p: [f64; 3]| {
        [
            p[0] + p[1] * c + p[2] * c2,
            2.0 * (p[0] - p[2] * c2),
            p[0] - p[1] * c + p[2] * c2,
        ]
    };

    BiquadCoeffs::new(map(section.num), map(section.den))
}

/// RBJ cookbook peaking EQ section (not normalized).
fn peaking(sample_rate: f64, freq: f64, q: f64, gain_db: f64) -> BiquadCoeffs {
    let w0 = hz_to_omega(sample_rate, freq);
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q);
    // A^2 is the linear gain at the centre frequency
    let a_lin = db_to_gain(gain_db).sqrt();

    BiquadCoeffs::new(
        [1.0 + alpha * a_lin, -2.0 * cos_w0, 1.0 - alpha * a_lin],
        [1.0 + alpha / a_lin, -2.0 * cos_w0, 1.0 - alpha / a_lin],
    )
}

/// Normalize raw coefficients and reject degenerate results.
pub fn check_coeffs(raw: &BiquadCoeffs) -> Result<BiquadCoeffs> {
    if !raw.is_finite() {
        return Err(EqError::DesignFailure {
            stage: None,
            reason: "non-finite coefficient",
        });
    }
    let Some(norm) = raw.normalized() else {
        return Err(EqError::DesignFailure {
            stage: None,
            reason: "zero leading feedback coefficient",
        });
    };
    if !norm.is_finite() {
        return Err(EqError::DesignFailure {
            stage: None,
            reason: "non-finite coefficient",
        });
    }
    if !norm.is_stable() {
        return Err(EqError::DesignFailure {
            stage: None,
            reason: "poles on or outside the unit circle",
        });
    }
    Ok(norm)
}
