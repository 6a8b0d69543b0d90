// SPDX-License-Identifier: LGPL-3.0-or-later

//! Unit conversion functions.
//!
//! Gain/decibel conversions and frequency-grid helpers used by the
//! designer and the response evaluator.

use crate::consts::{MAGNITUDE_EPSILON, RESPONSE_FLOOR_DB};

/// Convert decibels to linear gain (amplitude ratio).
///
/// # Arguments
/// * `db` - Level in decibels
///
/// # Returns
/// Linear gain (amplitude ratio)
#[inline]
pub fn db_to_gain(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear gain (amplitude ratio) to decibels.
///
/// Gains below [`MAGNITUDE_EPSILON`] (including zero) map to
/// [`RESPONSE_FLOOR_DB`] instead of negative infinity.
///
/// # Arguments
/// * `gain` - Linear gain (amplitude ratio, non-negative)
///
/// # Returns
/// Level in decibels
#[inline]
pub fn gain_to_db(gain: f64) -> f64 {
    if gain < MAGNITUDE_EPSILON {
        RESPONSE_FLOOR_DB
    } else {
        20.0 * gain.log10()
    }
}

/// Normalized angular frequency (radians per sample) of `freq` Hz.
#[inline]
pub fn hz_to_omega(sr: f64, freq: f64) -> f64 {
    std::f64::consts::TAU * freq / sr
}

/// Half the sample rate.
#[inline]
pub fn nyquist(sr: f64) -> f64 {
    sr / 2.0
}

/// Logarithmically spaced frequencies from `min_hz` to `max_hz` inclusive.
///
/// Returns an empty vector for `points == 0` and `[min_hz]` for
/// `points == 1`. The end points are exact.
pub fn log_frequencies(min_hz: f64, max_hz: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![min_hz],
        _ => {
            let lo = min_hz.ln();
            let span = max_hz.ln() - lo;
            let last = (points - 1) as f64;
            (0..points)
                .map(|i| match i {
                    0 => min_hz,
                    i if i == points - 1 => max_hz,
                    i => (lo + span * i as f64 / last).exp(),
                })
                .collect()
        }
    }
}
