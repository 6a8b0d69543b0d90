// SPDX-License-Identifier: LGPL-3.0-or-later

//! Frequency response evaluation.
//!
//! Stage responses are evaluated as complex values on the unit circle and
//! combined by complex multiplication before conversion to dB.

use deq_dsp_lib::complex::{biquad_freq_response, complex_mag};
use deq_dsp_lib::types::BiquadCoeffs;
use num_complex::Complex64;
use serde::Serialize;

use crate::units::gain_to_db;

/// Evaluate `H(e^{jw})` of `coeffs` at each frequency (Hz).
///
/// One value per input frequency, in input order.
pub fn evaluate(coeffs: &BiquadCoeffs, frequencies: &[f64], sample_rate: f64) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); frequencies.len()];
    biquad_freq_response(&mut out, coeffs, frequencies, sample_rate);
    out
}

/// `20*log10(|h|)`, floored for magnitudes that are numerically zero.
#[inline]
pub fn magnitude_db(h: Complex64) -> f64 {
    gain_to_db(h.norm())
}

/// A single point of a magnitude curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Magnitude response on a frequency grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseCurve {
    frequencies: Vec<f64>,
    magnitudes_db: Vec<f64>,
}

impl ResponseCurve {
    /// Convert complex responses to dB. `frequencies` and `response` must
    /// have equal length; extra entries of the longer one are dropped.
    pub fn from_complex(frequencies: &[f64], response: &[Complex64]) -> Self {
        let n = frequencies.len().min(response.len());
        let mut mags = vec![0.0; n];
        complex_mag(&mut mags, &response[..n]);
        let magnitudes_db = mags.into_iter().map(gain_to_db).collect();
        Self {
            frequencies: frequencies[..n].to_vec(),
            magnitudes_db,
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes_db(&self) -> &[f64] {
        &self.magnitudes_db
    }

    /// Iterate over `(frequency, magnitude)` points in grid order.
    pub fn points(&self) -> impl Iterator<Item = ResponsePoint> + '_ {
        self.frequencies
            .iter()
            .zip(self.magnitudes_db.iter())
            .map(|(&frequency_hz, &magnitude_db)| ResponsePoint {
                frequency_hz,
                magnitude_db,
            })
    }

    /// Magnitude at `freq`, interpolated linearly in log frequency between
    /// the surrounding grid points.
    ///
    /// Returns `None` if `freq` lies outside the grid. The grid is assumed
    /// to be increasing.
    pub fn magnitude_at(&self, freq: f64) -> Option<f64> {
        let f = &self.frequencies;
        let (&first, &last) = (f.first()?, f.last()?);
        if !(first..=last).contains(&freq) {
            return None;
        }
        let hi = f.partition_point(|&x| x < freq);
        if f[hi] == freq || hi == 0 {
            return Some(self.magnitudes_db[hi]);
        }
        let lo = hi - 1;
        let t = (freq.ln() - f[lo].ln()) / (f[hi].ln() - f[lo].ln());
        let (m0, m1) = (self.magnitudes_db[lo], self.magnitudes_db[hi]);
        Some(m0 + (m1 - m0) * t)
    }
}

/// Per-stage and combined curves for one chain, on a shared grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseSet {
    /// `(legend label, curve)` for each stage, in signal-flow order.
    pub stages: Vec<(String, ResponseCurve)>,
    pub combined: ResponseCurve,
}
