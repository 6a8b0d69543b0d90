// SPDX-License-Identifier: LGPL-3.0-or-later

//! Complex transfer-function evaluation and element-wise complex ops.
//!
//! Responses are stored as interleaved [`Complex64`] values, one per
//! evaluated frequency.

use multiversion::multiversion;
use num_complex::Complex64;

use crate::types::BiquadCoeffs;

/// Evaluate `H(z)` of a biquad on the unit circle at angle `w` (radians
/// per sample), i.e. with `z = e^{jw}`.
///
/// ```text
///   H = (b0 + b1*e^{-jw} + b2*e^{-j2w}) / (a0 + a1*e^{-jw} + a2*e^{-j2w})
/// ```
#[inline]
pub fn biquad_transfer(c: &BiquadCoeffs, w: f64) -> Complex64 {
    let z1 = Complex64::from_polar(1.0, -w);
    let z2 = Complex64::from_polar(1.0, -2.0 * w);

    let num = c.b[0] + z1 * c.b[1] + z2 * c.b[2];
    let den = c.a[0] + z1 * c.a[1] + z2 * c.a[2];

    num / den
}

/// Evaluate a biquad at each frequency in `freqs` (Hz).
///
/// Writes `min(dst.len(), freqs.len())` values, preserving input order.
pub fn biquad_freq_response(
    dst: &mut [Complex64],
    c: &BiquadCoeffs,
    freqs: &[f64],
    sample_rate: f64,
) {
    let k = std::f64::consts::TAU / sample_rate;
    for (h, &f) in dst.iter_mut().zip(freqs.iter()) {
        *h = biquad_transfer(c, k * f);
    }
}

/// Complex multiply in place: `dst[i] *= src[i]`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn complex_mul_inplace(dst: &mut [Complex64], src: &[Complex64]) {
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d *= s;
    }
}

/// Complex magnitude: `dst[i] = |src[i]|`.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn complex_mag(dst: &mut [f64], src: &[Complex64]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = s.norm();
    }
}
