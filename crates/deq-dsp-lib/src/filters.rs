// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad filter processing (static coefficients).
//!
//! Each section runs the transposed direct-form II recurrence with
//! coefficients normalized to `a0 == 1` and standard feedback signs:
//! ```text
//!   y    = b0 * x + d[0]
//!   d[0] = b1 * x - a1 * y + d[1]
//!   d[1] = b2 * x - a2 * y
//! ```
//!
//! Samples are widened to `f64` on input and narrowed back to `f32` on
//! output; the delay memory stays in `f64` for the whole buffer.

use multiversion::multiversion;

use crate::types::Biquad;

/// Process audio through a single biquad section.
///
/// Output length is `min(dst.len(), src.len())`. The section's delay memory
/// is carried over from previous calls; call [`Biquad::reset`] first for
/// zero initial conditions. A section whose `a0` is zero or not finite
/// passes the signal through unchanged.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn biquad_process(dst: &mut [f32], src: &[f32], f: &mut Biquad) {
    let n = dst.len().min(src.len());
    debug_assert!(
        f.coeffs.normalized().is_some(),
        "biquad_process requires a non-zero finite a0"
    );
    let Some(c) = f.coeffs.normalized() else {
        dst[..n].copy_from_slice(&src[..n]);
        return;
    };
    let [b0, b1, b2] = c.b;
    let [_, a1, a2] = c.a;

    let d = &mut f.d;

    for (out, &inp) in dst[..n].iter_mut().zip(src[..n].iter()) {
        let x = f64::from(inp);
        let y = b0 * x + d[0];
        d[0] = b1 * x - a1 * y + d[1];
        d[1] = b2 * x - a2 * y;
        *out = y as f32;
    }
}

/// Process audio in-place through a single biquad section.
///
/// Same recurrence and rounding as [`biquad_process`].
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn biquad_process_inplace(buf: &mut [f32], f: &mut Biquad) {
    let Some(c) = f.coeffs.normalized() else {
        return;
    };
    let [b0, b1, b2] = c.b;
    let [_, a1, a2] = c.a;

    let d = &mut f.d;

    for sample in buf.iter_mut() {
        let x = f64::from(*sample);
        let y = b0 * x + d[0];
        d[0] = b1 * x - a1 * y + d[1];
        d[1] = b2 * x - a2 * y;
        *sample = y as f32;
    }
}
