// SPDX-License-Identifier: LGPL-3.0-or-later

//! Buffer float utilities: peak search, threshold counting and scaling.

use multiversion::multiversion;

/// Find the maximum absolute value in a buffer.
///
/// Returns `0.0` for an empty buffer. NaN samples are ignored.
pub fn abs_max(src: &[f32]) -> f32 {
    src.iter().map(|x| x.abs()).fold(0.0f32, f32::max)
}

/// Count samples whose absolute value is strictly greater than `limit`.
pub fn count_above(src: &[f32], limit: f32) -> usize {
    src.iter().filter(|x| x.abs() > limit).count()
}

/// Multiply every sample by `k` in place.
#[multiversion(targets("x86_64+avx2+fma", "x86_64+avx", "x86_64+sse4.1", "aarch64+neon",))]
pub fn scale_inplace(buf: &mut [f32], k: f32) {
    for sample in buf.iter_mut() {
        *sample *= k;
    }
}
