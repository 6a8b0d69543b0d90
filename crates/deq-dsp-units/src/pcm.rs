// SPDX-License-Identifier: LGPL-3.0-or-later

//! Helpers at the decode/encode boundary.
//!
//! The core works on normalized `f32` samples. Decoders hand over integer
//! PCM which is peak-normalized before filtering; encoders get 16-bit PCM
//! rescaled by 2^15. Format metadata travels alongside untouched.

use deq_dsp_lib::float::{abs_max, count_above, scale_inplace};
use serde::{Deserialize, Serialize};

use crate::consts::I16_FULL_SCALE;

/// Stream metadata carried from decode to encode. Never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    pub frame_rate: u32,
    pub channels: u16,
    /// Bytes per sample.
    pub sample_width: u16,
}

impl PcmFormat {
    /// Frame rate as the `f64` sample rate the engine expects.
    pub fn sample_rate(&self) -> f64 {
        f64::from(self.frame_rate)
    }
}

/// Largest absolute sample value, `0.0` for an empty or silent buffer.
pub fn peak_abs(samples: &[f32]) -> f32 {
    abs_max(samples)
}

/// Scale `samples` so the largest magnitude is 1.0.
///
/// Returns the factor applied. Silent buffers are left alone and report a
/// factor of 1.0.
pub fn normalize_peak(samples: &mut [f32]) -> f32 {
    let peak = peak_abs(samples);
    if peak == 0.0 || !peak.is_finite() {
        return 1.0;
    }
    let k = 1.0 / peak;
    scale_inplace(samples, k);
    k
}

/// Widen 16-bit PCM to `f32` in `[-1, 1)`.
pub fn from_i16(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&s| f32::from(s) / I16_FULL_SCALE)
        .collect()
}

/// Outcome of converting processed samples for the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipReport {
    /// Largest absolute input sample.
    pub peak: f32,
    /// Samples whose magnitude exceeded 1.0 and were saturated.
    pub clipped: usize,
}

impl ClipReport {
    pub fn is_clipping(&self) -> bool {
        self.clipped > 0
    }
}

/// Rescale by 2^15 and narrow to `i16`, truncating toward zero.
///
/// Out-of-range values saturate at `i16::MIN`/`i16::MAX` instead of
/// wrapping; a sample of exactly 1.0 lands on `i16::MAX`. NaN becomes 0.
pub fn to_i16(samples: &[f32]) -> (Vec<i16>, ClipReport) {
    let report = ClipReport {
        peak: peak_abs(samples),
        clipped: count_above(samples, 1.0),
    };
    // float-to-int `as` casts saturate
    let out = samples.iter().map(|&s| (s * I16_FULL_SCALE) as i16).collect();
    (out, report)
}
