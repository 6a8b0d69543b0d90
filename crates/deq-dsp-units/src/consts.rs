// SPDX-License-Identifier: LGPL-3.0-or-later

//! Equalizer limits, response-grid defaults and numeric guards.

// Parameter ranges

/// Lowest accepted peaking gain in dB.
pub const GAIN_DB_MIN: f64 = -40.0;

/// Highest accepted peaking gain in dB.
pub const GAIN_DB_MAX: f64 = 40.0;

/// Highest accepted Q factor. The lower bound is exclusive zero.
pub const Q_MAX: f64 = 10.0;

/// Default number of stages an engine accepts.
pub const MAX_STAGES: usize = 5;

// Response grid

/// Lower edge of the displayed response (Hz).
pub const RESPONSE_MIN_HZ: f64 = 20.0;

/// Upper edge of the displayed response (Hz).
pub const RESPONSE_MAX_HZ: f64 = 20_000.0;

/// Default number of logarithmically spaced response points.
pub const RESPONSE_POINTS: usize = 512;

// Numeric guards

/// Magnitudes below this are treated as zero when converting to dB.
pub const MAGNITUDE_EPSILON: f64 = 1e-15;

/// dB value reported for a numerically zero magnitude.
pub const RESPONSE_FLOOR_DB: f64 = -300.0;

// Sample rates and PCM

/// CD sample rate (Hz).
pub const SAMPLE_RATE_44K1: f64 = 44_100.0;

/// Full-scale value used to rescale normalized samples to 16-bit PCM (2^15).
pub const I16_FULL_SCALE: f32 = 32_768.0;

/// Default chunk length for cancellable processing (samples).
pub const CANCEL_CHUNK_LEN: usize = 8192;
