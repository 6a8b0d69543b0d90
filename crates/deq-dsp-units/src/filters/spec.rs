// SPDX-License-Identifier: LGPL-3.0-or-later

//! Filter stage description.
//!
//! A [`FilterSpec`] is a plain value record produced by the parameter-entry
//! side and consumed by the designer. It carries no filter state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{GAIN_DB_MAX, GAIN_DB_MIN, Q_MAX};
use crate::error::{EqError, Param, Result};
use crate::units::nyquist;

/// Filter kinds supported by the designer.
///
/// Serialized and displayed with the short names `HPF`, `LPF`, `Peak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Second-order Butterworth high-pass.
    #[serde(rename = "HPF", alias = "highpass")]
    HighPass,
    /// Second-order Butterworth low-pass.
    #[serde(rename = "LPF", alias = "lowpass")]
    LowPass,
    /// Constant-Q peaking (bell) boost/cut.
    #[serde(rename = "Peak", alias = "peaking")]
    Peak,
}

impl FilterKind {
    /// All kinds, in the order the parameter-entry side lists them.
    pub const fn all() -> [Self; 3] {
        [FilterKind::HighPass, FilterKind::LowPass, FilterKind::Peak]
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            FilterKind::HighPass => "HPF",
            FilterKind::LowPass => "LPF",
            FilterKind::Peak => "Peak",
        }
    }

    /// True if the kind uses `gain_db`.
    pub const fn uses_gain(self) -> bool {
        matches!(self, FilterKind::Peak)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = EqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hpf" | "highpass" | "high-pass" => Ok(FilterKind::HighPass),
            "lpf" | "lowpass" | "low-pass" => Ok(FilterKind::LowPass),
            "peak" | "peaking" | "bell" => Ok(FilterKind::Peak),
            _ => Err(EqError::invalid(Param::Kind, f64::NAN, "unknown filter type")),
        }
    }
}

/// Immutable description of one filter stage.
///
/// `gain_db` only affects [`FilterKind::Peak`] but is kept for every kind
/// so that records have a uniform shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    /// Gain in dB, `-40..=40`.
    pub gain_db: f64,
    /// Center/cutoff frequency in Hz, `> 0` and below Nyquist.
    pub frequency_hz: f64,
    /// Quality factor, `> 0` and `<= 10`.
    pub q_factor: f64,
}

impl FilterSpec {
    /// Create a spec, validating every range that does not depend on the
    /// sample rate.
    pub fn new(kind: FilterKind, gain_db: f64, frequency_hz: f64, q_factor: f64) -> Result<Self> {
        let spec = Self {
            kind,
            gain_db,
            frequency_hz,
            q_factor,
        };
        spec.check_ranges()?;
        Ok(spec)
    }

    /// Create a spec from a frequency typed as text.
    pub fn from_text(kind: FilterKind, gain_db: f64, frequency: &str, q_factor: f64) -> Result<Self> {
        let text = frequency.trim();
        if text.is_empty() {
            return Err(EqError::invalid(Param::FrequencyHz, f64::NAN, "missing"));
        }
        let frequency_hz = text
            .parse::<f64>()
            .map_err(|_| EqError::invalid(Param::FrequencyHz, f64::NAN, "not a number"))?;
        Self::new(kind, gain_db, frequency_hz, q_factor)
    }

    /// Check every range except the Nyquist limit.
    pub fn check_ranges(&self) -> Result<()> {
        if !self.frequency_hz.is_finite() {
            return Err(EqError::invalid(Param::FrequencyHz, self.frequency_hz, "not finite"));
        }
        if self.frequency_hz <= 0.0 {
            return Err(EqError::invalid(Param::FrequencyHz, self.frequency_hz, "must be positive"));
        }
        if !self.gain_db.is_finite() {
            return Err(EqError::invalid(Param::GainDb, self.gain_db, "not finite"));
        }
        if !(GAIN_DB_MIN..=GAIN_DB_MAX).contains(&self.gain_db) {
            return Err(EqError::invalid(Param::GainDb, self.gain_db, "must be within -40..40 dB"));
        }
        if !self.q_factor.is_finite() {
            return Err(EqError::invalid(Param::QFactor, self.q_factor, "not finite"));
        }
        if self.q_factor <= 0.0 {
            return Err(EqError::invalid(Param::QFactor, self.q_factor, "must be positive"));
        }
        if self.q_factor > Q_MAX {
            return Err(EqError::invalid(Param::QFactor, self.q_factor, "must not exceed 10"));
        }
        Ok(())
    }

    /// Check every range, including `frequency_hz < sample_rate / 2`.
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        check_sample_rate(sample_rate)?;
        self.check_ranges()?;
        if self.frequency_hz >= nyquist(sample_rate) {
            return Err(EqError::invalid(
                Param::FrequencyHz,
                self.frequency_hz,
                "must be below Nyquist",
            ));
        }
        Ok(())
    }

    /// Legend label, e.g. `"HPF @ 1000 Hz"`.
    pub fn label(&self) -> String {
        format!("{} @ {} Hz", self.kind, self.frequency_hz)
    }
}

/// Reject non-finite or non-positive sample rates.
pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(EqError::invalid(Param::SampleRate, sample_rate, "must be positive"));
    }
    Ok(())
}
