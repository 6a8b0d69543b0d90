// SPDX-License-Identifier: LGPL-3.0-or-later

//! Engine configuration.
//!
//! Stored as JSON. Missing fields fall back to the `DEFAULT_*` values, so
//! a document holding only `{"filters": [...]}` is a complete preset.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_STAGES, RESPONSE_MAX_HZ, RESPONSE_MIN_HZ, RESPONSE_POINTS, SAMPLE_RATE_44K1};
use crate::error::{EqError, Param, Result};
use crate::filters::spec::{FilterSpec, check_sample_rate};
use crate::units::log_frequencies;

pub const DEFAULT_SAMPLE_RATE: f64 = SAMPLE_RATE_44K1;
pub const DEFAULT_MAX_STAGES: usize = MAX_STAGES;
pub const DEFAULT_RESPONSE_MIN_HZ: f64 = RESPONSE_MIN_HZ;
pub const DEFAULT_RESPONSE_MAX_HZ: f64 = RESPONSE_MAX_HZ;
pub const DEFAULT_RESPONSE_POINTS: usize = RESPONSE_POINTS;

/// Logarithmic frequency grid used for response curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseGrid {
    pub min_hz: f64,
    pub max_hz: f64,
    pub points: usize,
}

impl Default for ResponseGrid {
    fn default() -> Self {
        Self {
            min_hz: DEFAULT_RESPONSE_MIN_HZ,
            max_hz: DEFAULT_RESPONSE_MAX_HZ,
            points: DEFAULT_RESPONSE_POINTS,
        }
    }
}

impl ResponseGrid {
    pub fn frequencies(&self) -> Vec<f64> {
        log_frequencies(self.min_hz, self.max_hz, self.points)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_hz.is_finite() || self.min_hz <= 0.0 {
            return Err(EqError::invalid(Param::ResponseGrid, self.min_hz, "lower edge must be positive"));
        }
        if !self.max_hz.is_finite() || self.max_hz <= self.min_hz {
            return Err(EqError::invalid(
                Param::ResponseGrid,
                self.max_hz,
                "upper edge must exceed lower edge",
            ));
        }
        if self.points < 2 {
            return Err(EqError::invalid(
                Param::ResponseGrid,
                self.points as f64,
                "needs at least two points",
            ));
        }
        Ok(())
    }
}

/// Everything needed to set up an [`EqualizerEngine`].
///
/// [`EqualizerEngine`]: crate::filters::engine::EqualizerEngine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Design sample rate in Hz.
    pub sample_rate: f64,
    /// Upper bound on the number of stages.
    pub max_stages: usize,
    pub response: ResponseGrid,
    /// Stages in signal-flow order.
    pub filters: Vec<FilterSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_stages: DEFAULT_MAX_STAGES,
            response: ResponseGrid::default(),
            filters: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the sample rate, grid, stage count and every stage.
    ///
    /// Stage errors carry the zero-based stage index.
    pub fn validate(&self) -> Result<()> {
        check_sample_rate(self.sample_rate)?;
        self.response.validate()?;
        if self.max_stages == 0 {
            return Err(EqError::invalid(Param::StageCount, 0.0, "must allow at least one filter"));
        }
        if self.filters.len() > self.max_stages {
            return Err(EqError::invalid(
                Param::StageCount,
                self.filters.len() as f64,
                "too many filters",
            ));
        }
        for (i, spec) in self.filters.iter().enumerate() {
            spec.validate(self.sample_rate).map_err(|e| e.at_stage(i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::spec::FilterKind;

    fn sample() -> EngineConfig {
        EngineConfig {
            filters: vec![
                FilterSpec::new(FilterKind::HighPass, 0.0, 100.0, 0.707).unwrap(),
                FilterSpec::new(FilterKind::Peak, 6.0, 1000.0, 1.0).unwrap(),
                FilterSpec::new(FilterKind::LowPass, 0.0, 8000.0, 0.707).unwrap(),
            ],
            ..EngineConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.sample_rate, 44100.0);
        assert_eq!(c.max_stages, 5);
        assert_eq!(c.response.points, 512);
        assert!(c.validate().is_ok());
        assert_eq!(c.response.frequencies().len(), 512);
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let c = sample();
        let back = EngineConfig::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
        let kinds: Vec<_> = back.filters.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FilterKind::HighPass, FilterKind::Peak, FilterKind::LowPass]);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let c = EngineConfig::from_json(
            r#"{"filters":[{"kind":"Peak","gain_db":-3.0,"frequency_hz":250.0,"q_factor":2.0}]}"#,
        )
        .unwrap();
        assert_eq!(c.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(c.response, ResponseGrid::default());
        assert_eq!(c.filters.len(), 1);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EqError::Config(_)), "{err:?}");
        let err = EngineConfig::from_json(r#"{"filters":[{"kind":"Shelf"}]}"#).unwrap_err();
        assert!(matches!(err, EqError::Config(_)), "{err:?}");
    }

    #[test]
    fn validate_tags_stage() {
        let mut c = sample();
        c.filters[2].frequency_hz = 23000.0;
        let err = c.validate().unwrap_err();
        assert_eq!(err.stage(), Some(2));
        assert_eq!(err.param(), Some(Param::FrequencyHz));
    }

    #[test]
    fn validate_stage_limit() {
        let mut c = sample();
        c.max_stages = 2;
        assert_eq!(c.validate().unwrap_err().param(), Some(Param::StageCount));
        c.max_stages = 0;
        c.filters.clear();
        assert_eq!(c.validate().unwrap_err().param(), Some(Param::StageCount));
    }

    #[test]
    fn validate_grid() {
        for grid in [
            ResponseGrid { min_hz: 0.0, ..ResponseGrid::default() },
            ResponseGrid { max_hz: 10.0, ..ResponseGrid::default() },
            ResponseGrid { points: 1, ..ResponseGrid::default() },
        ] {
            let c = EngineConfig { response: grid, ..EngineConfig::default() };
            assert_eq!(c.validate().unwrap_err().param(), Some(Param::ResponseGrid));
        }
    }
}
