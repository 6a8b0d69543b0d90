// SPDX-License-Identifier: LGPL-3.0-or-later

//! Error type shared by the designer, the chain and the engine.

use std::fmt;

/// The filter parameter an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Kind,
    GainDb,
    FrequencyHz,
    QFactor,
    SampleRate,
    StageCount,
    ResponseGrid,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Param::Kind => "filter type",
            Param::GainDb => "gain (dB)",
            Param::FrequencyHz => "frequency (Hz)",
            Param::QFactor => "Q factor",
            Param::SampleRate => "sample rate",
            Param::StageCount => "stage count",
            Param::ResponseGrid => "response grid",
        };
        f.write_str(name)
    }
}

/// Errors reported by the equalizer core.
///
/// All variants are recoverable; nothing in the core aborts on bad input.
#[derive(Debug, Clone, PartialEq)]
pub enum EqError {
    /// A filter parameter is missing, non-finite or out of range.
    InvalidParameter {
        /// Zero-based stage index, when the error came from a chain build.
        stage: Option<usize>,
        param: Param,
        value: f64,
        reason: &'static str,
    },
    /// The designed filter is numerically degenerate.
    DesignFailure {
        stage: Option<usize>,
        reason: &'static str,
    },
    /// Processing was requested without a successfully built chain.
    ChainNotReady,
    /// The buffer's sample rate differs from the one the chain was built for.
    SampleRateMismatch { expected: f64, actual: f64 },
    /// Chunked processing was cancelled; no output is returned.
    Cancelled,
    /// A configuration document could not be parsed or written.
    Config(String),
}

impl EqError {
    pub(crate) fn invalid(param: Param, value: f64, reason: &'static str) -> Self {
        EqError::InvalidParameter {
            stage: None,
            param,
            value,
            reason,
        }
    }

    /// Attach a zero-based stage index to a design or parameter error.
    pub fn at_stage(self, index: usize) -> Self {
        match self {
            EqError::InvalidParameter {
                param,
                value,
                reason,
                ..
            } => EqError::InvalidParameter {
                stage: Some(index),
                param,
                value,
                reason,
            },
            EqError::DesignFailure { reason, .. } => EqError::DesignFailure {
                stage: Some(index),
                reason,
            },
            other => other,
        }
    }

    /// The zero-based stage index the error refers to, if any.
    pub fn stage(&self) -> Option<usize> {
        match self {
            EqError::InvalidParameter { stage, .. } | EqError::DesignFailure { stage, .. } => {
                *stage
            }
            _ => None,
        }
    }

    /// The offending parameter, for `InvalidParameter` errors.
    pub fn param(&self) -> Option<Param> {
        match self {
            EqError::InvalidParameter { param, .. } => Some(*param),
            _ => None,
        }
    }
}

impl fmt::Display for EqError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(stage) = self.stage() {
            write!(f, "filter {}: ", stage + 1)?;
        }
        match self {
            EqError::InvalidParameter {
                param,
                value,
                reason,
                ..
            } => write!(f, "invalid {}: {} ({})", param, value, reason),
            EqError::DesignFailure { reason, .. } => write!(f, "filter design failed: {}", reason),
            EqError::ChainNotReady => write!(f, "filter chain is not built"),
            EqError::SampleRateMismatch { expected, actual } => write!(
                f,
                "sample rate mismatch: chain built for {} Hz, buffer is {} Hz",
                expected, actual
            ),
            EqError::Cancelled => write!(f, "processing cancelled"),
            EqError::Config(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for EqError {}

impl From<serde_json::Error> for EqError {
    fn from(e: serde_json::Error) -> Self {
        EqError::Config(e.to_string())
    }
}

/// Result alias for the equalizer core.
pub type Result<T> = std::result::Result<T, EqError>;
