// SPDX-License-Identifier: LGPL-3.0-or-later

//! Equalizer engine: caller-editable stage list plus the built chain.
//!
//! Edits only mark the engine stale. [`EqualizerEngine::rebuild`] designs
//! a fresh [`FilterChain`] from the current list; responses and processing
//! are served from the last successful build and refuse to run while the
//! engine is stale.

use std::sync::atomic::AtomicBool;

use deq_dsp_lib::float::abs_max;
use log::{info, warn};

use super::chain::FilterChain;
use super::response::{ResponseCurve, ResponseSet};
use super::spec::FilterSpec;
use crate::config::{EngineConfig, ResponseGrid};
use crate::consts::{CANCEL_CHUNK_LEN, MAX_STAGES};
use crate::error::{EqError, Param, Result};

/// Multi-band equalizer.
///
/// # Examples
///
/// ```
/// use deq_dsp_units::filters::engine::EqualizerEngine;
/// use deq_dsp_units::filters::spec::{FilterKind, FilterSpec};
///
/// let mut eq = EqualizerEngine::new(48000.0);
/// eq.push_spec(FilterSpec::new(FilterKind::LowPass, 0.0, 5000.0, 0.707).unwrap());
/// assert!(!eq.is_ready());
/// eq.rebuild().unwrap();
/// assert!(eq.is_ready());
/// ```
#[derive(Debug, Clone)]
pub struct EqualizerEngine {
    specs: Vec<FilterSpec>,
    sample_rate: f64,
    max_stages: usize,
    grid: ResponseGrid,
    frequencies: Vec<f64>,
    chain: Option<FilterChain>,
    dirty: bool,
}

impl EqualizerEngine {
    /// Create an empty engine with the default response grid.
    pub fn new(sample_rate: f64) -> Self {
        let grid = ResponseGrid::default();
        Self {
            specs: Vec::new(),
            sample_rate,
            max_stages: MAX_STAGES,
            frequencies: grid.frequencies(),
            grid,
            chain: None,
            dirty: true,
        }
    }

    /// Create an engine from a validated configuration.
    ///
    /// The engine starts stale; call [`rebuild`](Self::rebuild) before use.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            specs: config.filters.clone(),
            sample_rate: config.sample_rate,
            max_stages: config.max_stages,
            frequencies: config.response.frequencies(),
            grid: config.response,
            chain: None,
            dirty: true,
        })
    }

    /// Snapshot the current settings as a configuration.
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig {
            sample_rate: self.sample_rate,
            max_stages: self.max_stages,
            response: self.grid,
            filters: self.specs.clone(),
        }
    }

    /// Replace the whole stage list.
    pub fn set_specs(&mut self, specs: Vec<FilterSpec>) {
        self.specs = specs;
        self.dirty = true;
    }

    /// Append a stage at the end of the signal flow.
    pub fn push_spec(&mut self, spec: FilterSpec) {
        self.specs.push(spec);
        self.dirty = true;
    }

    /// Mutable access to the stage list.
    ///
    /// Changes take effect after the next [`rebuild`](Self::rebuild).
    pub fn specs_mut(&mut self) -> &mut Vec<FilterSpec> {
        self.dirty = true;
        &mut self.specs
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    /// Change the design sample rate. Marks the engine stale.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.dirty = true;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_stages(&self) -> usize {
        self.max_stages
    }

    /// Frequencies of the response grid.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// True if the last rebuild succeeded and nothing changed since.
    pub fn is_ready(&self) -> bool {
        !self.dirty && self.chain.is_some()
    }

    /// The built chain, when ready.
    pub fn chain(&self) -> Result<&FilterChain> {
        match &self.chain {
            Some(chain) if !self.dirty => Ok(chain),
            _ => Err(EqError::ChainNotReady),
        }
    }

    /// Design a new chain from the current stage list.
    ///
    /// On failure the previous chain is dropped and the engine stays not
    /// ready until a later rebuild succeeds.
    pub fn rebuild(&mut self) -> Result<()> {
        self.chain = None;
        let built = self
            .check_stage_count()
            .and_then(|()| FilterChain::build(&self.specs, self.sample_rate));
        match built {
            Ok(chain) => {
                info!(
                    "equalizer rebuilt: {} stage(s) at {} Hz",
                    chain.len(),
                    self.sample_rate
                );
                self.chain = Some(chain);
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!("equalizer rebuild failed: {}", e);
                Err(e)
            }
        }
    }

    fn check_stage_count(&self) -> Result<()> {
        if self.specs.len() > self.max_stages {
            return Err(EqError::invalid(
                Param::StageCount,
                self.specs.len() as f64,
                "too many filters",
            ));
        }
        Ok(())
    }

    /// Combined response on the configured grid.
    pub fn combined_response(&self) -> Result<ResponseCurve> {
        Ok(self.chain()?.combined_response(&self.frequencies))
    }

    /// Per-stage responses on the configured grid, in stage order.
    pub fn stage_responses(&self) -> Result<Vec<ResponseCurve>> {
        Ok(self.chain()?.stage_responses(&self.frequencies))
    }

    /// Labelled per-stage curves plus the combined curve.
    pub fn responses(&self) -> Result<ResponseSet> {
        let chain = self.chain()?;
        let stages = chain
            .stages()
            .iter()
            .zip(chain.stage_responses(&self.frequencies))
            .map(|(s, curve)| (s.spec.label(), curve))
            .collect();
        Ok(ResponseSet {
            stages,
            combined: chain.combined_response(&self.frequencies),
        })
    }

    /// Filter a buffer recorded at `sample_rate`.
    ///
    /// Fails before touching the samples if the engine is not ready or the
    /// rate differs from the one the chain was built for.
    pub fn process_buffer(&self, samples: &[f32], sample_rate: f64) -> Result<Vec<f32>> {
        let chain = self.ready_chain(sample_rate)?;
        let out = chain.apply(samples);
        warn_on_clipping(&out);
        Ok(out)
    }

    /// Like [`process_buffer`](Self::process_buffer), polling `cancel`
    /// between chunks.
    pub fn process_buffer_cancellable(
        &self,
        samples: &[f32],
        sample_rate: f64,
        cancel: &AtomicBool,
    ) -> Result<Vec<f32>> {
        let chain = self.ready_chain(sample_rate)?;
        let out = chain.apply_cancellable(samples, cancel, CANCEL_CHUNK_LEN)?;
        warn_on_clipping(&out);
        Ok(out)
    }

    fn ready_chain(&self, sample_rate: f64) -> Result<&FilterChain> {
        let chain = self.chain()?;
        if sample_rate != chain.sample_rate() {
            return Err(EqError::SampleRateMismatch {
                expected: chain.sample_rate(),
                actual: sample_rate,
            });
        }
        Ok(chain)
    }
}

fn warn_on_clipping(samples: &[f32]) {
    let peak = abs_max(samples);
    if peak > 1.0 {
        warn!("output peak {:.3} exceeds full scale; rescale before encoding", peak);
    }
}
