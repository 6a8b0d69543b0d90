// SPDX-License-Identifier: LGPL-3.0-or-later

//! Ordered cascade of designed biquad stages.
//!
//! A [`FilterChain`] is built in one go from a list of [`FilterSpec`]s and
//! is immutable afterwards. Processing never keeps state between calls:
//! every call starts each stage from zero initial conditions, and each
//! stage runs over the whole buffer before the next one starts.

use std::sync::atomic::{AtomicBool, Ordering};

use deq_dsp_lib::complex::complex_mul_inplace;
use deq_dsp_lib::filters::biquad_process_inplace;
use deq_dsp_lib::types::{Biquad, BiquadCoeffs};
use log::debug;
use num_complex::Complex64;

use super::coeffs::design;
use super::response::{ResponseCurve, evaluate};
use super::spec::{FilterSpec, check_sample_rate};
use crate::error::{EqError, Result};

/// One designed stage: the spec it came from and its coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub spec: FilterSpec,
    pub coeffs: BiquadCoeffs,
}

/// Immutable cascade of biquad stages in signal-flow order.
///
/// # Examples
///
/// ```
/// use deq_dsp_units::filters::chain::FilterChain;
/// use deq_dsp_units::filters::spec::{FilterKind, FilterSpec};
///
/// let specs = [
///     FilterSpec::new(FilterKind::HighPass, 0.0, 100.0, 0.707).unwrap(),
///     FilterSpec::new(FilterKind::LowPass, 0.0, 8000.0, 0.707).unwrap(),
/// ];
/// let chain = FilterChain::build(&specs, 44100.0).unwrap();
/// let out = chain.apply(&[1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(out.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    stages: Vec<Stage>,
    sample_rate: f64,
}

impl FilterChain {
    /// Design every stage of `specs` at `sample_rate`.
    ///
    /// Fails as a whole on the first invalid stage. The error carries that
    /// stage's zero-based index.
    pub fn build(specs: &[FilterSpec], sample_rate: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;

        let stages = specs
            .iter()
            .enumerate()
            .map(|(i, &spec)| {
                design(spec, sample_rate)
                    .map(|coeffs| Stage { spec, coeffs })
                    .map_err(|e| e.at_stage(i))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "built filter chain: {} stage(s) at {} Hz",
            stages.len(),
            sample_rate
        );

        Ok(Self {
            stages,
            sample_rate,
        })
    }

    /// Sample rate the stages were designed for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Product of all stage responses at each frequency.
    ///
    /// An empty chain has a unit response.
    pub fn combined_complex_response(&self, frequencies: &[f64]) -> Vec<Complex64> {
        let mut acc = vec![Complex64::new(1.0, 0.0); frequencies.len()];
        for stage in &self.stages {
            let h = evaluate(&stage.coeffs, frequencies, self.sample_rate);
            complex_mul_inplace(&mut acc, &h);
        }
        acc
    }

    /// Combined magnitude response in dB.
    pub fn combined_response(&self, frequencies: &[f64]) -> ResponseCurve {
        ResponseCurve::from_complex(frequencies, &self.combined_complex_response(frequencies))
    }

    /// One magnitude curve per stage, in stage order.
    pub fn stage_responses(&self, frequencies: &[f64]) -> Vec<ResponseCurve> {
        self.stages
            .iter()
            .map(|s| {
                let h = evaluate(&s.coeffs, frequencies, self.sample_rate);
                ResponseCurve::from_complex(frequencies, &h)
            })
            .collect()
    }

    /// Filter `samples` through every stage in order.
    ///
    /// Bit-identical for identical input.
    pub fn apply(&self, samples: &[f32]) -> Vec<f32> {
        let mut buf = samples.to_vec();
        for stage in &self.stages {
            let mut bq = Biquad::new(stage.coeffs);
            biquad_process_inplace(&mut buf, &mut bq);
        }
        buf
    }

    /// Same output as [`apply`](Self::apply), checking `cancel` before each
    /// chunk of `chunk_len` samples of every stage.
    ///
    /// Returns [`EqError::Cancelled`] as soon as the flag is seen raised;
    /// partial output is dropped. A `chunk_len` of zero is treated as one.
    pub fn apply_cancellable(
        &self,
        samples: &[f32],
        cancel: &AtomicBool,
        chunk_len: usize,
    ) -> Result<Vec<f32>> {
        let chunk_len = chunk_len.max(1);
        let mut buf = samples.to_vec();
        for stage in &self.stages {
            // State carries across chunks, so chunking does not change output
            let mut bq = Biquad::new(stage.coeffs);
            for chunk in buf.chunks_mut(chunk_len) {
                if cancel.load(Ordering::Relaxed) {
                    return Err(EqError::Cancelled);
                }
                biquad_process_inplace(chunk, &mut bq);
            }
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(EqError::Cancelled);
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Param;
    use crate::filters::response::magnitude_db;
    use crate::filters::spec::FilterKind;
    use crate::units::log_frequencies;
    use float_cmp::assert_approx_eq;

    const SR: f64 = 44100.0;

    fn spec(kind: FilterKind, gain_db: f64, freq: f64, q: f64) -> FilterSpec {
        FilterSpec::new(kind, gain_db, freq, q).unwrap()
    }

    fn noise(n: usize) -> Vec<f32> {
        let mut state = 0x1234_5678_u32;
        (0..n)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    fn three_stage() -> Vec<FilterSpec> {
        vec![
            spec(FilterKind::HighPass, 0.0, 80.0, 0.707),
            spec(FilterKind::Peak, -4.0, 1200.0, 2.0),
            spec(FilterKind::LowPass, 0.0, 12000.0, 0.707),
        ]
    }

    #[test]
    fn build_keeps_order() {
        let specs = three_stage();
        let chain = FilterChain::build(&specs, SR).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.sample_rate(), SR);
        for (stage, spec) in chain.stages().iter().zip(&specs) {
            assert_eq!(&stage.spec, spec);
            assert_eq!(stage.coeffs, design(*spec, SR).unwrap());
        }
    }

    #[test]
    fn build_reports_failing_stage() {
        let mut specs = three_stage();
        specs[1].frequency_hz = 30000.0;
        let err = FilterChain::build(&specs, SR).unwrap_err();
        assert_eq!(err.stage(), Some(1));
        assert_eq!(err.param(), Some(Param::FrequencyHz));
    }

    #[test]
    fn build_rejects_bad_sample_rate() {
        let err = FilterChain::build(&[], 0.0).unwrap_err();
        assert_eq!(err.param(), Some(Param::SampleRate));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = FilterChain::build(&[], SR).unwrap();
        assert!(chain.is_empty());
        let input = noise(64);
        assert_eq!(chain.apply(&input), input);
        let curve = chain.combined_response(&[100.0, 1000.0]);
        assert_eq!(curve.magnitudes_db(), &[0.0, 0.0]);
    }

    #[test]
    fn combined_equals_sum_of_stages_in_db() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        let freqs = log_frequencies(20.0, 20000.0, 128);
        let combined = chain.combined_response(&freqs);
        let stages = chain.stage_responses(&freqs);
        assert_eq!(stages.len(), 3);

        for i in 0..freqs.len() {
            let sum: f64 = stages.iter().map(|c| c.magnitudes_db()[i]).sum();
            assert_approx_eq!(f64, combined.magnitudes_db()[i], sum, epsilon = 1e-6);
        }
    }

    #[test]
    fn combined_complex_is_product() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        let freqs = [50.0, 1200.0, 15000.0];
        let combined = chain.combined_complex_response(&freqs);
        for (i, &f) in freqs.iter().enumerate() {
            let mut prod = Complex64::new(1.0, 0.0);
            for s in chain.stages() {
                prod *= evaluate(&s.coeffs, &[f], SR)[0];
            }
            assert_approx_eq!(f64, magnitude_db(combined[i]), magnitude_db(prod), epsilon = 1e-9);
        }
    }

    #[test]
    fn apply_is_reproducible() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        let input = noise(4096);
        let a = chain.apply(&input);
        let b = chain.apply(&input);
        assert_eq!(a.len(), input.len());
        assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn apply_runs_stages_in_sequence() {
        let specs = three_stage();
        let chain = FilterChain::build(&specs, SR).unwrap();
        let input = noise(1000);

        let mut expected = input.clone();
        for s in &specs {
            let single = FilterChain::build(&[*s], SR).unwrap();
            expected = single.apply(&expected);
        }
        assert_eq!(chain.apply(&input), expected);
    }

    #[test]
    fn zero_gain_peak_leaves_buffer_unchanged() {
        let chain = FilterChain::build(&[spec(FilterKind::Peak, 0.0, 1000.0, 1.0)], SR).unwrap();
        let input = noise(2048);
        let out = chain.apply(&input);
        for (o, i) in out.iter().zip(&input) {
            assert_approx_eq!(f32, *o, *i, epsilon = 1e-6);
        }
    }

    #[test]
    fn empty_buffer() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        assert!(chain.apply(&[]).is_empty());
    }

    #[test]
    fn cancellable_matches_apply() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        let input = noise(10_000);
        let flag = AtomicBool::new(false);
        for chunk_len in [0, 1, 333, 8192, 20_000] {
            let out = chain.apply_cancellable(&input, &flag, chunk_len).unwrap();
            assert_eq!(out, chain.apply(&input), "chunk_len = {chunk_len}");
        }
    }

    #[test]
    fn raised_flag_cancels() {
        let chain = FilterChain::build(&three_stage(), SR).unwrap();
        let flag = AtomicBool::new(true);
        let err = chain.apply_cancellable(&noise(100), &flag, 16).unwrap_err();
        assert_eq!(err, EqError::Cancelled);
    }

    #[test]
    fn chain_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterChain>();
    }
}
