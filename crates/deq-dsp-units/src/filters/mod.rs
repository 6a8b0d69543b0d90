// SPDX-License-Identifier: LGPL-3.0-or-later

//! Filter specification, biquad design, response evaluation and the
//! cascaded filter chain.
//!
//! Coefficients use the standard sign convention with an explicit `a0`
//! (see [`deq_dsp_lib::types::BiquadCoeffs`]).

pub mod chain;
pub mod coeffs;
pub mod engine;
pub mod response;
pub mod spec;
