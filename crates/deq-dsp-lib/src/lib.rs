// SPDX-License-Identifier: LGPL-3.0-or-later

//! # deq-dsp-lib
//!
//! Low-level DSP primitives for the `deq` digital equalizer.
//!
//! This crate provides the building blocks used by `deq-dsp-units` to
//! design, evaluate and run a cascade of second-order IIR sections:
//!
//! - **Types**: biquad coefficients (explicit `a0`) and delay state
//! - **Filters**: the transposed direct-form II biquad recurrence
//! - **Complex**: transfer-function evaluation on the unit circle and
//!   element-wise complex products for cascades
//! - **Float utilities**: peak search, threshold counting, scaling
//!
//! ## Design
//!
//! Coefficients and filter memory are kept in `f64`; audio buffers are
//! `f32`. Buffer loops use runtime SIMD dispatch via the `multiversion`
//! crate. No fused multiply-add is introduced by the code, so a given
//! input always produces the same bits.

pub mod complex;
pub mod filters;
pub mod float;
pub mod types;
