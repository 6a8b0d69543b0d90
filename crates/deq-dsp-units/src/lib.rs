// SPDX-License-Identifier: LGPL-3.0-or-later

//! # deq-dsp-units
//!
//! Filter design, frequency response and cascaded processing for a
//! multi-band digital equalizer, built on [`deq_dsp_lib`]. It includes:
//!
//! - **Filters**: filter specs, biquad design (Butterworth high/low-pass,
//!   constant-Q peaking), response evaluation, the ordered filter chain
//!   and the equalizer engine
//! - **Config**: engine configuration and presets (JSON via `serde`)
//! - **Units**: dB/gain conversions and the logarithmic frequency grid
//! - **PCM**: peak normalization, clipping checks and 16-bit rescaling
//!   for the caller's decode/encode collaborators
//!
//! ## Example
//!
//! ```
//! use deq_dsp_units::filters::engine::EqualizerEngine;
//! use deq_dsp_units::filters::spec::{FilterKind, FilterSpec};
//!
//! let mut eq = EqualizerEngine::new(44100.0);
//! eq.set_specs(vec![
//!     FilterSpec::new(FilterKind::HighPass, 0.0, 100.0, 0.707).unwrap(),
//!     FilterSpec::new(FilterKind::Peak, 6.0, 1000.0, 1.0).unwrap(),
//! ]);
//! eq.rebuild().unwrap();
//!
//! let curve = eq.combined_response().unwrap();
//! assert_eq!(curve.len(), 512);
//!
//! let out = eq.process_buffer(&[0.0, 0.5, -0.5], 44100.0).unwrap();
//! assert_eq!(out.len(), 3);
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod filters;
pub mod pcm;
pub mod units;

pub use error::{EqError, Param, Result};
