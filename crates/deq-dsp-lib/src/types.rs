// SPDX-License-Identifier: LGPL-3.0-or-later

//! Core data types for the DSP library.

// ─── Biquad filter types ───────────────────────────────────────────────────

/// Number of delay (memory) elements in a biquad section.
pub const BIQUAD_D_ITEMS: usize = 2;

/// Coefficients of a single second-order IIR section.
///
/// Uses the standard sign convention:
/// ```text
///          b0 + b1*z^-1 + b2*z^-2
///   H(z) = ----------------------
///          a0 + a1*z^-1 + a2*z^-2
/// ```
///
/// `a0` is stored explicitly. Designed filters have `a0 == 1`, but
/// [`normalized`](BiquadCoeffs::normalized) makes no assumption about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    /// Feed-forward coefficients `b0, b1, b2`.
    pub b: [f64; 3],
    /// Feedback coefficients `a0, a1, a2`.
    pub a: [f64; 3],
}

impl BiquadCoeffs {
    /// The identity filter: `H(z) = 1`.
    pub const IDENTITY: Self = Self {
        b: [1.0, 0.0, 0.0],
        a: [1.0, 0.0, 0.0],
    };

    /// Build coefficients from feed-forward and feedback triples.
    pub const fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        Self { b, a }
    }

    /// Return an equivalent set of coefficients scaled so that `a0 == 1`.
    ///
    /// Returns `None` when `a0` is zero or not finite.
    pub fn normalized(&self) -> Option<Self> {
        let a0 = self.a[0];
        if a0 == 0.0 || !a0.is_finite() {
            return None;
        }
        let k = 1.0 / a0;
        Some(Self {
            b: [self.b[0] * k, self.b[1] * k, self.b[2] * k],
            a: [1.0, self.a[1] * k, self.a[2] * k],
        })
    }

    /// True if all six coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.b.iter().chain(self.a.iter()).all(|c| c.is_finite())
    }

    /// True if both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle of the normalized denominator
    /// `1 + a1*z^-1 + a2*z^-2`: `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        match self.normalized() {
            Some(n) => {
                let (a1, a2) = (n.a[1], n.a[2]);
                a2.abs() < 1.0 && a1.abs() < 1.0 + a2
            }
            None => false,
        }
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Biquad section: coefficients plus delay memory.
///
/// The `d` array stores the transposed direct-form II state.
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    /// Delay memory elements.
    pub d: [f64; BIQUAD_D_ITEMS],
    /// Filter coefficients.
    pub coeffs: BiquadCoeffs,
}

impl Biquad {
    /// Create a section with the given coefficients and zeroed memory.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            d: [0.0; BIQUAD_D_ITEMS],
            coeffs,
        }
    }

    /// Reset the delay memory to zero (clear filter state).
    pub fn reset(&mut self) {
        self.d = [0.0; BIQUAD_D_ITEMS];
    }
}
