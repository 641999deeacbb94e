//! The complex number being displayed and the trait hosts use to supply it.

use num_complex::Complex32;
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplexValue {
    pub real: f32,
    pub imag: f32,
}

impl ComplexValue {
    pub const fn new(real: f32, imag: f32) -> Self {
        Self { real, imag }
    }

    #[inline]
    pub fn as_complex(&self) -> Complex32 {
        Complex32::new(self.real, self.imag)
    }

    /// Euclidean length of the radius vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.as_complex().norm()
    }

    /// Angle from the positive real axis, in (-π, π].
    #[inline]
    pub fn phase(&self) -> f32 {
        self.as_complex().arg()
    }

    pub fn is_purely_real(&self) -> bool {
        self.imag == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }
}

impl From<Complex32> for ComplexValue {
    fn from(c: Complex32) -> Self {
        Self::new(c.re, c.im)
    }
}

impl fmt::Display for ComplexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.imag.is_sign_negative() { '-' } else { '+' };
        write!(f, "{}{}{}i", self.real, sign, self.imag.abs())
    }
}

impl FromStr for ComplexValue {
    type Err = GraphError;

    /// Accepts the usual textual forms: `3+4i`, `-2-3i`, `5i`, `1.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let parsed = Complex32::from_str(&trimmed).map_err(|e| GraphError::InvalidValue {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        let value = ComplexValue::from(parsed);
        if !value.is_finite() {
            return Err(GraphError::NonFinite(s.to_string()));
        }
        Ok(value)
    }
}

/// Supplies the value currently on display.
///
/// A render pass reads the source once through [`snapshot`](Self::snapshot)
/// so every primitive of the pass sees the same numbers.
pub trait ComplexValueSource {
    fn real(&self) -> f32;
    fn imag(&self) -> f32;

    fn phase(&self) -> f32 {
        self.snapshot().phase()
    }

    fn snapshot(&self) -> ComplexValue {
        ComplexValue::new(self.real(), self.imag())
    }
}

impl ComplexValueSource for ComplexValue {
    fn real(&self) -> f32 {
        self.real
    }

    fn imag(&self) -> f32 {
        self.imag
    }
}
