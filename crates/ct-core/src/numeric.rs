//! Checked float helpers shared by every constructor.

use crate::CtError;

/// Finite, or a `NonFinite` error naming the quantity.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CtError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, CtError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CtError::OutOfRange {
            what,
            value: v,
            reason: "must be positive",
        })
    }
}

/// Finite and greater than or equal to zero.
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, CtError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(CtError::OutOfRange {
            what,
            value: v,
            reason: "must be non-negative",
        })
    }
}

/// Finite and within the closed interval `[lo, hi]`.
pub fn ensure_in_range(v: f64, lo: f64, hi: f64, what: &'static str) -> Result<f64, CtError> {
    let v = ensure_finite(v, what)?;
    if (lo..=hi).contains(&v) {
        Ok(v)
    } else {
        Err(CtError::OutOfRange {
            what,
            value: v,
            reason: "outside allowed interval",
        })
    }
}
