use crate::{HlError, HlResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute tolerance (m³) when checking that a component volume is a whole
/// number of nodes.
pub const VOLUME_QUANTUM_TOL_M3: Real = 1e-6;

pub fn ensure_finite(v: Real, what: &'static str) -> HlResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> HlResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HlError::NotPositive { what, value: v })
    }
}

pub fn ensure_non_negative(v: Real, what: &'static str) -> HlResult<Real> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(HlError::Negative { what, value: v })
    }
}

/// Number of whole `quantum`s in `value`.
///
/// Fails unless `value` lies within `abs_tol` of a positive integer multiple
/// of `quantum`.
pub fn whole_multiple(
    value: Real,
    quantum: Real,
    abs_tol: Real,
    what: &'static str,
) -> HlResult<usize> {
    let value = ensure_positive(value, what)?;
    let quantum = ensure_positive(quantum, what)?;

    let count = (value / quantum).round();
    if count < 1.0 || (value - count * quantum).abs() > abs_tol {
        return Err(HlError::NotQuantized {
            what,
            value,
            quantum,
        });
    }
    Ok(count as usize)
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<Real>() / values.len() as Real)
    }
}
