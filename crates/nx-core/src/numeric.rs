use crate::NxError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NxError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NxError::NonFinite { what, value: v })
    }
}
