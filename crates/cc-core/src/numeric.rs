//! Float helpers shared by the model and ensemble crates.

use crate::{CcError, CcResult};

/// Scalar type of every model series.
pub type Real = f64;

/// Absolute and relative slack for comparing model outputs.
///
/// Two values match when they are within `abs` of each other, or within
/// `rel` of the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let scale = a.abs().max(b.abs());
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * scale
}

/// Pass `v` through unless it is NaN or infinite.
pub fn ensure_finite(v: Real, what: &'static str) -> CcResult<Real> {
    match v.is_finite() {
        true => Ok(v),
        false => Err(CcError::NonFinite { what, value: v }),
    }
}

/// Arithmetic mean, or NaN for an empty slice.
pub fn mean(values: &[Real]) -> Real {
    if values.is_empty() {
        return Real::NAN;
    }
    values.iter().sum::<Real>() / values.len() as Real
}

/// Population standard deviation, or NaN for an empty slice.
pub fn std_dev(values: &[Real]) -> Real {
    let m = mean(values);
    if m.is_nan() {
        return Real::NAN;
    }
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<Real>() / values.len() as Real;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_bands() {
        let tol = Tolerances::default();
        assert!(nearly_equal(420.0, 420.0 + 1e-8, tol));
        assert!(nearly_equal(0.0, 5e-13, tol));
        assert!(!nearly_equal(1.547, 1.534, tol));
        assert!(!nearly_equal(Real::NAN, Real::NAN, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "Temp").unwrap_err();
        assert!(matches!(err, CcError::NonFinite { what: "Temp", .. }));
    }

    #[test]
    fn ensure_finite_detects_infinity() {
        assert!(ensure_finite(Real::NEG_INFINITY, "temp").is_err());
        assert_eq!(ensure_finite(1.5, "temp").unwrap(), 1.5);
    }

    #[test]
    fn mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(nearly_equal(mean(&values), 5.0, Tolerances::default()));
        assert!(nearly_equal(std_dev(&values), 2.0, Tolerances::default()));
    }

    #[test]
    fn empty_statistics_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(std_dev(&[]).is_nan());
    }
}
