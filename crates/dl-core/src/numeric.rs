/// Floating point type for elevations, depths and flows.
pub type Real = f64;

/// Absolute and relative tolerance for comparing flows and volumes.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True if `a` and `b` agree within either tolerance.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Strict sign test: `Some(true)` for positive, `Some(false)` for negative,
/// `None` for zero (either sign) and NaN.
pub fn strict_sign(v: Real) -> Option<bool> {
    if v > 0.0 {
        Some(true)
    } else if v < 0.0 {
        Some(false)
    } else {
        None
    }
}
