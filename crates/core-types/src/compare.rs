//! Tolerant floating-point comparison.
//!
//! Provider figures carry small representation noise (a percentile reported as
//! `0.5000000001` is still "at the ceiling"). Every threshold check in the
//! screener goes through [`smaller`] or [`smaller_within`] instead of a bare `<`.

/// Differences at or below this value are treated as equality.
pub const EPSILON: f64 = 0.00001;

/// Returns `true` when `a` is strictly smaller than `b` by more than [`EPSILON`].
pub fn smaller(a: f64, b: f64) -> bool {
    smaller_within(a, b, EPSILON)
}

/// Same as [`smaller`], with a caller-supplied tolerance.
///
/// `a` is smaller only if `b` is the maximum of the two AND the gap exceeds
/// `epsilon`. A `NaN` on either side never compares as smaller.
pub fn smaller_within(a: f64, b: f64, epsilon: f64) -> bool {
    a.max(b) == b && (a - b).abs() > epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearly_smaller_values_compare_smaller() {
        assert!(smaller(0.4, 0.5));
        assert!(smaller(-10.0, 3.0));
        assert!(!smaller(0.5, 0.4));
    }

    #[test]
    fn equal_values_are_not_smaller() {
        assert!(!smaller(1.0, 1.0));
        assert!(!smaller(0.0, 0.0));
    }

    #[test]
    fn differences_within_epsilon_are_ignored() {
        assert!(!smaller(0.999995, 1.0));
        assert!(!smaller(0.5, 0.500005));
        assert!(smaller(0.99998, 1.0));
        assert!(smaller(0.5, 0.51));
    }

    #[test]
    fn nan_never_compares_smaller() {
        assert!(!smaller(f64::NAN, 1.0));
        assert!(!smaller(1.0, f64::NAN));
    }

    #[test]
    fn custom_tolerance_is_respected() {
        assert!(!smaller_within(0.9, 1.0, 0.2));
        assert!(smaller_within(0.7, 1.0, 0.2));
    }
}
