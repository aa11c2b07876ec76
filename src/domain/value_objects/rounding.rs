//! Shared rounding and safe-division helpers
//!
//! spec.md §9 Design Notes: "Percentages for display are computed as
//! `round(x · 100) / 100`." and §7.4: "any division where denominator is
//! zero, NaN, or ±∞ yields the caller-provided fallback." These two rules
//! recur across capacity bucketing and the analytics engine, so they live
//! here once rather than being re-derived per call site.

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, with `fallback` substituted whenever the
/// division would otherwise produce NaN or an infinity (zero denominator,
/// zero-over-zero, or either operand non-finite).
pub fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return fallback;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        fallback
    }
}
