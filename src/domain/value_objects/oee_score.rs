//! OEE score value object module
//!
//! Overall Equipment Effectiveness is the product of availability,
//! performance, and quality factors (spec.md §4.9). Bundling the three
//! factors with the derived product keeps a reporting caller from ever
//! recomputing OEE from a rounded factor (which would drift from the
//! analytics engine's own figure).

use serde::{Deserialize, Serialize};

use super::rounding::round2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OeeScore {
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

impl OeeScore {
    /// Builds the score from the three raw (unrounded) factors, then rounds
    /// every field to two decimal places for display (spec.md §9).
    pub fn from_factors(availability: f64, performance: f64, quality: f64) -> Self {
        let oee = availability * performance * quality;
        Self {
            availability: round2(availability),
            performance: round2(performance),
            quality: round2(quality),
            oee: round2(oee),
        }
    }

    /// The zero-production case: no parts means no meaningful performance or
    /// quality factor, so OEE is defined as 0 rather than surfacing NaN
    /// (spec.md §8 boundary case).
    pub fn zero() -> Self {
        Self {
            availability: 0.0,
            performance: 0.0,
            quality: 0.0,
            oee: 0.0,
        }
    }
}
