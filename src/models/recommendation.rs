use serde::{Deserialize, Serialize};

use super::CourseCode;

/// A single course suggestion returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub course: CourseCode,
    /// How strongly the course matches the input signal, in `[0, 1]`
    pub confidence: f64,
}

impl Recommendation {
    /// Builds a recommendation with the confidence rounded to two decimals
    pub fn new(course: CourseCode, confidence: f64) -> Self {
        Self {
            course,
            confidence: round_to_cents(confidence),
        }
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
