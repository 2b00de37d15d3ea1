use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Marks below this bucket into the basic tier
pub const INTERMEDIATE_THRESHOLD: f64 = 70.0;
/// Marks at or above this bucket into the advanced tier
pub const ADVANCED_THRESHOLD: f64 = 140.0;

/// Unique identifier for a course offering (e.g. "CS101")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(pub String);

impl CourseCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Aggregate marks for one course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStats {
    pub course: CourseCode,
    pub average_mark: f64,
    /// Sample standard deviation; zero when only one record exists
    pub std_dev: f64,
    pub count: usize,
}

/// Difficulty bucket derived from a raw mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Basic,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn for_mark(mark: f64) -> Self {
        if mark < INTERMEDIATE_THRESHOLD {
            DifficultyTier::Basic
        } else if mark < ADVANCED_THRESHOLD {
            DifficultyTier::Intermediate
        } else {
            DifficultyTier::Advanced
        }
    }

    /// Whether a course with the given average mark belongs to this tier
    pub fn admits(self, average_mark: f64) -> bool {
        match self {
            DifficultyTier::Basic => average_mark <= 100.0,
            DifficultyTier::Intermediate => average_mark > 100.0 && average_mark <= 160.0,
            DifficultyTier::Advanced => average_mark > 160.0,
        }
    }
}

impl Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DifficultyTier::Basic => "basic",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        };
        f.write_str(name)
    }
}
