use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::CourseCode;

/// Dense student identifier assigned at load time, in the range `1..=N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

impl StudentId {
    /// Zero-based row position of this student in the derived matrices
    pub fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single mark a student obtained in a course, as read from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "RollNumber")]
    pub student_external_id: String,
    #[serde(rename = "Course Code")]
    pub course_code: CourseCode,
    /// Mark out of 200
    #[serde(rename = "Marks (200)")]
    pub mark: f64,
}

impl ScoreRecord {
    pub fn new(student: impl Into<String>, course: impl Into<String>, mark: f64) -> Self {
        Self {
            student_external_id: student.into(),
            course_code: CourseCode(course.into()),
            mark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_index_round_trip() {
        assert_eq!(StudentId(1).index(), 0);
        assert_eq!(StudentId::from_index(4), StudentId(5));
    }

    #[test]
    fn test_student_id_serializes_as_integer() {
        let json = serde_json::to_string(&StudentId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_score_record_uses_spreadsheet_headers() {
        let record = ScoreRecord::new("R-101", "CS101", 142.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["RollNumber"], "R-101");
        assert_eq!(json["Course Code"], "CS101");
        assert_eq!(json["Marks (200)"], 142.5);
    }
}
