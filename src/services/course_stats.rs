use std::collections::BTreeMap;

use crate::models::{CourseCode, CourseStats, ScoreRecord};

/// Per-course mark statistics, ordered by course code
#[derive(Debug, Clone, Default)]
pub struct CourseStatistics {
    courses: Vec<CourseStats>,
}

impl CourseStatistics {
    pub fn aggregate(records: &[ScoreRecord]) -> Self {
        let mut marks: BTreeMap<&CourseCode, Vec<f64>> = BTreeMap::new();
        for record in records {
            marks.entry(&record.course_code).or_default().push(record.mark);
        }

        let courses = marks
            .into_iter()
            .map(|(course, marks)| {
                let count = marks.len();
                let average_mark = marks.iter().sum::<f64>() / count as f64;
                CourseStats {
                    course: course.clone(),
                    average_mark,
                    std_dev: sample_std_dev(&marks, average_mark),
                    count,
                }
            })
            .collect();

        Self { courses }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseStats> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// N-1 denominator; a single sample has no spread
fn sample_std_dev(marks: &[f64], mean: f64) -> f64 {
    if marks.len() < 2 {
        return 0.0;
    }
    let squared: f64 = marks.iter().map(|m| (m - mean).powi(2)).sum();
    (squared / (marks.len() - 1) as f64).sqrt()
}
