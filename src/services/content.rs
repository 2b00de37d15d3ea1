use std::cmp::Ordering;

use crate::{
    error::RecommendationError,
    models::{CourseCode, DifficultyTier, Recommendation},
    services::{
        course_stats::CourseStatistics,
        picker::{choose, CandidatePicker, SHORTLIST_LEN},
    },
};

const MARK_RANGE: std::ops::RangeInclusive<f64> = 0.0..=200.0;

/// Content-based recommender: matches a raw mark against course averages
pub struct ContentRecommender<'a> {
    stats: &'a CourseStatistics,
    picker: &'a dyn CandidatePicker,
}

impl<'a> ContentRecommender<'a> {
    pub fn new(stats: &'a CourseStatistics, picker: &'a dyn CandidatePicker) -> Self {
        Self { stats, picker }
    }

    /// Recommends one of the three courses whose average lies closest to
    /// `mark` within the mark's difficulty tier
    pub fn recommend_by_mark(&self, mark: f64) -> Result<Recommendation, RecommendationError> {
        let shortlist = self.shortlist(mark)?;

        let (course, confidence) = choose(self.picker, &shortlist)
            .cloned()
            .ok_or(RecommendationError::NoCandidate)?;

        Ok(Recommendation::new(course, confidence))
    }

    /// Top candidates for `mark`, best first
    pub fn shortlist(&self, mark: f64) -> Result<Vec<(CourseCode, f64)>, RecommendationError> {
        if !MARK_RANGE.contains(&mark) {
            return Err(RecommendationError::InvalidMark(mark));
        }
        if self.stats.is_empty() {
            return Err(RecommendationError::NoCandidate);
        }

        let tier = DifficultyTier::for_mark(mark);
        let mut candidates: Vec<(CourseCode, f64)> = self
            .stats
            .iter()
            .filter(|stats| tier.admits(stats.average_mark))
            .map(|stats| (stats.course.clone(), confidence(stats.average_mark, mark)))
            .collect();

        if candidates.is_empty() {
            tracing::debug!(%tier, "No course in tier, falling back to all courses");
            candidates = self
                .stats
                .iter()
                .map(|stats| (stats.course.clone(), confidence(stats.average_mark, mark)))
                .collect();
        }

        // Stable sort keeps course-code order among equal confidences
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        candidates.truncate(SHORTLIST_LEN);

        Ok(candidates)
    }
}

fn confidence(average_mark: f64, mark: f64) -> f64 {
    (1.0 - (average_mark - mark).abs() / 200.0).clamp(0.0, 1.0)
}
