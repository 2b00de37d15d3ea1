use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult, RecommendationError},
    models::{Recommendation, StudentId},
    services::{
        collaborative::CollaborativeRecommender,
        content::ContentRecommender,
        course_stats::CourseStatistics,
        dataset::Dataset,
        matrix::PerformanceMatrix,
        picker::CandidatePicker,
        similarity::SimilarityMatrix,
    },
};

/// Everything derived from the dataset at startup
///
/// Built once and only read afterwards, so it can be shared across
/// concurrent requests without locking. The picker is the only source of
/// per-request variation.
pub struct RecommendationContext {
    matrix: PerformanceMatrix,
    similarity: SimilarityMatrix,
    course_stats: CourseStatistics,
    picker: Arc<dyn CandidatePicker>,
}

impl RecommendationContext {
    pub fn build(dataset: &Dataset, picker: Arc<dyn CandidatePicker>) -> Self {
        let start = Instant::now();

        let matrix = PerformanceMatrix::build(dataset);
        let similarity = SimilarityMatrix::compute(&matrix);
        let course_stats = CourseStatistics::aggregate(dataset.records());

        tracing::info!(
            students = similarity.len(),
            courses = course_stats.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation context built"
        );

        Self {
            matrix,
            similarity,
            course_stats,
            picker,
        }
    }

    /// Builds the context on tokio's blocking pool
    ///
    /// Similarity is quadratic in the number of students.
    pub async fn build_blocking(
        dataset: Dataset,
        picker: Arc<dyn CandidatePicker>,
    ) -> AppResult<Self> {
        tokio::task::spawn_blocking(move || Self::build(&dataset, picker))
            .await
            .map_err(|e| AppError::Internal(format!("context build failed: {}", e)))
    }

    pub fn recommend_by_mark(&self, mark: f64) -> Result<Recommendation, RecommendationError> {
        ContentRecommender::new(&self.course_stats, self.picker.as_ref()).recommend_by_mark(mark)
    }

    pub fn recommend_for_student(
        &self,
        student: StudentId,
    ) -> Result<Recommendation, RecommendationError> {
        CollaborativeRecommender::new(&self.matrix, &self.similarity, self.picker.as_ref())
            .recommend_for_student(student)
    }
}
