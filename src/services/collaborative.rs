use std::cmp::Ordering;

use crate::{
    error::RecommendationError,
    models::{CourseCode, Recommendation, StudentId},
    services::{
        matrix::PerformanceMatrix,
        picker::{choose, CandidatePicker, SHORTLIST_LEN},
        similarity::SimilarityMatrix,
    },
};

/// Number of most similar peers whose marks drive a recommendation
pub const NEIGHBOR_COUNT: usize = 5;

/// Collaborative recommender: suggests courses that similar students did well in
pub struct CollaborativeRecommender<'a> {
    matrix: &'a PerformanceMatrix,
    similarity: &'a SimilarityMatrix,
    picker: &'a dyn CandidatePicker,
}

impl<'a> CollaborativeRecommender<'a> {
    pub fn new(
        matrix: &'a PerformanceMatrix,
        similarity: &'a SimilarityMatrix,
        picker: &'a dyn CandidatePicker,
    ) -> Self {
        Self {
            matrix,
            similarity,
            picker,
        }
    }

    /// Recommends a course the student has not attempted, drawn from the
    /// three best peer-weighted scores
    pub fn recommend_for_student(
        &self,
        student: StudentId,
    ) -> Result<Recommendation, RecommendationError> {
        let own_marks = self
            .matrix
            .row(student)
            .ok_or(RecommendationError::UnknownStudent(student.0))?;

        let peers = self.nearest_peers(student)?;
        let scores = self.weighted_scores(&peers)?;

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut novel: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(course, _)| own_marks.get(*course).copied() == Some(0.0))
            .collect();

        if novel.is_empty() {
            return Err(RecommendationError::NoNewCourse);
        }

        novel.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        novel.truncate(SHORTLIST_LEN);

        let (course, score) = choose(self.picker, &novel)
            .copied()
            .ok_or(RecommendationError::NoNewCourse)?;
        let confidence = if best != 0.0 && best.is_finite() {
            score / best
        } else {
            0.0
        };
        let course = self
            .course(course)
            .cloned()
            .ok_or(RecommendationError::NoNewCourse)?;

        Ok(Recommendation::new(course, confidence))
    }

    /// Up to `NEIGHBOR_COUNT` other students, most similar first
    pub fn nearest_peers(
        &self,
        student: StudentId,
    ) -> Result<Vec<(StudentId, f64)>, RecommendationError> {
        let row = self
            .similarity
            .row(student)
            .ok_or(RecommendationError::UnknownStudent(student.0))?;

        let mut peers: Vec<(StudentId, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .map(|(index, similarity)| (StudentId::from_index(index), similarity))
            .filter(|(peer, _)| *peer != student)
            .collect();

        peers.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        peers.truncate(NEIGHBOR_COUNT);

        if total_weight(&peers) == 0.0 {
            return Err(RecommendationError::NoSimilarPeers);
        }

        Ok(peers)
    }

    /// Similarity-weighted mean of the peers' marks for every course,
    /// attempted or not
    pub fn weighted_scores(
        &self,
        peers: &[(StudentId, f64)],
    ) -> Result<Vec<f64>, RecommendationError> {
        let weight = total_weight(peers);
        if weight == 0.0 {
            return Err(RecommendationError::NoRecommendation);
        }

        let mut scores = vec![0.0; self.matrix.courses().len()];
        for (peer, similarity) in peers {
            let Some(marks) = self.matrix.row(*peer) else {
                continue;
            };
            for (score, mark) in scores.iter_mut().zip(marks) {
                *score += mark * similarity;
            }
        }

        Ok(scores.into_iter().map(|score| score / weight).collect())
    }

    fn course(&self, column: usize) -> Option<&CourseCode> {
        self.matrix.courses().get(column)
    }
}

fn total_weight(peers: &[(StudentId, f64)]) -> f64 {
    peers.iter().map(|(_, similarity)| similarity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::picker::{MockCandidatePicker, ThreadRngPicker};
    use std::collections::HashSet;

    fn courses(n: usize) -> Vec<CourseCode> {
        (0..n).map(|i| CourseCode(format!("C{}", i + 1))).collect()
    }

    fn fixture(rows: Vec<Vec<f64>>) -> (PerformanceMatrix, SimilarityMatrix) {
        let width = rows.first().map_or(0, Vec::len);
        let matrix = PerformanceMatrix::from_rows(courses(width), rows);
        let similarity = SimilarityMatrix::compute(&matrix);
        (matrix, similarity)
    }

    fn picking(index: usize) -> MockCandidatePicker {
        let mut picker = MockCandidatePicker::new();
        picker.expect_pick().return_const(index);
        picker
    }

    #[test]
    fn test_three_student_scenario_only_suggests_unattempted_course() {
        let (matrix, similarity) =
            fixture(vec![vec![180.0, 0.0], vec![160.0, 150.0], vec![0.0, 140.0]]);
        let picker = ThreadRngPicker;
        let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);

        for _ in 0..20 {
            let rec = recommender.recommend_for_student(StudentId(1)).unwrap();
            assert_eq!(rec.course.as_str(), "C2");
            // 150 / 160 against the best predicted course overall
            assert!((rec.confidence - 150.0 / 160.0).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn test_confidence_is_relative_to_best_course_overall() {
        let (matrix, similarity) =
            fixture(vec![vec![180.0, 0.0], vec![160.0, 150.0], vec![0.0, 140.0]]);
        let picker = picking(0);
        let rec = CollaborativeRecommender::new(&matrix, &similarity, &picker)
            .recommend_for_student(StudentId(3))
            .unwrap();

        assert_eq!(rec.course.as_str(), "C1");
        assert_eq!(rec.confidence, 1.0);
    }

    #[test]
    fn test_never_recommends_attempted_course() {
        let (matrix, similarity) = fixture(vec![
            vec![150.0, 0.0, 120.0, 0.0, 0.0],
            vec![140.0, 170.0, 110.0, 90.0, 0.0],
            vec![160.0, 0.0, 130.0, 0.0, 180.0],
            vec![0.0, 150.0, 100.0, 80.0, 60.0],
            vec![155.0, 120.0, 0.0, 0.0, 140.0],
        ]);

        for index in 0..SHORTLIST_LEN {
            let picker = picking(index);
            let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);
            for student in matrix.students() {
                let own = matrix.row(student).unwrap().to_vec();
                if let Ok(rec) = recommender.recommend_for_student(student) {
                    assert_eq!(matrix.mark(student, &rec.course), Some(0.0));
                    assert!(own.iter().any(|m| *m == 0.0));
                    assert!((0.0..=1.0).contains(&rec.confidence));
                }
            }
        }
    }

    #[test]
    fn test_every_shortlisted_course_is_reachable() {
        let (matrix, similarity) = fixture(vec![
            vec![150.0, 0.0, 0.0, 0.0, 0.0],
            vec![140.0, 170.0, 110.0, 90.0, 30.0],
        ]);

        let mut seen = HashSet::new();
        for index in 0..SHORTLIST_LEN {
            let picker = picking(index);
            let rec = CollaborativeRecommender::new(&matrix, &similarity, &picker)
                .recommend_for_student(StudentId(1))
                .unwrap();
            seen.insert(rec.course.0);
        }

        let expected: HashSet<String> = ["C2", "C3", "C4"].iter().map(|s| s.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_unknown_student() {
        let (matrix, similarity) = fixture(vec![vec![100.0], vec![90.0]]);
        let picker = picking(0);
        let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);

        for id in [0, 3, 999] {
            assert_eq!(
                recommender.recommend_for_student(StudentId(id)),
                Err(RecommendationError::UnknownStudent(id))
            );
        }
    }

    #[test]
    fn test_no_similar_peers() {
        let (matrix, similarity) = fixture(vec![vec![100.0, 0.0], vec![0.0, 90.0]]);
        let picker = picking(0);
        let result = CollaborativeRecommender::new(&matrix, &similarity, &picker)
            .recommend_for_student(StudentId(1));

        assert_eq!(result, Err(RecommendationError::NoSimilarPeers));
    }

    #[test]
    fn test_lone_student_has_no_peers() {
        let (matrix, similarity) = fixture(vec![vec![100.0, 0.0]]);
        let picker = picking(0);
        let result = CollaborativeRecommender::new(&matrix, &similarity, &picker)
            .recommend_for_student(StudentId(1));

        assert_eq!(result, Err(RecommendationError::NoSimilarPeers));
    }

    #[test]
    fn test_negative_similarity_sum_still_scores() {
        // A negative mark makes one peer anti-similar; the weights sum below
        // zero but are not zero, so scoring goes ahead
        let (matrix, similarity) = fixture(vec![
            vec![100.0, 0.0, 0.0],
            vec![-50.0, 0.0, 10.0],
            vec![100.0, 50.0, 0.0],
        ]);
        let picker = picking(0);
        let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);

        let peers = recommender.nearest_peers(StudentId(1)).unwrap();
        assert!(total_weight(&peers) < 0.0);

        let rec = recommender.recommend_for_student(StudentId(1)).unwrap();
        assert_eq!(rec.course.as_str(), "C3");
        assert_eq!(rec.confidence, 1.0);
    }

    #[test]
    fn test_no_new_course() {
        let (matrix, similarity) = fixture(vec![vec![100.0, 80.0], vec![90.0, 120.0]]);
        let picker = picking(0);
        let result = CollaborativeRecommender::new(&matrix, &similarity, &picker)
            .recommend_for_student(StudentId(1));

        assert_eq!(result, Err(RecommendationError::NoNewCourse));
    }

    #[test]
    fn test_nearest_peers_takes_top_five_excluding_self() {
        let (matrix, similarity) = fixture(vec![
            vec![100.0, 100.0],
            vec![100.0, 90.0],
            vec![100.0, 80.0],
            vec![100.0, 70.0],
            vec![100.0, 60.0],
            vec![100.0, 50.0],
            vec![100.0, 0.0],
        ]);
        let picker = picking(0);
        let peers = CollaborativeRecommender::new(&matrix, &similarity, &picker)
            .nearest_peers(StudentId(1))
            .unwrap();

        let ids: Vec<u32> = peers.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_weighted_scores_without_weight() {
        let (matrix, similarity) = fixture(vec![vec![100.0, 0.0], vec![0.0, 90.0]]);
        let picker = picking(0);
        let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);

        assert_eq!(
            recommender.weighted_scores(&[(StudentId(2), 0.0)]),
            Err(RecommendationError::NoRecommendation)
        );
        assert_eq!(
            recommender.weighted_scores(&[]),
            Err(RecommendationError::NoRecommendation)
        );
    }

    #[test]
    fn test_weighted_scores_average_peer_marks() {
        let (matrix, similarity) = fixture(vec![vec![0.0, 0.0], vec![100.0, 50.0], vec![60.0, 150.0]]);
        let picker = picking(0);
        let recommender = CollaborativeRecommender::new(&matrix, &similarity, &picker);

        let scores = recommender
            .weighted_scores(&[(StudentId(2), 0.75), (StudentId(3), 0.25)])
            .unwrap();
        assert_eq!(scores, vec![90.0, 75.0]);
        assert_eq!(recommender.course(1).map(CourseCode::as_str), Some("C2"));
    }
}
