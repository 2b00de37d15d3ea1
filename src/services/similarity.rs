use crate::{models::StudentId, services::matrix::PerformanceMatrix};

/// Pairwise cosine similarity between students' mark vectors
///
/// Symmetric with a unit diagonal. A student whose row is all zeros has
/// similarity 0 with everyone else.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn compute(matrix: &PerformanceMatrix) -> Self {
        let units: Vec<Vec<f64>> = matrix
            .students()
            .filter_map(|s| matrix.row(s))
            .map(unit_vector)
            .collect();
        let n = units.len();

        let mut values = vec![vec![0.0; n]; n];
        for a in 0..n {
            values[a][a] = 1.0;
            for b in (a + 1)..n {
                let similarity = cosine(&units[a], &units[b]);
                values[a][b] = similarity;
                values[b][a] = similarity;
            }
        }

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, a: StudentId, b: StudentId) -> Option<f64> {
        self.row(a)?.get(b.index()).copied()
    }

    /// Similarities of one student to every student, indexed by `StudentId`
    pub fn row(&self, student: StudentId) -> Option<&[f64]> {
        if student.0 == 0 {
            return None;
        }
        self.values.get(student.index()).map(Vec::as_slice)
    }
}

/// Row scaled to unit length, or all zeros when it has no direction
///
/// Scaling by the largest magnitude first keeps squares of very large marks
/// from overflowing.
fn unit_vector(row: &[f64]) -> Vec<f64> {
    let scale = row.iter().fold(0.0_f64, |max, x| max.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return vec![0.0; row.len()];
    }

    let scaled: Vec<f64> = row.iter().map(|x| x / scale).collect();
    let length = scaled.iter().map(|x| x * x).sum::<f64>().sqrt();
    scaled.into_iter().map(|x| x / length).collect()
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    if dot.is_finite() {
        dot.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
