use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    models::{CourseCode, StudentId},
    services::dataset::Dataset,
};

/// Dense student x course mark matrix
///
/// Rows are indexed by `StudentId`, columns by course code in ascending order.
/// A student who never attempted a course has a mark of zero there, which is
/// indistinguishable from an actual zero mark.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMatrix {
    courses: Vec<CourseCode>,
    course_index: HashMap<CourseCode, usize>,
    rows: Vec<Vec<f64>>,
}

impl PerformanceMatrix {
    /// Pivots score records into the matrix, averaging duplicate
    /// (student, course) records
    pub fn build(dataset: &Dataset) -> Self {
        let courses: Vec<CourseCode> = dataset
            .records()
            .iter()
            .map(|r| r.course_code.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let course_index: HashMap<CourseCode, usize> = courses
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), i))
            .collect();

        // (student row, course column) -> (sum, count)
        let mut cells: BTreeMap<(usize, usize), (f64, u32)> = BTreeMap::new();
        for record in dataset.records() {
            let (Some(student), Some(&column)) = (
                dataset.students().id_of(&record.student_external_id),
                course_index.get(&record.course_code),
            ) else {
                continue;
            };
            let cell = cells.entry((student.index(), column)).or_insert((0.0, 0));
            cell.0 += record.mark;
            cell.1 += 1;
        }

        let mut rows = vec![vec![0.0; courses.len()]; dataset.students().len()];
        for ((row, column), (sum, count)) in cells {
            rows[row][column] = sum / count as f64;
        }

        Self {
            courses,
            course_index,
            rows,
        }
    }

    /// Builds a matrix directly from rows of marks; row `i` belongs to
    /// `StudentId(i + 1)`
    pub fn from_rows(courses: Vec<CourseCode>, rows: Vec<Vec<f64>>) -> Self {
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), i))
            .collect();
        Self {
            courses,
            course_index,
            rows,
        }
    }

    pub fn courses(&self) -> &[CourseCode] {
        &self.courses
    }

    pub fn student_count(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, student: StudentId) -> bool {
        student.0 >= 1 && student.index() < self.rows.len()
    }

    pub fn students(&self) -> impl Iterator<Item = StudentId> + '_ {
        (0..self.rows.len()).map(StudentId::from_index)
    }

    /// Marks of one student across all courses
    pub fn row(&self, student: StudentId) -> Option<&[f64]> {
        if !self.contains(student) {
            return None;
        }
        self.rows.get(student.index()).map(Vec::as_slice)
    }

    pub fn mark(&self, student: StudentId, course: &CourseCode) -> Option<f64> {
        let column = *self.course_index.get(course)?;
        self.row(student)?.get(column).copied()
    }
}
