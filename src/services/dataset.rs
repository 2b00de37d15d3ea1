//! Score dataset loading
//!
//! Score records come from a pluggable `ScoreSource`. Startup uses the CSV
//! export of the marks spreadsheet; tests feed records directly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::{ScoreRecord, StudentId},
};

const MIN_MARK: f64 = 0.0;
const MAX_MARK: f64 = 200.0;

/// Source of raw score records, read once at startup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ScoreSource: Send + Sync {
    /// Reads every score record from the source
    async fn load_records(&self) -> AppResult<Vec<ScoreRecord>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Reads score records from a CSV file with `RollNumber`, `Course Code`
/// and `Marks (200)` columns
pub struct CsvScoreSource {
    path: PathBuf,
}

impl CsvScoreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ScoreSource for CsvScoreSource {
    async fn load_records(&self) -> AppResult<Vec<ScoreRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;

        parse_csv(bytes.as_slice())
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

/// Parses CSV score rows, rejecting rows without a student or course
pub fn parse_csv<R: std::io::Read>(reader: R) -> AppResult<Vec<ScoreRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<ScoreRecord>().enumerate() {
        let record = result?;

        if record.student_external_id.is_empty() || record.course_code.as_str().is_empty() {
            return Err(AppError::DataLoad(format!(
                "row {} is missing a student or course",
                row + 1
            )));
        }
        if !record.mark.is_finite() {
            return Err(AppError::DataLoad(format!(
                "row {} has a non-numeric mark",
                row + 1
            )));
        }

        records.push(record);
    }

    Ok(records)
}

/// Bijection between external student identifiers and dense `StudentId`s
#[derive(Debug, Clone, Default)]
pub struct StudentIndex {
    by_external: HashMap<String, StudentId>,
}

impl StudentIndex {
    /// Assigns ids `1..=N` in order of first appearance
    pub fn from_records(records: &[ScoreRecord]) -> Self {
        let mut index = Self::default();
        for record in records {
            if !index.by_external.contains_key(&record.student_external_id) {
                let id = StudentId::from_index(index.by_external.len());
                index
                    .by_external
                    .insert(record.student_external_id.clone(), id);
            }
        }
        index
    }

    pub fn id_of(&self, external_id: &str) -> Option<StudentId> {
        self.by_external.get(external_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_external.is_empty()
    }
}

/// Immutable score records plus the student id mapping
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ScoreRecord>,
    students: StudentIndex,
}

impl Dataset {
    pub fn from_records(records: Vec<ScoreRecord>) -> Self {
        let students = StudentIndex::from_records(&records);
        Self { records, students }
    }

    /// Loads the dataset from a source, logging its shape
    pub async fn load(source: &dyn ScoreSource) -> AppResult<Self> {
        let records = source.load_records().await?;
        let dataset = Self::from_records(records);

        let out_of_range = dataset.out_of_range_count();
        if out_of_range > 0 {
            tracing::warn!(
                source = source.name(),
                count = out_of_range,
                "Dataset contains marks outside 0-200"
            );
        }

        tracing::info!(
            source = source.name(),
            records = dataset.records.len(),
            students = dataset.students.len(),
            "Score dataset loaded"
        );

        Ok(dataset)
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn students(&self) -> &StudentIndex {
        &self.students
    }

    fn out_of_range_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !(MIN_MARK..=MAX_MARK).contains(&r.mark))
            .count()
    }
}
