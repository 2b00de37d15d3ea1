pub mod collaborative;
pub mod content;
pub mod context;
pub mod course_stats;
pub mod dataset;
pub mod matrix;
pub mod picker;
pub mod similarity;

pub use context::RecommendationContext;
pub use dataset::{CsvScoreSource, Dataset, ScoreSource};
pub use picker::{CandidatePicker, ThreadRngPicker};
