pub mod course;
pub mod recommendation;
pub mod score;

pub use course::{CourseCode, CourseStats, DifficultyTier};
pub use recommendation::Recommendation;
pub use score::{ScoreRecord, StudentId};
