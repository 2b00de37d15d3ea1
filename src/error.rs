use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Request-scoped failures raised by the recommenders
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("Marks must be between 0 and 200")]
    InvalidMark(f64),

    #[error("Student ID not found")]
    UnknownStudent(u32),

    #[error("No similar students found")]
    NoSimilarPeers,

    #[error("No new courses to recommend")]
    NoNewCourse,

    #[error("No recommendations found")]
    NoRecommendation,

    #[error("No courses available")]
    NoCandidate,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Failed to load dataset: {0}")]
    DataLoad(String),

    #[error("Dataset parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset read error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Recommendation(_) => StatusCode::BAD_REQUEST,
            AppError::DataLoad(_) | AppError::Csv(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The web client reads `detail`
        let body = Json(json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
