use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Recommendation, StudentId},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct CollaborativeRequest {
    pub student_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub marks: f64,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends a course from the marks of similar students
pub async fn recommend_collaborative(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CollaborativeRequest>,
) -> AppResult<Json<Recommendation>> {
    tracing::info!(
        request_id = %request_id,
        student_id = request.student_id,
        "Processing collaborative recommendation"
    );

    let recommendation = state
        .context
        .recommend_for_student(StudentId(request.student_id))
        .map_err(|e| {
            tracing::info!(request_id = %request_id, reason = %e, "No collaborative recommendation");
            e
        })?;

    tracing::info!(
        request_id = %request_id,
        course = %recommendation.course,
        confidence = recommendation.confidence,
        "Collaborative recommendation completed"
    );

    Ok(Json(recommendation))
}

/// Recommends a course whose average suits the given mark
pub async fn recommend_content(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ContentRequest>,
) -> AppResult<Json<Recommendation>> {
    tracing::info!(
        request_id = %request_id,
        marks = request.marks,
        "Processing content recommendation"
    );

    let recommendation = state
        .context
        .recommend_by_mark(request.marks)
        .map_err(|e| {
            tracing::info!(request_id = %request_id, reason = %e, "No content recommendation");
            e
        })?;

    tracing::info!(
        request_id = %request_id,
        course = %recommendation.course,
        confidence = recommendation.confidence,
        "Content recommendation completed"
    );

    Ok(Json(recommendation))
}
