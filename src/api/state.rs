use std::sync::Arc;

use crate::services::{CandidatePicker, Dataset, RecommendationContext, ThreadRngPicker};

/// Shared application state
///
/// Holds the read-only recommendation context; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<RecommendationContext>,
}

impl AppState {
    pub fn new(context: RecommendationContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// Derives the context from a loaded dataset with a random picker
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::with_picker(dataset, Arc::new(ThreadRngPicker))
    }

    pub fn with_picker(dataset: &Dataset, picker: Arc<dyn CandidatePicker>) -> Self {
        Self::new(RecommendationContext::build(dataset, picker))
    }
}
