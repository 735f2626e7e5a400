use std::sync::Arc;

use crate::application::services::GradingService;

#[derive(Clone)]
pub struct AppState {
    pub grading_service: Arc<GradingService>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(grading_service: Arc<GradingService>, max_upload_bytes: usize) -> Self {
        Self {
            grading_service,
            max_upload_bytes,
        }
    }
}
