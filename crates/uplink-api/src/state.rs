//! Shared application state

use std::sync::Arc;

use crate::services::upload::{RecordStore, UploadPipeline};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<UploadPipeline>,
    pub records: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(pipeline: UploadPipeline, records: Arc<dyn RecordStore>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            records,
        }
    }
}
