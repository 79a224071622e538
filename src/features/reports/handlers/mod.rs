pub mod capture_handler;
pub mod draft_handler;
pub mod report_handler;

use std::sync::Arc;

use crate::features::reports::services::{
    DraftStore, PlateRecognitionClient, ReportService, SubmissionService,
};

/// State shared by the report handlers
#[derive(Clone)]
pub struct ReportState {
    pub drafts: Arc<DraftStore>,
    pub recognition: Arc<PlateRecognitionClient>,
    pub submission: Arc<SubmissionService>,
    pub reports: Arc<ReportService>,
    pub max_image_bytes: usize,
}
