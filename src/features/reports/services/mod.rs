mod draft_store;
mod recognition_service;
mod report_service;
mod submission_service;

pub use draft_store::{DraftStore, DraftUpdate, SubmissionInput};
pub use recognition_service::{DraftPrefill, PlateCandidate, PlateRecognitionClient};
pub use report_service::ReportService;
pub use submission_service::SubmissionService;
