use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::report::ReportSeverity;

/// Device coordinates attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// In-memory report draft, owned by the draft store.
///
/// Holds the captured frame until the submission pipeline uploads it
/// or the draft is discarded/expired. Exactly one submission may be in
/// flight per draft (`submitting`).
#[derive(Debug)]
pub struct ReportDraft {
    pub id: Uuid,
    pub image: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub violation_type_id: Option<Uuid>,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub created_at: Instant,
    pub submitting: bool,
}

impl ReportDraft {
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }

    /// Metadata view of the draft, without the frame bytes
    pub fn view(&self, ttl: Duration) -> DraftView {
        DraftView {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            violation_type_id: self.violation_type_id,
            severity: self.severity,
            location_name: self.location_name.clone(),
            coordinates: self.coordinates,
            expires_in_secs: ttl.saturating_sub(self.created_at.elapsed()).as_secs(),
        }
    }
}

/// Snapshot of a draft's editable state, handed to handlers and DTOs
#[derive(Debug, Clone)]
pub struct DraftView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub violation_type_id: Option<Uuid>,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub expires_in_secs: u64,
}
