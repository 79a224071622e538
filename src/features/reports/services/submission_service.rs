use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::ReportDetailResponseDto;
use crate::features::reports::models::CreateReport;
use crate::features::reports::services::{DraftStore, ReportService, SubmissionInput};
use crate::modules::storage::MinIOClient;

/// The report submission pipeline.
///
/// One invocation drives a validated draft through
/// upload → URL resolution → insert, strictly in that order, with a
/// single attempt and no automatic retry. Failure at any step clears
/// the draft's in-flight flag so the citizen can submit again without
/// recapturing; success consumes the draft.
pub struct SubmissionService {
    storage: Arc<MinIOClient>,
    drafts: Arc<DraftStore>,
    reports: Arc<ReportService>,
}

impl SubmissionService {
    pub fn new(
        storage: Arc<MinIOClient>,
        drafts: Arc<DraftStore>,
        reports: Arc<ReportService>,
    ) -> Self {
        Self {
            storage,
            drafts,
            reports,
        }
    }

    /// Submit a draft, producing exactly one persisted report.
    ///
    /// `user` is the verified session at submit time, if any; anonymous
    /// submissions simply persist without attribution.
    pub async fn submit(
        &self,
        draft_id: Uuid,
        user: Option<&AuthenticatedUser>,
    ) -> Result<ReportDetailResponseDto> {
        // Validation and the single-flight flag happen atomically in
        // the store, before any network call
        let input = self.drafts.begin_submit(draft_id).await?;

        match self.run_pipeline(&input, user).await {
            Ok(report_id) => {
                // Draft consumed; the frame buffer is released here
                self.drafts.complete(draft_id).await;
                self.reports.get_by_id(report_id).await
            }
            Err(e) => {
                // Draft preserved for a fresh attempt
                self.drafts.end_submit(draft_id).await;
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        input: &SubmissionInput,
        user: Option<&AuthenticatedUser>,
    ) -> Result<Uuid> {
        // Step 1: upload the frame under a timestamp-qualified key
        let key = self.storage.generate_key(&object_path(input));
        self.storage
            .upload(&key, input.image.clone(), &input.content_type)
            .await?;

        // Step 2: resolve the public URL (infallible given the upload)
        let image_url = self.storage.get_public_url(&key);

        // Step 3: insert the report row. A failure here leaves the
        // uploaded object in place; there is deliberately no
        // compensating delete.
        let report = self
            .reports
            .create(&CreateReport {
                user_id: user.map(|u| u.id.clone()),
                title: input.title.clone(),
                description: input.description.clone(),
                violation_type_id: input.violation_type_id,
                severity: input.severity,
                location_name: input.location_name.clone(),
                latitude: input.coordinates.latitude,
                longitude: input.coordinates.longitude,
                image_url,
            })
            .await?;

        Ok(report.id)
    }
}

/// Object path for a captured frame: timestamp-qualified so two
/// submissions can never collide on a key
fn object_path(input: &SubmissionInput) -> String {
    format!(
        "reports/report-{}-{}.{}",
        Utc::now().timestamp_millis(),
        input.id,
        extension_for(&input.content_type)
    )
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{Coordinates, ReportSeverity};

    fn input(content_type: &str) -> SubmissionInput {
        SubmissionInput {
            id: Uuid::new_v4(),
            image: vec![1, 2, 3],
            content_type: content_type.to_string(),
            title: "t".to_string(),
            description: String::new(),
            violation_type_id: Uuid::new_v4(),
            severity: ReportSeverity::Low,
            location_name: None,
            coordinates: Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
        }
    }

    #[test]
    fn test_object_path_is_draft_qualified() {
        let input = input("image/jpeg");
        let path = object_path(&input);
        assert!(path.starts_with("reports/report-"));
        assert!(path.contains(&input.id.to_string()));
        assert!(path.ends_with(".jpg"));
    }

    #[test]
    fn test_extension_follows_content_type() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        // Unknowns were rejected at capture; anything else means JPEG
        assert_eq!(extension_for("application/octet-stream"), "jpg");
    }
}
