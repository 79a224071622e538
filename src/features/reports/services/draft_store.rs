use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Coordinates, DraftView, ReportDraft, ReportSeverity};

/// Field edits applied to a draft; None leaves a field untouched
#[derive(Debug, Default)]
pub struct DraftUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub violation_type_id: Option<Uuid>,
    pub severity: Option<ReportSeverity>,
    pub location_name: Option<String>,
}

/// Everything the submission pipeline needs from a validated draft
#[derive(Debug)]
pub struct SubmissionInput {
    pub id: Uuid,
    pub image: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub violation_type_id: Uuid,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub coordinates: Coordinates,
}

/// In-process store for report drafts.
///
/// A draft lives from capture until it is submitted, discarded, or
/// expires. Expired drafts behave exactly like unknown ids; the frame
/// bytes are released when the entry goes away. The `submitting` flag,
/// flipped under the write lock, is the single-flight guard that keeps
/// a double-submitted draft down to one insert.
pub struct DraftStore {
    drafts: RwLock<HashMap<Uuid, ReportDraft>>,
    ttl: Duration,
}

impl DraftStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a draft owning the captured frame
    pub async fn create(
        &self,
        image: Vec<u8>,
        content_type: String,
        title: String,
        description: String,
    ) -> DraftView {
        let draft = ReportDraft {
            id: Uuid::new_v4(),
            image,
            content_type,
            title,
            description,
            violation_type_id: None,
            severity: ReportSeverity::default(),
            location_name: None,
            coordinates: None,
            created_at: Instant::now(),
            submitting: false,
        };
        let view = draft.view(self.ttl);

        let mut drafts = self.drafts.write().await;
        drafts.insert(draft.id, draft);

        tracing::debug!("Created draft {} ({} live)", view.id, drafts.len());
        view
    }

    /// Get the editable view of a draft
    pub async fn get(&self, id: Uuid) -> Result<DraftView> {
        let drafts = self.drafts.read().await;
        match drafts.get(&id) {
            Some(d) if !d.is_expired(self.ttl) => Ok(d.view(self.ttl)),
            _ => Err(Self::not_found(id)),
        }
    }

    /// Apply field edits to a draft
    pub async fn update(&self, id: Uuid, update: DraftUpdate) -> Result<DraftView> {
        let mut drafts = self.drafts.write().await;
        let draft = Self::live_mut(&mut drafts, id, self.ttl)?;

        if let Some(title) = update.title {
            draft.title = title;
        }
        if let Some(description) = update.description {
            draft.description = description;
        }
        if let Some(violation_type_id) = update.violation_type_id {
            draft.violation_type_id = Some(violation_type_id);
        }
        if let Some(severity) = update.severity {
            draft.severity = severity;
        }
        if let Some(location_name) = update.location_name {
            draft.location_name = if location_name.is_empty() {
                None
            } else {
                Some(location_name)
            };
        }

        Ok(draft.view(self.ttl))
    }

    /// Record the device position fix. Coordinates are acquired once
    /// per flow instance; a second fix is rejected.
    pub async fn set_coordinates(&self, id: Uuid, coordinates: Coordinates) -> Result<DraftView> {
        let mut drafts = self.drafts.write().await;
        let draft = Self::live_mut(&mut drafts, id, self.ttl)?;

        if draft.coordinates.is_some() {
            return Err(AppError::Conflict(
                "Location coordinates are already recorded for this draft".to_string(),
            ));
        }

        draft.coordinates = Some(coordinates);
        Ok(draft.view(self.ttl))
    }

    /// Discard a draft, releasing the frame bytes (the "retake" path)
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        let mut drafts = self.drafts.write().await;
        match drafts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found(id)),
        }
    }

    /// Validate a draft and mark it in-flight, atomically.
    ///
    /// Validation happens before the flag flips and before any network
    /// call: a rejected draft stays submittable. A draft that is
    /// already in flight yields Conflict, which is what caps a double
    /// submit at one inserted row.
    pub async fn begin_submit(&self, id: Uuid) -> Result<SubmissionInput> {
        let mut drafts = self.drafts.write().await;
        let draft = Self::live_mut(&mut drafts, id, self.ttl)?;

        if draft.submitting {
            return Err(AppError::Conflict(
                "A submission for this draft is already in progress".to_string(),
            ));
        }

        if draft.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        let violation_type_id = draft
            .violation_type_id
            .ok_or_else(|| AppError::Validation("Violation type is required".to_string()))?;
        let coordinates = draft.coordinates.ok_or_else(|| {
            AppError::Validation("Cannot submit without location coordinates".to_string())
        })?;

        draft.submitting = true;

        Ok(SubmissionInput {
            id: draft.id,
            image: draft.image.clone(),
            content_type: draft.content_type.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            violation_type_id,
            severity: draft.severity,
            location_name: draft.location_name.clone(),
            coordinates,
        })
    }

    /// Clear the in-flight flag after a failed submission; the draft
    /// (frame included) stays available for a fresh attempt
    pub async fn end_submit(&self, id: Uuid) {
        let mut drafts = self.drafts.write().await;
        if let Some(draft) = drafts.get_mut(&id) {
            draft.submitting = false;
        }
    }

    /// Consume a draft after a successful submission
    pub async fn complete(&self, id: Uuid) {
        let mut drafts = self.drafts.write().await;
        if drafts.remove(&id).is_some() {
            tracing::debug!("Draft {} consumed ({} live)", id, drafts.len());
        }
    }

    /// Drop expired drafts; returns how many were purged.
    ///
    /// Drafts with a submission in flight are left alone until the
    /// pipeline finishes with them.
    pub async fn purge_expired(&self) -> usize {
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();
        drafts.retain(|_, d| d.submitting || !d.is_expired(self.ttl));
        let purged = before - drafts.len();
        if purged > 0 {
            tracing::info!("Purged {} expired draft(s), {} live", purged, drafts.len());
        }
        purged
    }

    fn live_mut<'a>(
        drafts: &'a mut HashMap<Uuid, ReportDraft>,
        id: Uuid,
        ttl: Duration,
    ) -> Result<&'a mut ReportDraft> {
        match drafts.get_mut(&id) {
            Some(d) if !d.is_expired(ttl) => Ok(d),
            _ => Err(Self::not_found(id)),
        }
    }

    fn not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Draft {} not found", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    fn store() -> DraftStore {
        DraftStore::new(TTL)
    }

    async fn capture(store: &DraftStore) -> Uuid {
        store
            .create(
                vec![0xff, 0xd8, 0xff],
                "image/jpeg".to_string(),
                "General Violation Report".to_string(),
                String::new(),
            )
            .await
            .id
    }

    fn complete_update() -> DraftUpdate {
        DraftUpdate {
            violation_type_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        let id = capture(&store).await;

        let view = store.get(id).await.unwrap();
        assert_eq!(view.title, "General Violation Report");
        assert_eq!(view.severity, ReportSeverity::Low);
        assert!(view.coordinates.is_none());
        assert!(view.expires_in_secs <= TTL.as_secs());
    }

    #[tokio::test]
    async fn test_unknown_draft_is_not_found() {
        let store = store();
        assert!(matches!(
            store.get(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_coordinates_are_set_once() {
        let store = store();
        let id = capture(&store).await;

        let coords = Coordinates {
            latitude: 22.9734,
            longitude: 78.6569,
        };
        let view = store.set_coordinates(id, coords).await.unwrap();
        assert_eq!(view.coordinates, Some(coords));

        let second = store
            .set_coordinates(
                id,
                Coordinates {
                    latitude: 0.0,
                    longitude: 0.0,
                },
            )
            .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        // The first fix survives
        let view = store.get(id).await.unwrap();
        assert_eq!(view.coordinates, Some(coords));
    }

    #[tokio::test]
    async fn test_begin_submit_requires_title_type_and_coordinates() {
        let store = store();
        let id = capture(&store).await;

        // No violation type, no coordinates yet
        let err = store.begin_submit(id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Violation type")));

        store.update(id, complete_update()).await.unwrap();
        let err = store.begin_submit(id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("coordinates")));

        // Blank out the title
        store
            .update(
                id,
                DraftUpdate {
                    title: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .set_coordinates(
                id,
                Coordinates {
                    latitude: 1.0,
                    longitude: 2.0,
                },
            )
            .await
            .unwrap();
        let err = store.begin_submit(id).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Title")));

        // A rejected draft is still editable and submittable
        store
            .update(
                id,
                DraftUpdate {
                    title: Some("Violation by: MH12AB1234".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let input = store.begin_submit(id).await.unwrap();
        assert_eq!(input.title, "Violation by: MH12AB1234");
        assert_eq!(input.image, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_conflicts() {
        let store = store();
        let id = capture(&store).await;
        store.update(id, complete_update()).await.unwrap();
        store
            .set_coordinates(
                id,
                Coordinates {
                    latitude: 1.0,
                    longitude: 2.0,
                },
            )
            .await
            .unwrap();

        store.begin_submit(id).await.unwrap();
        assert!(matches!(
            store.begin_submit(id).await,
            Err(AppError::Conflict(_))
        ));

        // After a failed attempt the draft is submittable again
        store.end_submit(id).await;
        assert!(store.begin_submit(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_complete_consumes_the_draft() {
        let store = store();
        let id = capture(&store).await;

        store.complete(id).await;
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_expired_draft_behaves_as_missing_and_is_purged() {
        let store = DraftStore::new(Duration::ZERO);
        let id = capture(&store).await;

        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.begin_submit(id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_purge_spares_in_flight_drafts() {
        let store = DraftStore::new(Duration::ZERO);
        let id = {
            // Expired immediately, but marked in flight by hand to
            // mimic a slow upload
            let draft = ReportDraft {
                id: Uuid::new_v4(),
                image: Vec::new(),
                content_type: "image/jpeg".to_string(),
                title: "t".to_string(),
                description: String::new(),
                violation_type_id: None,
                severity: ReportSeverity::Low,
                location_name: None,
                coordinates: None,
                created_at: Instant::now(),
                submitting: true,
            };
            let id = draft.id;
            store.drafts.write().await.insert(id, draft);
            id
        };

        assert_eq!(store.purge_expired().await, 0);
        store.end_submit(id).await;
        assert_eq!(store.purge_expired().await, 1);
    }
}
