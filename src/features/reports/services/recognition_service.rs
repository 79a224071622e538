use base64::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::RecognitionConfig;
use crate::core::error::{AppError, Result};
use crate::shared::validation::is_plausible_plate;

/// One detected plate from the recognition endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PlateCandidate {
    pub text: String,
    pub recognition_confidence: f64,
}

/// Recognition endpoint response structure
#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    plates: Vec<PlateCandidate>,
}

#[derive(Debug, Serialize)]
struct RecognitionRequest {
    image: String,
}

/// Advisory prefill for a fresh draft.
///
/// Whatever the recognition endpoint did, a capture always yields a
/// usable title/description; `warning` is set only when the endpoint
/// itself was unavailable.
#[derive(Debug)]
pub struct DraftPrefill {
    pub title: String,
    pub description: String,
    pub plate: Option<PlateCandidate>,
    pub warning: Option<String>,
}

const GENERIC_TITLE: &str = "General Violation Report";

impl DraftPrefill {
    /// Prefill from a successful recognition response
    pub fn from_candidates(mut plates: Vec<PlateCandidate>) -> Self {
        // Keep the endpoint's ranking, but skip garbage candidates
        plates.retain(|p| is_plausible_plate(&p.text));

        match plates.into_iter().next() {
            Some(plate) => Self {
                title: format!("Violation by: {}", plate.text),
                description: format!(
                    "License plate {} detected. Confidence: {:.1}%",
                    plate.text,
                    plate.recognition_confidence * 100.0
                ),
                plate: Some(plate),
                warning: None,
            },
            None => Self {
                title: GENERIC_TITLE.to_string(),
                description: "No license plate was automatically detected.".to_string(),
                plate: None,
                warning: None,
            },
        }
    }

    /// Prefill when the endpoint failed or was unreachable
    pub fn recognition_failed() -> Self {
        Self {
            title: GENERIC_TITLE.to_string(),
            description: String::new(),
            plate: None,
            warning: Some(
                "Could not detect license plate. Please enter details manually.".to_string(),
            ),
        }
    }

    /// Prefill when recognition is not configured
    pub fn disabled() -> Self {
        Self {
            title: GENERIC_TITLE.to_string(),
            description: String::new(),
            plate: None,
            warning: None,
        }
    }
}

/// Client for the external license-plate recognition (ANPR) endpoint
pub struct PlateRecognitionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PlateRecognitionClient {
    pub fn new(config: &RecognitionConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("SafeRoadsCore/1.0 (violation-report-system)")
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }

    /// Run one recognition request for a captured frame.
    ///
    /// The frame travels base64-encoded in a JSON body; no timeout is
    /// applied beyond the transport's own defaults.
    pub async fn recognize(&self, image: &[u8]) -> Result<Vec<PlateCandidate>> {
        let request = RecognitionRequest {
            image: BASE64_STANDARD.encode(image),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Recognition request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Recognition request failed: {}", e))
            })?;

        if !response.status().is_success() {
            tracing::warn!("Recognition endpoint returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Recognition endpoint returned HTTP {}",
                response.status()
            )));
        }

        let result: RecognitionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse recognition response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse recognition response: {}", e))
        })?;

        Ok(result.plates)
    }

    /// Compute the draft prefill for a captured frame.
    ///
    /// Strictly advisory: any recognition failure degrades to the
    /// generic prefill with a warning, never to an error.
    pub async fn prefill(&self, image: &[u8]) -> DraftPrefill {
        if !self.enabled() {
            return DraftPrefill::disabled();
        }

        match self.recognize(image).await {
            Ok(plates) => DraftPrefill::from_candidates(plates),
            Err(e) => {
                tracing::warn!("Recognition unavailable, falling back to manual entry: {}", e);
                DraftPrefill::recognition_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_from_top_candidate() {
        let prefill = DraftPrefill::from_candidates(vec![
            PlateCandidate {
                text: "MH12AB1234".to_string(),
                recognition_confidence: 0.87,
            },
            PlateCandidate {
                text: "KA05MJ0001".to_string(),
                recognition_confidence: 0.42,
            },
        ]);

        assert_eq!(prefill.title, "Violation by: MH12AB1234");
        assert_eq!(
            prefill.description,
            "License plate MH12AB1234 detected. Confidence: 87.0%"
        );
        assert!(prefill.warning.is_none());
        assert_eq!(prefill.plate.unwrap().text, "MH12AB1234");
    }

    #[test]
    fn test_prefill_confidence_is_one_decimal_percent() {
        let prefill = DraftPrefill::from_candidates(vec![PlateCandidate {
            text: "B1234XYZ".to_string(),
            recognition_confidence: 0.12345,
        }]);
        assert!(prefill.description.ends_with("Confidence: 12.3%"));
    }

    #[test]
    fn test_prefill_zero_detections() {
        let prefill = DraftPrefill::from_candidates(Vec::new());
        assert_eq!(prefill.title, "General Violation Report");
        assert_eq!(
            prefill.description,
            "No license plate was automatically detected."
        );
        assert!(prefill.plate.is_none());
        assert!(prefill.warning.is_none());
    }

    #[test]
    fn test_prefill_skips_garbage_candidates() {
        let prefill = DraftPrefill::from_candidates(vec![
            PlateCandidate {
                text: "##".to_string(),
                recognition_confidence: 0.99,
            },
            PlateCandidate {
                text: "MH12AB1234".to_string(),
                recognition_confidence: 0.5,
            },
        ]);
        assert_eq!(prefill.title, "Violation by: MH12AB1234");
    }

    #[test]
    fn test_prefill_on_failure_keeps_flow_usable() {
        let prefill = DraftPrefill::recognition_failed();
        assert_eq!(prefill.title, "General Violation Report");
        assert!(prefill.description.is_empty());
        assert_eq!(
            prefill.warning.as_deref(),
            Some("Could not detect license plate. Please enter details manually.")
        );
    }

    #[test]
    fn test_response_parsing_tolerates_missing_plates_field() {
        let parsed: RecognitionResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.plates.is_empty());

        let parsed: RecognitionResponse = serde_json::from_str(
            r#"{"plates":[{"text":"MH12AB1234","recognition_confidence":0.87}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.plates.len(), 1);
        assert_eq!(parsed.plates[0].text, "MH12AB1234");
    }
}
