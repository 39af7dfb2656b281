//! Vision inference client
//!
//! Sends a facility photo to the external Gemini vision service and maps
//! its structured reply into a [`QueueAnalysis`]. The service is treated
//! as an untrusted black box: any transport error, malformed response, or
//! out-of-range status string is normalized to a single
//! `InferenceUnavailable` error and never reaches the facility registry.

use base64::Engine;
use glimpse_common::models::QueueAnalysis;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "Glimpse/0.1.0 (campus dashboard)";
const PHOTO_MIME_TYPE: &str = "image/jpeg";

const CLASSIFY_PROMPT: &str = "You are a campus facility monitor. Look at this photo of a \
facility and classify its crowding. Reply with JSON: \"status\" must be exactly one of \
\"Open\", \"Busy\", \"Closed\", \"Maintenance\"; \"description\" is a short free-text \
summary of what you see (e.g. \"Line extending to hallway\"); \"details\" is a short \
actionable hint (e.g. \"Est. Wait: 12 mins\").";

/// Vision client errors, all surfaced to callers as `InferenceUnavailable`
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("No candidates in response")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Status outside facility enum: {0}")]
    OutOfRange(String),

    #[error("Inference adapter disabled (no API key configured)")]
    Disabled,
}

impl From<VisionError> for glimpse_common::Error {
    fn from(e: VisionError) -> Self {
        glimpse_common::Error::InferenceUnavailable(e.to_string())
    }
}

/// generateContent response envelope (only the fields we read)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Classification payload inside the candidate text, before validation
#[derive(Debug, Serialize, Deserialize)]
struct RawAnalysis {
    status: String,
    description: String,
    details: String,
}

/// Gemini vision API client
pub struct VisionClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(config: &glimpse_common::config::InferenceConfig) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Classify facility crowding from a photo.
    ///
    /// Suspends on network I/O; may fail. Never mutates any state.
    pub async fn classify(&self, photo: &[u8]) -> Result<QueueAnalysis, VisionError> {
        if self.api_key.is_empty() {
            return Err(VisionError::Disabled);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": PHOTO_MIME_TYPE,
                            "data": base64::engine::general_purpose::STANDARD.encode(photo),
                        }
                    },
                    { "text": CLASSIFY_PROMPT },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "status": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "details": { "type": "STRING" },
                    },
                    "required": ["status", "description", "details"],
                },
                "temperature": 0.2,
            }
        });

        tracing::debug!(model = %self.model, photo_bytes = photo.len(), "Querying vision API");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::Api(status.as_u16(), error_text));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        let text = extract_text(&envelope)?;
        let analysis = parse_analysis(&text)?;

        tracing::info!(
            status = %analysis.status,
            description = %analysis.description,
            "Vision classification successful"
        );

        Ok(analysis)
    }
}

/// Pull the first candidate's text out of the response envelope
fn extract_text(envelope: &GenerateContentResponse) -> Result<String, VisionError> {
    let text = envelope
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or(VisionError::EmptyResponse)?;

    if text.trim().is_empty() {
        return Err(VisionError::EmptyResponse);
    }
    Ok(text)
}

/// Parse and validate the classification JSON.
///
/// The status string is checked against the four-value facility enum;
/// anything else is rejected here rather than written to the registry.
fn parse_analysis(text: &str) -> Result<QueueAnalysis, VisionError> {
    let raw: RawAnalysis =
        serde_json::from_str(text).map_err(|e| VisionError::Parse(e.to_string()))?;

    let status = raw
        .status
        .parse()
        .map_err(|_| VisionError::OutOfRange(raw.status.clone()))?;

    Ok(QueueAnalysis {
        status,
        description: raw.description,
        details: raw.details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_common::models::FacilityStatus;

    #[test]
    fn test_client_creation() {
        let config = glimpse_common::config::InferenceConfig {
            api_key: "test_key".to_string(),
            ..Default::default()
        };
        assert!(VisionClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_classify_disabled_without_api_key() {
        let client = VisionClient::new(&Default::default()).unwrap();
        let result = client.classify(b"\xff\xd8\xff").await;
        assert!(matches!(result, Err(VisionError::Disabled)));
    }

    #[test]
    fn test_parse_valid_analysis() {
        let analysis = parse_analysis(
            r#"{"status":"Busy","description":"Line extending to hallway","details":"Est. Wait: 12 mins"}"#,
        )
        .unwrap();
        assert_eq!(analysis.status, FacilityStatus::Busy);
        assert_eq!(analysis.description, "Line extending to hallway");
        assert_eq!(analysis.details, "Est. Wait: 12 mins");
    }

    #[test]
    fn test_parse_rejects_out_of_range_status() {
        let result = parse_analysis(
            r#"{"status":"Packed","description":"crowded","details":"wait"}"#,
        );
        assert!(matches!(result, Err(VisionError::OutOfRange(_))));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_analysis("not json at all"),
            Err(VisionError::Parse(_))
        ));
        assert!(matches!(
            parse_analysis(r#"{"status":"Open"}"#),
            Err(VisionError::Parse(_))
        ));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let envelope = GenerateContentResponse { candidates: vec![] };
        assert!(matches!(
            extract_text(&envelope),
            Err(VisionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_from_envelope() {
        let envelope: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"status\":\"Open\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&envelope).unwrap(), "{\"status\":\"Open\"}");
    }

    #[test]
    fn test_errors_normalize_to_inference_unavailable() {
        let err: glimpse_common::Error = VisionError::OutOfRange("Packed".to_string()).into();
        assert!(matches!(
            err,
            glimpse_common::Error::InferenceUnavailable(_)
        ));
    }
}
