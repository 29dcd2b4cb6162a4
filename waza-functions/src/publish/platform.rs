//! Platform identities, per-platform errors and the aggregated outcome.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::store::SubmissionUpdate;

/// The social platforms a submission can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Instagram,
    YouTube,
}

impl Platform {
    /// Label used to tag error messages.
    pub fn label(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
        }
    }

    /// Key used in JSON results and logs.
    pub fn key(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{stage} failed: {source}")]
    Step {
        stage: &'static str,
        #[source]
        source: Box<PlatformError>,
    },
}

impl PlatformError {
    /// Attribute the error to one step of a multi-step upload.
    pub fn during(self, stage: &'static str) -> Self {
        PlatformError::Step {
            stage,
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the created object's id from a Graph or Google API response.
///
/// Both APIs report failures as `{"error": {"message": ...}}`.
pub fn parse_id_response(status: u16, body: &str) -> Result<String, PlatformError> {
    let parsed: IdResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) if (200..300).contains(&status) => {
            return Err(PlatformError::InvalidResponse(e.to_string()));
        }
        Err(_) => return Err(PlatformError::Api(format!("HTTP {}", status))),
    };

    if let Some(error) = parsed.error {
        return Err(PlatformError::Api(
            error.message.unwrap_or_else(|| format!("HTTP {}", status)),
        ));
    }

    if !(200..300).contains(&status) {
        return Err(PlatformError::Api(format!("HTTP {}", status)));
    }

    parsed
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PlatformError::InvalidResponse("missing id".to_string()))
}

/// URLs of successful uploads, keyed by platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublishResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

/// Successes and tagged failures of one publication run.
#[derive(Debug, Default)]
pub struct PublishOutcome {
    pub result: PublishResult,
    pub errors: Vec<(Platform, String)>,
}

impl PublishOutcome {
    /// Merge one platform attempt into the outcome.
    pub fn record(&mut self, platform: Platform, attempt: Result<String, PlatformError>) {
        match attempt {
            Ok(url) => {
                info!(platform = platform.key(), url = %url, "platform_upload_succeeded");
                let slot = match platform {
                    Platform::Facebook => &mut self.result.facebook,
                    Platform::Instagram => &mut self.result.instagram,
                    Platform::YouTube => &mut self.result.youtube,
                };
                *slot = Some(url);
            }
            Err(e) => {
                warn!(platform = platform.key(), error = %e, "platform_upload_failed");
                self.errors.push((platform, e.to_string()));
            }
        }
    }

    /// Failures formatted as `"<Platform>: <message>"`, in attempt order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(platform, message)| format!("{}: {}", platform.label(), message))
            .collect()
    }

    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.error_messages().join("; "))
        }
    }

    pub fn to_update(&self, attempted_at: DateTime<Utc>) -> SubmissionUpdate {
        SubmissionUpdate {
            social_uploaded_at: attempted_at,
            facebook_url: self.result.facebook.clone(),
            instagram_url: self.result.instagram.clone(),
            youtube_url: self.result.youtube.clone(),
            social_upload_error: self.error_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_success() {
        assert_eq!(parse_id_response(200, r#"{"id": "123"}"#).unwrap(), "123");
    }

    #[test]
    fn test_parse_id_api_error_message() {
        let err = parse_id_response(
            400,
            r#"{"error": {"message": "Invalid OAuth access token.", "code": 190}}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid OAuth access token.");
    }

    #[test]
    fn test_parse_id_non_json_failure() {
        let err = parse_id_response(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_parse_id_malformed_success() {
        let err = parse_id_response(200, "<html>").unwrap_err();
        assert!(matches!(err, PlatformError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_id_missing_id() {
        let err = parse_id_response(200, r#"{"success": true}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid response: missing id");
    }

    #[test]
    fn test_step_error_message() {
        let err = PlatformError::Api("bad video".to_string()).during("container creation");
        assert_eq!(err.to_string(), "container creation failed: bad video");
    }

    #[test]
    fn test_outcome_aggregation() {
        let mut outcome = PublishOutcome::default();
        outcome.record(Platform::Facebook, Ok("https://fb/1".to_string()));
        outcome.record(
            Platform::Instagram,
            Err(PlatformError::Api("nope".to_string()).during("publish")),
        );
        outcome.record(Platform::YouTube, Err(PlatformError::Api("quota".to_string())));

        assert_eq!(outcome.result.facebook.as_deref(), Some("https://fb/1"));
        assert!(outcome.result.instagram.is_none());
        assert_eq!(
            outcome.error_messages(),
            vec!["Instagram: publish failed: nope", "YouTube: quota"]
        );
        assert_eq!(
            outcome.error_summary().as_deref(),
            Some("Instagram: publish failed: nope; YouTube: quota")
        );
    }

    #[test]
    fn test_empty_outcome_update() {
        let now = Utc::now();
        let update = PublishOutcome::default().to_update(now);

        assert_eq!(update.social_uploaded_at, now);
        assert!(update.facebook_url.is_none());
        assert!(update.social_upload_error.is_none());
        assert_eq!(
            serde_json::to_value(PublishResult::default()).unwrap(),
            serde_json::json!({})
        );
    }
}
