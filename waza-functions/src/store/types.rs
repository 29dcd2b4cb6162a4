//! Row types for the submissions table.
//!
//! The schema is owned by the web application; only the columns read or
//! written here are modelled.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Table holding dojo video submissions.
pub const SUBMISSIONS_TABLE: &str = "submissions";

/// Embedded dojo columns requested alongside a submission.
pub const SUBMISSION_SELECT: &str = "*,dojos(name,city,country)";

/// Primary key of a row. PostgREST serves uuid and text keys as strings and
/// integer keys as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Approval workflow state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    /// Any value the workflow may add later
    #[serde(other)]
    Unknown,
}

/// Dojo metadata joined onto a submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dojo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A submission row as returned by PostgREST.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub id: RowId,
    pub status: SubmissionStatus,
    /// Externally hosted video, preferred over the stored file
    #[serde(default)]
    pub youtube_url: Option<String>,
    /// Object path inside the submission video bucket
    #[serde(default)]
    pub video_file_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub dojos: Option<Dojo>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub social_upload_error: Option<String>,
    #[serde(default)]
    pub social_uploaded_at: Option<String>,
}

impl Submission {
    pub fn dojo(&self) -> Dojo {
        self.dojos.clone().unwrap_or_default()
    }
}

/// The single write performed after a publication attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionUpdate {
    pub social_uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_upload_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_deserialization() {
        let json = r#"{
            "id": "7b0c",
            "status": "approved",
            "youtube_url": null,
            "video_file_path": "dojo-1/clip.mp4",
            "message": "Uchi mata combo",
            "dojos": {"name": "Kodokan", "city": "Tokyo", "country": "Japan"},
            "created_at": "2026-01-01T00:00:00Z"
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.status, SubmissionStatus::Approved);
        assert_eq!(submission.video_file_path.as_deref(), Some("dojo-1/clip.mp4"));
        assert_eq!(submission.dojo().city.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_row_id_accepts_text_and_number() {
        let text: RowId = serde_json::from_str(r#"" 7b0c ""#).unwrap();
        let number: RowId = serde_json::from_str("42").unwrap();

        assert_eq!(text.to_string(), "7b0c");
        assert_eq!(number, RowId::Number(42));
        assert_eq!(number.to_string(), "42");
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let status: SubmissionStatus = serde_json::from_str(r#""Approved""#).unwrap();
        assert_eq!(status, SubmissionStatus::Unknown);
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = SubmissionUpdate {
            social_uploaded_at: Utc::now(),
            facebook_url: Some("https://www.facebook.com/1/videos/2".to_string()),
            instagram_url: None,
            youtube_url: None,
            social_upload_error: None,
        };

        let value = serde_json::to_value(&update).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("social_uploaded_at"));
        assert!(object.contains_key("facebook_url"));
        assert!(!object.contains_key("instagram_url"));
        assert!(!object.contains_key("social_upload_error"));
    }
}
