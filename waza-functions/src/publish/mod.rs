//! Social publication module.
//!
//! ## Processing Flow
//!
//! ```text
//! submissionId → fetch → approved? → resolve video → caption
//!              → Facebook → Instagram → YouTube → single update
//! ```
//!
//! Fetch, approval and video resolution failures abort the request. Each
//! platform attempt is isolated: its failure is tagged and collected, and
//! the remaining platforms still run.

pub mod caption;
pub mod facebook;
pub mod instagram;
pub mod platform;
pub mod youtube;

use axum::http::StatusCode;
use chrono::Utc;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::SocialConfig;
use crate::store::{Submission, SubmissionStatus, SupabaseClient};

pub use caption::{compose_caption, video_title, HASHTAGS};
pub use platform::{Platform, PlatformError, PublishOutcome, PublishResult};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Missing submissionId")]
    MissingSubmissionId,

    #[error("Data store not configured")]
    StoreNotConfigured,

    #[error("Submission not found")]
    NotFound,

    #[error("Only approved submissions can be uploaded")]
    NotApproved,

    #[error("No video URL or file path found")]
    NoVideoSource,
}

impl PublishError {
    pub fn status(&self) -> StatusCode {
        match self {
            PublishError::MissingSubmissionId
            | PublishError::NotApproved
            | PublishError::NoVideoSource => StatusCode::BAD_REQUEST,
            PublishError::NotFound => StatusCode::NOT_FOUND,
            PublishError::StoreNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Pick the playable URL: the external video first, then the stored file.
pub fn resolve_video_url(
    store: &SupabaseClient,
    submission: &Submission,
) -> Result<String, PublishError> {
    if let Some(url) = non_empty(&submission.youtube_url) {
        return Ok(url.to_string());
    }
    match non_empty(&submission.video_file_path) {
        Some(path) => Ok(store.public_url(path).to_string()),
        None => Err(PublishError::NoVideoSource),
    }
}

/// Publish an approved submission to every configured platform.
///
/// Returns `Ok` once all attempts ran and the update was issued, whatever
/// the individual platforms did.
pub async fn publish_submission(
    client: &Client,
    store: &SupabaseClient,
    social: &SocialConfig,
    submission_id: &str,
) -> Result<PublishOutcome, PublishError> {
    info!(submission_id = %submission_id, "publish_start");

    let submission = match store.fetch_submission(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            warn!(submission_id = %submission_id, "publish_submission_missing");
            return Err(PublishError::NotFound);
        }
        Err(e) => {
            error!(submission_id = %submission_id, error = %e, "publish_fetch_failed");
            return Err(PublishError::NotFound);
        }
    };

    if submission.status != SubmissionStatus::Approved {
        warn!(
            submission_id = %submission_id,
            status = ?submission.status,
            "publish_not_approved"
        );
        return Err(PublishError::NotApproved);
    }

    let video_url = resolve_video_url(store, &submission)?;
    let caption = compose_caption(&submission);

    info!(
        submission_id = %submission_id,
        has_external_video = non_empty(&submission.youtube_url).is_some(),
        facebook_configured = social.facebook.is_some(),
        instagram_configured = social.instagram.is_some(),
        youtube_configured = social.youtube.is_some(),
        "publish_video_resolved"
    );

    let mut outcome = PublishOutcome::default();

    if let Some(creds) = &social.facebook {
        let attempt =
            facebook::upload(client, &social.graph_api_url, creds, &video_url, &caption).await;
        outcome.record(Platform::Facebook, attempt);
    }

    if let Some(creds) = &social.instagram {
        let attempt =
            instagram::upload(client, &social.graph_api_url, creds, &video_url, &caption).await;
        outcome.record(Platform::Instagram, attempt);
    }

    match (&social.youtube, non_empty(&submission.video_file_path)) {
        (Some(creds), Some(path)) => {
            let metadata = youtube::VideoMetadata {
                title: video_title(&submission),
                description: caption.clone(),
                tags: HASHTAGS.iter().map(|t| t.to_string()).collect(),
            };
            let attempt = youtube::upload(
                client,
                &social.youtube_upload_url,
                creds,
                store.public_url(path).as_str(),
                path,
                &metadata,
            )
            .await;
            outcome.record(Platform::YouTube, attempt);
        }
        (Some(_), None) => {
            info!(submission_id = %submission_id, "youtube_skipped_no_stored_file");
        }
        (None, _) => {}
    }

    let update = outcome.to_update(Utc::now());
    if let Err(e) = store.update_submission(submission_id, &update).await {
        // The response still reports the platform results.
        error!(
            submission_id = %submission_id,
            error = %e,
            facebook_url = ?update.facebook_url,
            instagram_url = ?update.instagram_url,
            youtube_url = ?update.youtube_url,
            "publish_persist_failed"
        );
    }

    let succeeded = [
        outcome.result.facebook.is_some(),
        outcome.result.instagram.is_some(),
        outcome.result.youtube.is_some(),
    ]
    .iter()
    .filter(|ok| **ok)
    .count();

    info!(
        submission_id = %submission_id,
        succeeded = succeeded,
        failed = outcome.errors.len(),
        "publish_complete"
    );

    Ok(outcome)
}
