//! Supabase REST and storage client.
//!
//! Talks to PostgREST with the service-role key, so row level security does
//! not apply.

use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use super::types::{Submission, SubmissionUpdate, SUBMISSIONS_TABLE, SUBMISSION_SELECT};
use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Data store and object storage collaborator.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    config: StoreConfig,
    /// Project URL; always a base URL that accepts path segments
    base: Url,
}

impl SupabaseClient {
    /// Build a client, rejecting project URLs that cannot carry a path.
    pub fn new(client: Client, config: StoreConfig) -> Result<Self, StoreError> {
        let base = Url::parse(&config.url)?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// Project URL with extra path segments appended.
    fn url_with_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn table_url(&self, id: &str, select: Option<&str>) -> Url {
        let mut url = self.url_with_segments(["rest", "v1", SUBMISSIONS_TABLE]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &format!("eq.{}", id));
            if let Some(select) = select {
                query.append_pair("select", select);
            }
        }
        url
    }

    /// Load a submission joined with its dojo. `Ok(None)` when no row matches.
    pub async fn fetch_submission(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        let url = self.table_url(id, Some(SUBMISSION_SELECT));

        let resp = self
            .client
            .get(url)
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(
                submission_id = %id,
                status_code = status.as_u16(),
                "store_fetch_failed"
            );
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<Submission> = resp.json().await?;

        info!(submission_id = %id, rows = rows.len(), "store_fetch_complete");

        Ok(rows.into_iter().next())
    }

    /// Apply the post-publication update to one row.
    pub async fn update_submission(
        &self,
        id: &str,
        update: &SubmissionUpdate,
    ) -> Result<(), StoreError> {
        let url = self.table_url(id, None);

        let resp = self
            .client
            .patch(url)
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .header("Prefer", "return=minimal")
            .json(update)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            submission_id = %id,
            has_error_summary = update.social_upload_error.is_some(),
            "store_update_complete"
        );

        Ok(())
    }

    /// Public URL of an object in the submission video bucket.
    pub fn public_url(&self, path: &str) -> Url {
        self.url_with_segments(
            ["storage", "v1", "object", "public", self.config.video_bucket.as_str()]
                .into_iter()
                .chain(path.split('/').filter(|s| !s.is_empty())),
        )
    }
}
