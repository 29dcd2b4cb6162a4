//! HTTP endpoint handlers.
//!
//! Both functions answer with JSON and an explicit status. CORS headers and
//! preflight requests are handled by the layer in `web::cors`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::email::{send_referral, ReferralRequest};
use crate::publish::{publish_submission, PublishError, PublishResult};
use crate::store::{RowId, SupabaseClient};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
    /// Absent when the Supabase project is not configured
    pub store: Option<SupabaseClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        let store = config
            .store
            .clone()
            .map(|store_config| SupabaseClient::new(client.clone(), store_config))
            .transpose()
            .context("Invalid SUPABASE_URL")?;

        Ok(Self {
            config: Arc::new(config),
            client,
            store,
        })
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Referral Email
// =============================================================================

#[derive(Serialize)]
pub struct ReferralResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Referral email endpoint.
///
/// An unreadable body is treated like an empty one, so it fails validation
/// with the missing-fields error.
pub async fn send_referral_email(
    State(state): State<AppState>,
    payload: Option<Json<ReferralRequest>>,
) -> Response {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    info!(
        has_sender_email = request.sender_email.is_some(),
        message_length = request.message.as_ref().map(|m| m.len()).unwrap_or(0),
        "referral_request_received"
    );

    match send_referral(&state.client, &state.config.email, &request).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReferralResponse {
                success: Some(true),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => (
            e.status(),
            Json(ReferralResponse {
                success: None,
                error: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}

// =============================================================================
// Social Publication
// =============================================================================

/// Publication payload. `submissionId` may be a string or an integer key.
#[derive(Debug, Default, Deserialize)]
pub struct PublishRequest {
    #[serde(default, rename = "submissionId")]
    pub submission_id: Option<RowId>,
}

#[derive(Serialize)]
pub struct PublishResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PublishResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn publish_failure(e: PublishError) -> Response {
    (
        e.status(),
        Json(PublishResponse {
            success: false,
            result: None,
            errors: None,
            error: Some(e.to_string()),
        }),
    )
        .into_response()
}

/// Social publication endpoint.
///
/// `success: true` means every configured platform was attempted; failed
/// platforms are listed in `errors`.
pub async fn upload_to_social(
    State(state): State<AppState>,
    payload: Option<Json<PublishRequest>>,
) -> Response {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let submission_id = match request.submission_id.map(|id| id.to_string()) {
        Some(id) if !id.is_empty() => id,
        _ => return publish_failure(PublishError::MissingSubmissionId),
    };

    let Some(store) = state.store.as_ref() else {
        error!("publish_store_not_configured");
        return publish_failure(PublishError::StoreNotConfigured);
    };

    match publish_submission(&state.client, store, &state.config.social, &submission_id).await {
        Ok(outcome) => {
            let errors = outcome.error_messages();
            (
                StatusCode::OK,
                Json(PublishResponse {
                    success: true,
                    result: Some(outcome.result),
                    errors: if errors.is_empty() { None } else { Some(errors) },
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => publish_failure(e),
    }
}
