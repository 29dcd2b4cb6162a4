//! Resend API client for transactional email.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

/// A rendered email ready for dispatch.
#[derive(Debug, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Submit one email through the provider's REST API. No retry.
pub async fn send_email(
    client: &Client,
    api_url: &str,
    api_key: &str,
    email: &OutgoingEmail,
) -> Result<(), SendError> {
    let url = format!("{}/emails", api_url.trim_end_matches('/'));

    info!(
        recipients = email.to.len(),
        html_length = email.html.len(),
        has_reply_to = email.reply_to.is_some(),
        "email_send_starting"
    );

    let resp = client
        .post(&url)
        .bearer_auth(api_key)
        .json(email)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        error!(
            status_code = status.as_u16(),
            body = %body,
            "email_provider_rejected"
        );
        return Err(SendError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    info!(status_code = status.as_u16(), "email_send_complete");

    Ok(())
}
