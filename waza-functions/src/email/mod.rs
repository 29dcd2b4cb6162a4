//! Referral email module.
//!
//! ## Flow
//!
//! ```text
//! ReferralRequest → validate → render HTML → Resend API
//! ```

pub mod format;
pub mod sender;

use axum::http::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::EmailConfig;

pub use format::{render_email, render_message, render_subject, split_paragraphs};
pub use sender::{send_email, OutgoingEmail, SendError};

/// Referral payload sent by the front end.
///
/// Every field is optional at the serde level so that missing required
/// fields surface as a validation error instead of a rejected body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferralRequest {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("Missing required fields: sender_name and recipient_email")]
    MissingFields,

    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email")]
    SendFailed(#[source] SendError),
}

impl ReferralError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReferralError::MissingFields => StatusCode::BAD_REQUEST,
            ReferralError::NotConfigured | ReferralError::SendFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Validate, render and dispatch a referral email.
pub async fn send_referral(
    client: &Client,
    config: &EmailConfig,
    request: &ReferralRequest,
) -> Result<(), ReferralError> {
    let recipient = match (present(&request.sender_name), present(&request.recipient_email)) {
        (Some(_), Some(recipient)) => recipient.to_string(),
        _ => {
            warn!(
                has_sender_name = present(&request.sender_name).is_some(),
                has_recipient_email = present(&request.recipient_email).is_some(),
                "referral_missing_fields"
            );
            return Err(ReferralError::MissingFields);
        }
    };

    let api_key = config.api_key.as_deref().ok_or_else(|| {
        error!("referral_email_not_configured");
        ReferralError::NotConfigured
    })?;

    let email = OutgoingEmail {
        from: config.from.clone(),
        to: vec![recipient],
        subject: render_subject(request),
        html: render_email(request, &config.app_url),
        reply_to: present(&request.sender_email).map(str::to_string),
    };

    send_email(client, &config.api_url, api_key, &email)
        .await
        .map_err(|e| {
            error!(error = %e, "referral_send_failed");
            ReferralError::SendFailed(e)
        })?;

    info!(
        has_message = present(&request.message).is_some(),
        "referral_sent"
    );

    Ok(())
}
