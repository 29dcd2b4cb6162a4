//! Facebook page video upload via the Graph API.

use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::platform::{parse_id_response, PlatformError};
use crate::config::FacebookCredentials;

/// Post the video to the page by URL and return the video permalink.
pub async fn upload(
    client: &Client,
    graph_api_url: &str,
    creds: &FacebookCredentials,
    video_url: &str,
    caption: &str,
) -> Result<String, PlatformError> {
    let url = format!(
        "{}/{}/videos",
        graph_api_url.trim_end_matches('/'),
        creds.page_id
    );

    info!(page_id = %creds.page_id, "facebook_upload_starting");

    let resp = client
        .post(&url)
        .json(&json!({
            "file_url": video_url,
            "description": caption,
            "access_token": creds.access_token,
        }))
        .send()
        .await?;

    let status = resp.status().as_u16();
    let body = resp.text().await?;
    let video_id = parse_id_response(status, &body)?;

    Ok(format!(
        "https://www.facebook.com/{}/videos/{}",
        creds.page_id, video_id
    ))
}
