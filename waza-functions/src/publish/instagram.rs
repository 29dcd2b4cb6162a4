//! Instagram Reels publishing via the Graph API.
//!
//! Publishing is two calls: create a media container pointing at the video,
//! then publish that container by its creation id.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::platform::{parse_id_response, PlatformError};
use crate::config::InstagramCredentials;

async fn graph_post(client: &Client, url: &str, body: &Value) -> Result<String, PlatformError> {
    let resp = client.post(url).json(body).send().await?;
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    parse_id_response(status, &text)
}

/// Create and publish a reel, returning its URL.
pub async fn upload(
    client: &Client,
    graph_api_url: &str,
    creds: &InstagramCredentials,
    video_url: &str,
    caption: &str,
) -> Result<String, PlatformError> {
    let base = format!("{}/{}", graph_api_url.trim_end_matches('/'), creds.user_id);

    info!(user_id = %creds.user_id, "instagram_container_starting");

    let creation_id = graph_post(
        client,
        &format!("{}/media", base),
        &json!({
            "media_type": "REELS",
            "video_url": video_url,
            "caption": caption,
            "access_token": creds.access_token,
        }),
    )
    .await
    .map_err(|e| e.during("container creation"))?;

    info!(creation_id = %creation_id, "instagram_publish_starting");

    let media_id = graph_post(
        client,
        &format!("{}/media_publish", base),
        &json!({
            "creation_id": creation_id,
            "access_token": creds.access_token,
        }),
    )
    .await
    .map_err(|e| e.during("publish"))?;

    Ok(format!("https://www.instagram.com/reel/{}/", media_id))
}
