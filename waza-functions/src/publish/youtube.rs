//! YouTube upload via the Data API multipart endpoint.
//!
//! YouTube cannot ingest a remote URL, so the stored file is downloaded and
//! sent as the second part of a `multipart/related` body.

use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::platform::{parse_id_response, PlatformError};
use crate::config::YouTubeCredentials;

const BOUNDARY: &str = "triple_waza_upload_boundary";

/// "Sports" in the YouTube category list.
const SPORTS_CATEGORY_ID: &str = "17";

/// Metadata for the uploaded video.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Content type for the video part.
///
/// Storage usually reports the real type; generic or missing values fall
/// back to a guess from the file extension.
pub fn video_content_type(served: Option<&str>, path: &str) -> String {
    let served = served
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| value.starts_with("video/"));

    served.unwrap_or_else(|| {
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    })
}

/// Build a `multipart/related` body: JSON metadata, then the video bytes.
pub fn build_multipart_body(metadata: &VideoMetadata, video_content_type: &str, video: &[u8]) -> Vec<u8> {
    let metadata_json = json!({
        "snippet": {
            "title": metadata.title,
            "description": metadata.description,
            "tags": metadata.tags,
            "categoryId": SPORTS_CATEGORY_ID,
        },
        "status": {
            "privacyStatus": "public",
        },
    });

    let mut body = Vec::with_capacity(video.len() + 1024);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{json}\r\n\
             --{b}\r\nContent-Type: {ct}\r\n\r\n",
            b = BOUNDARY,
            json = metadata_json,
            ct = video_content_type,
        )
        .as_bytes(),
    );
    body.extend_from_slice(video);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Fetch the stored file with the content type storage served it as.
async fn download(client: &Client, url: &str) -> Result<(Vec<u8>, Option<String>), PlatformError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(PlatformError::Api(format!("HTTP {}", status.as_u16())));
    }
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Ok((resp.bytes().await?.to_vec(), content_type))
}

/// Download the stored video and upload it, returning the watch URL.
pub async fn upload(
    client: &Client,
    upload_url: &str,
    creds: &YouTubeCredentials,
    stored_video_url: &str,
    file_path: &str,
    metadata: &VideoMetadata,
) -> Result<String, PlatformError> {
    info!(file_path = %file_path, "youtube_download_starting");

    let (video, served_type) = download(client, stored_video_url)
        .await
        .map_err(|e| e.during("video download"))?;
    let content_type = video_content_type(served_type.as_deref(), file_path);

    info!(
        video_bytes = video.len(),
        content_type = %content_type,
        "youtube_upload_starting"
    );

    let body = build_multipart_body(metadata, &content_type, &video);

    let resp = client
        .post(upload_url)
        .bearer_auth(&creds.access_token)
        .header(
            reqwest::header::CONTENT_TYPE,
            format!("multipart/related; boundary={}", BOUNDARY),
        )
        .body(body)
        .send()
        .await?;

    let status = resp.status().as_u16();
    let text = resp.text().await?;
    let video_id = parse_id_response(status, &text)?;

    Ok(format!("https://www.youtube.com/watch?v={}", video_id))
}
