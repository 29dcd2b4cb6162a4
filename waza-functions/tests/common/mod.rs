//! Shared helpers for router-level tests.
//!
//! Every external API is served by one `httpmock` server; the configuration
//! points each collaborator at a distinct path prefix on it.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;

use waza::config::{
    EmailConfig, FacebookCredentials, InstagramCredentials, SocialConfig, StoreConfig,
    YouTubeCredentials,
};
use waza::{router, AppState, Config};

pub const EMAIL_KEY: &str = "re_test_key";
pub const SERVICE_KEY: &str = "service-role-key";

pub fn config(server: &MockServer) -> Config {
    Config {
        port: 0,
        request_timeout_ms: 5_000,
        email: EmailConfig {
            api_key: Some(EMAIL_KEY.to_string()),
            api_url: server.base_url(),
            from: "Triple Waza Challenge <noreply@triplewaza.com>".to_string(),
            app_url: "https://triplewaza.com".to_string(),
        },
        store: Some(StoreConfig {
            url: server.base_url(),
            service_role_key: SERVICE_KEY.to_string(),
            video_bucket: "submission-videos".to_string(),
        }),
        social: SocialConfig {
            facebook: None,
            instagram: None,
            youtube: None,
            graph_api_url: server.url("/graph"),
            youtube_upload_url: server.url("/youtube/upload"),
        },
    }
}

pub fn with_all_platforms(mut config: Config) -> Config {
    config.social.facebook = Some(FacebookCredentials {
        page_id: "page-1".to_string(),
        access_token: "fb-token".to_string(),
    });
    config.social.instagram = Some(InstagramCredentials {
        user_id: "ig-1".to_string(),
        access_token: "ig-token".to_string(),
    });
    config.social.youtube = Some(YouTubeCredentials {
        access_token: "yt-token".to_string(),
    });
    config
}

pub fn app(config: Config) -> Router {
    router(AppState::new(config).unwrap())
}

/// Send one request through the router and decode the JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
