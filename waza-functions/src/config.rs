//! Configuration module for environment variable parsing.
//!
//! Every setting comes from the environment. Platform credentials are grouped
//! so that a platform is either fully configured or absent.

use std::env;
use tracing::warn;

pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_EMAIL_FROM: &str = "Triple Waza Challenge <noreply@triplewaza.com>";
pub const DEFAULT_APP_URL: &str = "https://triplewaza.com";
pub const DEFAULT_VIDEO_BUCKET: &str = "submission-videos";
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com/v18.0";
pub const DEFAULT_YOUTUBE_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/youtube/v3/videos?uploadType=multipart&part=snippet,status";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Outbound HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    pub email: EmailConfig,

    /// Supabase project, if configured
    pub store: Option<StoreConfig>,

    pub social: SocialConfig,
}

/// Transactional email provider settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Provider API key; `None` means the email service is not configured
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
    /// Link target for the call to action in referral emails
    pub app_url: String,
}

/// Supabase REST and storage settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub service_role_key: String,
    pub video_bucket: String,
}

#[derive(Debug, Clone)]
pub struct FacebookCredentials {
    pub page_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct InstagramCredentials {
    pub user_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct YouTubeCredentials {
    pub access_token: String,
}

/// Social platform credentials and endpoints.
#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub facebook: Option<FacebookCredentials>,
    pub instagram: Option<InstagramCredentials>,
    pub youtube: Option<YouTubeCredentials>,
    pub graph_api_url: String,
    pub youtube_upload_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 8080),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 120_000),

            email: EmailConfig {
                api_key: non_empty("RESEND_API_KEY"),
                api_url: non_empty("EMAIL_API_URL")
                    .unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
                from: non_empty("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
                app_url: non_empty("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            },

            store: match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_SERVICE_ROLE_KEY")) {
                (Some(url), Some(service_role_key)) => Some(StoreConfig {
                    url,
                    service_role_key,
                    video_bucket: non_empty("SUBMISSION_VIDEO_BUCKET")
                        .unwrap_or_else(|| DEFAULT_VIDEO_BUCKET.to_string()),
                }),
                _ => None,
            },

            social: SocialConfig {
                facebook: both("FACEBOOK_PAGE_ID", "FACEBOOK_ACCESS_TOKEN").map(
                    |(page_id, access_token)| FacebookCredentials {
                        page_id,
                        access_token,
                    },
                ),
                instagram: both("INSTAGRAM_USER_ID", "INSTAGRAM_ACCESS_TOKEN").map(
                    |(user_id, access_token)| InstagramCredentials {
                        user_id,
                        access_token,
                    },
                ),
                youtube: non_empty("YOUTUBE_ACCESS_TOKEN")
                    .map(|access_token| YouTubeCredentials { access_token }),
                graph_api_url: non_empty("GRAPH_API_URL")
                    .unwrap_or_else(|| DEFAULT_GRAPH_API_URL.to_string()),
                youtube_upload_url: non_empty("YOUTUBE_UPLOAD_URL")
                    .unwrap_or_else(|| DEFAULT_YOUTUBE_UPLOAD_URL.to_string()),
            },
        }
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a pair of variables that only make sense together.
fn both(first: &str, second: &str) -> Option<(String, String)> {
    match (non_empty(first), non_empty(second)) {
        (Some(a), Some(b)) => Some((a, b)),
        (Some(_), None) | (None, Some(_)) => {
            warn!(first = first, second = second, "partial_credentials_ignored");
            None
        }
        (None, None) => None,
    }
}

/// Parse a variable, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match non_empty(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_valid() {
        env::set_var("WAZA_TEST_PORT", "9090");
        assert_eq!(parse_or("WAZA_TEST_PORT", 8080u16), 9090);
        env::remove_var("WAZA_TEST_PORT");
    }

    #[test]
    fn test_parse_or_invalid_uses_default() {
        env::set_var("WAZA_TEST_TIMEOUT", "soon");
        assert_eq!(parse_or("WAZA_TEST_TIMEOUT", 500u64), 500);
        env::remove_var("WAZA_TEST_TIMEOUT");
    }

    #[test]
    fn test_non_empty_blank_is_unset() {
        env::set_var("WAZA_TEST_BLANK", "   ");
        assert_eq!(non_empty("WAZA_TEST_BLANK"), None);
        env::remove_var("WAZA_TEST_BLANK");
    }

    #[test]
    fn test_both_requires_pair() {
        env::set_var("WAZA_TEST_PAIR_A", "page");
        assert_eq!(both("WAZA_TEST_PAIR_A", "WAZA_TEST_PAIR_B"), None);

        env::set_var("WAZA_TEST_PAIR_B", "token");
        assert_eq!(
            both("WAZA_TEST_PAIR_A", "WAZA_TEST_PAIR_B"),
            Some(("page".to_string(), "token".to_string()))
        );

        env::remove_var("WAZA_TEST_PAIR_A");
        env::remove_var("WAZA_TEST_PAIR_B");
    }
}
