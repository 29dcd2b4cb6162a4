//! Web server module exposing the two functions.
//!
//! - `POST /send-referral-email`: render and send a referral email
//! - `POST /upload-to-social`: publish an approved submission
//! - `GET /health`: liveness probe

pub mod cors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use cors::cors_layer;
pub use handlers::{
    health, send_referral_email, upload_to_social, AppState, HealthResponse, PublishRequest,
    PublishResponse, ReferralResponse,
};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/send-referral-email", post(send_referral_email))
        .route("/upload-to-social", post(upload_to_social))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
