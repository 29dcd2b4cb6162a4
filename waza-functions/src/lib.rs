//! Triple Waza Challenge server functions.
//!
//! This library backs the `waza-functions` binary:
//! - Referral emails sent through a transactional email provider
//! - Publication of approved dojo submissions to Facebook, Instagram and YouTube
//!
//! ## Architecture
//!
//! ```text
//! Web app → /send-referral-email → email → Resend
//! Web app → /upload-to-social → publish → Supabase + Graph API + YouTube
//! ```

pub mod config;
pub mod email;
pub mod publish;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use email::{send_referral, ReferralError, ReferralRequest};
pub use publish::{publish_submission, Platform, PublishError, PublishOutcome};
pub use store::{Submission, SupabaseClient};
pub use web::{router, AppState};
