//! Data store module for the Supabase project backing the web application.
//!
//! This module provides:
//! - Row types for submissions and the post-publication update
//! - A REST client for reads, the single update, and public storage URLs

pub mod supabase;
pub mod types;

pub use supabase::{StoreError, SupabaseClient};
pub use types::{Dojo, RowId, Submission, SubmissionStatus, SubmissionUpdate};
