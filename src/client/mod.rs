//! HTTP client module for question fetching
//!
//! This module contains the outbound-request logic:
//! - HTTP client construction with the configured user agent and timeouts
//! - Question URL building (index, child index, timestamp parameters)
//! - Fetch outcome classification

mod fetcher;

pub use fetcher::{build_http_client, build_question_url, fetch_question, FetchOutcome};
