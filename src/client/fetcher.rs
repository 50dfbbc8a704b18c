//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the sweep, including:
//! - Building HTTP clients with the configured user agent
//! - Constructing question URLs with index and timestamp parameters
//! - GET requests for question payloads
//! - Outcome classification (success, HTTP error, network error)

use crate::config::ApiConfig;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Result of a question fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with a parseable JSON body
    Success {
        /// The raw response body
        body: Value,
    },

    /// Non-200 HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network-level failure (timeout, connection refused, bad body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Returns the response body if the fetch succeeded
    pub fn into_body(self) -> Option<Value> {
        match self {
            FetchOutcome::Success { body } => Some(body),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the question URL for one fetch
///
/// Query parameters, in order: `mode`, `libraryId`, `mainIndex`,
/// `childIndex` (only for child fetches), `practiceId` (always empty),
/// `pTime` (epoch milliseconds).
///
/// # Arguments
///
/// * `config` - The API configuration
/// * `main_index` - The main question index
/// * `child_index` - The child index for multi-part fetches
/// * `timestamp_ms` - Current wall-clock time in epoch milliseconds
///
/// # Returns
///
/// * `Ok(Url)` - The fully parameterized question URL
/// * `Err(url::ParseError)` - The configured base URL is malformed
pub fn build_question_url(
    config: &ApiConfig,
    main_index: u32,
    child_index: Option<u32>,
    timestamp_ms: i64,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.base_url)?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("mode", &config.mode);
        query.append_pair("libraryId", &config.library_id);
        query.append_pair("mainIndex", &main_index.to_string());
        if let Some(child) = child_index {
            query.append_pair("childIndex", &child.to_string());
        }
        query.append_pair("practiceId", "");
        query.append_pair("pTime", &timestamp_ms.to_string());
    }

    Ok(url)
}

/// Fetches one question payload from the API
///
/// Sends a single GET with the configured `Authorization` header. There is
/// no retry at this layer; every failure mode is reported as an outcome and
/// left to the caller.
///
/// # Outcome Classification
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 200, JSON body | Success |
/// | HTTP 200, unparseable body | NetworkError |
/// | Any other status | HttpError |
/// | Timeout / connection / transport error | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - The API configuration
/// * `main_index` - The main question index
/// * `child_index` - The child index for multi-part fetches
pub async fn fetch_question(
    client: &Client,
    config: &ApiConfig,
    main_index: u32,
    child_index: Option<u32>,
) -> FetchOutcome {
    let timestamp_ms = chrono::Utc::now().timestamp_millis();

    let url = match build_question_url(config, main_index, child_index, timestamp_ms) {
        Ok(url) => url,
        Err(e) => {
            return FetchOutcome::NetworkError {
                error: format!("Invalid question URL: {}", e),
            }
        }
    };

    let response = match client
        .get(url)
        .header("Authorization", config.auth_token.as_str())
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            // Classify error
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.json::<Value>().await {
        Ok(body) => FetchOutcome::Success { body },
        Err(e) => FetchOutcome::NetworkError {
            error: format!("Failed to decode JSON body: {}", e),
        },
    }
}
