use serde::Deserialize;

/// Main configuration structure for Quiz-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    pub output: OutputConfig,
    #[serde(rename = "multi-part", default)]
    pub multi_part: Vec<MultiPartEntry>,
}

/// Remote question-bank API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint URL for the question listing API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Opaque identifier of the question bank to query
    #[serde(rename = "library-id")]
    pub library_id: String,

    /// Opaque session token sent as the Authorization header
    #[serde(rename = "auth-token")]
    pub auth_token: String,

    /// Value of the `mode` query parameter
    #[serde(default = "default_mode")]
    pub mode: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Inter-request pacing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Minimum delay before each request (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Maximum delay before each request (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 500,
            max_delay_ms: 2000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where transcript and raw-JSON files are written
    pub directory: String,

    /// How extracted records are grouped into files
    #[serde(default)]
    pub grouping: Grouping,
}

/// File grouping strategy for transcript and raw-JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// All records in one transcript and one raw-JSON file
    #[default]
    Combined,

    /// Multi-part and single questions in separate transcript files
    Split,

    /// One transcript and one raw-JSON file per main index
    PerQuestion,
}

/// Declares a multi-part question and its child count
#[derive(Debug, Clone, Deserialize)]
pub struct MultiPartEntry {
    /// Main index of the multi-part question
    #[serde(rename = "main-index")]
    pub main_index: u32,

    /// Number of child questions under this main index
    pub children: u32,
}

fn default_mode() -> String {
    "1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
