//! Output handling: transcripts and raw-response archives
//!
//! Two writers share the output directory: the transcript appends a
//! formatted text block per record as the sweep progresses, while the raw
//! store accumulates response bodies in memory and serializes them once at
//! the end of the run.

mod raw;
mod text;

pub use raw::RawStore;
pub use text::{format_record, Transcript};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
