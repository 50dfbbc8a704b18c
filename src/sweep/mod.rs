//! Sweep module for driving the fetch pipeline
//!
//! This module contains the driver logic, including:
//! - The multi-part child-count lookup
//! - Uniform request pacing
//! - The sweep loop coordinating fetch, extraction, and output

mod coordinator;
mod pacer;
mod parts;

pub use coordinator::{Coordinator, SweepReport};
pub use pacer::Pacer;
pub use parts::PartTable;

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete sweep over an inclusive question-index range
///
/// This is the main entry point for a sweep. It will:
/// 1. Build the HTTP client and output writers
/// 2. Expand each index via the multi-part table
/// 3. Fetch, extract, and write each item with pacing in between
/// 4. Serialize the raw-response archive at the end
///
/// # Arguments
///
/// * `config` - The sweep configuration
/// * `start` - First main index (inclusive)
/// * `end` - Last main index (inclusive)
///
/// # Returns
///
/// * `Ok(SweepReport)` - Sweep completed; per-item failures are counted, not fatal
/// * `Err(HarvestError)` - Failed to initialize or to write the raw archive
pub async fn sweep(config: Config, start: u32, end: u32) -> Result<SweepReport, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run(start, end).await
}
