//! Sweep coordinator - main driver logic
//!
//! This module contains the main sweep loop that coordinates the pipeline:
//! - Expanding main indices into child fetches via the part table
//! - Pacing, fetching, extracting, and writing each item
//! - Absorbing per-item failures so the sweep always completes
//! - Flushing the raw-response archive at the end of the run

use crate::client::{build_http_client, fetch_question, FetchOutcome};
use crate::config::Config;
use crate::extract::extract_record;
use crate::output::{RawStore, Transcript};
use crate::sweep::pacer::Pacer;
use crate::sweep::parts::PartTable;
use crate::HarvestError;
use reqwest::Client;
use std::path::{Path, PathBuf};

/// Tallies of a completed sweep
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Items (questions or question parts) attempted
    pub items_attempted: u64,

    /// Items extracted and written to the transcript
    pub items_saved: u64,

    /// Items skipped after a fetch or extraction failure
    pub items_failed: u64,

    /// Raw-JSON files written at the end of the run
    pub raw_files: Vec<PathBuf>,
}

/// Main sweep coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    parts: PartTable,
    pacer: Pacer,
    transcript: Transcript,
    raw_store: RawStore,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated sweep configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Failed to initialize the client or output directory
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.api)?;
        let parts = PartTable::from_entries(&config.multi_part);
        let pacer = Pacer::new(&config.pacing);
        let transcript = Transcript::new(
            Path::new(&config.output.directory),
            config.output.grouping,
        )?;

        Ok(Self {
            config,
            client,
            parts,
            pacer,
            transcript,
            raw_store: RawStore::new(),
        })
    }

    /// Runs the sweep over an inclusive index range
    ///
    /// Every index in `[start, end]` is attempted exactly once; multi-part
    /// indices expand into one fetch per child. Failures are logged and
    /// skipped. When the range is exhausted the raw-response archive is
    /// written to disk.
    pub async fn run(&mut self, start: u32, end: u32) -> Result<SweepReport, HarvestError> {
        let mut report = SweepReport::default();

        for main_index in start..=end {
            match self.parts.child_count(main_index) {
                None => {
                    tracing::info!("Fetching question {}...", main_index);
                    self.sweep_item(main_index, None, None, &mut report).await;
                }
                Some(children) => {
                    tracing::info!(
                        "Fetching question {} ({} parts)...",
                        main_index,
                        children
                    );
                    for child_index in 1..=children {
                        self.sweep_item(main_index, Some(child_index), Some(children), &mut report)
                            .await;
                    }
                }
            }
        }

        report.raw_files = self.raw_store.write_to(
            Path::new(&self.config.output.directory),
            self.config.output.grouping,
        )?;

        tracing::info!(
            "Sweep complete: {} saved, {} failed, {} raw file(s) written",
            report.items_saved,
            report.items_failed,
            report.raw_files.len()
        );

        Ok(report)
    }

    /// Fetches, extracts, and writes a single item
    ///
    /// Failures at any stage are absorbed: they are logged and counted, and
    /// the sweep moves on to the next item.
    async fn sweep_item(
        &mut self,
        main_index: u32,
        child_index: Option<u32>,
        children_in_group: Option<u32>,
        report: &mut SweepReport,
    ) {
        report.items_attempted += 1;

        // Pace every network call, including the first
        self.pacer.pause().await;

        let outcome = fetch_question(&self.client, &self.config.api, main_index, child_index).await;

        let body = match outcome {
            FetchOutcome::Success { body } => body,
            FetchOutcome::HttpError { status_code } => {
                tracing::warn!(
                    "Question {} unavailable: HTTP status {}",
                    item_label(main_index, child_index),
                    status_code
                );
                report.items_failed += 1;
                return;
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!(
                    "Question {} fetch failed: {}",
                    item_label(main_index, child_index),
                    error
                );
                report.items_failed += 1;
                return;
            }
        };

        let record = extract_record(&body, main_index, child_index);

        // The raw body is archived for every HTTP success, even when the
        // API payload itself reports failure
        match child_index {
            Some(child) => self.raw_store.record_child(main_index, child, body),
            None => self.raw_store.record_single(main_index, body),
        }

        let Some(record) = record else {
            tracing::warn!(
                "Question {} rejected by API (code != \"200\")",
                item_label(main_index, child_index)
            );
            report.items_failed += 1;
            return;
        };

        match self.transcript.append(&record, children_in_group) {
            Ok(path) => {
                tracing::info!(
                    "Question {} saved to {}",
                    item_label(main_index, child_index),
                    path.display()
                );
                report.items_saved += 1;
            }
            Err(e) => {
                tracing::error!(
                    "Question {} write failed: {}",
                    item_label(main_index, child_index),
                    e
                );
                report.items_failed += 1;
            }
        }
    }
}

/// Formats an item for progress messages, e.g. `196 (part 3)`
fn item_label(main_index: u32, child_index: Option<u32>) -> String {
    match child_index {
        Some(child) => format!("{} (part {})", main_index, child),
        None => main_index.to_string(),
    }
}
