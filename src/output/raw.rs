//! Raw-response archival
//!
//! Response bodies accumulate in memory for the whole sweep, keyed by
//! question index, and are serialized to disk once at the end of the run.
//! Multi-part responses nest under their parent key.

use crate::config::Grouping;
use crate::output::{OutputError, OutputResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory accumulator for raw API responses
#[derive(Debug, Default)]
pub struct RawStore {
    entries: BTreeMap<String, Value>,
}

impl RawStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the raw response of a single (non-multi-part) question
    pub fn record_single(&mut self, main_index: u32, body: Value) {
        self.entries.insert(entry_key(main_index), body);
    }

    /// Records the raw response of one child question
    ///
    /// Child responses nest as `child_<n>` keys under the parent's entry.
    pub fn record_child(&mut self, main_index: u32, child_index: u32, body: Value) {
        let entry = self
            .entries
            .entry(entry_key(main_index))
            .or_insert_with(|| Value::Object(Map::new()));

        if let Value::Object(children) = entry {
            children.insert(format!("child_{}", child_index), body);
        }
    }

    /// Returns the number of question entries recorded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the full accumulation as a single JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Serializes the accumulated responses to disk
    ///
    /// For `combined` and `split` grouping, everything lands in one
    /// `all_questions_raw.json`. For `per-question` grouping, each main index
    /// gets its own `question_<n>_raw.json`. Returns the written paths.
    pub fn write_to(&self, directory: &Path, grouping: Grouping) -> OutputResult<Vec<PathBuf>> {
        std::fs::create_dir_all(directory)?;

        let mut written = Vec::new();

        match grouping {
            Grouping::Combined | Grouping::Split => {
                let path = directory.join("all_questions_raw.json");
                write_pretty_json(&path, &self.to_json())?;
                written.push(path);
            }
            Grouping::PerQuestion => {
                for (key, value) in &self.entries {
                    let path = directory.join(format!("{}_raw.json", key));
                    write_pretty_json(&path, value)?;
                    written.push(path);
                }
            }
        }

        Ok(written)
    }
}

/// Builds the accumulator key for a main index
fn entry_key(main_index: u32) -> String {
    format!("question_{}", main_index)
}

/// Writes a JSON value to a file with pretty formatting
fn write_pretty_json(path: &Path, value: &Value) -> OutputResult<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| OutputError::Format(format!("{}: {}", path.display(), e)))?;

    std::fs::write(path, content)
        .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

    Ok(())
}
