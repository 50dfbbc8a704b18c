//! Multi-part question lookup
//!
//! Some main indices identify multi-part ("shared scenario") questions whose
//! parts are fetched one child index at a time. The table of known child
//! counts comes from configuration and never changes during a run.

use crate::config::MultiPartEntry;
use std::collections::HashMap;

/// Lookup from main index to known child-question count
#[derive(Debug, Clone, Default)]
pub struct PartTable {
    counts: HashMap<u32, u32>,
}

impl PartTable {
    /// Builds the table from configuration entries
    pub fn from_entries(entries: &[MultiPartEntry]) -> Self {
        Self {
            counts: entries
                .iter()
                .map(|entry| (entry.main_index, entry.children))
                .collect(),
        }
    }

    /// Returns the child count for a main index, or `None` for single questions
    pub fn child_count(&self, main_index: u32) -> Option<u32> {
        self.counts.get(&main_index).copied()
    }

    /// Returns true if the main index identifies a multi-part question
    pub fn is_multi_part(&self, main_index: u32) -> bool {
        self.counts.contains_key(&main_index)
    }

    /// Returns the number of known multi-part questions
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no multi-part questions are known
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
