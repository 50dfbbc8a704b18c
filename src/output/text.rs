//! Transcript output
//!
//! Appends one formatted text block per extracted record. Blocks are written
//! incrementally, so everything appended before a crash survives on disk.

use crate::config::Grouping;
use crate::extract::{option_letter, QuestionRecord};
use crate::output::{OutputError, OutputResult};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Separator written after the last record of a group
const GROUP_SEPARATOR: &str = "==================================================";

/// Separator written between sibling records of a multi-part group
const SIBLING_SEPARATOR: &str = "------------------------------";

/// Incremental writer for human-readable question transcripts
pub struct Transcript {
    directory: PathBuf,
    grouping: Grouping,

    /// Main indices whose per-question file has been started this run
    started: HashSet<u32>,
}

impl Transcript {
    /// Creates a transcript writer, creating the output directory if absent
    pub fn new(directory: &Path, grouping: Grouping) -> OutputResult<Self> {
        std::fs::create_dir_all(directory)?;

        Ok(Self {
            directory: directory.to_path_buf(),
            grouping,
            started: HashSet::new(),
        })
    }

    /// Appends one record to the transcript file chosen by the grouping
    ///
    /// # Arguments
    ///
    /// * `record` - The extracted record to append
    /// * `children_in_group` - Child count of the record's group, if multi-part
    pub fn append(
        &mut self,
        record: &QuestionRecord,
        children_in_group: Option<u32>,
    ) -> OutputResult<PathBuf> {
        let path = self.file_for(record);
        let block = format_record(record, children_in_group);

        // Per-question files start fresh each run; shared files only append
        let truncate = self.grouping == Grouping::PerQuestion
            && self.started.insert(record.question_number);

        let mut file = OpenOptions::new()
            .create(true)
            .append(!truncate)
            .truncate(truncate)
            .write(true)
            .open(&path)
            .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

        file.write_all(block.as_bytes())?;

        Ok(path)
    }

    /// Chooses the transcript file for a record under the current grouping
    fn file_for(&self, record: &QuestionRecord) -> PathBuf {
        let name = match self.grouping {
            Grouping::Combined => "questions.txt".to_string(),
            Grouping::Split => {
                if record.is_child() {
                    "multi_part_questions.txt".to_string()
                } else {
                    "single_questions.txt".to_string()
                }
            }
            Grouping::PerQuestion => format!("question_{}.txt", record.question_number),
        };

        self.directory.join(name)
    }
}

/// Formats one record as a transcript block
///
/// Layout: header with question and part numbers; a `Common Scenario`
/// paragraph for the first child of a multi-part group; the question text;
/// lettered options; the correct-answer line; and a separator whose weight
/// depends on whether more children follow in the same group.
pub fn format_record(record: &QuestionRecord, children_in_group: Option<u32>) -> String {
    let mut block = String::new();

    match record.child_number {
        Some(child) => {
            block.push_str(&format!(
                "Question Number: {} (Part {})\n",
                record.question_number, child
            ));
        }
        None => {
            block.push_str(&format!("Question Number: {}\n", record.question_number));
        }
    }

    // The shared scenario is printed once, ahead of the first part
    if record.child_number == Some(1) {
        if let Some(parent) = record.parent_content.as_deref().filter(|p| !p.is_empty()) {
            block.push_str(&format!("Common Scenario: {}\n", parent));
        }
    }

    block.push_str(&format!(
        "Question Content: {}\n\n",
        record.question_content
    ));

    block.push_str("Options:\n");
    for (i, option) in record.options.iter().enumerate() {
        block.push_str(&format!("{}. {}\n", option_letter(i), option.content));
    }

    block.push_str(&format!("\nCorrect Answer: {}\n", record.correct_answer));

    let group_finished = match (record.child_number, children_in_group) {
        (Some(child), Some(count)) => child >= count,
        _ => true,
    };

    if group_finished {
        block.push_str(GROUP_SEPARATOR);
    } else {
        block.push_str(SIBLING_SEPARATOR);
    }
    block.push_str("\n\n");

    block
}
