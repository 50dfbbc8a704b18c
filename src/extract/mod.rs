//! Extraction of question records from API response bodies
//!
//! The API wraps every payload in `{ "code": "...", "body": { ... } }`. The
//! `body` carries the question text, an options array under
//! `jsonData.single.options`, and — for multi-part questions — a nested
//! `child` object of the same shape. This module flattens that into
//! [`QuestionRecord`] values with cleaned text and positional answer letters.

use crate::clean::{clean_html, clean_optional};
use serde_json::Value;

/// One answer option of a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    /// Cleaned option text
    pub content: String,

    /// Whether the server flags this option as correct
    pub is_correct: bool,
}

/// A flattened, cleaned question extracted from one API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Main index the question was requested under
    ///
    /// This is always the caller's index; the server's own `s` numbering is
    /// not trusted.
    pub question_number: u32,

    /// Child index within a multi-part group, if any
    pub child_number: Option<u32>,

    /// Shared scenario text of the parent question, captured for child fetches
    pub parent_content: Option<String>,

    /// Cleaned question text
    pub question_content: String,

    /// Answer options in server order
    pub options: Vec<AnswerOption>,

    /// Letters of the correct options, by list position (A = index 0)
    pub correct_answer: String,
}

impl QuestionRecord {
    /// Returns true if this record is part of a multi-part group
    pub fn is_child(&self) -> bool {
        self.child_number.is_some()
    }
}

/// Returns the answer letter for an option position (A = 0, B = 1, ...)
pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Extracts a question record from a parsed response body
///
/// Returns `None` when the API reports failure (top-level `code` is not the
/// string `"200"`). Missing fields inside an accepted body degrade to
/// placeholders rather than failing: question text falls back to `"Unknown"`
/// and a missing options array yields an empty list.
///
/// For child fetches (`child_index` is `Some`), the record is read from the
/// body's `child` sub-object, falling back to the body itself when the
/// server omits it, and the body's own top-level question text is captured
/// as the shared-scenario `parent_content`.
///
/// # Arguments
///
/// * `body` - The parsed response body
/// * `main_index` - The main index used for the request
/// * `child_index` - The child index for multi-part fetches
pub fn extract_record(
    body: &Value,
    main_index: u32,
    child_index: Option<u32>,
) -> Option<QuestionRecord> {
    if body.get("code").and_then(Value::as_str) != Some("200") {
        return None;
    }

    let null = Value::Null;
    let response_body = body.get("body").unwrap_or(&null);

    let (question_source, parent_content) = match child_index {
        Some(_) => {
            let child = response_body.get("child").unwrap_or(response_body);
            let parent = clean_optional(
                response_body
                    .get("questionContent")
                    .and_then(Value::as_str),
            );
            (child, Some(parent))
        }
        None => (response_body, None),
    };

    let question_content = question_source
        .get("questionContent")
        .and_then(Value::as_str)
        .map(clean_html)
        .unwrap_or_else(|| "Unknown".to_string());

    let options = extract_options(question_source);
    let correct_answer = derive_correct_answer(&options);

    Some(QuestionRecord {
        question_number: main_index,
        child_number: child_index,
        parent_content,
        question_content,
        options,
        correct_answer,
    })
}

/// Reads the options array from `jsonData.single.options`
fn extract_options(question_source: &Value) -> Vec<AnswerOption> {
    let options = question_source
        .get("jsonData")
        .and_then(|v| v.get("single"))
        .and_then(|v| v.get("options"))
        .and_then(Value::as_array);

    let Some(options) = options else {
        return Vec::new();
    };

    options
        .iter()
        .map(|option| AnswerOption {
            content: clean_optional(option.get("optionsContent").and_then(Value::as_str)),
            is_correct: option
                .get("rightAnswers")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
        .collect()
}

/// Concatenates the letters of the correct options, in list order
///
/// Correctness is positional: the letter comes from the option's place in
/// the list, never from a server-supplied key.
fn derive_correct_answer(options: &[AnswerOption]) -> String {
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.is_correct)
        .map(|(i, _)| option_letter(i))
        .collect()
}
