//! HTML/entity cleanup for question text
//!
//! The API embeds question and option text as HTML fragments. This module
//! reduces those fragments to plain text with a fixed, explicitly enumerated
//! set of substitutions. It is deliberately not a general HTML parser: only
//! the entities listed in [`ENTITY_SUBSTITUTIONS`] are decoded, everything
//! else inside `<...>` is dropped wholesale.

/// Line-break tags replaced with a newline before tag stripping
const BREAK_TAGS: &[&str] = &["<br />", "<br>"];

/// Named entities and their literal replacements
///
/// This list is the full extent of entity decoding. Unlisted entities pass
/// through unchanged.
const ENTITY_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Cleans an HTML fragment into normalized plain text
///
/// # Cleanup Steps
///
/// 1. Replace `<br />` and `<br>` with newlines
/// 2. Substitute the fixed entity table
/// 3. Strip all remaining `<...>` tag spans
/// 4. Collapse whitespace runs to a single space
/// 5. Trim leading and trailing whitespace
///
/// The function is total: any input string produces a result, and applying
/// it twice yields the same output as applying it once.
///
/// # Examples
///
/// ```
/// use quiz_harvest::clean::clean_html;
///
/// assert_eq!(clean_html("<p>What is 2+2?</p>"), "What is 2+2?");
/// assert_eq!(clean_html("a&nbsp;&amp;&nbsp;b"), "a & b");
/// ```
pub fn clean_html(input: &str) -> String {
    let mut text = input.to_string();

    // Step 1: line breaks become newlines so they survive as separators
    for tag in BREAK_TAGS {
        text = text.replace(tag, "\n");
    }

    // Step 2: fixed entity table
    for (entity, replacement) in ENTITY_SUBSTITUTIONS {
        text = text.replace(entity, replacement);
    }

    // Step 3: strip remaining tag spans
    let stripped = strip_tags(&text);

    // Steps 4 & 5: collapse whitespace and trim
    collapse_whitespace(&stripped)
}

/// Cleans an optional HTML fragment; absent input yields an empty string
pub fn clean_optional(input: Option<&str>) -> String {
    input.map(clean_html).unwrap_or_default()
}

/// Removes every `<...>` span from the input
///
/// An unterminated `<` swallows the rest of the input, matching a single
/// left-to-right removal pass.
fn strip_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Collapses whitespace runs to single spaces and trims the ends
fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
