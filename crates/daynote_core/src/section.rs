//! Line-oriented section editing for day files.
//!
//! # Responsibility
//! - Splice entry lines into a named heading's section.
//! - Read the body lines of a named section.
//!
//! # Invariants
//! - Headings are matched on the trimmed line, exactly.
//! - Returned documents end with exactly one newline and no other trailing
//!   whitespace.

use crate::model::entry::Entry;

const HEADING_PREFIX: &str = "## ";

/// Inserts `entry_line` under `heading`.
///
/// When the heading exists the line goes after any blank lines and any
/// earlier entries that directly follow it, so entries read in insertion
/// order and stay above the remaining section content. Without the heading
/// the line is appended after a blank separator.
pub fn insert_under_heading(text: &str, heading: &str, entry_line: &str) -> String {
    let mut lines = text.lines().collect::<Vec<_>>();

    let Some(heading_at) = lines.iter().position(|line| line.trim() == heading) else {
        return finish(format!("{}\n\n{}", text.trim_end(), entry_line));
    };

    let mut insert_at = heading_at + 1;
    while insert_at < lines.len() && lines[insert_at].trim().is_empty() {
        insert_at += 1;
    }
    while insert_at < lines.len() && Entry::is_entry_line(lines[insert_at]) {
        insert_at += 1;
    }
    lines.insert(insert_at, entry_line);

    finish(lines.join("\n"))
}

/// Returns trimmed, non-blank lines of the section under `heading`.
///
/// The section ends at the next `## ` heading. `max_lines` caps the result
/// when set to a non-zero value. Returns `None` when the heading is absent.
pub fn section_lines(text: &str, heading: &str, max_lines: Option<usize>) -> Option<Vec<String>> {
    let limit = max_lines.filter(|max| *max > 0);
    let mut found = false;
    let mut collected = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(HEADING_PREFIX) {
            if found {
                break;
            }
            found = trimmed == heading;
            continue;
        }
        if !found || trimmed.is_empty() {
            continue;
        }
        collected.push(trimmed.to_string());
        if limit.is_some_and(|max| collected.len() >= max) {
            break;
        }
    }

    found.then_some(collected)
}

fn finish(body: String) -> String {
    let mut out = body.trim_end().to_string();
    out.push('\n');
    out
}
