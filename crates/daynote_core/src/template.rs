//! Day-file template resolution.
//!
//! # Responsibility
//! - Load the template region from an external markdown document.
//! - Fall back to the built-in template whenever the document is unusable.
//! - Render a template for a concrete date.
//!
//! # Invariants
//! - Resolution never fails; every problem degrades to `DEFAULT_TEMPLATE`.
//! - `DEFAULT_TEMPLATE` always carries a `## Context` heading.

use log::debug;
use std::path::Path;

/// Placeholder replaced by the ISO date when a day file is created.
pub const DATE_PLACEHOLDER: &str = "{{date}}";
/// Line opening the template region inside an external document.
pub const TEMPLATE_START_MARKER: &str = "<!-- TEMPLATE START -->";
/// Line closing the template region inside an external document.
pub const TEMPLATE_END_MARKER: &str = "<!-- TEMPLATE END -->";
/// Heading under which timestamped entries accumulate.
pub const CONTEXT_HEADING: &str = "## Context";
/// Heading read by the daily summary view.
pub const SUMMARY_HEADING: &str = "## Summary";

/// Built-in template used when no external template region is available.
pub const DEFAULT_TEMPLATE: &str = "# {{date}}\n\n## Summary\n- \n\n## Decisions\n- \n\n## TODOs\n- \n\n## Context\n- \n\n## Prompts/Rules\n- \n";

/// Returns the template body to seed new day files with.
///
/// `source` is the external template document. Missing, unreadable or
/// marker-less documents resolve to [`DEFAULT_TEMPLATE`].
pub fn resolve_template(source: Option<&Path>) -> String {
    let Some(path) = source else {
        debug!("event=template_resolve module=template status=ok source=default reason=no_path");
        return DEFAULT_TEMPLATE.to_string();
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(
                "event=template_resolve module=template status=ok source=default reason=unreadable kind={:?}",
                err.kind()
            );
            return DEFAULT_TEMPLATE.to_string();
        }
    };

    match extract_template_region(&text) {
        Some(region) => {
            debug!(
                "event=template_resolve module=template status=ok source=file lines={}",
                region.lines().count()
            );
            region
        }
        None => {
            debug!("event=template_resolve module=template status=ok source=default reason=no_region");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

/// Extracts the lines strictly between the start and end marker lines.
///
/// Markers are matched on trimmed lines and the end marker is only searched
/// after the start marker. Returns `None` when either marker is missing or
/// the region holds nothing but whitespace.
pub fn extract_template_region(text: &str) -> Option<String> {
    let mut lines = text.lines();
    lines.by_ref().find(|line| line.trim() == TEMPLATE_START_MARKER)?;

    let mut region: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim() == TEMPLATE_END_MARKER {
            if region.iter().all(|line| line.trim().is_empty()) {
                return None;
            }
            return Some(region.join("\n"));
        }
        region.push(line);
    }
    None
}

/// Renders a template for `date`.
///
/// Every placeholder is substituted, trailing whitespace is trimmed and
/// exactly one trailing newline is appended.
pub fn render_template(template: &str, date: &str) -> String {
    let mut rendered = template.replace(DATE_PLACEHOLDER, date).trim_end().to_string();
    rendered.push('\n');
    rendered
}
