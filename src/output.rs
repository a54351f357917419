//! CLI output formatting.
//!
//! Output is information-centric: every entity leads with its semantic
//! identity (title, shape), with paths shown as secondary context on
//! indented lines. Each command has a `format_*` function returning lines
//! (pure, testable) and a `print_*` wrapper that writes to stdout.
//!
//! ## Resolve
//!
//! ```text
//! Resolving General
//!     1 modules/egitim1/airplane-general/general.json  ← ok
//!     shape: lesson (inline)
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Airplane General (subtopics) → egitim1/airplane-general/index.html
//! 002 General (lesson (inline)) → egitim1/airplane-general/general/index.html
//!
//! Unresolved
//! 001 Missing
//!     tried modules/egitim1/airplane-general/missing.json
//!     tried modules/egitim1/airplane-general/missing/manifest.json
//!
//! Generated 8 pages, 1 unresolved, 9 assets precached
//! ```

use crate::captions::CleanReport;
use crate::generate::BuildReport;
use crate::resolve::{Attempt, Resolution};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

// ============================================================================
// Resolve
// ============================================================================

/// Format a resolution trace: every attempt in try order, the winner marked,
/// then the classified shape.
pub fn format_resolution(title: &str, resolution: &Resolution, shape: &str) -> Vec<String> {
    let mut lines = vec![format!("Resolving {title}")];
    lines.extend(format_attempts(&resolution.tried));
    lines.push(format!("    shape: {shape}"));
    lines
}

/// Format an exhausted resolution: every attempt with its error.
pub fn format_resolution_failure(title: &str, tried: &[Attempt]) -> Vec<String> {
    let mut lines = vec![format!("Resolving {title}")];
    lines.extend(format_attempts(tried));
    lines.push(format!(
        "    resolution exhausted: all {} candidates failed",
        tried.len()
    ));
    lines
}

fn format_attempts(tried: &[Attempt]) -> Vec<String> {
    tried
        .iter()
        .enumerate()
        .map(|(i, attempt)| match &attempt.error {
            None => format!("    {} {}  \u{2190} ok", i + 1, attempt.path),
            Some(err) => format!("    {} {}  ({err})", i + 1, attempt.path),
        })
        .collect()
}

pub fn print_resolution(title: &str, resolution: &Resolution, shape: &str) {
    for line in format_resolution(title, resolution, shape) {
        println!("{line}");
    }
}

pub fn print_resolution_failure(title: &str, tried: &[Attempt]) {
    for line in format_resolution_failure(title, tried) {
        println!("{line}");
    }
}

// ============================================================================
// Build / check
// ============================================================================

/// Format a build or check report: pages, unresolved nodes, totals.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} ({}) \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.shape,
            page.path
        ));
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Unresolved".to_string());
        for (i, failure) in report.failures.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), failure.title));
            for path in &failure.tried {
                lines.push(format!("    tried {path}"));
            }
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated {} pages, {} unresolved",
        report.pages.len(),
        report.failures.len()
    );
    if !report.precache.is_empty() {
        summary.push_str(&format!(", {} assets precached", report.precache.len()));
    }
    lines.push(summary);

    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// Captions
// ============================================================================

/// Format a caption-manifest cleanup report.
pub fn format_clean_report(report: &CleanReport) -> Vec<String> {
    vec![format!(
        "Cleaned {} entries: {} captions changed, {} titles filled",
        report.entries, report.captions_changed, report.titles_filled
    )]
}

pub fn print_clean_report(report: &CleanReport) {
    for line in format_clean_report(report) {
        println!("{line}");
    }
}
