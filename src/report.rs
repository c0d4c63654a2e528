// src/report.rs
// =============================================================================
// Turning a finished report into text, and saving that text.
//
// The crawler already streams ReportLine values; this module is the thin
// presentation layer on top: the plain-text log (what gets saved with
// --save) and the end-of-run summary.
// =============================================================================

use crate::crawl::ReportLine;
use anyhow::{Context, Result};
use std::path::Path;

/// File name used by --save when no name is given
pub const DEFAULT_LOG: &str = "linkchecker.log";

// Renders the whole report as it appears on screen
pub fn render(root: &str, lines: &[ReportLine]) -> String {
    let mut text = format!("Checking {}...\n", root);
    for line in lines {
        text.push_str(&line.to_string());
        text.push('\n');
    }
    text
}

// Writes the report text verbatim
pub async fn save_report(text: &str, path: &Path) -> Result<()> {
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to save report to {}", path.display()))
}

// Prints a short summary after the report
pub fn print_summary(lines: &[ReportLine]) {
    let links = lines
        .iter()
        .filter(|l| matches!(l, ReportLine::Link { .. }))
        .count();
    let dead = lines.iter().filter(|l| l.is_dead()).count();

    println!();
    println!("📊 Summary:");
    println!("   🔗 Links: {}", links);
    println!("   ❌ Dead: {}", dead);
}
