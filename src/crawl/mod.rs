// src/crawl/mod.rs
// =============================================================================
// This module handles recursive link checking of a site.
//
// Features:
// - Depth-first descent from a root URL or local file
// - Same-host restriction (offsite links are checked, never followed)
// - Visited set so every distinct root string is fetched at most once
// - Streaming report, one line per link, ending with "All done"
// - Cooperative stop
// =============================================================================

mod crawler;
mod line;

pub use crawler::{Crawler, StopFlag};
pub use line::ReportLine;
