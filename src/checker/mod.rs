// src/checker/mod.rs
// =============================================================================
// This module contains the per-link logic: finding references in markup and
// deciding whether each one is alive.
//
// Submodules:
// - tags: Heuristic tag reader (the default extractor)
// - html: scraper-based extractor, opt-in
// - http: Link classifier (http, https, ftp, file, anything else)
// =============================================================================

mod html;
mod http;
mod tags;

pub use html::extract_elements;
pub use http::{Classifier, LinkStatus};
pub use tags::{Element, TagKind, TagReader};
