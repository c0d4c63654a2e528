// src/config.rs
// =============================================================================
// Settings for one Crawler.
//
// The defaults reproduce the classic link checker: no timeout beyond what
// the transport does, redirects reported rather than followed, and the
// heuristic tag reader. The CLI overrides individual fields.
// =============================================================================

use crate::checker::TagKind;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

// Which extractor turns markup into elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    /// Substring scanning, double-quoted attributes only
    #[default]
    Heuristic,
    /// Full HTML parse via scraper
    Dom,
}

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Per-request timeout; None leaves it to the transport
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Tags whose references get checked
    pub wanted: Vec<TagKind>,
    pub extractor: ExtractorKind,
    /// How many report lines may queue up before the traversal waits
    pub report_buffer: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("link-checker/", env!("CARGO_PKG_VERSION")).to_string(),
            wanted: TagKind::ALL.to_vec(),
            extractor: ExtractorKind::Heuristic,
            report_buffer: 64,
        }
    }
}

impl CrawlerConfig {
    // Builds the HTTP client shared by page fetches and link checks
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}
