// src/crawl/crawler.rs
// =============================================================================
// This module walks a site depth-first and reports every link it meets.
//
// How it works:
// 1. Resolve the root: a URL if it parses as one, otherwise a local file
// 2. Fetch it and pull out the wanted tags (a, img, frame, applet)
// 3. For each reference, in document order:
//    - mailto:, .. and # references are reported and skipped
//    - everything else is resolved against the page and classified
//    - links to another host are reported as OFFSITE and not followed
//    - same-host links ending in .htm, .html or / are recursed into
// 4. Stop when everything reachable has been visited once
//
// The visited set keys on the raw root string, so two spellings of the same
// page (trailing slash, case, default port) are fetched twice. There is no
// depth limit; the visited set alone ends cycles.
//
// Stopping is cooperative: the StopFlag is checked at the top of every
// descent and before each element, and a dropped report receiver counts as
// a stop.
//
// Rust concepts:
// - Recursion in async code: the future must be boxed (BoxFuture)
// - Channels: report lines flow to the caller through tokio's mpsc
// - Arc<AtomicBool>: a flag shared between the caller and the traversal
// =============================================================================

use super::line::ReportLine;
use crate::checker::{extract_elements, Classifier, Element, LinkStatus, TagReader};
use crate::config::{CrawlerConfig, ExtractorKind};
use crate::error::{CheckError, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};
use url::Url;

// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// State that lives for exactly one top-level run
pub struct Traversal {
    visited: HashSet<String>,
    tx: mpsc::Sender<ReportLine>,
}

impl Traversal {
    pub fn new(tx: mpsc::Sender<ReportLine>) -> Self {
        Self {
            visited: HashSet::new(),
            tx,
        }
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    async fn report(&self, line: ReportLine) {
        // A closed channel is picked up by the next cancellation check
        let _ = self.tx.send(line).await;
    }
}

#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    classifier: Classifier,
    config: Arc<CrawlerConfig>,
    stop: StopFlag,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self {
            classifier: Classifier::new(client.clone()),
            client,
            config: Arc::new(config),
            stop: StopFlag::default(),
        })
    }

    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    // Asks a running traversal to unwind at its next checkpoint
    pub fn stop(&self) {
        self.stop.stop();
    }

    // Starts a traversal on its own task and streams its report
    //
    // The stream ends with ReportLine::Done. Don't start a second run on
    // the same Crawler while one is still going: they share the stop flag.
    pub fn run(&self, root: impl Into<String>) -> ReceiverStream<ReportLine> {
        self.stop.reset();

        let (tx, rx) = mpsc::channel(self.config.report_buffer.max(1));
        let crawler = self.clone();
        let root = root.into();

        tokio::spawn(async move {
            info!(%root, "starting link check");
            let mut traversal = Traversal::new(tx.clone());
            crawler.check_out(&root, &mut traversal, 0).await;
            info!(
                visited = traversal.visited().len(),
                stopped = crawler.stop.is_stopped(),
                "link check finished"
            );
            let _ = tx.send(ReportLine::Done).await;
        });

        ReceiverStream::new(rx)
    }

    fn cancelled(&self, traversal: &Traversal) -> bool {
        self.stop.is_stopped() || traversal.tx.is_closed()
    }

    // Checks every link on the page named by `root`, recursing into
    // same-host HTML pages one level deeper
    pub fn check_out<'a>(
        &'a self,
        root: &'a str,
        traversal: &'a mut Traversal,
        depth: usize,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if self.cancelled(traversal) || root.is_empty() || traversal.visited.contains(root) {
                return;
            }
            // Marked before fetching so a slow or failing page is never re-entered
            traversal.visited.insert(root.to_string());
            debug!(root, depth, "checking out");

            let base = match resolve_root(root).await {
                Ok(base) => base,
                Err(e) => {
                    warn!("{}", e);
                    let line = ReportLine::CantOpen {
                        depth,
                        root: root.to_string(),
                    };
                    traversal.report(line).await;
                    return;
                }
            };
            let dir = directory_of(root);

            let markup = match self.fetch(&base).await {
                Ok(markup) => markup,
                Err(e) => {
                    warn!("{}", e);
                    let line = match e {
                        CheckError::UnresolvableRoot(_) => ReportLine::CantOpen {
                            depth,
                            root: root.to_string(),
                        },
                        CheckError::ReadFailure { reason, .. }
                        | CheckError::ConnectionFailure(reason) => ReportLine::ReadFailed {
                            depth,
                            root: root.to_string(),
                            reason,
                        },
                        other => ReportLine::ReadFailed {
                            depth,
                            root: root.to_string(),
                            reason: other.to_string(),
                        },
                    };
                    traversal.report(line).await;
                    return;
                }
            };

            for element in self.elements(&markup) {
                if self.cancelled(traversal) {
                    return;
                }

                let reference = match element {
                    Ok(element) => {
                        debug!(kind = ?element.kind, reference = %element.reference, "found");
                        element.reference
                    }
                    Err(e) => {
                        let line = ReportLine::Malformed {
                            depth,
                            error: e.to_string(),
                        };
                        traversal.report(line).await;
                        continue;
                    }
                };

                if is_unchecked(&reference) {
                    let line = ReportLine::Link {
                        depth,
                        reference,
                        status: LinkStatus::skipped("not checking"),
                    };
                    traversal.report(line).await;
                    continue;
                }

                let target = match base.join(&reference) {
                    Ok(target) => target,
                    Err(e) => {
                        let line = ReportLine::Malformed {
                            depth,
                            error: format!("{}: {}", reference, e),
                        };
                        traversal.report(line).await;
                        continue;
                    }
                };

                let status = self.classifier.classify(&target).await;

                if target.host_str() != base.host_str() {
                    let line = ReportLine::Link {
                        depth,
                        reference,
                        status: LinkStatus::Offsite {
                            checked: Box::new(status),
                        },
                    };
                    traversal.report(line).await;
                    continue;
                }

                let recurse = is_html_like(&reference);
                let next = if reference.contains(':') {
                    reference.clone()
                } else {
                    format!("{}/{}", dir, reference)
                };

                let line = ReportLine::Link {
                    depth,
                    reference,
                    status,
                };
                traversal.report(line).await;

                if recurse {
                    self.check_out(&next, traversal, depth + 1).await;
                }
            }
        })
    }

    // Fetches the page body. Only http(s) and file roots can be read.
    async fn fetch(&self, base: &Url) -> Result<String> {
        let read_failure = |reason: String| CheckError::ReadFailure {
            root: base.to_string(),
            reason,
        };

        match base.scheme() {
            "http" | "https" => {
                let response = self
                    .client
                    .get(base.clone())
                    .send()
                    .await
                    .map_err(|e| CheckError::ConnectionFailure(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(read_failure(format!("HTTP {}", response.status())));
                }

                response.text().await.map_err(|e| read_failure(e.to_string()))
            }
            "file" => {
                let path = base
                    .to_file_path()
                    .map_err(|()| CheckError::UnresolvableRoot(base.to_string()))?;

                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        CheckError::UnresolvableRoot(path.display().to_string())
                    } else {
                        read_failure(e.to_string())
                    }
                })
            }
            other => Err(read_failure(format!("can't read {} links", other))),
        }
    }

    fn elements<'m>(
        &'m self,
        markup: &'m str,
    ) -> Box<dyn Iterator<Item = Result<Element>> + Send + 'm> {
        match self.config.extractor {
            ExtractorKind::Heuristic => Box::new(TagReader::new(markup, &self.config.wanted)),
            ExtractorKind::Dom => Box::new(
                extract_elements(markup, &self.config.wanted)
                    .into_iter()
                    .map(Ok::<Element, CheckError>),
            ),
        }
    }
}

// Turns the root string into an absolute URL: as-is if it parses,
// otherwise as the path of an existing local file
async fn resolve_root(root: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(root) {
        return Ok(url);
    }

    let unresolvable = || CheckError::UnresolvableRoot(root.to_string());
    let path = tokio::fs::canonicalize(root)
        .await
        .map_err(|_| unresolvable())?;
    Url::from_file_path(&path).map_err(|()| unresolvable())
}

// The "directory" that relative references are appended to when recursing
fn directory_of(root: &str) -> &str {
    if root.ends_with('/') || root.ends_with('\\') {
        return root;
    }
    match root.rfind('/') {
        Some(slash) => &root[..slash],
        None => ".",
    }
}

// References that are reported but never checked or followed
fn is_unchecked(reference: &str) -> bool {
    reference.starts_with("mailto:") || reference.starts_with("..") || reference.starts_with('#')
}

// Pages (or directories) worth descending into.
// PHP, CGI and friends usually need form input, so they are only checked.
fn is_html_like(reference: &str) -> bool {
    reference.ends_with(".htm") || reference.ends_with(".html") || reference.ends_with('/')
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does check_out return a BoxFuture instead of being an async fn?
//    - An async fn that calls itself would have an infinitely sized future
//    - Box::pin puts each level's future on the heap, so the size is known
//    - BoxFuture<'a, ()> is futures' alias for Pin<Box<dyn Future + Send + 'a>>
//
// 2. Why is depth a parameter and not a field?
//    - Each call gets its own copy, so there is nothing to "undo" on return
//    - A failing child can't leave the parent at the wrong indentation
//
// 3. What does tx.is_closed() check?
//    - Whether the receiving half of the channel was dropped
//    - If nobody is reading the report any more, there's no point continuing
// -----------------------------------------------------------------------------
