// src/checker/http.rs
// =============================================================================
// This module decides whether a single resolved link is alive.
//
// Key functionality:
// - http/https: one GET request, the status code is reported as-is
//   (redirects are NOT followed, so a 301 shows up as "301 Moved Permanently")
// - ftp: skipped without connecting
// - file: opened and immediately closed
// - anything else: reported as non-HTTP
//
// A check never fails: every error becomes a LinkStatus so the crawler can
// keep going.
//
// Rust concepts:
// - Enums with data: LinkStatus variants carry codes and messages
// - Error source chains: walking .source() to find the root cause
// =============================================================================

use hyper::ext::ReasonPhrase;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use tracing::debug;
use url::Url;

// Message used when the server answered with something that isn't HTTP
pub const BAD_RESPONSE: &str = "Server error: bad HTTP response";

// Message used for failures we can't describe any better
pub const GENERIC_FAILURE: &str = "generic failure";

// Represents the status of a link after checking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// The resource answered; code is None for local files
    Ok { code: Option<u16>, message: String },
    /// Lives on another host; `checked` is what the check itself found
    Offsite { checked: Box<LinkStatus> },
    /// Deliberately not checked
    Skipped { reason: String },
    /// Could not be reached
    Dead { cause: String },
    /// A scheme we don't know how to check
    NonHttp,
}

impl LinkStatus {
    pub fn skipped(reason: impl Into<String>) -> Self {
        LinkStatus::Skipped {
            reason: reason.into(),
        }
    }

    pub fn dead(cause: impl Into<String>) -> Self {
        LinkStatus::Dead {
            cause: cause.into(),
        }
    }

    /// True for Dead links, including dead links on other hosts
    pub fn is_dead(&self) -> bool {
        match self {
            LinkStatus::Dead { .. } => true,
            LinkStatus::Offsite { checked } => checked.is_dead(),
            _ => false,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Ok {
                code: Some(code),
                message,
            } if message.is_empty() => write!(f, "{}", code),
            LinkStatus::Ok {
                code: Some(code),
                message,
            } => write!(f, "{} {}", code, message),
            LinkStatus::Ok { code: None, .. } => write!(f, "(File)"),
            LinkStatus::Offsite { checked } => write!(f, "{} -- OFFSITE -- not following", checked),
            LinkStatus::Skipped { reason } => write!(f, "({})", reason),
            LinkStatus::Dead { cause } => write!(f, "DEAD: {}", cause),
            LinkStatus::NonHttp => write!(f, "(non-HTTP)"),
        }
    }
}

// Checks links one at a time with a shared HTTP client
#[derive(Debug, Clone)]
pub struct Classifier {
    client: Client,
}

impl Classifier {
    // The client should be built with redirects disabled,
    // see CrawlerConfig::build_client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // Checks a single resolved link
    //
    // Exactly one attempt is made; nothing is retried and no error escapes.
    pub async fn classify(&self, url: &Url) -> LinkStatus {
        let status = match url.scheme() {
            "http" | "https" => self.check_http(url).await,
            "ftp" => LinkStatus::skipped("skipping FTP link"),
            "file" => check_file(url).await,
            _ => LinkStatus::NonHttp,
        };
        debug!(%url, %status, "classified");
        status
    }

    async fn check_http(&self, url: &Url) -> LinkStatus {
        match self.client.get(url.clone()).send().await {
            Ok(response) => {
                let code = response.status();
                // hyper only keeps the phrase when it differs from the standard one
                let message = match response.extensions().get::<ReasonPhrase>() {
                    Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
                    None => code.canonical_reason().unwrap_or("").to_string(),
                };
                LinkStatus::Ok {
                    code: Some(code.as_u16()),
                    message,
                }
            }
            Err(e) => categorize_error(&e),
        }
    }
}

// Opens a file:// link and closes it again straight away
async fn check_file(url: &Url) -> LinkStatus {
    let path = match url.to_file_path() {
        Ok(path) => path,
        Err(()) => return LinkStatus::dead(GENERIC_FAILURE),
    };

    match tokio::fs::File::open(&path).await {
        // Dropping the handle closes it
        Ok(_file) => LinkStatus::Ok {
            code: None,
            message: "File".to_string(),
        },
        Err(_) => LinkStatus::dead(GENERIC_FAILURE),
    }
}

// Maps a reqwest failure to a Dead status
//
// - an io::Error anywhere in the chain (reset, refused, ...) => its description
// - a connect error without one => the error text
// - a request that got an answer which isn't HTTP => BAD_RESPONSE
// - everything else => GENERIC_FAILURE
fn categorize_error(error: &reqwest::Error) -> LinkStatus {
    if let Some(io) = find_io_error(error) {
        return categorize_io_error(io);
    }
    if error.is_connect() || error.is_timeout() {
        return LinkStatus::dead(error.to_string());
    }
    if error.is_request() {
        return LinkStatus::dead(BAD_RESPONSE);
    }
    LinkStatus::dead(GENERIC_FAILURE)
}

// Network-level failures are reported with their own description
pub fn categorize_io_error(error: &std::io::Error) -> LinkStatus {
    LinkStatus::dead(error.to_string())
}

fn find_io_error<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a std::io::Error> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            return Some(io);
        }
        current = err.source();
    }
    None
}
