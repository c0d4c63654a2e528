// src/crawl/line.rs
// =============================================================================
// One line of the link report.
//
// The crawler sends these down a channel as it goes; the presentation layer
// prints them, serializes them, or saves them. Display renders the classic
// text form: one tab per level of recursion, the reference as it appeared
// in the page, " -- ", and what happened to it.
// =============================================================================

use crate::checker::LinkStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    /// A reference that was considered: skipped, checked, or offsite
    Link {
        depth: usize,
        reference: String,
        status: LinkStatus,
    },
    /// A wanted tag whose reference could not be extracted or resolved
    Malformed { depth: usize, error: String },
    /// A root that is neither a URL nor an existing file
    CantOpen { depth: usize, root: String },
    /// A root that resolved but could not be read
    ReadFailed {
        depth: usize,
        root: String,
        reason: String,
    },
    /// End of the whole traversal
    Done,
}

impl ReportLine {
    pub fn depth(&self) -> usize {
        match self {
            ReportLine::Link { depth, .. }
            | ReportLine::Malformed { depth, .. }
            | ReportLine::CantOpen { depth, .. }
            | ReportLine::ReadFailed { depth, .. } => *depth,
            ReportLine::Done => 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, ReportLine::Link { status, .. } if status.is_dead())
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth() {
            f.write_str("\t")?;
        }
        match self {
            ReportLine::Link {
                reference, status, ..
            } => write!(f, "{} -- {}", reference, status),
            ReportLine::Malformed { error, .. } => write!(f, "(malformed) -- {}", error),
            ReportLine::CantOpen { root, .. } => write!(f, "Can't open file {}", root),
            ReportLine::ReadFailed { root, reason, .. } => {
                write!(f, "reading {} failed {}", root, reason)
            }
            ReportLine::Done => write!(f, "-- All done --"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_follows_depth() {
        let line = ReportLine::Link {
            depth: 2,
            reference: "b.html".to_string(),
            status: LinkStatus::Ok {
                code: Some(200),
                message: "OK".to_string(),
            },
        };
        assert_eq!(line.to_string(), "\t\tb.html -- 200 OK");
    }

    #[test]
    fn test_skip_and_done_lines() {
        let skip = ReportLine::Link {
            depth: 0,
            reference: "mailto:x@y.com".to_string(),
            status: LinkStatus::skipped("not checking"),
        };
        assert_eq!(skip.to_string(), "mailto:x@y.com -- (not checking)");
        assert_eq!(ReportLine::Done.to_string(), "-- All done --");
    }

    #[test]
    fn test_json_shape() {
        let line = ReportLine::CantOpen {
            depth: 0,
            root: "nowhere".to_string(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "cant_open");
        assert_eq!(json["root"], "nowhere");
    }
}
