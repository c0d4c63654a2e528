// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::report::DEFAULT_LOG;
use crate::textfmt::COLWIDTH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "link-checker",
    version,
    about = "Recursively check the links of a site or local HTML tree",
    long_about = "link-checker fetches a page, checks every <a>, <img>, <frame> and <applet> \
                  reference on it, and descends into same-host HTML pages. \
                  It also ships a small fmt-style text formatter."
)]
pub struct Cli {
    /// Log what the crawler is doing to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every link reachable from a URL or local HTML file
    ///
    /// Example: link-checker check https://example.com/index.html --save
    Check {
        /// Starting URL (scheme://...) or path to a local file
        root: String,

        /// Output the report as JSON instead of indented text
        #[arg(long)]
        json: bool,

        /// Also save the text report; defaults to linkchecker.log
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_LOG)]
        save: Option<PathBuf>,

        /// Give up on a request after this many seconds (default: never)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Parse pages with a real HTML parser instead of the quick scanner
        ///
        /// Picks up single-quoted and unquoted attributes, which the
        /// default scanner reports as malformed
        #[arg(long)]
        dom: bool,
    },

    /// Reflow text to a fixed width, like Berkeley fmt
    ///
    /// Example: link-checker fmt notes.txt --width 60
    Fmt {
        /// Files to format; reads stdin when none are given
        files: Vec<PathBuf>,

        /// Maximum line width
        #[arg(short, long, default_value_t = COLWIDTH)]
        width: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_save_without_file_uses_default() {
        let cli = Cli::parse_from(["link-checker", "check", "http://ex.com/", "--save"]);
        match cli.command {
            Commands::Check { save, timeout, .. } => {
                assert_eq!(save, Some(PathBuf::from(DEFAULT_LOG)));
                assert_eq!(timeout, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fmt_defaults() {
        let cli = Cli::parse_from(["link-checker", "fmt"]);
        match cli.command {
            Commands::Fmt { files, width } => {
                assert!(files.is_empty());
                assert_eq!(width, COLWIDTH);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
