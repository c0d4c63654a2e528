// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, so stdout stays a clean report)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = no dead links, 1 = dead links, 2 = error)
//
// Rust concepts used:
// - async/await: the crawl runs on its own tokio task
// - Streams: report lines are printed as they arrive
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

mod checker;  // src/checker/ - tag extraction and link classification
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - crawler settings
mod crawl;    // src/crawl/ - recursive traversal
mod error;    // src/error.rs - crawler error types
mod report;   // src/report.rs - rendering and saving the report
mod textfmt;  // src/textfmt/ - the fmt subcommand

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{CrawlerConfig, ExtractorKind};
use crawl::{Crawler, ReportLine, StopFlag};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{warn, Level};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no dead links (or fmt succeeded)
//   Ok(1) = dead links found
//   Err = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::Check {
            root,
            json,
            save,
            timeout,
            dom,
        } => {
            let config = CrawlerConfig {
                timeout: timeout.map(Duration::from_secs),
                extractor: if dom {
                    ExtractorKind::Dom
                } else {
                    ExtractorKind::Heuristic
                },
                ..CrawlerConfig::default()
            };
            handle_check(&root, config, json, save).await
        }
        Commands::Fmt { files, width } => {
            textfmt::format_files(&files, width)?;
            Ok(0)
        }
    }
}

// Handles the 'check' subcommand
async fn handle_check(
    root: &str,
    config: CrawlerConfig,
    json: bool,
    save: Option<PathBuf>,
) -> Result<i32> {
    let crawler = Crawler::new(config)?;

    // Ctrl-C stops the crawl at its next checkpoint; the partial report
    // is still printed and saved
    let stop: StopFlag = crawler.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Stopping...");
            stop.stop();
        }
    });

    if !json {
        println!("🔍 Checking {}...", root);
    }

    let mut stream = crawler.run(root);
    let mut lines: Vec<ReportLine> = Vec::new();
    while let Some(line) = stream.next().await {
        if !json {
            println!("{}", line);
        }
        lines.push(line);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        report::print_summary(&lines);
    }

    // The crawl is over either way; a failed save is only reported
    if let Some(path) = save {
        let text = report::render(root, &lines);
        match report::save_report(&text, &path).await {
            Ok(()) => eprintln!("💾 Report saved as {}", path.display()),
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    let dead = lines.iter().filter(|l| l.is_dead()).count();
    Ok(if dead > 0 { 1 } else { 0 })
}
