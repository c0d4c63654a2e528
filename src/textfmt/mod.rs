// src/textfmt/mod.rs
// =============================================================================
// The `fmt` subcommand: reflow plain text to a fixed width.
//
// Each named file is formatted in turn; with no files, stdin is used.
// =============================================================================

mod wrap;

pub use wrap::{format, COLWIDTH};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

// Formats the given files (or stdin) to stdout
pub fn format_files(files: &[PathBuf], width: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if files.is_empty() {
        format(io::stdin().lock(), &mut out, width).context("Failed to format stdin")?;
    }

    for path in files {
        let file = File::open(path).with_context(|| format!("Can't open {}", path.display()))?;
        format(BufReader::new(file), &mut out, width)
            .with_context(|| format!("Failed to format {}", path.display()))?;
    }

    out.flush()?;
    Ok(())
}
