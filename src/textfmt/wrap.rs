// src/textfmt/wrap.rs
// =============================================================================
// A greedy line filler in the style of Berkeley UNIX fmt.
//
// How it works:
// - Words are appended to the current output line, separated by one space
// - A word that would push the line past the width flushes the line first
// - A blank input line ends the current line and emits one blank line,
//   so paragraphs stay apart
//
// Output matches fmt byte for byte: every word keeps its trailing space, and
// a word that overflows an empty line emits that empty line first. Words are
// never split, so a word longer than the width gets a line of its own.
//
// Rust concepts:
// - Generic I/O: any BufRead in, any Write out
// =============================================================================

use std::io::{self, BufRead, Write};

/// Default output width, in bytes
pub const COLWIDTH: usize = 72;

// Wraps every line of `input` to `width` columns and writes the result
pub fn format<R: BufRead, W: Write>(input: R, out: &mut W, width: usize) -> io::Result<()> {
    let lines = input.lines().collect::<io::Result<Vec<_>>>()?;
    format_lines(lines.iter().map(String::as_str), out, width)
}

pub fn format_lines<'a, I, W>(lines: I, out: &mut W, width: usize) -> io::Result<()>
where
    I: IntoIterator<Item = &'a str>,
    W: Write,
{
    let mut buf = String::new();

    for line in lines {
        if line.is_empty() {
            flush(&mut buf, out)?;
            writeln!(out)?;
            continue;
        }

        for word in line.split_whitespace() {
            if buf.len() + word.len() > width {
                flush(&mut buf, out)?;
            }
            buf.push_str(word);
            buf.push(' ');
        }
    }

    flush(&mut buf, out)
}

// Writes the pending line as is, trailing space included
fn flush<W: Write>(buf: &mut String, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", buf)?;
    buf.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str], width: usize) -> String {
        let mut out = Vec::new();
        format_lines(lines.iter().copied(), &mut out, width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_joins_short_lines() {
        assert_eq!(run(&["one two", "three"], 72), "one two three \n");
    }

    #[test]
    fn test_wraps_at_width() {
        // "aaa bbb " is 8 bytes; adding "ccc" would make 11 > 10
        assert_eq!(run(&["aaa bbb ccc ddd"], 10), "aaa bbb \nccc ddd \n");
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        assert_eq!(run(&["first para", "", "second"], 72), "first para \n\nsecond \n");
    }

    #[test]
    fn test_long_word_gets_its_own_line() {
        assert_eq!(run(&["a", "abcdefghijkl", "b"], 5), "a \nabcdefghijkl \nb \n");
    }

    #[test]
    fn test_overflow_on_empty_line_emits_it() {
        assert_eq!(run(&["abcdefghijkl"], 5), "\nabcdefghijkl \n");
    }

    #[test]
    fn test_empty_input_emits_one_empty_line() {
        assert_eq!(run(&[], 72), "\n");
    }

    #[test]
    fn test_format_from_reader() {
        let mut out = Vec::new();
        format("hello\n  world  \n".as_bytes(), &mut out, COLWIDTH).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hello world \n");
    }
}
