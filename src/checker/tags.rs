// src/checker/tags.rs
// =============================================================================
// This module pulls link-bearing tags out of raw markup without parsing it.
//
// It is a deliberately crude scanner:
// - Finds each '<', reads the tag name, and keeps only the wanted tags
// - Picks the attribute from the tag name: href for <a ...>, code for
//   <applet>, src for everything else (<img>, <frame>)
// - Takes the text between the first two double quotes after the '='
//
// Known limitations (kept on purpose, see checker::html for the real parser):
// - Single-quoted and unquoted attributes are a MalformedReference
// - Any anchor whose text contains "name" is treated as a named target and
//   skipped, even <a href="names.html">
//
// Rust concepts:
// - Iterator: TagReader produces elements lazily, one per next() call
// - Lifetimes: the reader borrows the markup instead of copying it
// =============================================================================

use crate::error::{CheckError, Result};

// The tags that can reference another resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// <a href="...">
    Anchor,
    /// <img src="...">
    Image,
    /// <frame src="...">
    Frame,
    /// <applet code="...">
    Applet,
}

impl TagKind {
    /// Every kind the link checker looks at
    pub const ALL: [TagKind; 4] = [
        TagKind::Anchor,
        TagKind::Image,
        TagKind::Frame,
        TagKind::Applet,
    ];

    // Maps a tag name (any case) to a kind
    pub fn from_name(name: &str) -> Option<TagKind> {
        match name.to_ascii_lowercase().as_str() {
            "a" => Some(TagKind::Anchor),
            "img" => Some(TagKind::Image),
            "frame" => Some(TagKind::Frame),
            "applet" => Some(TagKind::Applet),
            _ => None,
        }
    }

    pub fn tag_name(self) -> &'static str {
        match self {
            TagKind::Anchor => "a",
            TagKind::Image => "img",
            TagKind::Frame => "frame",
            TagKind::Applet => "applet",
        }
    }

    // The attribute that names the referenced resource
    pub fn attribute(self) -> &'static str {
        match self {
            TagKind::Anchor => "href",
            TagKind::Applet => "code",
            TagKind::Image | TagKind::Frame => "src",
        }
    }
}

// One wanted tag occurrence and the reference it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: TagKind,
    pub reference: String,
}

// Lazily walks markup and yields wanted elements in document order
pub struct TagReader<'a> {
    markup: &'a str,
    pos: usize,
    wanted: &'a [TagKind],
}

impl<'a> TagReader<'a> {
    pub fn new(markup: &'a str, wanted: &'a [TagKind]) -> Self {
        Self {
            markup,
            pos: 0,
            wanted,
        }
    }
}

impl<'a> Iterator for TagReader<'a> {
    type Item = Result<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.markup[self.pos..];
            let open = self.pos + rest.find('<')?;

            // Tag name runs until whitespace, '>' or '/'
            let after = &self.markup[open + 1..];
            let name_len = after
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(after.len());
            let name = &after[..name_len];

            let kind = match TagKind::from_name(name) {
                Some(kind) if self.wanted.contains(&kind) => kind,
                _ => {
                    self.pos = open + 1;
                    continue;
                }
            };

            let close = self.markup[open..]
                .find('>')
                .map(|i| open + i + 1)
                .unwrap_or(self.markup.len());
            let tag = &self.markup[open..close];
            self.pos = close;

            match extract_reference(tag) {
                Ok(Some(reference)) => return Some(Ok(Element { kind, reference })),
                // Named anchor, nothing to check
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

// Extracts the reference from a single tag such as
// <a class="x" HREF="http://foo/bar">
//
// Returns:
//   Ok(Some(reference)) for a usable reference
//   Ok(None) for an anchor that is only a named target
//   Err(MalformedReference) when the attribute or its quotes are missing
pub fn extract_reference(tag: &str) -> Result<Option<String>> {
    // ASCII lowercasing keeps byte offsets identical between the two strings
    let lower = tag.to_ascii_lowercase();

    let attribute = if lower.starts_with("<a")
        && lower[2..].chars().next().is_some_and(char::is_whitespace)
    {
        "href"
    } else if lower.starts_with("<applet") {
        "code"
    } else {
        "src"
    };

    if attribute == "href" && lower.contains("name") {
        return Ok(None);
    }

    let name_at = lower.find(attribute).ok_or_else(|| {
        CheckError::MalformedReference(format!("Can't find {} in {}", attribute, tag))
    })?;

    let invalid = || CheckError::MalformedReference(format!("Invalid {} in {}", attribute, tag));

    let equals = name_at + tag[name_at..].find('=').ok_or_else(invalid)?;
    let open_quote = equals + tag[equals..].find('"').ok_or_else(invalid)?;
    let close_quote = open_quote + 1 + tag[open_quote + 1..].find('"').ok_or_else(invalid)?;

    Ok(Some(tag[open_quote + 1..close_quote].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references(markup: &str) -> Vec<String> {
        TagReader::new(markup, &TagKind::ALL)
            .filter_map(|e| e.ok())
            .map(|e| e.reference)
            .collect()
    }

    #[test]
    fn test_anchor_href() {
        let elements: Vec<_> = TagReader::new(r#"<a href="http://x/y.html">Y</a>"#, &TagKind::ALL)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            elements,
            vec![Element {
                kind: TagKind::Anchor,
                reference: "http://x/y.html".to_string(),
            }]
        );
    }

    #[test]
    fn test_named_anchor_is_ignored() {
        assert!(references(r#"<a name="top">Top</a>"#).is_empty());
    }

    #[test]
    fn test_name_substring_hides_href() {
        // crude heuristic: "names" contains "name"
        assert!(references(r#"<a href="names.html">x</a>"#).is_empty());
    }

    #[test]
    fn test_image_frame_and_applet() {
        let markup = r#"
            <IMG SRC="pic.gif">
            <frame src="left.html">
            <applet code="Clock.class" width="100">
        "#;
        assert_eq!(references(markup), vec!["pic.gif", "left.html", "Clock.class"]);
    }

    #[test]
    fn test_document_order_and_unwanted_tags() {
        let markup = r#"<p><a href="one.html">1</a><script src="x.js"></script><img src="two.png"></p>"#;
        assert_eq!(references(markup), vec!["one.html", "two.png"]);
    }

    #[test]
    fn test_wanted_filter() {
        let markup = r#"<a href="one.html">1</a><img src="two.png">"#;
        let only_images: Vec<_> = TagReader::new(markup, &[TagKind::Image])
            .map(|e| e.unwrap().reference)
            .collect();
        assert_eq!(only_images, vec!["two.png"]);
    }

    #[test]
    fn test_single_quotes_are_malformed() {
        let result: Vec<_> = TagReader::new("<a href='x.html'>x</a>", &TagKind::ALL).collect();
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Err(CheckError::MalformedReference(_))));
    }

    #[test]
    fn test_missing_attribute_is_malformed() {
        let err = extract_reference(r#"<img alt="nothing">"#).unwrap_err();
        assert!(err.to_string().contains("Can't find src"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let markup = r#"<a href="a.html">a</a> <img src="b.png"> <a href='bad'>"#;
        let first: Vec<_> = TagReader::new(markup, &TagKind::ALL)
            .map(|e| e.map_err(|e| e.to_string()))
            .collect();
        let second: Vec<_> = TagReader::new(markup, &TagKind::ALL)
            .map(|e| e.map_err(|e| e.to_string()))
            .collect();
        assert_eq!(first, second);
    }
}
