// src/checker/html.rs
// =============================================================================
// This module extracts the same elements as checker::tags, but through a
// real HTML parser.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Compared to the heuristic reader this handles single-quoted and unquoted
// attributes, and only skips anchors that really have no href. It is opt-in
// (--dom) so the default report stays identical to the heuristic one.
//
// Rust concepts:
// - Iterators: filter_map over selected elements
// - Closures: Anonymous functions (|x| ...)
// =============================================================================

use super::tags::{Element, TagKind};
use scraper::{Html, Selector};

// Extracts all wanted elements from an HTML document, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src=logo.png>"
//   result = [Anchor "/docs", Image "logo.png"]
pub fn extract_elements(html: &str, wanted: &[TagKind]) -> Vec<Element> {
    let document = Html::parse_document(html);

    // "a[href], img[src], ..." selects every wanted tag in one pass,
    // which keeps the results in document order
    let selector_text = wanted
        .iter()
        .map(|kind| format!("{}[{}]", kind.tag_name(), kind.attribute()))
        .collect::<Vec<_>>()
        .join(", ");

    let selector = match Selector::parse(&selector_text) {
        Ok(selector) => selector,
        // Only an empty wanted list produces an invalid selector
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let kind = TagKind::from_name(element.value().name())?;
            let reference = element.value().attr(kind.attribute())?;
            Some(Element {
                kind,
                reference: reference.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting_styles() {
        let html = r#"
            <a href="double.html">1</a>
            <a href='single.html'>2</a>
            <img src=unquoted.png>
        "#;
        let refs: Vec<_> = extract_elements(html, &TagKind::ALL)
            .into_iter()
            .map(|e| e.reference)
            .collect();
        assert_eq!(refs, vec!["double.html", "single.html", "unquoted.png"]);
    }

    #[test]
    fn test_named_anchor_without_href() {
        let html = r#"<a name="top">Top</a><a href="names.html">Names</a>"#;
        let elements = extract_elements(html, &TagKind::ALL);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].reference, "names.html");
    }

    #[test]
    fn test_applet_code() {
        let html = r#"<applet code="Clock.class"></applet>"#;
        let elements = extract_elements(html, &[TagKind::Applet]);
        assert_eq!(elements[0].kind, TagKind::Applet);
        assert_eq!(elements[0].reference, "Clock.class");
    }

    #[test]
    fn test_empty_wanted_list() {
        assert!(extract_elements(r#"<a href="x">x</a>"#, &[]).is_empty());
    }
}
