//! Text helpers shared by the page views

use scraper::{ElementRef, Html};

/// Concatenates all descendant text of an element
///
/// Markup is dropped and entities are already decoded by the parser.
pub fn node_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Replaces every run of line breaks with a single space
pub fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;

    for c in text.chars() {
        if c == '\n' || c == '\r' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }

    out
}

/// Text of a content block: trimmed, with line breaks folded into spaces
pub fn block_text(element: ElementRef<'_>) -> String {
    collapse_newlines(node_text(element).trim())
}

/// Decodes HTML entities in an already-extracted string
///
/// Payload strings arrive entity-encoded a second time, so they need a pass
/// of their own. `<` is escaped first so text like `Vec<T>` survives.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let escaped = text.replace('<', "&lt;");
    let fragment = Html::parse_fragment(&escaped);
    fragment.root_element().text().collect()
}
