//! Field extraction over raw portal markup.
//!
//! The portal's pages are old-style table soup, so extraction works on raw
//! text with compiled-once regexes rather than a DOM: hidden form inputs
//! for the SSO hand-off, and `label-cell, data-cell` table pairs for the
//! balance page. Every helper returns `None` on absent or malformed input;
//! nothing here panics on bad markup.

use std::sync::LazyLock;

use regex::Regex;

/// Matches one `<input ...>` tag, attributes included.
static INPUT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<input\b[^>]*>").expect("Invalid regex"));

/// Matches one attribute inside a tag, quoted either way or bare.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("Invalid regex")
});

/// Matches one table cell (`td` or `th`) and captures its inner markup.
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]>").expect("Invalid regex"));

/// Matches any tag, for stripping.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid regex"));

// ============================================================================
// Generic extraction
// ============================================================================

/// First capture group of the first match, trimmed.
pub fn first_capture(html: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// All capture groups of the first match, trimmed; `None` entries for
/// groups that did not participate.
pub fn first_match(html: &str, pattern: &Regex) -> Option<Vec<Option<String>>> {
    pattern.captures(html).map(|caps| {
        caps.iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str().trim().to_string()))
            .collect()
    })
}

// ============================================================================
// Form fields
// ============================================================================

/// Value of the named `<input>` field, wherever it appears in the page.
///
/// Tolerates attribute order, quoting style, and markup case. The field
/// name itself is matched exactly: the hidden-field names are contractual.
pub fn hidden_field(html: &str, name: &str) -> Option<String> {
    for tag in INPUT_TAG_RE.find_iter(html) {
        let mut tag_name = None;
        let mut tag_value = None;
        for attr in ATTR_RE.captures_iter(tag.as_str()) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            match attr[1].to_ascii_lowercase().as_str() {
                "name" => tag_name = Some(value),
                "value" => tag_value = Some(value),
                _ => {}
            }
        }
        if tag_name.as_deref() == Some(name) {
            return Some(tag_value.unwrap_or_default());
        }
    }
    None
}

// ============================================================================
// Table fields
// ============================================================================

/// Data-cell text adjacent to the cell whose text equals `label`.
///
/// Cells are compared after tag stripping, entity decoding, and trimming,
/// so extra whitespace or nested markup around the label does not break
/// the match. Returns `None` when no row carries the label.
pub fn table_field(html: &str, label: &str) -> Option<String> {
    let cells: Vec<String> = CELL_RE
        .captures_iter(html)
        .map(|caps| clean_cell(&caps[1]))
        .collect();
    cells
        .iter()
        .position(|cell| cell == label)
        .and_then(|index| cells.get(index + 1))
        .cloned()
}

/// Strips tags, decodes common entities, and collapses whitespace.
fn clean_cell(markup: &str) -> String {
    let text = TAG_RE.replace_all(markup, " ");
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes the handful of entities the portal actually emits.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

// ============================================================================
// Tests
// ============================================================================
