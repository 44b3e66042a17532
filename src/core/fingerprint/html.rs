//! Markup tag extraction.
//!
//! Converts a text fragment into the canonical ordered sequence of tag
//! descriptors used by the HTML consistency check. The scanner is
//! hand-rolled and never fails: malformed or unterminated markup ends the
//! scan with whatever was captured so far. Explicit skip states handle
//! comments, doctypes and processing instructions.
//!
//! Canonical form of a descriptor:
//! - tag and attribute names lowercased
//! - attributes sorted by name
//! - the synthetic `{` and `}` attribute names (left over from embedded
//!   placeables inside a tag) dropped
//! - the `alt` value replaced by `-`, since translated alt text is not
//!   structural
//! - `<br>` never produces a descriptor
//! - self-closing tags produce a start and an end descriptor

use std::sync::LazyLock;

use regex::Regex;

/// Line-break element, ignored in both start and end position.
const BREAK_ELEMENT: &str = "br";

/// Attribute names that are artifacts of placeable syntax, not markup.
const SYNTHETIC_ATTRS: [&str; 2] = ["{", "}"];

static PLACEABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*([$-]?[\w.-]+)(?:[\[(]?[\w.\-, :"]+[\])])*\s*\}"#).unwrap()
});

/// Remove placeable expressions (`{ $var }`, `{ -term }`, simple function
/// calls) from a fragment before tag extraction, so that curly braces are
/// not mistaken for markup. Escaped literal braces (`{{`) are preserved.
pub fn strip_placeables(text: &str) -> String {
    if !text.contains('{') {
        return text.to_string();
    }

    // The regex engine has no look-behind, so escaped literal braces are
    // shielded with a private-use character and restored afterwards.
    const GUARD: &str = "\u{e000}";
    let guarded = text.replace("{{", GUARD);
    let stripped = PLACEABLE_RE.replace_all(&guarded, "");
    stripped.replace(GUARD, "{{")
}

/// Reusable tag scanner. `clear` resets the accumulated descriptors without
/// reconstructing the extractor, so one instance can walk thousands of
/// fragments.
#[derive(Debug, Default)]
pub struct TagExtractor {
    tags: Vec<String>,
}

impl TagExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop accumulated descriptors, keeping the allocation.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Scan a fragment, appending descriptors for every tag found.
    pub fn feed(&mut self, text: &str) {
        let mut rest = text;
        loop {
            let Some(lt) = rest.find('<') else {
                return;
            };
            rest = &rest[lt + 1..];

            let Some(first) = rest.chars().next() else {
                return;
            };
            match first {
                '/' => {
                    let Some(gt) = rest.find('>') else {
                        return;
                    };
                    self.end_tag(&rest[1..gt]);
                    rest = &rest[gt + 1..];
                }
                '!' | '?' => {
                    // Comment, doctype or processing instruction.
                    if let Some(body) = rest.strip_prefix("!--") {
                        let Some(end) = body.find("-->") else {
                            return;
                        };
                        rest = &body[end + 3..];
                    } else {
                        let Some(gt) = rest.find('>') else {
                            return;
                        };
                        rest = &rest[gt + 1..];
                    }
                }
                c if c.is_ascii_alphabetic() => {
                    let Some(gt) = find_tag_end(rest) else {
                        return;
                    };
                    self.start_tag(&rest[..gt]);
                    rest = &rest[gt + 1..];
                }
                // A `<` that opens no tag is plain text.
                _ => {}
            }
        }
    }

    fn end_tag(&mut self, raw: &str) {
        let name = raw
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        if !name.is_empty() && name != BREAK_ELEMENT {
            self.tags.push(format!("</{name}>"));
        }
    }

    fn start_tag(&mut self, inner: &str) {
        let trimmed = inner.trim_end();
        let self_closing = trimmed.ends_with('/');
        let trimmed = trimmed.trim_end_matches('/');

        let name_end = trimmed
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(trimmed.len());
        let name = trimmed[..name_end].to_ascii_lowercase();
        if name.is_empty() || name == BREAK_ELEMENT {
            return;
        }

        let mut attrs = parse_attrs(&trimmed[name_end..]);
        attrs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut descriptor = format!("<{name}");
        for (attr_name, value) in attrs {
            if SYNTHETIC_ATTRS.contains(&attr_name.as_str()) {
                continue;
            }
            let value = match value {
                Some(_) if attr_name == "alt" => Some("-".to_string()),
                other => other,
            };
            match value {
                Some(v) => descriptor.push_str(&format!(" {attr_name}=\"{v}\"")),
                None => descriptor.push_str(&format!(" {attr_name}")),
            }
        }
        descriptor.push('>');
        self.tags.push(descriptor);

        if self_closing {
            self.tags.push(format!("</{name}>"));
        }
    }
}

/// Byte index of the `>` that closes a start tag, honoring quoted attribute
/// values. `None` when the tag is unterminated.
fn find_tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in rest.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(idx),
                _ => {}
            },
        }
    }
    None
}

fn parse_attrs(mut rest: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();

    loop {
        rest = rest.trim_start().trim_start_matches('/').trim_start();
        if rest.is_empty() {
            return attrs;
        }

        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remainder) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(q) {
                        Some(end) => (body[..end].to_string(), &body[end + 1..]),
                        // Unterminated quote: best-effort, consume the rest.
                        None => (body.to_string(), ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    (after_eq[..end].to_string(), &after_eq[end..])
                }
            };
            attrs.push((name, Some(value)));
            rest = remainder;
        } else if !name.is_empty() {
            attrs.push((name, None));
        }
    }
}
