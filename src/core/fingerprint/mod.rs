//! Structural fingerprint extraction.
//!
//! Four independent, composable extractors reduce a message text to a
//! canonical, locale-independent summary: an ordered HTML tag sequence, a
//! CSS digit-token list, a formatting-function call list, and a
//! placeholder-group set. All of them are pure functions of the text.

pub mod css;
pub mod flatten;
pub mod functions;
pub mod html;
pub mod placeholders;

use anyhow::Result;

pub use css::{css_tokens, is_style_id};
pub use flatten::{SELECTOR_MARKER, flatten_message};
pub use functions::{FunctionCall, function_calls};
pub use html::{TagExtractor, strip_placeables};
pub use placeholders::placeholder_groups;

/// Extract the HTML tag fingerprint of a message text.
///
/// Selector constructs are flattened to their default variant first, then
/// placeables are stripped so braces are not read as markup, then the tag
/// scanner runs. Fails only when a selector has no default variant.
pub fn html_tags(text: &str, extractor: &mut TagExtractor) -> Result<Vec<String>> {
    let flattened;
    let text = if text.contains(SELECTOR_MARKER) {
        flattened = flatten_message(text)?;
        flattened.as_str()
    } else {
        text
    };

    let cleaned = strip_placeables(text);
    extractor.clear();
    extractor.feed(&cleaned);
    Ok(extractor.tags().to_vec())
}
