//! CSS token fingerprints for `.style` attribute messages.
//!
//! Style values travel with the message (`width: 12em; min-height: 3em`)
//! and translators legitimately adjust units and spacing for their locale.
//! The comparable signal is the numeric values: the text is split on runs
//! of non-digit characters and only the digit runs are kept, so
//! `"10px 2em"` fingerprints as `["10", "2"]`.

use crate::core::snapshot::key_part;

/// Message-key suffix marking a style attribute.
pub const STYLE_SUFFIX: &str = ".style";

/// Whether a message id carries a CSS style value.
pub fn is_style_id(id: &str) -> bool {
    key_part(id).ends_with(STYLE_SUFFIX)
}

/// Extract the CSS fingerprint: digit-run tokens in order of appearance.
/// One trailing statement separator is stripped first so a translation
/// differing only in the final `;` does not mismatch.
pub fn css_tokens(text: &str) -> Vec<String> {
    let text = text.strip_suffix(';').unwrap_or(text);
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
