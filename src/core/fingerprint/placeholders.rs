//! Placeholder-group fingerprints.
//!
//! Messages with embedded UI elements name their injection points through
//! `data-l10n-name="..."` attributes. A translation that drops or renames a
//! group breaks the element binding at render time, so the fingerprint is
//! the sorted, deduplicated set of group names.

use std::sync::LazyLock;

use regex::Regex;

static DATA_L10N_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-l10n-name\s*=\s*"([a-zA-Z\-]*)""#).unwrap());

/// Extract the sorted, deduplicated placeholder group names.
pub fn placeholder_groups(text: &str) -> Vec<String> {
    let mut groups: Vec<String> = DATA_L10N_NAME_RE
        .captures_iter(text)
        .map(|capture| capture[1].to_string())
        .collect();
    groups.sort();
    groups.dedup();
    groups
}
