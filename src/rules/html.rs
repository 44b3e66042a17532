//! HTML tag sequence comparison.
//!
//! The reference fingerprint index maps message ids to their canonical tag
//! sequences. A translation must reproduce the same descriptors; a pure
//! reordering is tolerated (right-to-left locales legitimately move
//! markup around) and only tallied, while any change in the tags
//! themselves is a mismatch carrying both sequences for triage.

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::fingerprint::{TagExtractor, html_tags};
use crate::core::snapshot::MessageTable;
use crate::issues::{Diagnostic, HtmlMismatchDiagnostic};

/// Result of the HTML pass for one locale.
#[derive(Debug, Default)]
pub struct HtmlCheckOutcome {
    pub diagnostics: Vec<Diagnostic>,
    /// Sequences equal as multisets but not as sequences: suppressed.
    pub order_only: usize,
    /// Messages whose selector construct could not be flattened.
    pub errors: Vec<String>,
}

pub fn check_html(
    locale: &str,
    html_index: &[(String, Vec<String>)],
    reference: &MessageTable,
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> HtmlCheckOutcome {
    let mut outcome = HtmlCheckOutcome::default();
    let mut extractor = TagExtractor::new();

    for (id, reference_tags) in html_index {
        if exclusions.should_ignore(Category::Html, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        let tags = match html_tags(translation, &mut extractor) {
            Ok(tags) => tags,
            Err(error) => {
                outcome
                    .errors
                    .push(format!("Cannot flatten translation for {locale} ({id}): {error}"));
                continue;
            }
        };

        if &tags == reference_tags {
            continue;
        }

        let mut sorted_tags = tags.clone();
        sorted_tags.sort();
        let mut sorted_reference = reference_tags.clone();
        sorted_reference.sort();
        if sorted_tags == sorted_reference {
            outcome.order_only += 1;
            continue;
        }

        outcome.diagnostics.push(Diagnostic::new(
            locale,
            HtmlMismatchDiagnostic {
                id: id.clone(),
                translation_tags: tags,
                reference_tags: reference_tags.clone(),
                translation: translation.clone(),
                reference: reference.get(id).cloned().unwrap_or_default(),
            },
        ));
    }

    outcome
}
