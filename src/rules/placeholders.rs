//! Placeholder-group comparison.
//!
//! Every `data-l10n-name` group in the reference must reappear in the
//! translation: the groups bind child elements at render time and a
//! renamed or dropped group leaves a dead injection point. A translation
//! with no groups at all is reported as "missing" rather than "mismatch".

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::fingerprint::placeholder_groups;
use crate::core::snapshot::MessageTable;
use crate::issues::{Diagnostic, PlaceholderMismatchDiagnostic, PlaceholderMissingDiagnostic};

pub fn check_placeholders(
    locale: &str,
    placeholder_index: &[(String, Vec<String>)],
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (id, reference_groups) in placeholder_index {
        if exclusions.should_ignore(Category::Ignore, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        let groups = placeholder_groups(translation);
        if groups.is_empty() {
            diagnostics.push(Diagnostic::new(
                locale,
                PlaceholderMissingDiagnostic { id: id.clone() },
            ));
        } else if &groups != reference_groups {
            diagnostics.push(Diagnostic::new(
                locale,
                PlaceholderMismatchDiagnostic { id: id.clone() },
            ));
        }
    }

    diagnostics
}
