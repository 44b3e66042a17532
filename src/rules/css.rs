//! CSS token comparison for `.style` messages.
//!
//! Style attributes may be reflowed and re-unit-ed by translators, but the
//! numeric values are part of the layout contract. The digit-run
//! fingerprints must match exactly; a translation deriving no tokens at
//! all while the reference has some is reported as "missing".

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::fingerprint::css_tokens;
use crate::core::snapshot::MessageTable;
use crate::issues::{CssMismatchDiagnostic, CssMissingDiagnostic, Diagnostic};

pub fn check_css(
    locale: &str,
    css_index: &[(String, Vec<String>)],
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (id, reference_tokens) in css_index {
        if exclusions.should_ignore(Category::Ignore, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        let tokens = css_tokens(translation);
        if tokens.is_empty() && !reference_tokens.is_empty() {
            diagnostics.push(Diagnostic::new(
                locale,
                CssMissingDiagnostic { id: id.clone() },
            ));
        } else if &tokens != reference_tokens {
            diagnostics.push(Diagnostic::new(
                locale,
                CssMismatchDiagnostic { id: id.clone() },
            ));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::CheckCategory;

    fn table(entries: &[(&str, &str)]) -> MessageTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn index() -> Vec<(String, Vec<String>)> {
        vec![(
            "a.ftl:panel.style".to_string(),
            vec!["12".to_string(), "3".to_string()],
        )]
    }

    #[test]
    fn test_matching_tokens_across_units() {
        // Same numbers, different spacing and trailing separator.
        let table = table(&[("a.ftl:panel.style", "width:12em;min-height:3em;")]);
        assert!(check_css("fr", &index(), &table, &ExclusionSet::default()).is_empty());
    }

    #[test]
    fn test_changed_value_is_a_mismatch() {
        let table = table(&[("a.ftl:panel.style", "width: 14em; min-height: 3em")]);
        let diagnostics = check_css("fr", &index(), &table, &ExclusionSet::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category(), CheckCategory::Css);
        assert!(diagnostics[0].explanation().contains("mismatch"));
    }

    #[test]
    fn test_empty_translation_value_is_missing() {
        let table = table(&[("a.ftl:panel.style", "auto")]);
        let diagnostics = check_css("fr", &index(), &table, &ExclusionSet::default());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].explanation().contains("missing"));
    }

    #[test]
    fn test_untranslated_is_skipped() {
        let table = table(&[]);
        assert!(check_css("fr", &index(), &table, &ExclusionSet::default()).is_empty());
    }
}
