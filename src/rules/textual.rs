//! Flat text checks applied to every reference id.
//!
//! Two signals need no fingerprint at all: a hardcoded link in a
//! translation (links are injected through placeables, a literal URL means
//! the translator copied one in) and the pilcrow character, which shows up
//! when paragraph markers leak from translation tooling.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::snapshot::MessageTable;
use crate::issues::{Diagnostic, LinkDiagnostic, PilcrowDiagnostic};

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://").unwrap());

const PILCROW: char = '¶';

pub fn check_textual(
    locale: &str,
    reference_ids: &[String],
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for id in reference_ids {
        if exclusions.should_ignore(Category::Ignore, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        if !exclusions.should_ignore(Category::Http, id, locale, table)
            && LINK_RE.is_match(translation)
        {
            diagnostics.push(Diagnostic::new(locale, LinkDiagnostic { id: id.clone() }));
        }

        if translation.contains(PILCROW) {
            diagnostics.push(Diagnostic::new(locale, PilcrowDiagnostic { id: id.clone() }));
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

    #[test]
    fn test_link_in_translation() {
        let exclusions = ExclusionSet::default();
        let ids = vec!["a.ftl:help".to_string()];
        let table = table(&[("a.ftl:help", "Voir https://example.com pour plus")]);

        let diagnostics = check_textual("fr", &ids, &table, &exclusions);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category(), CheckCategory::Links);
    }

    #[test]
    fn test_link_suppressed_by_http_category() {
        let exclusions: ExclusionSet =
            serde_json::from_str(r#"{"http": {"strings": ["a.ftl:help"]}}"#).expect("valid");
        let ids = vec!["a.ftl:help".to_string()];
        let table = table(&[("a.ftl:help", "http://example.com")]);

        assert!(check_textual("fr", &ids, &table, &exclusions).is_empty());
    }

    #[test]
    fn test_pilcrow_character() {
        let exclusions = ExclusionSet::default();
        let ids = vec!["a.ftl:body".to_string()];
        let table = table(&[("a.ftl:body", "premier ¶ second")]);

        let diagnostics = check_textual("fr", &ids, &table, &exclusions);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category(), CheckCategory::Pilcrow);
    }

    #[test]
    fn test_untranslated_is_skipped() {
        let exclusions = ExclusionSet::default();
        let ids = vec!["a.ftl:help".to_string()];
        let table = table(&[]);

        assert!(check_textual("fr", &ids, &table, &exclusions).is_empty());
    }

    #[test]
    fn test_clean_translation() {
        let exclusions = ExclusionSet::default();
        let ids = vec!["a.ftl:help".to_string()];
        let table = table(&[("a.ftl:help", "Aide")]);

        assert!(check_textual("fr", &ids, &table, &exclusions).is_empty());
    }
}
