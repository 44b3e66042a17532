//! Mandatory key check.
//!
//! A small set of message ids must be translated in every locale before a
//! build ships. This check runs before and independent of every exclusion
//! tier: an id listed as mandatory cannot be suppressed away.

use crate::core::exclusions::ExclusionSet;
use crate::core::snapshot::MessageTable;
use crate::issues::{Diagnostic, MandatoryMissingDiagnostic};

pub fn check_mandatory(
    locale: &str,
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for id in exclusions.mandatory_ids() {
        if !table.contains_key(id) {
            diagnostics.push(Diagnostic::new(
                locale,
                MandatoryMissingDiagnostic { id: id.clone() },
            ));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::CheckCategory;

    fn exclusions_with_mandatory() -> ExclusionSet {
        serde_json::from_str(
            r#"{"mandatory": {"strings": ["a.ftl:update-title", "a.ftl:update-body"]}}"#,
        )
        .expect("valid document")
    }

    #[test]
    fn test_missing_mandatory_key() {
        let exclusions = exclusions_with_mandatory();
        let table: MessageTable = [("a.ftl:update-title".to_string(), "Titre".to_string())]
            .into_iter()
            .collect();

        let diagnostics = check_mandatory("fr", &table, &exclusions);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id(), "a.ftl:update-body");
        assert_eq!(diagnostics[0].category(), CheckCategory::Mandatory);
    }

    #[test]
    fn test_all_mandatory_present() {
        let exclusions = exclusions_with_mandatory();
        let table: MessageTable = [
            ("a.ftl:update-title".to_string(), "Titre".to_string()),
            ("a.ftl:update-body".to_string(), "Corps".to_string()),
        ]
        .into_iter()
        .collect();

        assert!(check_mandatory("fr", &table, &exclusions).is_empty());
    }
}
