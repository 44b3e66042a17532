//! Formatting function call comparison.
//!
//! The canonical call lists of reference and translation must be equal: a
//! dropped `NUMBER`/`DATETIME` call loses formatting, changed arguments
//! change it silently. A translation with no calls left is reported as
//! "missing"; any other difference is a mismatch carrying both raw texts.

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::fingerprint::{FunctionCall, function_calls};
use crate::core::snapshot::MessageTable;
use crate::issues::{Diagnostic, FunctionMismatchDiagnostic, FunctionMissingDiagnostic};

pub fn check_functions(
    locale: &str,
    function_index: &[(String, Vec<FunctionCall>)],
    reference: &MessageTable,
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (id, reference_calls) in function_index {
        if exclusions.should_ignore(Category::FluentFunctions, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        let calls = function_calls(translation);
        if calls.is_empty() {
            diagnostics.push(Diagnostic::new(
                locale,
                FunctionMissingDiagnostic { id: id.clone() },
            ));
        } else if &calls != reference_calls {
            diagnostics.push(Diagnostic::new(
                locale,
                FunctionMismatchDiagnostic {
                    id: id.clone(),
                    reference: reference.get(id).cloned().unwrap_or_default(),
                    translation: translation.clone(),
                },
            ));
        }
    }

    diagnostics
}
