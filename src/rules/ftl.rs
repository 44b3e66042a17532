//! Fluent-specific text hygiene checks.
//!
//! These run over every Fluent (`.ftl`) reference id and look for syntax
//! that must never survive in a translation: stray string literals, DTD
//! entities and printf variables left over from the legacy formats, and
//! the message key itself pasted into the value.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::exclusions::{Category, ExclusionSet};
use crate::core::snapshot::{MessageTable, key_part};
use crate::issues::{
    Diagnostic, FluentLiteralDiagnostic, PrintfDiagnostic, RepeatedIdDiagnostic,
    XmlEntityDiagnostic,
};

/// Start of a Fluent string literal, e.g. `{ " " }` used to force spaces.
const FLUENT_LITERAL: &str = "{ \"";

static XML_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&.*;").unwrap());

static PRINTF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(%(?:[0-9]+\$){0,1}(?:[0-9].){0,1}([sS]))").unwrap());

pub fn check_ftl(
    locale: &str,
    ftl_ids: &[String],
    table: &MessageTable,
    exclusions: &ExclusionSet,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for id in ftl_ids {
        if exclusions.should_ignore(Category::Ignore, id, locale, table) {
            continue;
        }
        let Some(translation) = table.get(id) else {
            continue;
        };

        if translation.contains(FLUENT_LITERAL)
            && !exclusions.should_ignore(Category::FtlLiterals, id, locale, table)
        {
            diagnostics.push(Diagnostic::new(
                locale,
                FluentLiteralDiagnostic { id: id.clone() },
            ));
        }

        if XML_ENTITY_RE.is_match(translation)
            && !exclusions.should_ignore(Category::Xml, id, locale, table)
        {
            diagnostics.push(Diagnostic::new(
                locale,
                XmlEntityDiagnostic { id: id.clone() },
            ));
        }

        if PRINTF_RE.is_match(translation)
            && !exclusions.should_ignore(Category::Printf, id, locale, table)
        {
            diagnostics.push(Diagnostic::new(locale, PrintfDiagnostic { id: id.clone() }));
        }

        if repeats_message_key(translation, key_part(id)) {
            diagnostics.push(Diagnostic::new(
                locale,
                RepeatedIdDiagnostic { id: id.clone() },
            ));
        }
    }

    diagnostics
}

/// The translator pasted the whole resource line: the message key appears
/// in the value followed by `=`.
fn repeats_message_key(translation: &str, key: &str) -> bool {
    translation
        .match_indices(key)
        .any(|(idx, _)| translation[idx + key.len()..].trim_start().starts_with('='))
}
