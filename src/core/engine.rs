//! The consistency engine.
//!
//! Builds every reference fingerprint index once, then walks the locales.
//! Locale passes are mutually independent: each reads the shared reference
//! indices and the exclusion set (both immutable) and writes only into its
//! own report, so the passes run on a rayon thread pool and are merged in
//! locale-name order afterwards. A locale whose snapshot cannot be loaded
//! is skipped and surfaces as a general error; the run always completes.

use std::collections::BTreeMap;

use anyhow::Result;
use rayon::prelude::*;

use crate::core::exclusions::ExclusionSet;
use crate::core::fingerprint::{
    FunctionCall, TagExtractor, css_tokens, function_calls, html_tags, is_style_id,
    placeholder_groups,
};
use crate::core::snapshot::{MessageTable, file_part};
use crate::issues::Diagnostic;
use crate::rules::{
    css::check_css, ftl::check_ftl, functions::check_functions, html::check_html,
    mandatory::check_mandatory, placeholders::check_placeholders, textual::check_textual,
};

/// Fluent resource file extension; only these ids get the Fluent-specific
/// fingerprints.
const FTL_EXTENSION: &str = ".ftl";

/// All fingerprint indices over the reference table, built once per run.
///
/// The index vectors are populated from a sorted map, so they are sorted by
/// message id and every downstream iteration is deterministic.
#[derive(Debug, Default)]
pub struct ReferenceFingerprints {
    /// Every checkable reference id (product and substring filters applied).
    pub ids: Vec<String>,
    /// The subset of `ids` living in Fluent resource files.
    pub ftl_ids: Vec<String>,
    /// id → ordered tag descriptor sequence, for ids that carry markup.
    pub html: Vec<(String, Vec<String>)>,
    /// id → CSS digit tokens, for `.style` ids.
    pub css: Vec<(String, Vec<String>)>,
    /// id → canonical formatting call list, for ids that use functions.
    pub functions: Vec<(String, Vec<FunctionCall>)>,
    /// id → sorted placeholder group names, for ids that declare groups.
    pub placeholders: Vec<(String, Vec<String>)>,
    /// Reference messages that could not be fingerprinted (selector with no
    /// default variant).
    pub errors: Vec<String>,
}

impl ReferenceFingerprints {
    pub fn build(
        reference: &MessageTable,
        exclusions: &ExclusionSet,
        ignored_id_substrings: &[String],
    ) -> Self {
        let mut fingerprints = Self::default();
        let mut extractor = TagExtractor::new();

        for (id, text) in reference {
            if exclusions.in_excluded_product(id) {
                continue;
            }
            if ignored_id_substrings.iter().any(|s| id.contains(s)) {
                continue;
            }
            fingerprints.ids.push(id.clone());

            match html_tags(text, &mut extractor) {
                Ok(tags) if !tags.is_empty() => fingerprints.html.push((id.clone(), tags)),
                Ok(_) => {}
                Err(error) => fingerprints
                    .errors
                    .push(format!("Cannot flatten reference string ({id}): {error}")),
            }

            if !file_part(id).ends_with(FTL_EXTENSION) {
                continue;
            }
            fingerprints.ftl_ids.push(id.clone());

            let groups = placeholder_groups(text);
            if !groups.is_empty() {
                fingerprints.placeholders.push((id.clone(), groups));
            }

            if is_style_id(id) {
                fingerprints.css.push((id.clone(), css_tokens(text)));
            }

            let calls = function_calls(text);
            if !calls.is_empty() {
                fingerprints.functions.push((id.clone(), calls));
            }
        }

        fingerprints
    }
}

/// One worker's output: everything a locale pass produced.
#[derive(Debug, Default)]
struct LocaleReport {
    diagnostics: Vec<Diagnostic>,
    order_only: usize,
    errors: Vec<String>,
    loaded: bool,
}

/// Merged result of a full run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// All diagnostics, in locale-name order.
    pub diagnostics: Vec<Diagnostic>,
    /// Non-locale errors (stale exclusions, unloadable snapshots,
    /// unflattenable messages). Sorted.
    pub general_errors: Vec<String>,
    /// Diagnostic count per category label.
    pub summary: BTreeMap<String, usize>,
    /// HTML sequences that differed only in tag order.
    pub order_only: usize,
    /// Locales whose snapshot loaded and was checked.
    pub locales_checked: usize,
    /// Reference messages eligible for checking.
    pub messages_checked: usize,
}

/// Run every check for every locale.
///
/// `locales` is expected sorted; the merge preserves its order, which makes
/// two runs over identical inputs byte-identical.
pub fn run<F>(
    reference: &MessageTable,
    fingerprints: &ReferenceFingerprints,
    exclusions: &ExclusionSet,
    locales: &[String],
    loader: F,
) -> RunResult
where
    F: Fn(&str) -> Result<MessageTable> + Sync,
{
    let reports: Vec<LocaleReport> = locales
        .par_iter()
        .map(|locale| {
            let table = match loader(locale) {
                Ok(table) => table,
                Err(error) => {
                    return LocaleReport {
                        errors: vec![format!("Error loading locale {locale}: {error:#}")],
                        ..LocaleReport::default()
                    };
                }
            };
            check_locale(locale, &table, reference, fingerprints, exclusions)
        })
        .collect();

    let mut result = RunResult {
        messages_checked: fingerprints.ids.len(),
        ..RunResult::default()
    };
    result.general_errors.extend(fingerprints.errors.clone());

    for report in reports {
        if report.loaded {
            result.locales_checked += 1;
        }
        result.order_only += report.order_only;
        result.general_errors.extend(report.errors);
        result.diagnostics.extend(report.diagnostics);
    }

    for diagnostic in &result.diagnostics {
        *result
            .summary
            .entry(diagnostic.category().to_string())
            .or_insert(0) += 1;
    }

    result.general_errors.sort();
    result
}

/// Run the full check battery for one locale, in a fixed order so the
/// merged output is stable.
fn check_locale(
    locale: &str,
    table: &MessageTable,
    reference: &MessageTable,
    fingerprints: &ReferenceFingerprints,
    exclusions: &ExclusionSet,
) -> LocaleReport {
    let mut report = LocaleReport {
        loaded: true,
        ..LocaleReport::default()
    };

    report
        .diagnostics
        .extend(check_mandatory(locale, table, exclusions));
    report.diagnostics.extend(check_textual(
        locale,
        &fingerprints.ids,
        table,
        exclusions,
    ));

    let html = check_html(locale, &fingerprints.html, reference, table, exclusions);
    report.diagnostics.extend(html.diagnostics);
    report.order_only += html.order_only;
    report.errors.extend(html.errors);

    report.diagnostics.extend(check_ftl(
        locale,
        &fingerprints.ftl_ids,
        table,
        exclusions,
    ));
    report.diagnostics.extend(check_placeholders(
        locale,
        &fingerprints.placeholders,
        table,
        exclusions,
    ));
    report.diagnostics.extend(check_functions(
        locale,
        &fingerprints.functions,
        reference,
        table,
        exclusions,
    ));
    report
        .diagnostics
        .extend(check_css(locale, &fingerprints.css, table, exclusions));

    report
}
