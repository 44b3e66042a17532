//! Report formatting and printing utilities.
//!
//! Renders a run result to the terminal: per-locale diagnostic sections, a
//! locales-with-errors recap, the per-category summary and the general
//! (non-locale) errors. Separate from core logic so locheck can be used as
//! a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::RunResult;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print a run result to stdout.
pub fn print(result: &RunResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a run result to a custom writer. Useful for testing or
/// redirecting output.
pub fn print_to<W: Write>(result: &RunResult, verbose: bool, writer: &mut W) {
    if result.diagnostics.is_empty() && result.general_errors.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} locale{} against {} reference messages - no issues found",
                result.locales_checked,
                if result.locales_checked == 1 { "" } else { "s" },
                result.messages_checked
            )
            .green()
        );
        return;
    }

    let mut locales_with_errors: Vec<(String, usize)> = Vec::new();

    // Diagnostics arrive merged in locale order; group consecutive runs.
    let mut index = 0;
    while index < result.diagnostics.len() {
        let locale = &result.diagnostics[index].locale;
        let end = result.diagnostics[index..]
            .iter()
            .position(|d| &d.locale != locale)
            .map_or(result.diagnostics.len(), |offset| index + offset);
        let count = end - index;

        let _ = writeln!(
            writer,
            "\n{} ({})",
            format!("Locale: {locale}").bold(),
            count
        );
        for diagnostic in &result.diagnostics[index..end] {
            let _ = writeln!(writer, "- {}", diagnostic.explanation());
        }

        locales_with_errors.push((locale.clone(), count));
        index = end;
    }

    let total: usize = locales_with_errors.iter().map(|(_, n)| n).sum();
    if total > 0 {
        let _ = writeln!(writer, "\n{}", format!("Total errors: {total}").bold());
        let _ = writeln!(
            writer,
            "\nLocales with errors ({} locales):",
            locales_with_errors.len()
        );
        for (locale, count) in &locales_with_errors {
            let _ = writeln!(writer, "- {locale} ({count})");
        }
    } else {
        let _ = writeln!(writer, "\n{}", "No errors".green());
    }

    if !result.summary.is_empty() {
        let _ = writeln!(writer, "\nErrors summary by type:");
        for (category, count) in &result.summary {
            let _ = writeln!(writer, "- {category}: {count}");
        }
    }

    if verbose && result.order_only > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} HTML sequence(s) differed only in tag order",
            "note:".bold(),
            result.order_only
        );
    }

    if !result.general_errors.is_empty() {
        let _ = writeln!(
            writer,
            "\n{}",
            format!("General errors ({} errors):", result.general_errors.len())
                .bold()
                .yellow()
        );
        for error in &result.general_errors {
            let _ = writeln!(writer, "{error}");
        }
    }
}
