//! Run-over-run comparison and archival.
//!
//! Structural audits are only actionable as deltas: hundreds of known
//! diagnostics stay open for months while localizers work through them, so
//! each run is compared against the previous one and only the new and
//! fixed lines are surfaced. The full state is archived as JSON for the
//! dashboard that serves the history.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::RunResult;

const PREVIOUS_FILE: &str = "previous_errors.json";
const ARCHIVE_FILE: &str = "checks.json";
const ERRORS_FILE: &str = "errors.json";

/// Difference between this run and the previous one.
#[derive(Debug, Default)]
pub struct RunDelta {
    pub new: Vec<String>,
    pub fixed: Vec<String>,
    pub total: usize,
}

impl RunDelta {
    pub fn has_changes(&self) -> bool {
        !self.new.is_empty() || !self.fixed.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct StoredErrors {
    #[serde(default)]
    errors: Vec<String>,
}

/// Flatten a run result into the sorted `locale - explanation` lines used
/// for run-over-run comparison.
pub fn current_error_lines(result: &RunResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .diagnostics
        .iter()
        .map(|diagnostic| format!("{} - {}", diagnostic.locale, diagnostic.explanation()))
        .collect();
    lines.sort();
    lines
}

/// Lines of `a` that are not in `b`, preserving order.
fn diff(a: &[String], b: &[String]) -> Vec<String> {
    let known: HashSet<&String> = b.iter().collect();
    a.iter().filter(|line| !known.contains(line)).cloned().collect()
}

/// Compare the current run with the previous one stored in `output_dir`,
/// append an entry to the archive, and persist the current state for the
/// next run. Returns the delta for display.
pub fn compare_and_archive(output_dir: &Path, result: &RunResult) -> Result<RunDelta> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let current = current_error_lines(result);

    // A missing or corrupt previous state only means everything counts as
    // new; it never blocks the run.
    let previous_path = output_dir.join(PREVIOUS_FILE);
    let previous = match fs::read_to_string(&previous_path) {
        Ok(content) => match serde_json::from_str::<StoredErrors>(&content) {
            Ok(stored) => stored,
            Err(error) => {
                eprintln!("Warning: could not parse {}: {}", previous_path.display(), error);
                StoredErrors::default()
            }
        },
        Err(_) => StoredErrors::default(),
    };

    let delta = RunDelta {
        new: diff(&current, &previous.errors),
        fixed: diff(&previous.errors, &current),
        total: current.len(),
    };

    // Append this run to the archive, keyed by timestamp.
    let archive_path = output_dir.join(ARCHIVE_FILE);
    let mut archive: serde_json::Map<String, Value> = match fs::read_to_string(&archive_path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse archive: {}", archive_path.display()))?,
        Err(_) => serde_json::Map::new(),
    };

    let mut entry = serde_json::Map::new();
    if !delta.new.is_empty() {
        entry.insert("new".to_string(), json!(delta.new));
    }
    if !delta.fixed.is_empty() {
        entry.insert("fixed".to_string(), json!(delta.fixed));
    }
    let message = if delta.has_changes() {
        format!("Total errors: {}", delta.total)
    } else {
        format!("No changes ({}).", delta.total)
    };
    entry.insert("message".to_string(), json!(message));

    let timestamp = jiff::Zoned::now().strftime("%Y-%m-%d %H:%M").to_string();
    archive.insert(timestamp, Value::Object(entry));
    fs::write(&archive_path, serde_json::to_string_pretty(&archive)?)
        .with_context(|| format!("Failed to write {}", archive_path.display()))?;

    // Full current state, for the dashboard.
    let output_data = json!({
        "errors": current,
        "general": result.general_errors,
        "summary": result.summary,
    });
    fs::write(
        output_dir.join(ERRORS_FILE),
        serde_json::to_string_pretty(&output_data)?,
    )?;

    // State for the next comparison.
    fs::write(
        &previous_path,
        serde_json::to_string_pretty(&json!({ "errors": current }))?,
    )?;

    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::{Diagnostic, LinkDiagnostic};
    use pretty_assertions::assert_eq;

    fn result_with(ids: &[(&str, &str)]) -> RunResult {
        let mut result = RunResult::default();
        for (locale, id) in ids {
            result.diagnostics.push(Diagnostic::new(
                locale,
                LinkDiagnostic { id: id.to_string() },
            ));
        }
        result
    }

    #[test]
    fn test_first_run_reports_everything_as_new() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = result_with(&[("fr", "a.ftl:x"), ("de", "a.ftl:y")]);

        let delta = compare_and_archive(dir.path(), &result).expect("archives");
        assert_eq!(delta.new.len(), 2);
        assert!(delta.fixed.is_empty());
        assert_eq!(delta.total, 2);
        // Lines are sorted for stable comparison.
        assert!(delta.new[0].starts_with("de - "));
        assert!(delta.new[1].starts_with("fr - "));
    }

    #[test]
    fn test_identical_rerun_has_no_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = result_with(&[("fr", "a.ftl:x")]);

        compare_and_archive(dir.path(), &result).expect("archives");
        let delta = compare_and_archive(dir.path(), &result).expect("archives");
        assert!(!delta.has_changes());
        assert_eq!(delta.total, 1);
    }

    #[test]
    fn test_fixed_and_new_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        compare_and_archive(dir.path(), &result_with(&[("fr", "a.ftl:x")])).expect("archives");

        let delta = compare_and_archive(dir.path(), &result_with(&[("fr", "a.ftl:z")]))
            .expect("archives");
        assert_eq!(delta.new.len(), 1);
        assert_eq!(delta.fixed.len(), 1);
        assert!(delta.new[0].contains("a.ftl:z"));
        assert!(delta.fixed[0].contains("a.ftl:x"));
    }

    #[test]
    fn test_corrupt_previous_state_is_tolerated() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(PREVIOUS_FILE), "not json").unwrap();

        let delta = compare_and_archive(dir.path(), &result_with(&[("fr", "a.ftl:x")]))
            .expect("archives");
        assert_eq!(delta.new.len(), 1);
    }
}
