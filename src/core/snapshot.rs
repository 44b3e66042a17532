//! Loading of per-locale message table snapshots.
//!
//! A snapshot directory contains one `<locale>.json` file per locale, each a
//! flat JSON object mapping `"<file-path>:<key>"` to the message text. The
//! tables are immutable for the duration of a run and reloaded fresh on the
//! next one.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Flat message table for one locale: `"<file>:<key>"` → text.
///
/// A sorted map so every iteration over it is deterministic.
pub type MessageTable = BTreeMap<String, String>;

/// File-path component of a message id (`"browser/menu.ftl:save"` →
/// `"browser/menu.ftl"`). Ids without a separator are their own file part.
pub fn file_part(id: &str) -> &str {
    id.split(':').next().unwrap_or(id)
}

/// Key component of a message id (`"browser/menu.ftl:save"` → `"save"`).
pub fn key_part(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, key)) => key,
        None => id,
    }
}

/// Load the message table for one locale from `<root>/<locale>.json`.
pub fn load_table(root: &Path, locale: &str) -> Result<MessageTable> {
    let path = root.join(format!("{locale}.json"));
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let table: MessageTable = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    Ok(table)
}

/// Discover the locales available in a snapshot directory.
///
/// Every top-level `*.json` file counts as a locale; the reference locale is
/// removed from the list. The result is sorted by locale name so downstream
/// iteration and merging are deterministic.
pub fn discover_locales(root: &Path, reference_locale: &str) -> Result<Vec<String>> {
    if !root.is_dir() {
        anyhow::bail!("Snapshot directory not found: {}", root.display());
    }

    let mut locales = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            && stem != reference_locale
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_parts() {
        assert_eq!(file_part("browser/menu.ftl:save-command"), "browser/menu.ftl");
        assert_eq!(key_part("browser/menu.ftl:save-command"), "save-command");
        assert_eq!(file_part("no-separator"), "no-separator");
        assert_eq!(key_part("no-separator"), "no-separator");
    }

    #[test]
    fn test_load_table_and_discover_locales() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::write(
            root.join("en-US.json"),
            r#"{"a.ftl:one": "One", "a.ftl:two": "Two"}"#,
        )
        .unwrap();
        fs::write(root.join("fr.json"), r#"{"a.ftl:one": "Un"}"#).unwrap();
        fs::write(root.join("de.json"), r#"{"a.ftl:one": "Eins"}"#).unwrap();
        fs::write(root.join("notes.txt"), "not a snapshot").unwrap();

        let table = load_table(root, "en-US").expect("loads");
        assert_eq!(table.len(), 2);
        assert_eq!(table["a.ftl:one"], "One");

        let locales = discover_locales(root, "en-US").expect("scans");
        assert_eq!(locales, vec!["de".to_string(), "fr".to_string()]);
    }

    #[test]
    fn test_load_table_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_table(dir.path(), "it").is_err());
    }

    #[test]
    fn test_load_table_rejects_non_string_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("it.json"), r#"{"a.ftl:one": 3}"#).unwrap();
        assert!(load_table(dir.path(), "it").is_err());
    }
}
