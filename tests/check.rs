//! End-to-end checks through the library API: snapshot directory on disk,
//! exclusion document, context construction, full engine run.

use std::fs;
use std::path::PathBuf;

use locheck::cli::args::CommonArgs;
use locheck::core::CheckContext;
use locheck::history;
use locheck::issues::CheckCategory;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Corpus {
    dir: TempDir,
    snapshots: PathBuf,
    exclusions: PathBuf,
}

impl Corpus {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshots = dir.path().join("snapshots");
        fs::create_dir(&snapshots).expect("create snapshots dir");
        let exclusions = dir.path().join("exclusions.json");
        fs::write(&exclusions, "{}").expect("write exclusions");
        Self {
            dir,
            snapshots,
            exclusions,
        }
    }

    fn write_locale(&self, locale: &str, entries: &[(&str, &str)]) {
        let table: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        fs::write(
            self.snapshots.join(format!("{locale}.json")),
            serde_json::to_string_pretty(&table).unwrap(),
        )
        .expect("write snapshot");
    }

    fn write_exclusions(&self, content: &str) {
        fs::write(&self.exclusions, content).expect("write exclusions");
    }

    fn context(&self) -> CheckContext {
        self.try_context().expect("context builds")
    }

    fn try_context(&self) -> anyhow::Result<CheckContext> {
        let common = CommonArgs {
            snapshots: Some(self.snapshots.clone()),
            exclusions: Some(self.exclusions.clone()),
            reference_locale: Some("en-US".to_string()),
            verbose: false,
        };
        CheckContext::new(&common, None)
    }
}

#[test]
fn order_only_html_reordering_is_not_a_mismatch() {
    let corpus = Corpus::new();
    corpus.write_locale(
        "en-US",
        &[("browser/panel.ftl:intro", "<b>bold</b> then <i>italic</i>")],
    );
    corpus.write_locale(
        "he",
        &[("browser/panel.ftl:intro", "<i>kursiv</i> ve <b>mudgash</b>")],
    );

    let result = corpus.context().execute();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.order_only, 1);
}

#[test]
fn genuine_html_mismatch_is_one_diagnostic() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:intro", "<b>bold</b>")]);
    corpus.write_locale(
        "fr",
        &[("browser/panel.ftl:intro", "<b>gras</b> et <i>italique</i>")],
    );

    let result = corpus.context().execute();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].category(), CheckCategory::Html);
    assert!(
        result.diagnostics[0]
            .explanation()
            .starts_with("Mismatched HTML elements in string (browser/panel.ftl:intro)")
    );
}

#[test]
fn untranslated_messages_are_silently_skipped() {
    let corpus = Corpus::new();
    corpus.write_locale(
        "en-US",
        &[
            ("browser/panel.ftl:intro", "<b>bold</b>"),
            ("browser/panel.ftl:other", "plain"),
        ],
    );
    // The locale translated nothing at all.
    corpus.write_locale("fr", &[]);

    let result = corpus.context().execute();
    assert!(result.diagnostics.is_empty());
    assert!(result.general_errors.is_empty());
    assert_eq!(result.locales_checked, 1);
}

#[test]
fn locale_exclusion_suppresses_only_that_locale() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:intro", "<b>bold</b>")]);
    for locale in ["de", "fr"] {
        corpus.write_locale(locale, &[("browser/panel.ftl:intro", "no markup")]);
    }
    corpus.write_exclusions(
        r#"{"HTML": {"locales": {"fr": ["browser/panel.ftl:intro"]}}}"#,
    );

    let result = corpus.context().execute();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].locale, "de");
}

#[test]
fn mandatory_keys_are_checked_despite_other_exclusions() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/update.ftl:update-title", "Update")]);
    corpus.write_locale("fr", &[]);
    // Even listed under `ignore`, a mandatory key must be translated.
    corpus.write_exclusions(
        r#"{
            "ignore": {"strings": ["browser/update.ftl:update-title"]},
            "mandatory": {"strings": ["browser/update.ftl:update-title"]}
        }"#,
    );

    let result = corpus.context().execute();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].category(), CheckCategory::Mandatory);
    assert_eq!(
        result.diagnostics[0].explanation(),
        "Missing translation for mandatory key (browser/update.ftl:update-title)"
    );
}

#[test]
fn stale_exclusion_entries_become_general_errors() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:intro", "plain")]);
    corpus.write_locale("fr", &[("browser/panel.ftl:intro", "plaine")]);
    corpus.write_exclusions(r#"{"http": {"strings": ["browser/removed.ftl:gone"]}}"#);

    let result = corpus.context().execute();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.general_errors.len(), 1);
    assert!(result.general_errors[0].contains("browser/removed.ftl:gone"));
}

#[test]
fn corrupt_locale_snapshot_skips_only_that_locale() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:intro", "<b>bold</b>")]);
    corpus.write_locale("fr", &[("browser/panel.ftl:intro", "no markup")]);
    fs::write(corpus.snapshots.join("de.json"), "{ not json").expect("write corrupt");

    let result = corpus.context().execute();
    assert_eq!(result.locales_checked, 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].locale, "fr");
    assert_eq!(result.general_errors.len(), 1);
    assert!(result.general_errors[0].contains("Error loading locale de"));
}

#[test]
fn missing_reference_table_is_fatal() {
    let corpus = Corpus::new();
    corpus.write_locale("fr", &[("browser/panel.ftl:intro", "texte")]);

    assert!(corpus.try_context().is_err());
}

#[test]
fn missing_exclusion_document_is_fatal() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:intro", "plain")]);
    fs::remove_file(&corpus.exclusions).expect("remove exclusions");

    assert!(corpus.try_context().is_err());
}

#[test]
fn selector_messages_compare_on_default_variant() {
    let corpus = Corpus::new();
    corpus.write_locale(
        "en-US",
        &[(
            "browser/tabs.ftl:close-tabs",
            "{ $count ->\n    [one] Close <b>one</b> tab\n   *[other] Close <b>all</b> tabs\n }",
        )],
    );
    // The translation drops the non-default variant entirely; only the
    // default branch participates in the comparison.
    corpus.write_locale(
        "fr",
        &[(
            "browser/tabs.ftl:close-tabs",
            "{ $count ->\n   *[other] Fermer <b>tous</b> les onglets\n }",
        )],
    );

    let result = corpus.context().execute();
    assert!(result.diagnostics.is_empty());
}

#[test]
fn full_battery_across_categories() {
    let corpus = Corpus::new();
    corpus.write_locale(
        "en-US",
        &[
            ("browser/panel.ftl:width.style", "width: 10px 2em"),
            (
                "browser/panel.ftl:ratio",
                "{ NUMBER($ratio, minimumFractionDigits: 2) }",
            ),
            (
                "browser/panel.ftl:learn-more",
                r#"Read the <a data-l10n-name="support">support article</a>"#,
            ),
            ("browser/panel.ftl:plain", "Nothing structural"),
        ],
    );
    corpus.write_locale(
        "it",
        &[
            ("browser/panel.ftl:width.style", "width: 11px 2em"),
            ("browser/panel.ftl:ratio", "{ NUMBER($ratio) }"),
            (
                "browser/panel.ftl:learn-more",
                r#"Leggi l'<a data-l10n-name="support">articolo</a>"#,
            ),
            ("browser/panel.ftl:plain", "Vedi https://example.com ¶"),
        ],
    );

    let result = corpus.context().execute();
    let mut categories: Vec<String> = result
        .diagnostics
        .iter()
        .map(|d| d.category().to_string())
        .collect();
    categories.sort();
    assert_eq!(categories, vec!["CSS", "fluent-functions", "links", "pilcrow"]);
    assert_eq!(result.summary.len(), 4);
    assert_eq!(result.summary.get("CSS"), Some(&1));
}

#[test]
fn rerun_is_byte_identical() {
    let corpus = Corpus::new();
    corpus.write_locale(
        "en-US",
        &[
            ("browser/panel.ftl:a", "<b>x</b>"),
            ("browser/panel.ftl:b", "plain http-free"),
        ],
    );
    for locale in ["de", "fr", "it", "ja", "zh-CN"] {
        corpus.write_locale(
            locale,
            &[
                ("browser/panel.ftl:a", "no markup"),
                ("browser/panel.ftl:b", "see https://example.com"),
            ],
        );
    }

    let first = history::current_error_lines(&corpus.context().execute());
    let second = history::current_error_lines(&corpus.context().execute());
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
}

#[test]
fn history_reports_new_and_fixed_lines() {
    let corpus = Corpus::new();
    corpus.write_locale("en-US", &[("browser/panel.ftl:a", "<b>x</b>")]);
    corpus.write_locale("fr", &[("browser/panel.ftl:a", "no markup")]);

    let output = corpus.dir.path().join("output");
    let result = corpus.context().execute();
    let delta = history::compare_and_archive(&output, &result).expect("archives");
    assert_eq!(delta.new.len(), 1);

    // Fix the translation: the next run reports the line as fixed.
    corpus.write_locale("fr", &[("browser/panel.ftl:a", "<b>gras</b>")]);
    let result = corpus.context().execute();
    let delta = history::compare_and_archive(&output, &result).expect("archives");
    assert!(delta.new.is_empty());
    assert_eq!(delta.fixed.len(), 1);
    assert!(output.join("checks.json").exists());
    assert!(output.join("errors.json").exists());
}
