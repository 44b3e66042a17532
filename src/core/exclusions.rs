//! Exclusion document loading and the three-tier suppression lookup.
//!
//! Checks are suppressed per category at three levels: whole resource files
//! (path prefixes), single message ids, and (locale, message id) pairs. The
//! same lookup order applies to every category, so translators get one
//! consistent suppression model across all checks.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::snapshot::{MessageTable, file_part};

/// Exclusion category, matching the top-level keys of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Ignore,
    Http,
    Html,
    FtlLiterals,
    Xml,
    Printf,
    FluentFunctions,
    Mandatory,
}

impl Category {
    /// Document key for this category.
    pub fn key(self) -> &'static str {
        match self {
            Category::Ignore => "ignore",
            Category::Http => "http",
            Category::Html => "HTML",
            Category::FtlLiterals => "ftl_literals",
            Category::Xml => "xml",
            Category::Printf => "printf",
            Category::FluentFunctions => "fluent_functions",
            Category::Mandatory => "mandatory",
        }
    }

    pub fn all() -> [Category; 8] {
        [
            Category::Ignore,
            Category::Http,
            Category::Html,
            Category::FtlLiterals,
            Category::Xml,
            Category::Printf,
            Category::FluentFunctions,
            Category::Mandatory,
        ]
    }
}

/// Three partitions of one category's exclusions.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryExclusions {
    /// Resource-file path prefixes excluded wholesale.
    #[serde(default)]
    pub files: Vec<String>,

    /// Message ids excluded for every locale.
    #[serde(default)]
    pub strings: BTreeSet<String>,

    /// Message ids excluded for specific locales only.
    #[serde(default)]
    pub locales: BTreeMap<String, BTreeSet<String>>,
}

/// The full exclusion document, keyed by category.
#[derive(Debug, Default, Deserialize)]
pub struct ExclusionSet {
    #[serde(default)]
    ignore: CategoryExclusions,
    #[serde(default)]
    http: CategoryExclusions,
    #[serde(rename = "HTML", default)]
    html: CategoryExclusions,
    #[serde(default)]
    ftl_literals: CategoryExclusions,
    #[serde(default)]
    xml: CategoryExclusions,
    #[serde(default)]
    printf: CategoryExclusions,
    #[serde(default)]
    fluent_functions: CategoryExclusions,
    #[serde(default)]
    mandatory: CategoryExclusions,

    /// Product-area id prefixes, shared by every category. Not part of the
    /// document; injected from the configuration after loading.
    #[serde(skip)]
    excluded_products: Vec<String>,
}

impl ExclusionSet {
    /// Load the document from disk. A missing or unparsable document is
    /// fatal: running without the exclusion list would flood the output
    /// with diagnostics already triaged by localizers.
    pub fn load(path: &Path, excluded_products: &[String]) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read exclusions: {}", path.display()))?;
        let mut set: ExclusionSet = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse exclusions: {}", path.display()))?;
        set.excluded_products = excluded_products.to_vec();
        Ok(set)
    }

    /// Build an exclusion set directly, without a document on disk.
    pub fn with_products(excluded_products: &[String]) -> Self {
        Self {
            excluded_products: excluded_products.to_vec(),
            ..Self::default()
        }
    }

    pub fn category(&self, category: Category) -> &CategoryExclusions {
        match category {
            Category::Ignore => &self.ignore,
            Category::Http => &self.http,
            Category::Html => &self.html,
            Category::FtlLiterals => &self.ftl_literals,
            Category::Xml => &self.xml,
            Category::Printf => &self.printf,
            Category::FluentFunctions => &self.fluent_functions,
            Category::Mandatory => &self.mandatory,
        }
    }

    /// Ids that must be translated in every locale.
    pub fn mandatory_ids(&self) -> &BTreeSet<String> {
        &self.mandatory.strings
    }

    /// Whether `id` is excluded from excluded-product areas. Applied when
    /// building the reference id list, independent of any category.
    pub fn in_excluded_product(&self, id: &str) -> bool {
        self.excluded_products.iter().any(|p| id.starts_with(p))
    }

    /// Three-tier suppression lookup, identical for every category.
    ///
    /// An id is ignored when, in order: it has no translation in this
    /// locale; it belongs to an excluded product area; its whole resource
    /// file is excluded for the category; it is in the category's flat id
    /// list; or it is in the category's per-locale list for this locale.
    pub fn should_ignore(
        &self,
        category: Category,
        id: &str,
        locale: &str,
        locale_table: &MessageTable,
    ) -> bool {
        if !locale_table.contains_key(id) {
            return true;
        }

        if self.in_excluded_product(id) {
            return true;
        }

        let exclusions = self.category(category);

        if exclusions.files.iter().any(|f| file_part(id).starts_with(f)) {
            return true;
        }

        if exclusions.strings.contains(id) {
            return true;
        }

        if let Some(ids) = exclusions.locales.get(locale)
            && ids.contains(id)
        {
            return true;
        }

        false
    }

    /// Verify that every id referenced by the document still exists in the
    /// reference table. Stale entries accumulate as localizers remove
    /// strings; each one is reported as a general (non-locale) error.
    pub fn validate(&self, reference: &MessageTable) -> Vec<String> {
        let mut errors = Vec::new();

        for category in Category::all() {
            let exclusions = self.category(category);
            for id in &exclusions.strings {
                if !reference.contains_key(id) {
                    errors.push(format!(
                        "Non existing strings in exclusions file ({}, strings): {}",
                        category.key(),
                        id
                    ));
                }
            }
            for (locale, ids) in &exclusions.locales {
                for id in ids {
                    if !reference.contains_key(id) {
                        errors.push(format!(
                            "Non existing strings in exclusions file ({}, locales, {}): {}",
                            category.key(),
                            locale,
                            id
                        ));
                    }
                }
            }
        }

        errors
    }
}
