//! Check context: configuration plus the immutable inputs of a run.
//!
//! The context loads everything fatal-on-failure up front (configuration,
//! reference table, exclusion document, locale list) and computes the
//! reference fingerprints lazily on first use. After construction it is
//! read-only; locale passes share it without locking.

use std::{cell::OnceCell, path::PathBuf};

use anyhow::{Context as _, Result, anyhow};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        engine::{self, ReferenceFingerprints, RunResult},
        exclusions::ExclusionSet,
        snapshot::{self, MessageTable},
    },
};

pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Resolved snapshot directory.
    pub snapshots_root: PathBuf,

    /// Reference message table, loaded eagerly: without it nothing can run.
    pub reference: MessageTable,

    /// Exclusion document, loaded eagerly for the same reason.
    pub exclusions: ExclusionSet,

    /// Locales to check, sorted by name.
    pub locales: Vec<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    /// Reference fingerprint indices, built on first access.
    fingerprints: OnceCell<ReferenceFingerprints>,
}

impl CheckContext {
    /// Create a context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid, the reference
    /// snapshot or the exclusion document cannot be loaded, or a locale
    /// requested with `--locale` has no snapshot.
    pub fn new(common: &CommonArgs, single_locale: Option<&str>) -> Result<Self> {
        let verbose = common.verbose;

        let config_result = load_config(std::path::Path::new("."))?;
        if verbose && !config_result.from_file {
            eprintln!("Note: no .locheckrc.json found, using default configuration");
        }
        let mut config = config_result.config;

        // CLI overrides (CLI > config file > defaults).
        if let Some(ref snapshots) = common.snapshots {
            config.snapshots_root = snapshots.to_string_lossy().to_string();
        }
        if let Some(ref exclusions) = common.exclusions {
            config.exclusions_file = exclusions.to_string_lossy().to_string();
        }
        if let Some(ref reference_locale) = common.reference_locale {
            config.reference_locale = reference_locale.clone();
        }

        let snapshots_root = PathBuf::from(&config.snapshots_root);

        let reference = snapshot::load_table(&snapshots_root, &config.reference_locale)
            .context("Reference table not available")?;

        let exclusions = ExclusionSet::load(
            std::path::Path::new(&config.exclusions_file),
            &config.excluded_products,
        )?;

        let locales = match single_locale {
            Some(locale) => {
                let available = snapshot::discover_locales(&snapshots_root, &config.reference_locale)?;
                if !available.iter().any(|l| l == locale) {
                    return Err(anyhow!(
                        "No snapshot for locale '{}' in '{}'",
                        locale,
                        snapshots_root.display()
                    ));
                }
                vec![locale.to_string()]
            }
            None => snapshot::discover_locales(&snapshots_root, &config.reference_locale)?,
        };

        Ok(Self {
            config,
            snapshots_root,
            reference,
            exclusions,
            locales,
            verbose,
            fingerprints: OnceCell::new(),
        })
    }

    /// Reference fingerprint indices (lazy initialization).
    pub fn fingerprints(&self) -> &ReferenceFingerprints {
        self.fingerprints.get_or_init(|| {
            ReferenceFingerprints::build(
                &self.reference,
                &self.exclusions,
                &self.config.ignored_id_substrings,
            )
        })
    }

    /// Run the full audit: validate the exclusion document, then compare
    /// every locale against the reference fingerprints.
    pub fn execute(&self) -> RunResult {
        let fingerprints = self.fingerprints();
        let snapshots_root = &self.snapshots_root;
        let mut result = engine::run(
            &self.reference,
            fingerprints,
            &self.exclusions,
            &self.locales,
            |locale| snapshot::load_table(snapshots_root, locale),
        );

        result
            .general_errors
            .extend(self.exclusions.validate(&self.reference));
        result.general_errors.sort();
        result
    }
}
