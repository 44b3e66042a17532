//! Diagnostic types for structural consistency results.
//!
//! Every check produces diagnostics rather than errors: a diagnostic names
//! the locale, the offending message id, the check category, and carries
//! enough payload to render a human-readable explanation. Diagnostics are
//! append-only during a run and become the comparison unit between runs.

use enum_dispatch::enum_dispatch;

// ============================================================
// Check categories
// ============================================================

/// Category identifier for each diagnostic kind, used for the per-run
/// summary and for naming checks in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckCategory {
    Mandatory,
    Links,
    Pilcrow,
    Html,
    FtlLiterals,
    XmlEntities,
    Printf,
    RepeatedId,
    Placeholders,
    FluentFunctions,
    Css,
}

impl std::fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckCategory::Mandatory => write!(f, "mandatory"),
            CheckCategory::Links => write!(f, "links"),
            CheckCategory::Pilcrow => write!(f, "pilcrow"),
            CheckCategory::Html => write!(f, "HTML"),
            CheckCategory::FtlLiterals => write!(f, "ftl-literals"),
            CheckCategory::XmlEntities => write!(f, "xml-entities"),
            CheckCategory::Printf => write!(f, "printf"),
            CheckCategory::RepeatedId => write!(f, "repeated-id"),
            CheckCategory::Placeholders => write!(f, "data-l10n-name"),
            CheckCategory::FluentFunctions => write!(f, "fluent-functions"),
            CheckCategory::Css => write!(f, "CSS"),
        }
    }
}

// ============================================================
// Diagnostic kinds
// ============================================================

/// A mandatory message id with no translation in this locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryMissingDiagnostic {
    pub id: String,
}

/// Translation contains a literal `http(s)://` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDiagnostic {
    pub id: String,
}

/// Translation contains a pilcrow character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilcrowDiagnostic {
    pub id: String,
}

/// Tag sequence of the translation differs from the reference beyond
/// reordering. Carries both sequences and both texts for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlMismatchDiagnostic {
    pub id: String,
    pub translation_tags: Vec<String>,
    pub reference_tags: Vec<String>,
    pub translation: String,
    pub reference: String,
}

/// Translation contains a Fluent string literal (`{ "`), usually a stray
/// quoted space copied from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluentLiteralDiagnostic {
    pub id: String,
}

/// Translation of a Fluent message contains a DTD-style entity (`&...;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlEntityDiagnostic {
    pub id: String,
}

/// Translation of a Fluent message contains printf-style variables
/// (`%S`, `%1$S`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfDiagnostic {
    pub id: String,
}

/// The message key itself appears inside the translation followed by `=`,
/// i.e. the translator pasted the whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedIdDiagnostic {
    pub id: String,
}

/// Reference carries `data-l10n-name` groups, translation has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMissingDiagnostic {
    pub id: String,
}

/// `data-l10n-name` groups differ between reference and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchDiagnostic {
    pub id: String,
}

/// Reference uses formatting functions, translation has none left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMissingDiagnostic {
    pub id: String,
}

/// Formatting function calls differ between reference and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMismatchDiagnostic {
    pub id: String,
    pub reference: String,
    pub translation: String,
}

/// A `.style` translation derives no CSS tokens while the reference does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssMissingDiagnostic {
    pub id: String,
}

/// CSS tokens of a `.style` translation differ from the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssMismatchDiagnostic {
    pub id: String,
}

// ============================================================
// Explain trait
// ============================================================

/// Trait implemented by every diagnostic kind to provide a consistent
/// interface to the report layer. Uses `enum_dispatch` for zero-cost
/// dispatch on the `DiagnosticKind` enum.
#[enum_dispatch]
pub trait Explain {
    /// Check category, for the per-run summary.
    fn category(&self) -> CheckCategory;

    /// Offending message id.
    fn id(&self) -> &str;

    /// Human-readable explanation line(s).
    fn explanation(&self) -> String;
}

#[enum_dispatch(Explain)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    MandatoryMissing(MandatoryMissingDiagnostic),
    Link(LinkDiagnostic),
    Pilcrow(PilcrowDiagnostic),
    HtmlMismatch(HtmlMismatchDiagnostic),
    FluentLiteral(FluentLiteralDiagnostic),
    XmlEntity(XmlEntityDiagnostic),
    Printf(PrintfDiagnostic),
    RepeatedId(RepeatedIdDiagnostic),
    PlaceholderMissing(PlaceholderMissingDiagnostic),
    PlaceholderMismatch(PlaceholderMismatchDiagnostic),
    FunctionMissing(FunctionMissingDiagnostic),
    FunctionMismatch(FunctionMismatchDiagnostic),
    CssMissing(CssMissingDiagnostic),
    CssMismatch(CssMismatchDiagnostic),
}

/// One structural finding for one message in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub locale: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(locale: &str, kind: impl Into<DiagnosticKind>) -> Self {
        Self {
            locale: locale.to_string(),
            kind: kind.into(),
        }
    }

    pub fn category(&self) -> CheckCategory {
        self.kind.category()
    }

    pub fn id(&self) -> &str {
        self.kind.id()
    }

    pub fn explanation(&self) -> String {
        self.kind.explanation()
    }
}

// ============================================================
// Explain implementations
// ============================================================

impl Explain for MandatoryMissingDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Mandatory
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Missing translation for mandatory key ({})", self.id)
    }
}

impl Explain for LinkDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Links
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Link in string ({})", self.id)
    }
}

impl Explain for PilcrowDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Pilcrow
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Pilcrow character in string ({})", self.id)
    }
}

impl Explain for HtmlMismatchDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Html
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!(
            "Mismatched HTML elements in string ({})\n\
             \x20 Translation tags ({}): {}\n\
             \x20 Reference tags ({}): {}\n\
             \x20 Translation: {}\n\
             \x20 Reference: {}",
            self.id,
            self.translation_tags.len(),
            self.translation_tags.join(", "),
            self.reference_tags.len(),
            self.reference_tags.join(", "),
            self.translation,
            self.reference
        )
    }
}

impl Explain for FluentLiteralDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::FtlLiterals
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Fluent literal in string ({})", self.id)
    }
}

impl Explain for XmlEntityDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::XmlEntities
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("XML entity in Fluent string ({})", self.id)
    }
}

impl Explain for PrintfDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Printf
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("printf variables in Fluent string ({})", self.id)
    }
}

impl Explain for RepeatedIdDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::RepeatedId
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Message ID is repeated in the Fluent string ({})", self.id)
    }
}

impl Explain for PlaceholderMissingDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Placeholders
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("data-l10n-name missing in Fluent string ({})", self.id)
    }
}

impl Explain for PlaceholderMismatchDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Placeholders
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("data-l10n-name mismatch in Fluent string ({})", self.id)
    }
}

impl Explain for FunctionMissingDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::FluentFunctions
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("Fluent function missing in Fluent string ({})", self.id)
    }
}

impl Explain for FunctionMismatchDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::FluentFunctions
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!(
            "Fluent function mismatch in Fluent string ({})\n\
             \x20 Reference: {}\n\
             \x20 Translation: {}",
            self.id, self.reference, self.translation
        )
    }
}

impl Explain for CssMissingDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Css
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("CSS value missing in Fluent string ({})", self.id)
    }
}

impl Explain for CssMismatchDiagnostic {
    fn category(&self) -> CheckCategory {
        CheckCategory::Css
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn explanation(&self) -> String {
        format!("CSS mismatch in Fluent string ({})", self.id)
    }
}

// ============================================================
// Tests
// ============================================================
