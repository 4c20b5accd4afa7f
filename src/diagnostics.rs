//! Diagnostics sink and terminal reporter.
//!
//! Every stage that can complain takes `&mut Diagnostics` explicitly; fatal
//! problems are returned as `Err(Diagnostic)` and pushed by the driver, so a
//! sub-schema can be normalized in isolation and inspected afterwards.

use std::fmt;

use colored::Colorize;

use crate::json_ast::{line_col, ParseError, Span};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Aborts the document.
    Fail,
    /// Warning; compilation continues.
    Message,
}

/// Which pipeline stage raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Normalize,
}

/// The rule a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Syntax,
    TypeMismatch,
    ShapeViolation,
    SemanticViolation,
    Unsupported,
    NotYetSupported,
    Deprecated,
    PatternPortability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub stage: Stage,
    pub rule: Rule,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Normalize => "normalize",
        }
    }
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Syntax => "syntax",
            Rule::TypeMismatch => "type-mismatch",
            Rule::ShapeViolation => "shape-violation",
            Rule::SemanticViolation => "semantic-violation",
            Rule::Unsupported => "unsupported",
            Rule::NotYetSupported => "not-yet-supported",
            Rule::Deprecated => "deprecated",
            Rule::PatternPortability => "pattern-portability",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stage.as_str(), self.rule.as_str())
    }
}

impl Diagnostic {
    pub fn fail(stage: Stage, rule: Rule, message: impl Into<String>, span: Span) -> Self {
        Self { severity: Severity::Fail, message: message.into(), span, origin: Origin { stage, rule } }
    }

    pub fn message(stage: Stage, rule: Rule, message: impl Into<String>, span: Span) -> Self {
        Self { severity: Severity::Message, message: message.into(), span, origin: Origin { stage, rule } }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fail
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic::fail(Stage::Parse, Rule::Syntax, error.message, error.span)
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Fail => tracing::debug!(origin = %diagnostic.origin, "fatal: {}", diagnostic.message),
            Severity::Message => tracing::trace!(origin = %diagnostic.origin, "warning: {}", diagnostic.message),
        }
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.items.iter().any(Diagnostic::is_fatal)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| !d.is_fatal())
    }

    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.items.iter().find(|d| d.is_fatal())
    }

    /// Render against the source text, `vfile-reporter` style:
    ///
    /// ```text
    /// schema.json
    ///   3:17-3:19  error    "multipleOf" requires a number > 0, got -1  normalize:shape-violation
    ///
    /// ✖ 1 error
    /// ```
    pub fn report(&self, file_name: &str, source: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", file_name.underline()));

        let rows: Vec<(String, &Diagnostic)> = self
            .items
            .iter()
            .map(|d| {
                let (l1, c1) = line_col(source, d.span.start);
                let (l2, c2) = line_col(source, d.span.end);
                (format!("{l1}:{c1}-{l2}:{c2}"), d)
            })
            .collect();
        let width = rows.iter().map(|(pos, _)| pos.len()).max().unwrap_or(0);

        for (pos, d) in &rows {
            let label = match d.severity {
                Severity::Fail => format!("{:<7}", "error").red(),
                Severity::Message => format!("{:<7}", "warning").yellow(),
            };
            out.push_str(&format!(
                "  {pos:<width$}  {label}  {}  {}\n",
                d.message,
                d.origin.to_string().dimmed(),
            ));
        }

        let errors = self.items.iter().filter(|d| d.is_fatal()).count();
        let warnings = self.items.len() - errors;
        out.push('\n');
        out.push_str(&summary(errors, warnings));
        out.push('\n');
        out
    }
}

fn summary(errors: usize, warnings: usize) -> String {
    fn plural(n: usize, word: &str) -> String {
        if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") }
    }
    match (errors, warnings) {
        (0, 0) => format!("{} no issues found", "✔".green()),
        (0, w) => format!("{} {}", "⚠".yellow(), plural(w, "warning")),
        (e, 0) => format!("{} {}", "✖".red(), plural(e, "error")),
        (e, w) => format!("{} {}, {}", "✖".red(), plural(e, "error"), plural(w, "warning")),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_renders_stage_and_rule() {
        let origin = Origin { stage: Stage::Normalize, rule: Rule::ShapeViolation };
        assert_eq!(origin.to_string(), "normalize:shape-violation");
    }

    #[test]
    fn report_positions_and_summary() {
        colored::control::set_override(false);
        let source = "{\n  \"multipleOf\": -1,\n  \"foo\": 1\n}";
        let at = |needle: &str| {
            let start = source.find(needle).unwrap();
            Span::new(start, start + needle.len())
        };
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::message(Stage::Normalize, Rule::Unsupported, "Unsupported keyword \"foo\"", at("\"foo\": 1")));
        diags.push(Diagnostic::fail(Stage::Normalize, Rule::ShapeViolation, "bad multipleOf", at("-1")));
        assert!(diags.has_fatal());
        assert_eq!(diags.warnings().count(), 1);

        let report = diags.report("schema.json", source);
        assert!(report.starts_with("schema.json\n"));
        assert!(report.contains("2:17-2:19"), "{report}");
        assert!(report.contains("normalize:shape-violation"));
        assert!(report.trim_end().ends_with("1 error, 1 warning"), "{report}");
    }

    #[test]
    fn parse_errors_become_fatal_syntax_diagnostics() {
        let diag: Diagnostic = ParseError { message: "unexpected end of input".into(), span: Span::new(3, 3) }.into();
        assert!(diag.is_fatal());
        assert_eq!(diag.origin, Origin { stage: Stage::Parse, rule: Rule::Syntax });
    }
}
