//! celgen_diagnostics: diagnostics for malformed Go source.
//!
//! The scanner and parser never abort on malformed Go source; they record
//! diagnostics here and keep going. Whoever drives them decides whether an
//! error-category diagnostic is fatal.

use celgen_core::text::TextSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A message template. `{0}`, `{1}`, ... are filled in from arguments.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A reported problem in one Go file.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Unset until the parser tags its diagnostics with the file name.
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn with_span(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn with_location(file: String, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: Some(file),
            ..Self::with_span(span, message, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    fn position(&self) -> u32 {
        self.span.map_or(0, |span| span.start)
    }
}

impl fmt::Display for Diagnostic {
    /// `file(offset): error E1101: text`, the file part only when known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            match self.span {
                Some(span) => write!(f, "{}({}): ", file, span.start)?,
                None => write!(f, "{}: ", file)?,
            }
        }
        write!(f, "{} E{}: {}", self.category, self.code, self.message_text)
    }
}

/// Substitute positional `{n}` placeholders.
pub fn format_message(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (i, arg)| text.replace(&format!("{{{}}}", i), arg))
}

/// Diagnostics of one scanned or parsed file.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// The error nearest the start of the file; warnings never count.
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.errors().min_by_key(|d| d.position())
    }

    fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop everything reported after the first `len` diagnostics.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn attach_file(&mut self, file_name: &str) {
        for diagnostic in self.diagnostics.iter_mut().filter(|d| d.file.is_none()) {
            diagnostic.file = Some(file_name.to_string());
        }
    }

    /// Order by file, then offset. Stable, so same-offset reports keep
    /// their insertion order.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.position().cmp(&b.position())));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1001, Error, "Invalid character '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const UNTERMINATED_RUNE_LITERAL: DiagnosticMessage = diag!(1003, Error, "Unterminated rune literal.");
    pub const UNTERMINATED_RAW_STRING_LITERAL: DiagnosticMessage = diag!(1004, Error, "Unterminated raw string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'*/' expected.");
    pub const INVALID_NUMERIC_LITERAL: DiagnosticMessage = diag!(1006, Error, "Invalid numeric literal '{0}'.");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1101, Error, "'{0}' expected.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1102, Error, "Identifier expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1103, Error, "Type expected.");
    pub const PACKAGE_CLAUSE_EXPECTED: DiagnosticMessage = diag!(1104, Error, "Package clause expected.");
    pub const NON_DECLARATION_STATEMENT_OUTSIDE_FUNCTION_BODY: DiagnosticMessage = diag!(1105, Error, "Non-declaration statement outside function body.");
    pub const IMPORTS_MUST_APPEAR_BEFORE_OTHER_DECLARATIONS: DiagnosticMessage = diag!(1106, Error, "Imports must appear before other declarations.");
    pub const MIXED_NAMED_AND_UNNAMED_PARAMETERS: DiagnosticMessage = diag!(1107, Error, "Mixed named and unnamed parameters.");
    pub const UNEXPECTED_END_OF_FILE: DiagnosticMessage = diag!(1108, Error, "Unexpected end of file; '{0}' expected.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1109, Error, "Maximum nesting depth exceeded.");
    pub const EMPTY_IMPORT_PATH: DiagnosticMessage = diag!(1110, Warning, "Empty import path.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
        assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "math.go".to_string(),
            TextSpan::new(12, 1),
            &messages::_0_EXPECTED,
            &[")"],
        );
        assert_eq!(diag.to_string(), "math.go(12): error E1101: ')' expected.");
    }

    #[test]
    fn test_first_error_skips_warnings() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_span(TextSpan::new(1, 1), &messages::EMPTY_IMPORT_PATH, &[]));
        collection.add(Diagnostic::with_span(TextSpan::new(40, 1), &messages::TYPE_EXPECTED, &[]));
        collection.add(Diagnostic::with_span(TextSpan::new(20, 1), &messages::IDENTIFIER_EXPECTED, &[]));
        assert_eq!(collection.error_count(), 2);
        let first = collection.first_error().map(|d| d.code);
        assert_eq!(first, Some(messages::IDENTIFIER_EXPECTED.code));
    }

    #[test]
    fn test_attach_file_and_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location(
            "b.go".to_string(),
            TextSpan::new(10, 1),
            &messages::TYPE_EXPECTED,
            &[],
        ));
        collection.add(Diagnostic::with_span(TextSpan::new(5, 1), &messages::IDENTIFIER_EXPECTED, &[]));
        collection.attach_file("a.go");
        collection.sort();
        assert_eq!(collection.diagnostics()[0].file.as_deref(), Some("a.go"));
        assert_eq!(collection.diagnostics()[1].file.as_deref(), Some("b.go"));
    }
}
