//! Resolution of package qualifiers against a file's import table.

use crate::declaration::GoImport;
use celgen_ast::node::{default_package_name, ImportSpec};

/// Find the import a qualifier such as `corev1` in `corev1.Pod` refers to.
///
/// Qualifiers no import answers to are assumed to name a standard library
/// package whose path equals the qualifier (`time`, `strings`).
pub fn resolve_qualifier(qualifier: &str, imports: &[ImportSpec<'_>]) -> GoImport {
    match imports.iter().find(|import| import.is_referenced_as(qualifier)) {
        Some(import) if default_package_name(import.path) == qualifier => GoImport::new(import.path),
        Some(import) => GoImport::with_alias(qualifier, import.path),
        None => GoImport::new(qualifier),
    }
}
