//! celgen_parser: Recursive descent parser for Go.
//!
//! Parses token streams from the scanner into an arena-allocated AST that
//! covers package clauses, imports and declaration signatures.

mod parser;
mod utilities;

pub use parser::Parser;

use bumpalo::Bump;
use celgen_ast::node::SourceFile;
use celgen_diagnostics::DiagnosticCollection;

/// Parse one Go source file, returning the tree and every scanner and parser
/// diagnostic.
pub fn parse_source<'a>(
    arena: &'a Bump,
    file_name: &str,
    source_text: &str,
) -> (SourceFile<'a>, DiagnosticCollection) {
    let mut parser = Parser::new(arena, file_name, source_text);
    let source_file = parser.parse_source_file();
    (source_file, parser.take_diagnostics())
}
