//! celgen_scanner: Lexer/tokenizer for Go source code.
//!
//! Produces the token stream the parser consumes, including the semicolons
//! Go inserts automatically at line ends. Supports:
//! - All Go operators and delimiters
//! - Integer, floating-point, imaginary and rune literals
//! - Interpreted and raw string literals
//! - Unicode identifiers

mod char_codes;
mod scanner;

pub use scanner::{Scanner, ScannerState};
