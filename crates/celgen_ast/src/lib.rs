//! celgen_ast: the Go syntax tree celgen reads declarations from.
//!
//! Only what binding generation needs is modelled: the package clause,
//! imports, top-level declarations and the full type grammar. Function
//! bodies are recorded as ranges and never parsed.

pub mod generated;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
