//! celgen_extractor: Selects the methods that become CEL functions.
//!
//! Walks a parsed Go file, applies the eligibility filters (blacklist,
//! result arity, receiver shape, variadic placement) and turns every
//! surviving method into a [`Declaration`] with mapped type descriptors and
//! the imports those types need.

mod blacklist;
mod declaration;
mod extractor;
mod imports;

pub use blacklist::{Blacklist, DEFAULT_BLACKLIST};
pub use declaration::{Declaration, GoImport, RejectedDeclaration, Rejection};
pub use extractor::{extract, namespace_for_file, DeclarationExtractor, ExtractedFile};
pub use imports::resolve_qualifier;
