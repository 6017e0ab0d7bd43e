//! celgen_compiler: Generator orchestration.
//!
//! Lists the Go files of each directory, parses them, extracts eligible
//! methods and renders one binding file per package. Nothing touches the
//! disk until every directory has been generated.

mod error;
mod generator;
mod source;

pub use error::{GenerateError, ScanError};
pub use generator::{stale_files, write_all, GeneratedFile, Generator};
pub use source::{SourceScanner, SourceText};
