//! Fatal errors of a generator run.

use celgen_core::LineAndColumn;
use celgen_options::OptionsError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while listing, reading or parsing source files.
#[derive(Error, Debug, Diagnostic)]
pub enum ScanError {
    #[error("{} is not a directory", .path.display())]
    #[diagnostic(code(celgen::scan::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("cannot list directory {}", .path.display())]
    #[diagnostic(code(celgen::scan::read_dir))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot read {}", .path.display())]
    #[diagnostic(code(celgen::scan::read_file))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (invalid byte at offset {offset})", .path.display())]
    #[diagnostic(code(celgen::scan::utf8))]
    InvalidUtf8 { path: PathBuf, offset: usize },

    #[error("{file}:{location}: {message}")]
    #[diagnostic(
        code(celgen::scan::syntax),
        help("only files that parse cleanly can be scanned")
    )]
    Syntax {
        file: String,
        location: LineAndColumn,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error")]
        span: SourceSpan,
    },

    #[error(
        "{} declares package {found} but {} declares package {expected}",
        .file.display(),
        .first_file.display()
    )]
    #[diagnostic(
        code(celgen::scan::mixed_packages),
        help("all Go files of one directory must belong to the same package")
    )]
    MixedPackages {
        file: PathBuf,
        found: String,
        first_file: PathBuf,
        expected: String,
    },
}

/// Any fatal error of a run.
#[derive(Error, Debug, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Options(#[from] OptionsError),

    #[error("cannot write {}", .path.display())]
    #[diagnostic(code(celgen::write))]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot remove obsolete {}", .path.display())]
    #[diagnostic(code(celgen::remove))]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
