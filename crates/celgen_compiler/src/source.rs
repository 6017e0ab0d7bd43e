//! The source scanner: lists Go files of each directory and loads them.

use crate::error::ScanError;
use celgen_ast::node::SourceFile;
use celgen_core::{LineMap, SyntaxArena, TextSpan};
use celgen_parser::parse_source;
use miette::NamedSource;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One loaded `.go` file.
#[derive(Debug, Clone)]
pub struct SourceText {
    /// The scanned directory the file lives in.
    pub directory: PathBuf,
    pub path: PathBuf,
    /// `path` as shown in diagnostics.
    pub file_name: String,
    pub text: String,
}

impl SourceText {
    /// Parse the file; any error-category diagnostic is fatal.
    pub fn parse<'a>(&self, arena: &'a SyntaxArena) -> Result<SourceFile<'a>, ScanError> {
        let (tree, diagnostics) = parse_source(arena.bump(), &self.file_name, &self.text);
        match diagnostics.first_error() {
            None => Ok(tree),
            Some(first) => {
                let span = first.span.unwrap_or_else(|| TextSpan::empty(0));
                let location = LineMap::new(&self.text).line_and_column_of(span.start);
                Err(ScanError::Syntax {
                    file: self.file_name.clone(),
                    location,
                    message: first.message_text.clone(),
                    src: NamedSource::new(&self.file_name, self.text.clone()),
                    span: (span.start as usize, span.length as usize).into(),
                })
            }
        }
    }
}

/// Lazily yields the `.go` files directly inside each directory: directories
/// in the given order, files sorted by name.
///
/// The first error ends the sequence.
pub struct SourceScanner {
    directories: std::vec::IntoIter<PathBuf>,
    current: Option<(PathBuf, walkdir::IntoIter)>,
    include_test_files: bool,
    /// Generated output, never read back in.
    output_file: String,
    failed: bool,
}

impl SourceScanner {
    pub fn new(directories: Vec<PathBuf>, output_file: impl Into<String>) -> Self {
        Self {
            directories: directories.into_iter(),
            current: None,
            include_test_files: false,
            output_file: output_file.into(),
            failed: false,
        }
    }

    pub fn include_test_files(mut self, yes: bool) -> Self {
        self.include_test_files = yes;
        self
    }

    fn next_entry(&mut self) -> Option<Result<SourceText, ScanError>> {
        loop {
            if let Some((directory, walker)) = &mut self.current {
                match walker.next() {
                    Some(Ok(entry)) => {
                        let path = entry.into_path();
                        if accepts(&path, &self.output_file, self.include_test_files) {
                            let directory = directory.clone();
                            return Some(load(directory, path));
                        }
                        continue;
                    }
                    Some(Err(source)) => {
                        let path = source
                            .path()
                            .map_or_else(|| directory.clone(), Path::to_path_buf);
                        return Some(Err(ScanError::ReadDir { path, source }));
                    }
                    None => self.current = None,
                }
            }

            let directory = self.directories.next()?;
            if !directory.is_dir() {
                return Some(Err(ScanError::NotADirectory { path: directory }));
            }
            tracing::debug!(dir = %directory.display(), "listing directory");
            let walker = WalkDir::new(&directory)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter();
            self.current = Some((directory, walker));
        }
    }
}

impl Iterator for SourceScanner {
    type Item = Result<SourceText, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_entry()?;
        self.failed = item.is_err();
        Some(item)
    }
}

fn accepts(path: &Path, output_file: &str, include_test_files: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go")
        && name != output_file
        && (include_test_files || !name.ends_with("_test.go"))
        && path.is_file()
}

fn load(directory: PathBuf, path: PathBuf) -> Result<SourceText, ScanError> {
    let bytes = std::fs::read(&path).map_err(|source| ScanError::ReadFile {
        path: path.clone(),
        source,
    })?;
    let text = match simdutf8::compat::from_utf8(&bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            return Err(ScanError::InvalidUtf8 {
                path,
                offset: err.valid_up_to(),
            })
        }
    };
    let file_name = path.display().to_string();
    tracing::debug!(file = %file_name, bytes = bytes.len(), "scanned file");
    Ok(SourceText {
        directory,
        path,
        file_name,
        text,
    })
}
