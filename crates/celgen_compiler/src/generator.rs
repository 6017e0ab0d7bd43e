//! The generator pipeline: scan, extract, synthesize, emit.

use crate::error::{GenerateError, ScanError};
use crate::source::{SourceScanner, SourceText};
use celgen_core::SyntaxArena;
use celgen_emitter::{emit_registry, RegistryOptions, GENERATED_HEADER};
use celgen_extractor::{extract, namespace_for_file, Blacklist, Declaration};
use celgen_options::{GeneratorOptions, OptionsError};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The generated binding file of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub directory: PathBuf,
    /// Where the file is written: the directory joined with the output file
    /// name.
    pub path: PathBuf,
    pub package_name: String,
    pub contents: String,
    /// Source files the bindings were extracted from, in scan order.
    pub sources: Vec<PathBuf>,
    /// Identifiers of the registered bindings, in discovery order.
    pub bindings: Vec<String>,
    /// A previously generated file whose directory no longer has eligible
    /// methods. Writing it removes the file.
    pub obsolete: bool,
}

impl GeneratedFile {
    /// The removal of an earlier output.
    fn obsolete(directory: &Path, path: PathBuf) -> Self {
        Self {
            directory: directory.to_path_buf(),
            path,
            package_name: String::new(),
            contents: String::new(),
            sources: Vec::new(),
            bindings: Vec::new(),
            obsolete: true,
        }
    }

    /// Whether the disk already matches: the file has exactly these
    /// contents, or is gone when obsolete.
    pub fn is_up_to_date(&self) -> bool {
        if self.obsolete {
            return !self.path.exists();
        }
        std::fs::read_to_string(&self.path).map_or(false, |current| current == self.contents)
    }

    pub fn write(&self) -> Result<(), GenerateError> {
        if self.obsolete {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(GenerateError::RemoveFile {
                    path: self.path.clone(),
                    source: e,
                }),
                _ => Ok(()),
            };
        }
        std::fs::write(&self.path, &self.contents).map_err(|source| GenerateError::WriteFile {
            path: self.path.clone(),
            source,
        })
    }
}

/// Declarations gathered for one directory.
struct PackageBatch {
    directory: PathBuf,
    package: Option<(String, PathBuf)>,
    sources: Vec<PathBuf>,
    declarations: Vec<Declaration>,
}

impl PackageBatch {
    fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            package: None,
            sources: Vec::new(),
            declarations: Vec::new(),
        }
    }
}

/// Runs the pipeline for a set of directories.
pub struct Generator {
    options: GeneratorOptions,
    blacklist: Blacklist,
}

impl Generator {
    /// Validate the options and compile the blacklist.
    pub fn new(options: GeneratorOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let blacklist = options.compile_blacklist()?;
        Ok(Self { options, blacklist })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// The lazy source sequence for `directories`, each directory scanned
    /// once.
    pub fn scanner(&self, directories: &[PathBuf]) -> SourceScanner {
        SourceScanner::new(unique_directories(directories), self.options.output_file.clone())
            .include_test_files(self.options.include_test_files)
    }

    /// Generate the binding file of every directory with at least one
    /// eligible method, in argument order. A directory without one whose
    /// earlier output is still on disk gets an obsolete entry instead.
    /// Nothing is written; the first fatal error aborts.
    pub fn generate(&self, directories: &[PathBuf]) -> Result<Vec<GeneratedFile>, GenerateError> {
        let directories = unique_directories(directories);
        let mut arena = SyntaxArena::new();
        let mut generated = FxHashMap::default();
        let mut batch: Option<PackageBatch> = None;

        for source in self.scanner(&directories) {
            let source = source?;
            if batch.as_ref().map_or(true, |b| b.directory != source.directory) {
                if let Some(file) = batch.take().and_then(|done| self.finish(done)) {
                    generated.insert(file.directory.clone(), file);
                }
                batch = Some(PackageBatch::new(source.directory.clone()));
            }
            if let Some(current) = batch.as_mut() {
                self.add_source(current, &source, &arena)?;
            }
            arena.reset();
        }
        if let Some(file) = batch.take().and_then(|done| self.finish(done)) {
            generated.insert(file.directory.clone(), file);
        }

        let mut files = Vec::with_capacity(generated.len());
        for directory in &directories {
            match generated.remove(directory) {
                Some(file) => files.push(file),
                None => files.extend(self.obsolete_output(directory)),
            }
        }
        Ok(files)
    }

    /// The output file of `directory` when celgen wrote it. A file without
    /// the generated header belongs to someone else and is left alone.
    fn obsolete_output(&self, directory: &Path) -> Option<GeneratedFile> {
        let path = directory.join(&self.options.output_file);
        let current = std::fs::read_to_string(&path).ok()?;
        if !current.starts_with(GENERATED_HEADER) {
            return None;
        }
        tracing::info!(path = %path.display(), "bindings no longer generated");
        Some(GeneratedFile::obsolete(directory, path))
    }

    fn add_source(
        &self,
        batch: &mut PackageBatch,
        source: &SourceText,
        arena: &SyntaxArena,
    ) -> Result<(), ScanError> {
        let tree = source.parse(arena)?;
        let package_name = tree.package_name.name;
        if is_external_test_package(package_name, &source.path) {
            tracing::debug!(file = %source.file_name, "skipping external test package");
            return Ok(());
        }

        if let Some((expected, first_file)) = &batch.package {
            if expected != package_name {
                return Err(ScanError::MixedPackages {
                    file: source.path.clone(),
                    found: package_name.to_string(),
                    first_file: first_file.clone(),
                    expected: expected.clone(),
                });
            }
        } else {
            batch.package = Some((package_name.to_string(), source.path.clone()));
        }

        let namespace = namespace_for_file(&source.file_name, &self.options.unnamespaced_files);
        let extracted = extract(&tree, &self.blacklist, namespace);
        tracing::debug!(
            file = %source.file_name,
            accepted = extracted.declarations.len(),
            rejected = extracted.rejected.len(),
            "extracted file"
        );
        batch.sources.push(source.path.clone());
        batch.declarations.extend(extracted.declarations);
        Ok(())
    }

    fn finish(&self, batch: PackageBatch) -> Option<GeneratedFile> {
        let (package_name, _) = batch.package?;
        if batch.declarations.is_empty() {
            tracing::info!(dir = %batch.directory.display(), "no eligible methods");
            return None;
        }

        let options = RegistryOptions {
            registry_name: self.options.registry_name.clone(),
            cel_import_path: self.options.cel_import_path.clone(),
        };
        let registry = emit_registry(&package_name, &batch.declarations, options);
        tracing::info!(
            dir = %batch.directory.display(),
            package = %package_name,
            bindings = registry.len(),
            "generated bindings"
        );

        Some(GeneratedFile {
            path: batch.directory.join(&self.options.output_file),
            package_name,
            contents: registry.render(),
            sources: batch.sources,
            bindings: registry.registration_list().into_iter().map(String::from).collect(),
            directory: batch.directory,
            obsolete: false,
        })
    }
}

/// Drop repeated directories, keeping the first spelling of each. Paths are
/// compared canonicalized, so `a` and `b/../a` are the same directory.
fn unique_directories(directories: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = FxHashSet::default();
    directories
        .iter()
        .filter(|dir| {
            let key = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
            let first = seen.insert(key);
            if !first {
                tracing::debug!(dir = %dir.display(), "skipping repeated directory");
            }
            first
        })
        .cloned()
        .collect()
}

/// `package foo_test` in a `_test.go` file.
fn is_external_test_package(package_name: &str, path: &Path) -> bool {
    package_name.ends_with("_test")
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.ends_with("_test.go"))
}

/// Write every file and remove the obsolete ones, stopping at the first
/// failure.
pub fn write_all(files: &[GeneratedFile]) -> Result<(), GenerateError> {
    for file in files {
        file.write()?;
        if file.obsolete {
            tracing::debug!(path = %file.path.display(), "removed file");
        } else {
            tracing::debug!(path = %file.path.display(), "wrote file");
        }
    }
    Ok(())
}

/// Files whose on-disk contents differ from the generated ones.
pub fn stale_files(files: &[GeneratedFile]) -> Vec<&GeneratedFile> {
    files.iter().filter(|file| !file.is_up_to_date()).collect()
}
