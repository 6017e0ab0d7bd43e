//! celgen_options: celgen.json parsing and generator options.
//!
//! Every field is optional; missing fields take the defaults the generator
//! has always used (`^Create`/`^init` blacklist, `celfuncs.gen.go`,
//! `CelEnvOption`).

use celgen_extractor::{Blacklist, DEFAULT_BLACKLIST};
use miette::Diagnostic;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "celgen.json";

/// Options controlling what is extracted and how the output is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Regular expressions; matching method names are skipped.
    pub blacklist: Vec<String>,
    /// File written into each scanned directory.
    pub output_file: String,
    /// Name of the exported `[]cel.EnvOption` variable.
    pub registry_name: String,
    /// Files (by name or stem) whose functions register without a namespace.
    pub unnamespaced_files: Vec<String>,
    pub include_test_files: bool,
    /// Module path of cel-go used in the generated imports.
    pub cel_import_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLIST.iter().map(|p| p.to_string()).collect(),
            output_file: "celfuncs.gen.go".to_string(),
            registry_name: "CelEnvOption".to_string(),
            unnamespaced_files: Vec::new(),
            include_test_files: false,
            cel_import_path: "github.com/google/cel-go".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Compile the blacklist, reporting the first pattern that is not a
    /// valid regular expression.
    pub fn compile_blacklist(&self) -> Result<Blacklist, OptionsError> {
        let mut patterns = Vec::with_capacity(self.blacklist.len());
        for pattern in &self.blacklist {
            let regex = Regex::new(pattern).map_err(|source| OptionsError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            patterns.push(regex);
        }
        Ok(Blacklist::new(patterns))
    }

    /// Check the values that end up verbatim in file names and Go source.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let output = &self.output_file;
        if output.is_empty() || output.contains(['/', '\\']) || !output.ends_with(".go") {
            return Err(OptionsError::InvalidOption {
                field: "outputFile",
                value: output.clone(),
                help: "use a plain file name ending in .go",
            });
        }
        if !is_go_identifier(&self.registry_name) {
            return Err(OptionsError::InvalidOption {
                field: "registryName",
                value: self.registry_name.clone(),
                help: "use a Go identifier",
            });
        }
        if self.cel_import_path.trim_end_matches('/').is_empty() {
            return Err(OptionsError::InvalidOption {
                field: "celImportPath",
                value: self.cel_import_path.clone(),
                help: "use a Go module path such as github.com/google/cel-go",
            });
        }
        self.compile_blacklist().map(|_| ())
    }
}

fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// The celgen.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFile {
    pub generator_options: GeneratorOptions,
    /// Directories scanned when none are given on the command line.
    pub directories: Vec<String>,
}

#[derive(Error, Debug, Diagnostic)]
pub enum OptionsError {
    #[error("cannot read config file {}", .path.display())]
    #[diagnostic(code(celgen::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    #[diagnostic(code(celgen::config::json))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid blacklist pattern '{pattern}'")]
    #[diagnostic(
        code(celgen::config::pattern),
        help("blacklist entries are regular expressions matched against method names")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid {field} '{value}'")]
    #[diagnostic(code(celgen::config::option))]
    InvalidOption {
        field: &'static str,
        value: String,
        #[help]
        help: &'static str,
    },
}

/// Parse a celgen.json file from a string.
pub fn parse_config(content: &str) -> Result<ConfigFile, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a celgen.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<ConfigFile, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| OptionsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// The config file in `dir`, if there is one.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}
