//! Extracted declarations and rejection records.

use celgen_ast::node::default_package_name;
use celgen_types::TypeDescriptor;
use std::fmt;

/// A Go import a generated binding depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoImport {
    /// Explicit local name, when the qualifier differs from the package
    /// name Go would infer from the path.
    pub alias: Option<String>,
    pub path: String,
}

impl GoImport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    pub fn with_alias(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    /// The name the import binds in a file: the alias, else the package
    /// name Go infers from the path.
    pub fn local_name(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| default_package_name(&self.path))
    }

    /// Standard library paths have no dot in their first element.
    pub fn is_std(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or("");
        !first.contains('.')
    }
}

impl fmt::Display for GoImport {
    /// Formats as an import spec line: `alias "path"` or `"path"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} \"{}\"", alias, self.path),
            None => write!(f, "\"{}\"", self.path),
        }
    }
}

/// One eligible method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// One descriptor per declared parameter name.
    pub parameters: Vec<TypeDescriptor>,
    /// One descriptor per declared result; never empty.
    pub returns: Vec<TypeDescriptor>,
    /// Receiver type name with one pointer level removed.
    pub receiver_type: String,
    /// Prefix of the registered CEL name, derived from the file name.
    pub namespace: Option<String>,
    pub imports: Vec<GoImport>,
}

impl Declaration {
    /// Position of the variadic parameter, if any.
    pub fn variadic_position(&self) -> Option<usize> {
        self.parameters.iter().position(|p| p.variadic)
    }
}

/// Why a function declaration did not become a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Blacklisted { pattern: String },
    NoResults,
    NoReceiver,
    UnsupportedReceiver { spelling: String },
    MisplacedVariadic,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Blacklisted { pattern } => write!(f, "blacklisted pattern {}", pattern),
            Rejection::NoResults => f.write_str("returns nothing"),
            Rejection::NoReceiver => f.write_str("not a method"),
            Rejection::UnsupportedReceiver { spelling } => {
                write!(f, "unsupported receiver type {}", spelling)
            }
            Rejection::MisplacedVariadic => {
                f.write_str("variadic parameter is not the single last parameter")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDeclaration {
    pub name: String,
    pub reason: Rejection,
}
