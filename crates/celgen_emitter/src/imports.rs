//! Local package names of one generated file.
//!
//! Every user import a binding needs must bind a name nothing else in the
//! file binds: not the runtime packages (`log`, `cel`, `types`, `ref`), not
//! a different package from another source file, and not a name the
//! generated code declares or relies on.

use crate::cel;
use crate::synthesizer::required_imports;
use celgen_extractor::{Declaration, GoImport};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Thunk locals, the helper and the predeclared `any` the helper and
/// multi-result thunks use.
const RESERVED_NAMES: &[&str] = &["x", "args", "list", "sliceToNative", "any"];

/// Local name to import path. Reserved names map to the empty path, which
/// no import has.
#[derive(Debug, Clone)]
pub(crate) struct ImportNames {
    bound: FxHashMap<String, String>,
}

impl ImportNames {
    pub fn new(cel_import_path: &str) -> Self {
        let mut bound = FxHashMap::default();
        let runtime = std::iter::once("log".to_string()).chain(cel::runtime_imports(cel_import_path));
        for path in runtime {
            let import = GoImport::new(path);
            bound.insert(import.local_name().to_string(), import.path);
        }
        for name in RESERVED_NAMES {
            bound.insert(name.to_string(), String::new());
        }
        Self { bound }
    }

    /// The name `import` is reachable under: its own, unless another path
    /// already holds it, else the first free one of `name2`, `name3`, ...
    pub fn bind(&mut self, import: &GoImport) -> String {
        let wanted = import.local_name();
        let mut candidate = wanted.to_string();
        let mut n = 2usize;
        loop {
            match self.bound.get(&candidate) {
                Some(path) if *path == import.path => return candidate,
                Some(_) => {
                    candidate = format!("{}{}", wanted, n);
                    n += 1;
                }
                None => {
                    self.bound.insert(candidate.clone(), import.path.clone());
                    return candidate;
                }
            }
        }
    }

    /// Bind every import the declaration's thunk will spell, rewriting
    /// qualifiers and aliases of the ones that had to be renamed.
    pub fn localize<'d>(&mut self, declaration: &'d Declaration) -> Cow<'d, Declaration> {
        let needed: Vec<GoImport> = required_imports(declaration)
            .cloned()
            .collect();
        let mut renames = Vec::new();
        let mut aliases = Vec::new();
        for import in &needed {
            let bound = self.bind(import);
            if bound != import.local_name() {
                tracing::warn!(
                    path = %import.path,
                    from = import.local_name(),
                    to = %bound,
                    "import name taken, aliasing"
                );
                renames.push((import.local_name().to_string(), bound.clone()));
                aliases.push((import.path.clone(), bound));
            }
        }
        if renames.is_empty() {
            return Cow::Borrowed(declaration);
        }

        let mut localized = declaration.clone();
        for descriptor in localized.parameters.iter_mut().chain(localized.returns.iter_mut()) {
            descriptor.requalify(&renames);
        }
        for import in localized.imports.iter_mut() {
            if let Some((_, alias)) = aliases.iter().find(|(path, _)| *path == import.path) {
                import.alias = Some(alias.clone());
            }
        }
        Cow::Owned(localized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_avoids_runtime_and_thunk_names() {
        let mut names = ImportNames::new("github.com/google/cel-go");
        assert_eq!(names.bind(&GoImport::new("time")), "time");
        assert_eq!(names.bind(&GoImport::new("k8s.io/apimachinery/pkg/types")), "types2");
        assert_eq!(names.bind(&GoImport::new("example.com/x")), "x2");
        assert_eq!(names.bind(&GoImport::new("github.com/google/cel-go/common/types")), "types");
        // The same path keeps the name it was given first.
        assert_eq!(names.bind(&GoImport::new("k8s.io/apimachinery/pkg/types")), "types2");
        assert_eq!(names.bind(&GoImport::new("example.com/other/types")), "types3");
    }
}
