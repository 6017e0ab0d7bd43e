//! The registry: every binding of one package plus the shared helper and
//! the aggregate `[]cel.EnvOption` list, rendered as one Go file.

use crate::cel;
use crate::imports::ImportNames;
use crate::synthesizer::{overload_id, synthesize, BindingUnit};
use crate::writer::GoWriter;
use celgen_extractor::{Declaration, GoImport};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

pub const GENERATED_HEADER: &str = "// Code generated by celgen. DO NOT EDIT.";

/// Converts a CEL list argument into a native slice for variadic calls.
const SLICE_TO_NATIVE: &str = r#"func sliceToNative[K any](arg ref.Val) []K {
	list, ok := arg.Value().([]ref.Val)
	if !ok {
		log.Printf("Not a list %T\n", arg.Value())
		return nil
	}

	var out = make([]K, len(list))
	for i, val := range list {
		out[i] = val.Value().(K)
	}

	return out
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Name of the exported `[]cel.EnvOption` variable.
    pub registry_name: String,
    /// Module path of cel-go.
    pub cel_import_path: String,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            registry_name: "CelEnvOption".to_string(),
            cel_import_path: "github.com/google/cel-go".to_string(),
        }
    }
}

/// The bindings of one Go package, keyed by their Go identifier in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Registry {
    package_name: String,
    options: RegistryOptions,
    bindings: IndexMap<String, BindingUnit>,
    overload_ids: FxHashSet<String>,
    import_names: ImportNames,
}

impl Registry {
    pub fn new(package_name: impl Into<String>, options: RegistryOptions) -> Self {
        let import_names = ImportNames::new(&options.cel_import_path);
        Self {
            package_name: package_name.into(),
            options,
            bindings: IndexMap::new(),
            overload_ids: FxHashSet::default(),
            import_names,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Synthesize and add the binding of `declaration`. Returns the
    /// identifier it ended up with.
    ///
    /// Imports whose name is already taken in this file are aliased and the
    /// thunk spells the alias; the overload id keeps the source spelling.
    pub fn add(&mut self, declaration: &Declaration) -> String {
        let localized = self.import_names.localize(declaration);
        let mut unit = synthesize(&localized);
        unit.overload_id = overload_id(declaration);
        self.push(unit)
    }

    /// Renames the identifier with a numeric suffix if another unit already
    /// uses it.
    fn push(&mut self, mut unit: BindingUnit) -> String {
        if self.bindings.contains_key(&unit.ident_name) {
            let base = unit.ident_name.clone();
            let mut n = 2usize;
            while self.bindings.contains_key(&format!("{}{}", base, n)) {
                n += 1;
            }
            unit.ident_name = format!("{}{}", base, n);
            tracing::warn!(
                ident = %base,
                renamed = %unit.ident_name,
                "identifier collision"
            );
        }
        if !self.overload_ids.insert(unit.overload_id.clone()) {
            tracing::warn!(overload = %unit.overload_id, "duplicate overload id");
        }

        tracing::debug!(
            name = %unit.registered_name,
            ident = %unit.ident_name,
            "emitting binding"
        );
        let ident = unit.ident_name.clone();
        self.bindings.insert(ident.clone(), unit);
        ident
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &BindingUnit> {
        self.bindings.values()
    }

    pub fn get(&self, ident: &str) -> Option<&BindingUnit> {
        self.bindings.get(ident)
    }

    /// Identifiers of the aggregate registration list, in discovery order.
    pub fn registration_list(&self) -> Vec<&str> {
        self.bindings.keys().map(String::as_str).collect()
    }

    /// The import block: standard library first, each group sorted by path.
    pub fn imports(&self) -> (Vec<GoImport>, Vec<GoImport>) {
        let mut all: Vec<GoImport> = vec![GoImport::new("log")];
        all.extend(cel::runtime_imports(&self.options.cel_import_path).map(GoImport::new));
        for unit in self.bindings.values() {
            all.extend(unit.imports.iter().cloned());
        }
        all.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.alias.cmp(&b.alias)));
        all.dedup();
        all.into_iter().partition(GoImport::is_std)
    }

    /// Render the complete Go source file.
    pub fn render(&self) -> String {
        let mut w = GoWriter::new();
        w.write_line(GENERATED_HEADER);
        w.write_newline();
        w.write_line(&format!("package {}", self.package_name));
        w.write_newline();

        let (std, third_party) = self.imports();
        w.write_line("import (");
        w.increase_indent();
        for import in &std {
            w.write_line(&import.to_string());
        }
        if !std.is_empty() && !third_party.is_empty() {
            w.write_newline();
        }
        for import in &third_party {
            w.write_line(&import.to_string());
        }
        w.decrease_indent();
        w.write_line(")");

        for unit in self.bindings.values() {
            w.write_newline();
            write_binding(&mut w, unit);
        }

        w.write_newline();
        w.write_block(SLICE_TO_NATIVE);
        w.write_newline();

        w.write_line(&format!("var {} = []cel.EnvOption{{", self.options.registry_name));
        w.increase_indent();
        for ident in self.bindings.keys() {
            w.write_line(&format!("{},", ident));
        }
        w.decrease_indent();
        w.write_line("}");
        w.finish()
    }
}

fn write_binding(w: &mut GoWriter, unit: &BindingUnit) {
    w.write_line(&format!(
        "var {} = cel.Function(\"{}\",",
        unit.ident_name, unit.registered_name
    ));
    w.increase_indent();
    w.write_line(&format!("cel.Overload(\"{}\",", unit.overload_id));
    w.increase_indent();
    if unit.parameter_types.is_empty() {
        w.write_line("nil,");
    } else {
        w.write_line("[]*cel.Type{");
        w.increase_indent();
        for ty in &unit.parameter_types {
            w.write_line(&format!("{},", ty));
        }
        w.decrease_indent();
        w.write_line("},");
    }
    w.write_line(&format!("{},", unit.return_type));
    w.write_line("cel.FunctionBinding(func(args ...ref.Val) ref.Val {");
    w.increase_indent();
    w.write_block(&unit.invocation_thunk);
    w.decrease_indent();
    w.write_line("}),");
    w.decrease_indent();
    w.write_line("),");
    w.decrease_indent();
    w.write_line(")");
}

/// Build the registry of one package from its declarations, in discovery
/// order.
pub fn emit_registry<'d, I>(package_name: &str, declarations: I, options: RegistryOptions) -> Registry
where
    I: IntoIterator<Item = &'d Declaration>,
{
    let mut registry = Registry::new(package_name, options);
    for declaration in declarations {
        registry.add(declaration);
    }
    registry
}
