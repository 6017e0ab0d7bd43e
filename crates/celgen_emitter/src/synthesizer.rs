//! Binding synthesis: one cel-go function definition per declaration.

use crate::cel::{self, DYN_TYPE};
use celgen_extractor::{Declaration, GoImport};
use celgen_types::mentions_qualifier;

/// The Go adapter call that wraps native results into `ref.Val`.
const NATIVE_TO_VALUE: &str = "types.DefaultTypeAdapter.NativeToValue";

/// A synthesized binding, ready to be placed in a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingUnit {
    /// Name the function is exposed under in CEL, e.g. `math.Add`.
    pub registered_name: String,
    pub overload_id: String,
    /// Go variable holding the `cel.EnvOption`.
    pub ident_name: String,
    /// cel-go type expressions, one per parameter.
    pub parameter_types: Vec<String>,
    pub return_type: String,
    /// Body of the `cel.FunctionBinding` closure, one statement per line and
    /// without indentation.
    pub invocation_thunk: String,
    /// Imports the thunk refers to.
    pub imports: Vec<GoImport>,
}

/// Build the binding for one declaration. Synthesis cannot fail: every
/// descriptor kind has a cel type and a cast.
pub fn synthesize(declaration: &Declaration) -> BindingUnit {
    let ident_name = format!(
        "{}{}Gen",
        lower_first(&declaration.receiver_type),
        declaration.name
    );

    let parameter_types = declaration.parameters.iter().map(cel::cel_type).collect();
    let return_type = match declaration.returns.as_slice() {
        [single] => cel::cel_type(single),
        _ => format!("cel.ListType({})", DYN_TYPE),
    };

    BindingUnit {
        registered_name: registered_name(declaration),
        overload_id: overload_id(declaration),
        ident_name,
        parameter_types,
        return_type,
        invocation_thunk: thunk(declaration),
        imports: required_imports(declaration).cloned().collect(),
    }
}

fn registered_name(declaration: &Declaration) -> String {
    match &declaration.namespace {
        Some(namespace) => format!("{}.{}", namespace, declaration.name),
        None => declaration.name.clone(),
    }
}

/// `registered_name` followed by every parameter spelling, `_`-joined.
pub(crate) fn overload_id(declaration: &Declaration) -> String {
    let spellings: Vec<&str> = declaration
        .parameters
        .iter()
        .map(|p| p.spelling.as_str())
        .collect();
    format!("{}_{}", registered_name(declaration), spellings.join("_"))
}

/// The imports the thunk spells. Only parameter types appear in it, so a
/// result type's package or one only reached through a pointer is left out.
pub(crate) fn required_imports(declaration: &Declaration) -> impl Iterator<Item = &GoImport> {
    let spelled: Vec<String> = declaration
        .parameters
        .iter()
        .enumerate()
        .map(|(i, p)| if p.variadic { p.spelling.clone() } else { cel::cast(p, i) })
        .collect();
    declaration.imports.iter().filter(move |import| {
        spelled
            .iter()
            .any(|text| mentions_qualifier(text, import.local_name()))
    })
}

fn thunk(declaration: &Declaration) -> String {
    let mut lines = vec![format!("var x {}", declaration.receiver_type)];

    let mut arguments = Vec::with_capacity(declaration.parameters.len());
    for (i, parameter) in declaration.parameters.iter().enumerate() {
        if parameter.variadic {
            lines.push(format!(
                "list := sliceToNative[{}](args[{}])",
                parameter.spelling, i
            ));
            arguments.push("list...".to_string());
        } else {
            arguments.push(cel::cast(parameter, i));
        }
    }
    let call = format!("x.{}({})", declaration.name, arguments.join(", "));

    if declaration.returns.len() == 1 {
        lines.push(format!("return {}({})", NATIVE_TO_VALUE, call));
    } else {
        let results: Vec<String> = (0..declaration.returns.len())
            .map(|i| format!("r{}", i))
            .collect();
        let results = results.join(", ");
        lines.push(format!("{} := {}", results, call));
        lines.push(format!("return {}([]any{{{}}})", NATIVE_TO_VALUE, results));
    }
    lines.join("\n")
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Math"), "math");
        assert_eq!(lower_first("HTTP"), "hTTP");
        assert_eq!(lower_first(""), "");
    }
}
