//! Mapping from Go type expressions to [`TypeDescriptor`]s.
//!
//! The mapping is total: shapes CEL cannot represent degrade to `Dynamic`
//! (named types) or `Unknown` (pointers, channels, functions, struct
//! literals, generic instantiations).

use crate::descriptor::{TypeDescriptor, TypeKind};
use celgen_ast::node::TypeExpr;

/// Map a Go type expression onto a descriptor.
pub fn map_type(ty: &TypeExpr<'_>) -> TypeDescriptor {
    match ty {
        TypeExpr::Interface(_) => TypeDescriptor::dynamic("interface{}"),
        TypeExpr::Ident(ident) => descriptor_for_spelling(ident.name),
        TypeExpr::Ellipsis(ellipsis) => map_type(&ellipsis.elem).into_variadic(),
        TypeExpr::Selector(selector) => {
            descriptor_for_spelling(&format!("{}.{}", selector.package.name, selector.name.name))
        }
        TypeExpr::Array(array) => {
            let elem = map_type(&array.elem);
            let len = array.len.unwrap_or("");
            let spelling = format!("[{}]{}", len, elem.spelling);
            if array.len.is_none() && elem.kind == TypeKind::Uint && is_byte(&elem.spelling) {
                TypeDescriptor::new(TypeKind::Bytes, spelling)
            } else {
                TypeDescriptor::list(elem, spelling)
            }
        }
        TypeExpr::Map(map) => TypeDescriptor::map(map_type(&map.key), map_type(&map.value)),
        TypeExpr::Paren(paren) => map_type(&paren.inner),
        TypeExpr::Pointer(_)
        | TypeExpr::Chan(_)
        | TypeExpr::Func(_)
        | TypeExpr::Struct(_)
        | TypeExpr::Generic(_)
        | TypeExpr::Missing(_) => TypeDescriptor::unknown(),
    }
}

/// Look a Go type spelling up in the primitive table. Unknown spellings map
/// to `Dynamic` and keep their text.
pub fn descriptor_for_spelling(name: &str) -> TypeDescriptor {
    let kind = match name {
        "string" => TypeKind::String,
        "bool" => TypeKind::Bool,
        "any" => return TypeDescriptor::dynamic("interface{}"),
        "Duration" | "time.Duration" => {
            return TypeDescriptor::new(TypeKind::Duration, "time.Duration");
        }
        "Time" | "time.Time" => {
            return TypeDescriptor::new(TypeKind::Timestamp, "time.Time");
        }
        "int" | "int8" | "int16" | "int32" | "int64" | "rune" => TypeKind::Int,
        "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "uintptr" | "byte" => TypeKind::Uint,
        "float32" | "float64" => TypeKind::Double,
        "[]byte" | "[]uint8" => TypeKind::Bytes,
        _ => TypeKind::Dynamic,
    };
    TypeDescriptor::new(kind, name)
}

fn is_byte(spelling: &str) -> bool {
    matches!(spelling, "byte" | "uint8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_table() {
        assert_eq!(descriptor_for_spelling("string").kind, TypeKind::String);
        assert_eq!(descriptor_for_spelling("rune").kind, TypeKind::Int);
        assert_eq!(descriptor_for_spelling("uintptr").kind, TypeKind::Uint);
        assert_eq!(descriptor_for_spelling("float32").kind, TypeKind::Double);

        let duration = descriptor_for_spelling("Duration");
        assert_eq!(duration.kind, TypeKind::Duration);
        assert_eq!(duration.spelling, "time.Duration");

        assert_eq!(descriptor_for_spelling("any"), TypeDescriptor::dynamic("interface{}"));

        let named = descriptor_for_spelling("HealthStatus");
        assert_eq!(named.kind, TypeKind::Dynamic);
        assert_eq!(named.spelling, "HealthStatus");
    }
}
