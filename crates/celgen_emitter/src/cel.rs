//! cel-go vocabulary: type expressions and argument casts.

use celgen_types::{TypeDescriptor, TypeKind};

pub const DYN_TYPE: &str = "cel.DynType";

/// The cel-go `*cel.Type` expression for a descriptor.
///
/// Variadic parameters arrive as a CEL list of mixed values and are always
/// declared `cel.DynType`.
pub fn cel_type(descriptor: &TypeDescriptor) -> String {
    if descriptor.variadic {
        return DYN_TYPE.to_string();
    }
    match &descriptor.kind {
        TypeKind::String => "cel.StringType".to_string(),
        TypeKind::Bool => "cel.BoolType".to_string(),
        TypeKind::Duration => "cel.DurationType".to_string(),
        TypeKind::Timestamp => "cel.TimestampType".to_string(),
        TypeKind::Int => "cel.IntType".to_string(),
        TypeKind::Uint => "cel.UintType".to_string(),
        TypeKind::Double => "cel.DoubleType".to_string(),
        TypeKind::Bytes => "cel.BytesType".to_string(),
        TypeKind::List(elem) => format!("cel.ListType({})", cel_type(elem)),
        TypeKind::Map(key, value) => format!("cel.MapType({}, {})", cel_type(key), cel_type(value)),
        TypeKind::Dynamic | TypeKind::Unknown => DYN_TYPE.to_string(),
    }
}

/// The Go expression that unwraps `args[index]` into the parameter's
/// native type.
pub fn cast(descriptor: &TypeDescriptor, index: usize) -> String {
    let value = format!("args[{}].Value()", index);
    let spelling = descriptor.spelling.as_str();
    match &descriptor.kind {
        TypeKind::String => format!("{}.(string)", value),
        TypeKind::Bool => format!("{}.(bool)", value),
        TypeKind::Int => widened(&value, spelling, "int64"),
        TypeKind::Uint => widened(&value, spelling, "uint64"),
        TypeKind::Double => widened(&value, spelling, "float64"),
        TypeKind::Duration => format!("{}.(time.Duration)", value),
        TypeKind::Timestamp => format!("{}.(time.Time)", value),
        TypeKind::Bytes => format!("{}.([]byte)", value),
        TypeKind::Dynamic if descriptor.is_empty_interface() => value,
        TypeKind::List(_) | TypeKind::Map(..) | TypeKind::Dynamic => {
            format!("{}.({})", value, spelling)
        }
        TypeKind::Unknown => value,
    }
}

/// CEL stores numbers at 64-bit width; narrower Go spellings convert.
fn widened(value: &str, spelling: &str, wide: &str) -> String {
    if spelling == wide {
        format!("{}.({})", value, wide)
    } else {
        format!("{}({}.({}))", spelling, value, wide)
    }
}

/// The cel-go packages every generated file imports, under `root`.
pub fn runtime_imports(root: &str) -> [String; 3] {
    let root = root.trim_end_matches('/');
    [
        format!("{}/cel", root),
        format!("{}/common/types", root),
        format!("{}/common/types/ref", root),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(spelling: &str) -> TypeDescriptor {
        TypeDescriptor::new(TypeKind::Int, spelling)
    }

    #[test]
    fn test_cel_type() {
        let list = TypeDescriptor::list(int("int"), "[]int");
        assert_eq!(cel_type(&list), "cel.ListType(cel.IntType)");
        let map = TypeDescriptor::map(TypeDescriptor::new(TypeKind::String, "string"), list);
        assert_eq!(cel_type(&map), "cel.MapType(cel.StringType, cel.ListType(cel.IntType))");
        assert_eq!(cel_type(&int("int64").into_variadic()), "cel.DynType");
        assert_eq!(cel_type(&TypeDescriptor::unknown()), "cel.DynType");
    }

    #[test]
    fn test_cast() {
        assert_eq!(cast(&int("int64"), 0), "args[0].Value().(int64)");
        assert_eq!(cast(&int("int8"), 1), "int8(args[1].Value().(int64))");
        assert_eq!(
            cast(&TypeDescriptor::new(TypeKind::Double, "float32"), 2),
            "float32(args[2].Value().(float64))"
        );
        assert_eq!(
            cast(&TypeDescriptor::new(TypeKind::Bytes, "[]uint8"), 0),
            "args[0].Value().([]byte)"
        );
        assert_eq!(cast(&TypeDescriptor::dynamic("any"), 3), "args[3].Value()");
        assert_eq!(
            cast(&TypeDescriptor::dynamic("corev1.Pod"), 0),
            "args[0].Value().(corev1.Pod)"
        );
        assert_eq!(cast(&TypeDescriptor::unknown(), 0), "args[0].Value()");
    }

    #[test]
    fn test_runtime_imports() {
        assert_eq!(
            runtime_imports("github.com/google/cel-go/"),
            [
                "github.com/google/cel-go/cel".to_string(),
                "github.com/google/cel-go/common/types".to_string(),
                "github.com/google/cel-go/common/types/ref".to_string(),
            ]
        );
    }
}
