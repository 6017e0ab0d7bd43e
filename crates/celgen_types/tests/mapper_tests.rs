//! Mapper integration tests: parse real Go signatures and map their
//! parameter types.

use bumpalo::Bump;
use celgen_parser::parse_source;
use celgen_types::{collect_qualifiers, map_type, TypeDescriptor, TypeKind};

/// Helper: map each parameter type of the first function in `params`.
fn map_params(params: &str) -> Vec<TypeDescriptor> {
    let source = format!("package p\n\nfunc (T) F({}) {{}}\n", params);
    let arena = Bump::new();
    let (sf, diagnostics) = parse_source(&arena, "p.go", &source);
    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
    let func = sf.func_decls().next().expect("function");
    func.params
        .fields
        .iter()
        .flat_map(|field| std::iter::repeat(map_type(&field.ty)).take(field.arity()))
        .collect()
}

fn map_one(ty: &str) -> TypeDescriptor {
    let mut mapped = map_params(&format!("x {}", ty));
    assert_eq!(mapped.len(), 1);
    mapped.remove(0)
}

#[test]
fn test_primitives() {
    let cases = [
        ("string", TypeKind::String),
        ("bool", TypeKind::Bool),
        ("int", TypeKind::Int),
        ("int8", TypeKind::Int),
        ("int64", TypeKind::Int),
        ("rune", TypeKind::Int),
        ("uint16", TypeKind::Uint),
        ("byte", TypeKind::Uint),
        ("float32", TypeKind::Double),
        ("float64", TypeKind::Double),
    ];
    for (ty, kind) in cases {
        let mapped = map_one(ty);
        assert_eq!(mapped.kind, kind, "{}", ty);
        assert_eq!(mapped.spelling, ty);
        assert!(!mapped.variadic);
    }
}

#[test]
fn test_time_types() {
    let d = map_one("time.Duration");
    assert_eq!(d.kind, TypeKind::Duration);
    assert_eq!(d.spelling, "time.Duration");

    let t = map_one("Time");
    assert_eq!(t.kind, TypeKind::Timestamp);
    assert_eq!(t.spelling, "time.Time");
}

#[test]
fn test_dynamic_types() {
    let iface = map_one("interface{}");
    assert_eq!(iface.kind, TypeKind::Dynamic);
    assert!(iface.is_empty_interface());

    // `any` is an alias, so both spellings give the same overload id.
    assert_eq!(map_one("any"), iface);
    assert_eq!(map_one("[]any").spelling, "[]interface{}");
    assert_eq!(map_one("map[string]any").spelling, "map[string]interface{}");

    let named = map_one("HealthStatus");
    assert_eq!(named, TypeDescriptor::dynamic("HealthStatus"));

    let qualified = map_one("corev1.Pod");
    assert_eq!(qualified, TypeDescriptor::dynamic("corev1.Pod"));
}

#[test]
fn test_collections() {
    let list = map_one("[]string");
    assert_eq!(list.spelling, "[]string");
    match &list.kind {
        TypeKind::List(elem) => assert_eq!(elem.kind, TypeKind::String),
        other => panic!("expected list, got {:?}", other),
    }

    let array = map_one("[3]int");
    assert_eq!(array.spelling, "[3]int");
    assert!(matches!(array.kind, TypeKind::List(_)));

    let bytes = map_one("[]byte");
    assert_eq!(bytes.kind, TypeKind::Bytes);
    assert_eq!(bytes.spelling, "[]byte");

    let map = map_one("map[string][]time.Duration");
    assert_eq!(map.spelling, "map[string][]time.Duration");
    match &map.kind {
        TypeKind::Map(key, value) => {
            assert_eq!(key.kind, TypeKind::String);
            assert!(matches!(value.kind, TypeKind::List(_)));
        }
        other => panic!("expected map, got {:?}", other),
    }
    assert!(map.uses_time());
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(map_one("(int)"), map_one("int"));
}

#[test]
fn test_unsupported_shapes_degrade_to_unknown() {
    for ty in ["*Pod", "chan int", "func() error", "struct{ x int }", "List[int]"] {
        let mapped = map_one(ty);
        assert_eq!(mapped, TypeDescriptor::unknown(), "{}", ty);
    }
}

#[test]
fn test_variadic() {
    let mapped = map_params("nums ...int64");
    assert_eq!(mapped.len(), 1);
    assert!(mapped[0].variadic);
    assert_eq!(mapped[0].kind, TypeKind::Int);
    assert_eq!(mapped[0].spelling, "int64");
}

#[test]
fn test_arity_fan_out() {
    let mapped = map_params("a, b int, c string");
    let spellings: Vec<_> = mapped.iter().map(|d| d.spelling.as_str()).collect();
    assert_eq!(spellings, vec!["int", "int", "string"]);
}

#[test]
fn test_collect_qualifiers() {
    let source = "package p\nfunc (T) F(m map[time.Duration][]corev1.Pod, t time.Time) {}\n";
    let arena = Bump::new();
    let (sf, _) = parse_source(&arena, "p.go", source);
    let func = sf.func_decls().next().unwrap();
    let mut found = Vec::new();
    for field in func.params.fields {
        for q in collect_qualifiers(&field.ty) {
            if !found.contains(&q) {
                found.push(q);
            }
        }
    }
    assert_eq!(found, vec!["time", "corev1"]);
}
