//! Extractor integration tests over inline Go fixtures.

use bumpalo::Bump;
use celgen_extractor::{
    extract, namespace_for_file, Blacklist, Declaration, ExtractedFile, GoImport, Rejection,
    DEFAULT_BLACKLIST,
};
use celgen_parser::parse_source;
use celgen_types::{TypeDescriptor, TypeKind};

/// Helper: parse `source` as `file_name` and run the extractor with the
/// default blacklist.
fn extract_file(file_name: &str, source: &str) -> ExtractedFile {
    let arena = Bump::new();
    let (sf, diagnostics) = parse_source(&arena, file_name, source);
    assert!(!diagnostics.has_errors(), "{:?}", diagnostics.diagnostics());
    let blacklist = Blacklist::compile(DEFAULT_BLACKLIST).unwrap();
    extract(&sf, &blacklist, namespace_for_file(file_name, &[]))
}

fn only_declaration(file: &ExtractedFile) -> &Declaration {
    assert_eq!(file.declarations.len(), 1, "{:?}", file.rejected);
    &file.declarations[0]
}

fn reasons(file: &ExtractedFile) -> Vec<(&str, &Rejection)> {
    file.rejected.iter().map(|r| (r.name.as_str(), &r.reason)).collect()
}

#[test]
fn test_filters() {
    let source = r#"package funcs

func (Math) Add(a, b int) int { return a + b }
func (Math) Log(msg string) {}
func (Math) Nothing() () {}
func Free(x int) int { return x }
func (Math) CreateThing() int { return 0 }
func (Math) init() int { return 0 }
func (s Set[T]) Has(v T) bool { return false }
func (Math) Bad(xs ...int, y int) int { return 0 }
"#;
    let file = extract_file("math.go", source);
    assert_eq!(file.package_name, "funcs");
    assert_eq!(file.declarations.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["Add"]);
    assert_eq!(
        reasons(&file),
        vec![
            ("Log", &Rejection::NoResults),
            ("Nothing", &Rejection::NoResults),
            ("Free", &Rejection::NoReceiver),
            ("CreateThing", &Rejection::Blacklisted { pattern: "^Create".to_string() }),
            ("init", &Rejection::Blacklisted { pattern: "^init".to_string() }),
            ("Has", &Rejection::UnsupportedReceiver { spelling: "Set[T]".to_string() }),
            ("Bad", &Rejection::MisplacedVariadic),
        ]
    );
}

#[test]
fn test_arity_fan_out() {
    let file = extract_file("math.go", "package p\nfunc (m *Math) F(a, b int, s string) (x, y int) { return }\n");
    let decl = only_declaration(&file);
    assert_eq!(decl.receiver_type, "Math");
    let params: Vec<_> = decl.parameters.iter().map(|d| d.spelling.as_str()).collect();
    assert_eq!(params, vec!["int", "int", "string"]);
    assert_eq!(decl.returns.len(), 2);
}

#[test]
fn test_unnamed_parameter_counts_once() {
    let file = extract_file("t.go", "package p\nfunc (T) F(int) string { return \"\" }\n");
    let decl = only_declaration(&file);
    assert_eq!(decl.parameters, vec![TypeDescriptor::new(TypeKind::Int, "int")]);
    assert_eq!(decl.namespace.as_deref(), Some("t"));
}

#[test]
fn test_scenario_variadic_sum() {
    let file = extract_file("math.go", "package p\nfunc (m Math) Add(nums ...int64) int64 { return 0 }\n");
    let decl = only_declaration(&file);
    assert_eq!(decl.namespace.as_deref(), Some("math"));
    assert_eq!(decl.parameters.len(), 1);
    assert!(decl.parameters[0].variadic);
    assert_eq!(decl.parameters[0].kind, TypeKind::Int);
    assert_eq!(decl.variadic_position(), Some(0));
    assert_eq!(decl.returns, vec![TypeDescriptor::new(TypeKind::Int, "int64")]);
}

#[test]
fn test_scenario_blacklisted_constructor() {
    let file = extract_file("widget.go", "package p\nfunc CreateWidget() Widget { return Widget{} }\n");
    assert!(file.declarations.is_empty());
    // The blacklist wins over the missing receiver.
    assert_eq!(
        reasons(&file),
        vec![("CreateWidget", &Rejection::Blacklisted { pattern: "^Create".to_string() })]
    );
}

#[test]
fn test_scenario_interface_parameter() {
    let file = extract_file(
        "kube.go",
        "package p\nfunc (k Kube) Health(obj interface{}) HealthStatus { return HealthStatus{} }\n",
    );
    let decl = only_declaration(&file);
    assert_eq!(decl.parameters, vec![TypeDescriptor::dynamic("interface{}")]);
    assert_eq!(decl.returns, vec![TypeDescriptor::dynamic("HealthStatus")]);
}

#[test]
fn test_import_resolution() {
    let source = r#"package p

import (
	"strings"
	corev1 "k8s.io/api/core/v1"
	"gopkg.in/yaml.v3"
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
)

func (K) Labels(pod corev1.Pod, node yaml.Node) map[string]string { return nil }
func (K) Age(d Duration) string { return "" }
func (K) Meta(x *metav1.ObjectMeta, s strings.Builder) bool { return false }
"#;
    let file = extract_file("kube.go", source);
    assert_eq!(file.declarations.len(), 3);
    assert_eq!(
        file.declarations[0].imports,
        vec![
            GoImport::new("gopkg.in/yaml.v3"),
            GoImport::with_alias("corev1", "k8s.io/api/core/v1"),
        ]
    );
    assert_eq!(file.declarations[1].imports, vec![GoImport::new("time")]);
    assert_eq!(
        file.declarations[2].imports,
        vec![
            GoImport::with_alias("metav1", "k8s.io/apimachinery/pkg/apis/meta/v1"),
            GoImport::new("strings"),
        ]
    );
}

#[test]
fn test_unresolved_qualifier_is_assumed_standard_library() {
    let file = extract_file("t.go", "package p\nfunc (T) F(b bytes.Buffer) time.Time { return time.Time{} }\n");
    let decl = only_declaration(&file);
    assert_eq!(decl.imports, vec![GoImport::new("bytes"), GoImport::new("time")]);
}

#[test]
fn test_custom_blacklist() {
    let arena = Bump::new();
    let (sf, _) = parse_source(&arena, "t.go", "package p\nfunc (T) Get() int { return 0 }\nfunc (T) CreateX() int { return 0 }\n");
    let blacklist = Blacklist::compile(&["^Get"]).unwrap();
    let file = extract(&sf, &blacklist, None);
    assert_eq!(file.declarations.len(), 1);
    assert_eq!(file.declarations[0].name, "CreateX");
    assert_eq!(file.declarations[0].namespace, None);
}
