//! End-to-end generator tests over on-disk Go packages.

use celgen_compiler::{stale_files, write_all, GenerateError, Generator, ScanError, SourceScanner};
use celgen_options::GeneratorOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MATH_GO: &str = r#"package funcs

type Math struct{}

func (m Math) Add(nums ...int64) int64 {
	var total int64
	for _, n := range nums {
		total += n
	}
	return total
}

func CreateMath() Math { return Math{} }
"#;

const STRINGS_GO: &str = r#"package funcs

import "strings"

type String struct{}

func (s String) Split(sep, s string) (string, string) {
	before, after, _ := strings.Cut(s, sep)
	return before, after
}

func (s String) log(msg string) {}
"#;

const MATH_TEST_GO: &str = r#"package funcs

func (m Math) Fixture() int64 { return 42 }
"#;

/// Helper: a package directory populated with `files`.
fn package_dir(root: &TempDir, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, contents) in files {
        fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

fn generator() -> Generator {
    Generator::new(GeneratorOptions::default()).unwrap()
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_generates_one_file_per_package() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(
        &root,
        "funcs",
        &[
            ("strings.go", STRINGS_GO),
            ("math.go", MATH_GO),
            ("math_test.go", MATH_TEST_GO),
            ("README.md", "not go"),
            // A stale or broken output file is never read back in.
            ("celfuncs.gen.go", "this is not Go"),
        ],
    );
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/deep.go"), "package nested\n@@@").unwrap();

    let files = generator().generate(&[dir.clone()]).unwrap();
    assert_eq!(files.len(), 1);
    let file = &files[0];
    assert_eq!(file.path, dir.join("celfuncs.gen.go"));
    assert_eq!(file.package_name, "funcs");
    assert_eq!(file_names(&file.sources), vec!["math.go", "strings.go"]);
    assert_eq!(file.bindings, vec!["mathAddGen", "stringSplitGen"]);
    assert!(file.contents.starts_with("// Code generated by celgen. DO NOT EDIT.\n\npackage funcs\n"));
    assert!(file.contents.contains("var mathAddGen = cel.Function(\"math.Add\",\n"));
    assert!(file.contents.contains("\tcel.Overload(\"strings.Split_string_string\",\n"));
    assert!(!file.contents.contains("Fixture"));
    assert!(!file.contents.contains("CreateMath"));
}

#[test]
fn test_output_is_deterministic_and_idempotent() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("math.go", MATH_GO), ("strings.go", STRINGS_GO)]);

    let first = generator().generate(&[dir.clone()]).unwrap();
    assert_eq!(stale_files(&first).len(), 1);
    write_all(&first).unwrap();
    assert!(stale_files(&first).is_empty());

    let second = generator().generate(&[dir.clone()]).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(dir.join("celfuncs.gen.go")).unwrap(), second[0].contents);
}

#[test]
fn test_directories_keep_argument_order() {
    let root = TempDir::new().unwrap();
    let b = package_dir(&root, "b", &[("math.go", MATH_GO.replace("package funcs", "package b").as_str())]);
    let a = package_dir(&root, "a", &[("math.go", MATH_GO.replace("package funcs", "package a").as_str())]);
    let empty = package_dir(&root, "empty", &[("doc.go", "// Package empty.\npackage empty\n")]);

    let files = generator().generate(&[b, empty, a]).unwrap();
    let packages: Vec<_> = files.iter().map(|f| f.package_name.as_str()).collect();
    assert_eq!(packages, vec!["b", "a"]);
}

#[test]
fn test_options_shape_the_output() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(
        &root,
        "funcs",
        &[("coll.go", "package funcs\nfunc (c Coll) Keys(m map[string]any) []string { return nil }\n"), ("math_test.go", MATH_TEST_GO)],
    );
    let options = GeneratorOptions {
        output_file: "bindings.gen.go".to_string(),
        registry_name: "Funcs".to_string(),
        unnamespaced_files: vec!["coll.go".to_string()],
        include_test_files: true,
        ..GeneratorOptions::default()
    };
    let files = Generator::new(options).unwrap().generate(&[dir.clone()]).unwrap();
    let file = &files[0];
    assert_eq!(file.path, dir.join("bindings.gen.go"));
    assert_eq!(file.bindings, vec!["collKeysGen", "mathFixtureGen"]);
    assert!(file.contents.contains("cel.Function(\"Keys\",\n"));
    assert!(file.contents.contains("cel.Function(\"math_test.Fixture\",\n"));
    assert!(file.contents.contains("var Funcs = []cel.EnvOption{\n"));
}

#[test]
fn test_external_test_package_is_skipped() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(
        &root,
        "funcs",
        &[
            ("a_test.go", "package funcs_test\nfunc (T) Helper() int { return 0 }\n"),
            ("math.go", MATH_GO),
        ],
    );
    let options = GeneratorOptions {
        include_test_files: true,
        ..GeneratorOptions::default()
    };
    let files = Generator::new(options).unwrap().generate(&[dir]).unwrap();
    assert_eq!(files[0].package_name, "funcs");
    assert_eq!(files[0].bindings, vec!["mathAddGen"]);
}

#[test]
fn test_not_a_directory() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("math.go");
    fs::write(&file, MATH_GO).unwrap();
    match generator().generate(&[file.clone()]) {
        Err(GenerateError::Scan(ScanError::NotADirectory { path })) => assert_eq!(path, file),
        other => panic!("expected NotADirectory, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_is_fatal() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(
        &root,
        "funcs",
        &[("broken.go", "package funcs\n\nfunc (m Math) F() int { return 0 }\n@\n"), ("math.go", MATH_GO)],
    );
    match generator().generate(&[dir]) {
        Err(GenerateError::Scan(ScanError::Syntax { file, location, .. })) => {
            assert!(file.ends_with("broken.go"), "{}", file);
            assert_eq!(location.to_string(), "4:1");
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_is_fatal() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[]);
    let mut bytes = b"package funcs\n".to_vec();
    bytes.push(0xff);
    fs::write(dir.join("bad.go"), bytes).unwrap();
    match generator().generate(&[dir]) {
        Err(GenerateError::Scan(ScanError::InvalidUtf8 { offset, .. })) => assert_eq!(offset, 14),
        other => panic!("expected invalid UTF-8, got {:?}", other),
    }
}

#[test]
fn test_mixed_packages_are_fatal() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(
        &root,
        "funcs",
        &[("math.go", MATH_GO), ("other.go", "package other\n")],
    );
    match generator().generate(&[dir]) {
        Err(GenerateError::Scan(ScanError::MixedPackages { found, expected, .. })) => {
            assert_eq!(found, "other");
            assert_eq!(expected, "funcs");
        }
        other => panic!("expected mixed packages, got {:?}", other),
    }
}

#[test]
fn test_nothing_written_on_failure() {
    let root = TempDir::new().unwrap();
    let good = package_dir(&root, "good", &[("math.go", MATH_GO)]);
    let missing = root.path().join("missing");
    assert!(generator().generate(&[good.clone(), missing]).is_err());
    assert!(!good.join("celfuncs.gen.go").exists());
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = GeneratorOptions {
        blacklist: vec!["[".to_string()],
        ..GeneratorOptions::default()
    };
    assert!(Generator::new(options).is_err());
}

#[test]
fn test_scanner_is_lazy_and_stops_at_first_error() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("b.go", "package funcs\n"), ("a.go", "package funcs\n")]);
    let missing = root.path().join("missing");

    let mut scanner = SourceScanner::new(vec![dir.clone(), missing, dir.clone()], "celfuncs.gen.go");
    let first = scanner.next().unwrap().unwrap();
    assert_eq!(first.path, dir.join("a.go"));
    assert_eq!(first.directory, dir);
    assert_eq!(scanner.next().unwrap().unwrap().path, dir.join("b.go"));
    assert!(matches!(scanner.next(), Some(Err(ScanError::NotADirectory { .. }))));
    assert!(scanner.next().is_none());
}

#[test]
fn test_source_text_parse() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("math.go", MATH_GO)]);
    let source = SourceScanner::new(vec![dir], "x.go").next().unwrap().unwrap();
    assert!(Path::new(&source.file_name).ends_with("math.go"));
    let arena = celgen_core::SyntaxArena::new();
    let tree = source.parse(&arena).unwrap();
    assert_eq!(tree.package_name.name, "funcs");
}

#[test]
fn test_repeated_directories_are_generated_once() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("math.go", MATH_GO)]);

    let files = generator().generate(&[dir.clone(), dir.clone()]).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].bindings, vec!["mathAddGen"]);
    assert_eq!(files[0].contents.matches("cel.Overload(\"math.Add_int64\"").count(), 1);

    let sources: Vec<_> = generator()
        .scanner(&[dir.clone(), dir.clone()])
        .map(|source| source.unwrap().file_name)
        .collect();
    assert_eq!(sources, vec!["math.go"]);
}

#[test]
fn test_differently_spelled_directory_keeps_first_spelling() {
    let root = TempDir::new().unwrap();
    let a = package_dir(&root, "a", &[("math.go", MATH_GO.replace("package funcs", "package a").as_str())]);
    let b = package_dir(&root, "b", &[("math.go", MATH_GO.replace("package funcs", "package b").as_str())]);
    let a_again = b.join("..").join("a");

    let files = generator().generate(&[a.clone(), b.clone(), a_again]).unwrap();
    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(paths, vec![a.join("celfuncs.gen.go"), b.join("celfuncs.gen.go")]);
}

#[test]
fn test_output_of_directory_without_bindings_is_removed() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("math.go", MATH_GO)]);
    write_all(&generator().generate(&[dir.clone()]).unwrap()).unwrap();
    let output = dir.join("celfuncs.gen.go");
    assert!(output.exists());

    // The only method goes away.
    fs::write(dir.join("math.go"), "package funcs\n\nfunc CreateMath() int { return 0 }\n").unwrap();
    let files = generator().generate(&[dir.clone()]).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].obsolete);
    assert_eq!(files[0].path, output);
    assert_eq!(stale_files(&files).len(), 1);

    write_all(&files).unwrap();
    assert!(!output.exists());
    assert!(stale_files(&files).is_empty());
    // Removing twice is not an error.
    write_all(&files).unwrap();
    assert!(generator().generate(&[dir]).unwrap().is_empty());
}

#[test]
fn test_output_of_emptied_directory_is_removed() {
    let root = TempDir::new().unwrap();
    let dir = package_dir(&root, "funcs", &[("math.go", MATH_GO)]);
    write_all(&generator().generate(&[dir.clone()]).unwrap()).unwrap();
    fs::remove_file(dir.join("math.go")).unwrap();

    let files = generator().generate(&[dir.clone()]).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].obsolete);
    write_all(&files).unwrap();
    assert!(!dir.join("celfuncs.gen.go").exists());
}

#[test]
fn test_hand_written_output_file_is_left_alone() {
    let root = TempDir::new().unwrap();
    let hand_written = "package funcs\n\n// Maintained by hand.\n";
    let dir = package_dir(
        &root,
        "funcs",
        &[("doc.go", "package funcs\n"), ("celfuncs.gen.go", hand_written)],
    );

    let files = generator().generate(&[dir.clone()]).unwrap();
    assert!(files.is_empty());
    assert_eq!(fs::read_to_string(dir.join("celfuncs.gen.go")).unwrap(), hand_written);
}
