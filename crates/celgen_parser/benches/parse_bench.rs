use bumpalo::Bump;
use celgen_parser::Parser;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A medium-size Go source with the constructs the generator cares about.
const GO_SOURCE: &str = r#"
// Package math exposes helpers to CEL expressions.
package math

import (
	"fmt"
	"strings"
	"time"

	corev1 "k8s.io/api/core/v1"
)

type Math struct{}

type Strings struct {
	sep   string
	cache map[string][]string
}

const (
	Pi    = 3.14159
	E     = 2.71828
	limit = 1 << 10
)

var defaultSep = ","

func (Math) Add(a, b int) int { return a + b }

func (Math) Abs(x float64) float64 {
	if x < 0 {
		return -x
	}
	return x
}

func (Math) Sum(xs ...int) int {
	total := 0
	for _, x := range xs {
		total += x
	}
	return total
}

func (s Strings) Join(parts []string, sep string) string {
	return strings.Join(parts, sep)
}

func (s *Strings) Split(text string) ([]string, error) {
	if text == "" {
		return nil, fmt.Errorf("empty input")
	}
	return strings.Split(text, s.sep), nil
}

func (Strings) Labels(pod corev1.Pod) map[string]string {
	return pod.Labels
}

func (Strings) Since(t time.Time) time.Duration {
	return time.Since(t)
}

func (Strings) Apply(f func(string) string, in string) string {
	return f(in)
}

func helper(ch <-chan int, done chan<- struct{}) {
	for range ch {
	}
	done <- struct{}{}
}
"#;

fn bench_parse_go(c: &mut Criterion) {
    c.bench_function("parse_go_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut parser = Parser::new(&arena, "bench.go", black_box(GO_SOURCE));
            let source_file = parser.parse_source_file();
            black_box(source_file.declarations.len());
        });
    });
}

criterion_group!(benches, bench_parse_go);
criterion_main!(benches);
