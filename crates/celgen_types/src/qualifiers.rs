//! Package qualifiers referenced by a type expression.

use celgen_ast::node::TypeExpr;
use celgen_ast::visitor::{walk_type, AstVisitor};

struct QualifierCollector<'a> {
    qualifiers: Vec<&'a str>,
}

impl<'a> AstVisitor<'a> for QualifierCollector<'a> {
    fn visit_type(&mut self, ty: &TypeExpr<'a>) {
        if let TypeExpr::Selector(selector) = ty {
            let name = selector.package.name;
            if !self.qualifiers.contains(&name) {
                self.qualifiers.push(name);
            }
        }
        walk_type(self, ty);
    }
}

/// Every distinct package qualifier (`time` in `map[string]time.Time`) in
/// the expression, in order of first appearance.
pub fn collect_qualifiers<'a>(ty: &TypeExpr<'a>) -> Vec<&'a str> {
    let mut collector = QualifierCollector { qualifiers: Vec::new() };
    collector.visit_type(ty);
    collector.qualifiers
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether Go source `text` refers to a package through `qualifier`. A
/// `qualifier.` continuing another name (`x.time.Now`) does not count.
pub fn mentions_qualifier(text: &str, qualifier: &str) -> bool {
    let needle = format!("{}.", qualifier);
    text.match_indices(needle.as_str()).any(|(idx, _)| {
        !text[..idx]
            .chars()
            .next_back()
            .map_or(false, |c| is_ident_char(c) || c == '.')
    })
}

/// Rewrite the package qualifiers of a type spelling in one pass, e.g.
/// `map[string]types.UID` to `map[string]types2.UID` for `types -> types2`.
pub fn requalify_spelling(spelling: &str, renames: &[(String, String)]) -> String {
    let mut out = String::with_capacity(spelling.len());
    let mut rest = spelling;
    let mut prev = None;
    while let Some(c) = rest.chars().next() {
        if !is_ident_char(c) {
            out.push(c);
            prev = Some(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(len);
        let qualifies = prev != Some('.') && tail.starts_with('.');
        match renames.iter().find(|(from, _)| qualifies && from == word) {
            Some((_, to)) => out.push_str(to),
            None => out.push_str(word),
        }
        prev = word.chars().next_back();
        rest = tail;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renames(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
    }

    #[test]
    fn test_mentions_qualifier() {
        assert!(mentions_qualifier("args[0].Value().(corev1.Pod)", "corev1"));
        assert!(mentions_qualifier("[]time.Duration", "time"));
        assert!(!mentions_qualifier("x.mytime.Now()", "time"));
        assert!(!mentions_qualifier("x.time.Now()", "time"));
        assert!(!mentions_qualifier("Pod", "corev1"));
    }

    #[test]
    fn test_requalify_spelling() {
        let types = renames(&[("types", "types2")]);
        assert_eq!(requalify_spelling("types.UID", &types), "types2.UID");
        assert_eq!(requalify_spelling("map[types.UID][]types.UID", &types), "map[types2.UID][]types2.UID");
        assert_eq!(requalify_spelling("mytypes.UID", &types), "mytypes.UID");
        assert_eq!(requalify_spelling("interface{}", &types), "interface{}");

        // Renames apply simultaneously, never to an already renamed name.
        let swap = renames(&[("a", "b"), ("b", "c")]);
        assert_eq!(requalify_spelling("map[a.T]b.T", &swap), "map[b.T]c.T");
    }
}
