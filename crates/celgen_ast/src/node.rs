//! AST node definitions for Go source files.
//!
//! Only the parts of a file the binding generator looks at are modelled in
//! detail: the package clause, imports, function and method signatures and
//! type expressions. Function bodies, struct fields and the right-hand sides
//! of `var`/`const`/`type` declarations are recorded as source ranges.
//!
//! Nodes are allocated in a bump arena and never own heap data; every name is
//! an arena-allocated `&'a str`.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use celgen_core::text::TextRange;
use std::fmt;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source position range.
    pub range: TextRange,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
        }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub file_name: String,
    pub package_name: Identifier<'a>,
    pub imports: NodeList<'a, ImportSpec<'a>>,
    pub declarations: NodeList<'a, Decl<'a>>,
}

impl<'a> SourceFile<'a> {
    /// All top-level function and method declarations, in source order.
    pub fn func_decls(&self) -> impl Iterator<Item = &'a FuncDecl<'a>> + '_ {
        self.declarations.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(*func),
            Decl::Gen(_) => None,
        })
    }
}

// ============================================================================
// Identifier
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub name: &'a str,
}

impl<'a> Identifier<'a> {
    /// Whether this is the blank identifier `_`.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }

    /// Whether the identifier is exported (starts with an upper-case letter).
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().map_or(false, char::is_uppercase)
    }
}

// ============================================================================
// Imports
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ImportSpec<'a> {
    pub data: NodeData,
    /// Explicit local name (`alias "path"`, `_ "path"`, `. "path"`).
    pub name: Option<Identifier<'a>>,
    /// The unquoted import path.
    pub path: &'a str,
}

impl<'a> ImportSpec<'a> {
    /// The name the package is referred to by inside the importing file.
    ///
    /// Returns `None` for blank (`_`) and dot (`.`) imports, which do not
    /// introduce a qualifier.
    pub fn local_name(&self) -> Option<&'a str> {
        match self.name {
            Some(alias) if alias.name == "_" || alias.name == "." => None,
            Some(alias) => Some(alias.name),
            None => Some(default_package_name(self.path)),
        }
    }

    /// Whether `qualifier` in a selector like `qualifier.Name` refers to
    /// this import.
    ///
    /// Unaliased imports also answer to their last path element, since
    /// packages such as `k8s.io/api/core/v1` are really named `v1`.
    pub fn is_referenced_as(&self, qualifier: &str) -> bool {
        if self.local_name() == Some(qualifier) {
            return true;
        }
        self.name.is_none() && self.path.rsplit('/').next() == Some(qualifier)
    }
}

/// Guess the package name of an import path the way Go tooling does when the
/// package clause is not at hand.
///
/// `github.com/x/y/v3` gives `y`, `gopkg.in/yaml.v3` gives `yaml` and
/// `github.com/mattn/go-sqlite3` gives `sqlite3`.
pub fn default_package_name(path: &str) -> &str {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }
    if let Some(idx) = last.rfind(".v") {
        if is_major_version(&last[idx + 1..]) {
            last = &last[..idx];
        }
    }
    last.strip_prefix("go-").unwrap_or(last)
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .map_or(false, |digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Decl<'a> {
    Func(&'a FuncDecl<'a>),
    Gen(&'a GenDecl<'a>),
}

/// A function or method declaration.
#[derive(Debug)]
pub struct FuncDecl<'a> {
    pub data: NodeData,
    /// The receiver parameter list; `None` for free functions.
    pub receiver: Option<&'a FieldList<'a>>,
    pub name: Identifier<'a>,
    /// Range of the `[T any]` type parameter list, if present.
    pub type_params: Option<TextRange>,
    pub params: &'a FieldList<'a>,
    /// `None` when the signature declares no result at all.
    pub results: Option<&'a FieldList<'a>>,
    /// Range of the body block, `None` for external (assembly) functions.
    pub body: Option<TextRange>,
}

impl<'a> FuncDecl<'a> {
    pub fn is_method(&self) -> bool {
        self.receiver.map_or(false, |recv| !recv.fields.is_empty())
    }

    /// Number of declared result values.
    pub fn result_count(&self) -> usize {
        self.results.map_or(0, FieldList::arity)
    }
}

/// A `type`, `var` or `const` declaration, single or grouped.
#[derive(Debug)]
pub struct GenDecl<'a> {
    pub data: NodeData,
    pub kind: GenDeclKind,
    pub specs: NodeList<'a, Spec<'a>>,
}

/// One spec of a [`GenDecl`]: the declared names and the range of the rest.
#[derive(Debug, Clone, Copy)]
pub struct Spec<'a> {
    pub data: NodeData,
    pub names: NodeList<'a, Identifier<'a>>,
}

// ============================================================================
// Parameters
// ============================================================================

/// A parenthesised parameter, result or receiver list.
#[derive(Debug)]
pub struct FieldList<'a> {
    pub data: NodeData,
    pub fields: NodeList<'a, Field<'a>>,
}

impl<'a> FieldList<'a> {
    /// Number of values the list declares: one per name, and one per
    /// unnamed field.
    pub fn arity(&self) -> usize {
        self.fields.iter().map(Field::arity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One group of a field list: `a, b int`, `x ...string` or a bare `error`.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub data: NodeData,
    pub names: NodeList<'a, Identifier<'a>>,
    pub ty: TypeExpr<'a>,
}

impl<'a> Field<'a> {
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

// ============================================================================
// Type Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeExpr<'a> {
    /// `string`, `Foo`, `any`
    Ident(Identifier<'a>),
    /// `time.Duration`
    Selector(&'a SelectorType<'a>),
    /// `*T`
    Pointer(&'a PointerType<'a>),
    /// `[]T`, `[4]T`, `[...]T`
    Array(&'a ArrayType<'a>),
    /// `map[K]V`
    Map(&'a MapType<'a>),
    /// `chan T`, `<-chan T`, `chan<- T`
    Chan(&'a ChanType<'a>),
    /// `func(a int) error`
    Func(&'a FuncType<'a>),
    /// `struct { ... }`
    Struct(&'a StructType),
    /// `interface { ... }`
    Interface(&'a InterfaceType),
    /// `...T`, only valid as the type of a final parameter
    Ellipsis(&'a EllipsisType<'a>),
    /// `(T)`
    Paren(&'a ParenType<'a>),
    /// `List[T]`, `pkg.Set[K, V]`
    Generic(&'a GenericType<'a>),
    /// A type the parser expected but could not find.
    Missing(NodeData),
}

#[derive(Debug)]
pub struct SelectorType<'a> {
    pub data: NodeData,
    pub package: Identifier<'a>,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct PointerType<'a> {
    pub data: NodeData,
    pub elem: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct ArrayType<'a> {
    pub data: NodeData,
    /// Source text of the length expression; `None` for slices.
    pub len: Option<&'a str>,
    pub elem: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct MapType<'a> {
    pub data: NodeData,
    pub key: TypeExpr<'a>,
    pub value: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct ChanType<'a> {
    pub data: NodeData,
    pub dir: ChanDir,
    pub elem: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct FuncType<'a> {
    pub data: NodeData,
    pub params: &'a FieldList<'a>,
    pub results: Option<&'a FieldList<'a>>,
}

#[derive(Debug)]
pub struct StructType {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct InterfaceType {
    pub data: NodeData,
    /// `interface{}` with no methods or embedded constraints.
    pub is_empty: bool,
}

#[derive(Debug)]
pub struct EllipsisType<'a> {
    pub data: NodeData,
    pub elem: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct ParenType<'a> {
    pub data: NodeData,
    pub inner: TypeExpr<'a>,
}

#[derive(Debug)]
pub struct GenericType<'a> {
    pub data: NodeData,
    pub base: TypeExpr<'a>,
    pub args: NodeList<'a, TypeExpr<'a>>,
}

// ============================================================================
// Printing
// ============================================================================

/// Prints a type expression back as Go source (struct and interface bodies
/// are elided).
impl fmt::Display for TypeExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(ident) => f.write_str(ident.name),
            TypeExpr::Selector(sel) => write!(f, "{}.{}", sel.package.name, sel.name.name),
            TypeExpr::Pointer(ptr) => write!(f, "*{}", ptr.elem),
            TypeExpr::Array(arr) => write!(f, "[{}]{}", arr.len.unwrap_or(""), arr.elem),
            TypeExpr::Map(map) => write!(f, "map[{}]{}", map.key, map.value),
            TypeExpr::Chan(chan) => match chan.dir {
                ChanDir::Both => write!(f, "chan {}", chan.elem),
                ChanDir::Send => write!(f, "chan<- {}", chan.elem),
                ChanDir::Recv => write!(f, "<-chan {}", chan.elem),
            },
            TypeExpr::Func(func) => {
                write!(f, "func{}", func.params)?;
                match func.results {
                    Some(results) if results.fields.len() == 1 && results.fields[0].names.is_empty() => {
                        write!(f, " {}", results.fields[0].ty)
                    }
                    Some(results) => write!(f, " {}", results),
                    None => Ok(()),
                }
            }
            TypeExpr::Struct(_) => f.write_str("struct{...}"),
            TypeExpr::Interface(iface) if iface.is_empty => f.write_str("interface{}"),
            TypeExpr::Interface(_) => f.write_str("interface{...}"),
            TypeExpr::Ellipsis(ell) => write!(f, "...{}", ell.elem),
            TypeExpr::Paren(paren) => write!(f, "({})", paren.inner),
            TypeExpr::Generic(generic) => {
                write!(f, "{}[", generic.base)?;
                for (i, arg) in generic.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str("]")
            }
            TypeExpr::Missing(_) => f.write_str("<missing>"),
        }
    }
}

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            for (j, name) in field.names.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(name.name)?;
            }
            if !field.names.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "{}", field.ty)?;
        }
        f.write_str(")")
    }
}
