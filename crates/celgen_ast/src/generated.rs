//! Node accessors shared by every variant of the AST enums.

use crate::node::*;
use celgen_core::text::TextRange;

impl<'a> Decl<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Decl::Func(n) => &n.data,
            Decl::Gen(n) => &n.data,
        }
    }
}

impl<'a> TypeExpr<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeExpr::Ident(n) => &n.data,
            TypeExpr::Selector(n) => &n.data,
            TypeExpr::Pointer(n) => &n.data,
            TypeExpr::Array(n) => &n.data,
            TypeExpr::Map(n) => &n.data,
            TypeExpr::Chan(n) => &n.data,
            TypeExpr::Func(n) => &n.data,
            TypeExpr::Struct(n) => &n.data,
            TypeExpr::Interface(n) => &n.data,
            TypeExpr::Ellipsis(n) => &n.data,
            TypeExpr::Paren(n) => &n.data,
            TypeExpr::Generic(n) => &n.data,
            TypeExpr::Missing(d) => d,
        }
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// Whether this is a `...T` parameter type.
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, TypeExpr::Ellipsis(_))
    }
}
