//! AST visitor trait for traversing the syntax tree.
//!
//! Implement [`AstVisitor`] and override the methods for the node kinds of
//! interest; the default implementations walk into children.

use crate::node::*;

/// A visitor that traverses the AST.
pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        for import in node.imports.iter() {
            self.visit_import_spec(import);
        }
        for decl in node.declarations.iter() {
            self.visit_decl(decl);
        }
    }

    fn visit_import_spec(&mut self, _node: &ImportSpec<'a>) {}

    fn visit_decl(&mut self, decl: &Decl<'a>) {
        match decl {
            Decl::Func(n) => self.visit_func_decl(n),
            Decl::Gen(n) => self.visit_gen_decl(n),
        }
    }

    fn visit_func_decl(&mut self, node: &FuncDecl<'a>) {
        if let Some(receiver) = node.receiver {
            self.visit_field_list(receiver);
        }
        self.visit_field_list(node.params);
        if let Some(results) = node.results {
            self.visit_field_list(results);
        }
    }

    fn visit_gen_decl(&mut self, _node: &GenDecl<'a>) {}

    fn visit_field_list(&mut self, node: &FieldList<'a>) {
        for field in node.fields.iter() {
            self.visit_field(field);
        }
    }

    fn visit_field(&mut self, node: &Field<'a>) {
        self.visit_type(&node.ty);
    }

    fn visit_type(&mut self, ty: &TypeExpr<'a>) {
        walk_type(self, ty);
    }
}

/// Visit the direct children of a type expression.
pub fn walk_type<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, ty: &TypeExpr<'a>) {
    match ty {
        TypeExpr::Ident(_)
        | TypeExpr::Selector(_)
        | TypeExpr::Struct(_)
        | TypeExpr::Interface(_)
        | TypeExpr::Missing(_) => {}
        TypeExpr::Pointer(n) => visitor.visit_type(&n.elem),
        TypeExpr::Array(n) => visitor.visit_type(&n.elem),
        TypeExpr::Map(n) => {
            visitor.visit_type(&n.key);
            visitor.visit_type(&n.value);
        }
        TypeExpr::Chan(n) => visitor.visit_type(&n.elem),
        TypeExpr::Func(n) => {
            visitor.visit_field_list(n.params);
            if let Some(results) = n.results {
                visitor.visit_field_list(results);
            }
        }
        TypeExpr::Ellipsis(n) => visitor.visit_type(&n.elem),
        TypeExpr::Paren(n) => visitor.visit_type(&n.inner),
        TypeExpr::Generic(n) => {
            visitor.visit_type(&n.base);
            for arg in n.args.iter() {
                visitor.visit_type(arg);
            }
        }
    }
}
