//! The declaration extractor.

use crate::blacklist::Blacklist;
use crate::declaration::{Declaration, GoImport, RejectedDeclaration, Rejection};
use crate::imports::resolve_qualifier;
use celgen_ast::node::{FieldList, FuncDecl, ImportSpec, SourceFile, TypeExpr};
use celgen_ast::visitor::AstVisitor;
use celgen_types::{collect_qualifiers, map_type, TypeDescriptor};
use std::path::Path;

/// Everything extracted from one source file.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFile {
    pub file_name: String,
    pub package_name: String,
    /// Eligible methods in source order.
    pub declarations: Vec<Declaration>,
    pub rejected: Vec<RejectedDeclaration>,
}

/// Visits the top-level functions of one file and sorts them into
/// declarations and rejections.
pub struct DeclarationExtractor<'b, 'a> {
    file_name: &'b str,
    blacklist: &'b Blacklist,
    namespace: Option<String>,
    imports: &'a [ImportSpec<'a>],
    declarations: Vec<Declaration>,
    rejected: Vec<RejectedDeclaration>,
}

impl<'b, 'a> DeclarationExtractor<'b, 'a> {
    pub fn new(
        file_name: &'b str,
        blacklist: &'b Blacklist,
        namespace: Option<String>,
        imports: &'a [ImportSpec<'a>],
    ) -> Self {
        Self {
            file_name,
            blacklist,
            namespace,
            imports,
            declarations: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn finish(self) -> (Vec<Declaration>, Vec<RejectedDeclaration>) {
        (self.declarations, self.rejected)
    }

    /// Apply the eligibility filters in order and build the declaration.
    fn check(&self, func: &FuncDecl<'a>) -> Result<Declaration, Rejection> {
        let name = func.name.name;
        if let Some(pattern) = self.blacklist.find_match(name) {
            return Err(Rejection::Blacklisted {
                pattern: pattern.to_string(),
            });
        }
        let Some(results) = func.results.filter(|r| !r.is_empty()) else {
            return Err(Rejection::NoResults);
        };
        let Some(receiver) = func.receiver.and_then(|r| r.fields.first()) else {
            return Err(Rejection::NoReceiver);
        };
        let receiver_type =
            receiver_type_name(&receiver.ty, true).ok_or_else(|| Rejection::UnsupportedReceiver {
                spelling: receiver.ty.to_string(),
            })?;

        let parameters = descriptors(func.params);
        let variadic_count = parameters.iter().filter(|p| p.variadic).count();
        let last_is_variadic = parameters.last().map_or(false, |p| p.variadic);
        if variadic_count > 1 || (variadic_count == 1 && !last_is_variadic) {
            return Err(Rejection::MisplacedVariadic);
        }
        let returns = descriptors(results);

        let mut imports: Vec<GoImport> = Vec::new();
        let fields = func.params.fields.iter().chain(results.fields.iter());
        for field in fields {
            for qualifier in collect_qualifiers(&field.ty) {
                let import = resolve_qualifier(qualifier, self.imports);
                if !imports.contains(&import) {
                    imports.push(import);
                }
            }
        }
        let time = GoImport::new("time");
        if parameters.iter().chain(returns.iter()).any(TypeDescriptor::uses_time)
            && !imports.contains(&time)
        {
            imports.push(time);
        }
        imports.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Declaration {
            name: name.to_string(),
            parameters,
            returns,
            receiver_type: receiver_type.to_string(),
            namespace: self.namespace.clone(),
            imports,
        })
    }
}

impl<'b, 'a> AstVisitor<'a> for DeclarationExtractor<'b, 'a> {
    fn visit_func_decl(&mut self, node: &FuncDecl<'a>) {
        let name = node.name.name;
        match self.check(node) {
            Ok(declaration) => {
                tracing::debug!(
                    file = self.file_name,
                    func = name,
                    receiver = %declaration.receiver_type,
                    "extracted declaration"
                );
                self.declarations.push(declaration);
            }
            Err(reason) => {
                tracing::info!(file = self.file_name, func = name, %reason, "ignoring func");
                self.rejected.push(RejectedDeclaration {
                    name: name.to_string(),
                    reason,
                });
            }
        }
    }
}

/// One descriptor per declared name; an unnamed field counts once.
fn descriptors(list: &FieldList<'_>) -> Vec<TypeDescriptor> {
    let mut out = Vec::with_capacity(list.arity());
    for field in list.fields {
        let descriptor = map_type(&field.ty);
        for _ in 0..field.arity() {
            out.push(descriptor.clone());
        }
    }
    out
}

/// `T`, `*T` and `(*T)` name a receiver type; generic and other shapes do
/// not.
fn receiver_type_name<'a>(ty: &TypeExpr<'a>, allow_pointer: bool) -> Option<&'a str> {
    match ty {
        TypeExpr::Ident(ident) => Some(ident.name),
        TypeExpr::Paren(paren) => receiver_type_name(&paren.inner, allow_pointer),
        TypeExpr::Pointer(pointer) if allow_pointer => receiver_type_name(&pointer.elem, false),
        _ => None,
    }
}

/// Extract the eligible declarations of one parsed file.
pub fn extract(source: &SourceFile<'_>, blacklist: &Blacklist, namespace: Option<String>) -> ExtractedFile {
    let mut extractor = DeclarationExtractor::new(&source.file_name, blacklist, namespace, source.imports);
    extractor.visit_source_file(source);
    let (declarations, rejected) = extractor.finish();
    ExtractedFile {
        file_name: source.file_name.clone(),
        package_name: source.package_name.name.to_string(),
        declarations,
        rejected,
    }
}

/// The CEL namespace for functions declared in `file_name`: the file stem
/// with non-identifier characters replaced by `_`.
///
/// Files listed in `unnamespaced` (by file name or stem) get no namespace.
pub fn namespace_for_file(file_name: &str, unnamespaced: &[String]) -> Option<String> {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    let stem = base.strip_suffix(".go").unwrap_or(base);
    if unnamespaced.iter().any(|entry| entry == base || entry == stem) {
        return None;
    }

    let mut namespace: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if namespace.is_empty() {
        return None;
    }
    if namespace.starts_with(|c: char| c.is_ascii_digit()) {
        namespace.insert(0, '_');
    }
    Some(namespace)
}
