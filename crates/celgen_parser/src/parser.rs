//! The Go parser implementation.
//!
//! A recursive descent parser over the scanner's token stream that builds an
//! arena-allocated [`SourceFile`]. Declarations are parsed down to their
//! signatures; function bodies, struct and interface bodies and the
//! initializers of `var`/`const`/`type` specs are skipped by bracket
//! matching and kept as source ranges.

use bumpalo::Bump;
use celgen_ast::node::*;
use celgen_ast::syntax_kind::SyntaxKind;
use celgen_ast::types::*;
use celgen_core::text::{TextRange, TextSpan};
use celgen_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use celgen_scanner::Scanner;

use crate::utilities::{can_start_type, is_declaration_start};

/// Maximum nesting depth of type expressions.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Allocate a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    if vec.is_empty() {
        return &[];
    }
    arena.alloc_slice_fill_iter(vec)
}

/// One comma-separated entry of a parameter list before grouping.
enum ParamItem<'a> {
    /// A lone identifier: a parameter name in `a, b int`, or a type name in
    /// `(int, error)`.
    Name(Identifier<'a>),
    /// `name T` or `name ...T`
    Typed(Identifier<'a>, TypeExpr<'a>),
    /// A type that cannot be a name.
    Type(TypeExpr<'a>),
}

/// The parser produces a SourceFile AST from Go source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner,
    file_name: String,
    diagnostics: DiagnosticCollection,
    /// End of the last consumed token, not counting inserted semicolons.
    prev_token_end: u32,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        Self {
            arena,
            scanner: Scanner::new(source_text),
            file_name: file_name.to_string(),
            diagnostics: DiagnosticCollection::new(),
            prev_token_end: 0,
            recursion_depth: 0,
        }
    }

    pub fn parse_source_file(&mut self) -> SourceFile<'a> {
        self.next_token();

        let package_name = if self.current_token() == SyntaxKind::PackageKeyword {
            self.next_token();
            self.parse_identifier()
        } else {
            self.error(&messages::PACKAGE_CLAUSE_EXPECTED, &[]);
            self.missing_identifier()
        };
        self.parse_expected_semicolon();

        let mut imports = Vec::new();
        while self.current_token() == SyntaxKind::ImportKeyword {
            self.parse_import_decl(&mut imports);
            self.parse_expected_semicolon();
        }

        let mut declarations = Vec::new();
        while self.current_token() != SyntaxKind::EndOfFileToken {
            let saved_pos = self.scanner.token_start();
            match self.current_token() {
                SyntaxKind::FuncKeyword => {
                    declarations.push(Decl::Func(self.parse_func_decl()));
                    self.parse_expected_semicolon();
                }
                SyntaxKind::TypeKeyword | SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                    declarations.push(Decl::Gen(self.parse_gen_decl()));
                    self.parse_expected_semicolon();
                }
                SyntaxKind::ImportKeyword => {
                    self.error(&messages::IMPORTS_MUST_APPEAR_BEFORE_OTHER_DECLARATIONS, &[]);
                    self.parse_import_decl(&mut imports);
                    self.parse_expected_semicolon();
                }
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                }
                _ => {
                    self.error(&messages::NON_DECLARATION_STATEMENT_OUTSIDE_FUNCTION_BODY, &[]);
                    self.skip_to_next_declaration();
                }
            }

            // Error recovery: always advance past the token we started on.
            if self.scanner.token_start() == saved_pos
                && self.current_token() != SyntaxKind::EndOfFileToken
            {
                self.next_token();
            }
        }

        let end = self.scanner.text_len() as u32;
        SourceFile {
            data: NodeData::new(SyntaxKind::SourceFile, 0, end),
            file_name: self.file_name.clone(),
            package_name,
            imports: alloc_vec_in(self.arena, imports),
            declarations: alloc_vec_in(self.arena, declarations),
        }
    }

    /// Scanner and parser diagnostics, tagged with the file name and sorted
    /// by position.
    pub fn take_diagnostics(mut self) -> DiagnosticCollection {
        let scanner_diags = self.scanner.take_diagnostics();
        self.diagnostics.extend(scanner_diags);
        self.diagnostics.attach_file(&self.file_name);
        self.diagnostics.sort();
        self.diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn next_token(&mut self) -> SyntaxKind {
        if !self.scanner.token_flags().contains(TokenFlags::IMPLICIT_SEMICOLON) {
            self.prev_token_end = self.scanner.token_end() as u32;
        }
        self.scanner.scan()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            return true;
        }
        let text = kind.token_text().unwrap_or("token");
        if self.current_token() == SyntaxKind::EndOfFileToken {
            self.error(&messages::UNEXPECTED_END_OF_FILE, &[text]);
        } else {
            self.error(&messages::_0_EXPECTED, &[text]);
        }
        false
    }

    /// Declarations end with a semicolon, usually one inserted at the line
    /// end. A closing delimiter or the end of file also ends them.
    fn parse_expected_semicolon(&mut self) {
        match self.current_token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
            }
            SyntaxKind::EndOfFileToken | SyntaxKind::CloseParenToken | SyntaxKind::CloseBraceToken => {}
            _ => {
                self.error(&messages::_0_EXPECTED, &[";"]);
                self.skip_to_next_declaration();
            }
        }
    }

    fn error(&mut self, msg: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(self.token_pos(), self.token_end());
        self.error_at(span, msg, args);
    }

    fn error_at(&mut self, span: TextSpan, msg: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.add(Diagnostic::with_location(self.file_name.clone(), span, msg, args));
    }

    /// Error recovery: skip tokens until one that can start a top-level
    /// declaration.
    fn skip_to_next_declaration(&mut self) {
        while self.current_token() != SyntaxKind::EndOfFileToken
            && !is_declaration_start(self.current_token())
        {
            self.next_token();
        }
    }

    /// Skip a bracketed region starting at the current `open` token and
    /// return its range, delimiters included.
    fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) -> TextRange {
        let pos = self.token_pos();
        let mut depth = 0u32;
        loop {
            let token = self.current_token();
            if token == SyntaxKind::EndOfFileToken {
                let text = close.token_text().unwrap_or("token");
                self.error(&messages::UNEXPECTED_END_OF_FILE, &[text]);
                return TextRange::new(pos, self.token_pos());
            }
            if token == open {
                depth += 1;
            } else if token == close {
                depth -= 1;
                if depth == 0 {
                    let end = self.token_end();
                    self.next_token();
                    return TextRange::new(pos, end);
                }
            }
            self.next_token();
        }
    }

    // ========================================================================
    // Identifiers and imports
    // ========================================================================

    fn parse_identifier(&mut self) -> Identifier<'a> {
        if self.current_token() != SyntaxKind::Identifier {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            return self.missing_identifier();
        }
        let ident = Identifier {
            data: NodeData::new(SyntaxKind::Identifier, self.token_pos(), self.token_end()),
            name: self.arena.alloc_str(self.scanner.token_value()),
        };
        self.next_token();
        ident
    }

    fn missing_identifier(&self) -> Identifier<'a> {
        let pos = self.token_pos();
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, pos),
            name: "",
        }
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec<'a>>) {
        self.next_token();
        if self.current_token() != SyntaxKind::OpenParenToken {
            if let Some(spec) = self.parse_import_spec() {
                imports.push(spec);
            }
            return;
        }

        self.next_token();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
        ) {
            match self.parse_import_spec() {
                Some(spec) => imports.push(spec),
                None => break,
            }
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
            } else {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken);
    }

    fn parse_import_spec(&mut self) -> Option<ImportSpec<'a>> {
        let pos = self.token_pos();
        let name = match self.current_token() {
            SyntaxKind::Identifier => Some(self.parse_identifier()),
            SyntaxKind::DotToken => {
                let dot = Identifier {
                    data: NodeData::new(SyntaxKind::Identifier, self.token_pos(), self.token_end()),
                    name: ".",
                };
                self.next_token();
                Some(dot)
            }
            _ => None,
        };

        if !matches!(
            self.current_token(),
            SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral
        ) {
            self.error(&messages::_0_EXPECTED, &["import path"]);
            return None;
        }
        let end = self.token_end();
        let path = self.arena.alloc_str(self.scanner.token_value());
        if path.is_empty() {
            self.error(&messages::EMPTY_IMPORT_PATH, &[]);
        }
        self.next_token();
        Some(ImportSpec {
            data: NodeData::new(SyntaxKind::ImportSpec, pos, end),
            name,
            path,
        })
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_func_decl(&mut self) -> &'a FuncDecl<'a> {
        let pos = self.token_pos();
        self.next_token();

        let receiver = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_parameters())
        } else {
            None
        };
        let name = self.parse_identifier();
        let type_params = if self.current_token() == SyntaxKind::OpenBracketToken {
            Some(self.skip_balanced(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken))
        } else {
            None
        };
        let params = self.parse_parameters();
        let results = self.parse_results();
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            Some(self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken))
        } else {
            None
        };

        self.arena.alloc(FuncDecl {
            data: NodeData::new(SyntaxKind::FuncDecl, pos, self.prev_token_end),
            receiver,
            name,
            type_params,
            params,
            results,
            body,
        })
    }

    fn parse_gen_decl(&mut self) -> &'a GenDecl<'a> {
        let pos = self.token_pos();
        let kind = match self.current_token() {
            SyntaxKind::TypeKeyword => GenDeclKind::Type,
            SyntaxKind::VarKeyword => GenDeclKind::Var,
            _ => GenDeclKind::Const,
        };
        self.next_token();

        let mut specs = Vec::new();
        if self.current_token() == SyntaxKind::OpenParenToken {
            self.next_token();
            while !matches!(
                self.current_token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                let saved_pos = self.scanner.token_start();
                specs.push(self.parse_spec(kind));
                if self.current_token() == SyntaxKind::SemicolonToken {
                    self.next_token();
                } else if self.scanner.token_start() == saved_pos {
                    break;
                }
            }
            self.expect_token(SyntaxKind::CloseParenToken);
        } else {
            specs.push(self.parse_spec(kind));
        }

        self.arena.alloc(GenDecl {
            data: NodeData::new(SyntaxKind::GenDecl, pos, self.prev_token_end),
            kind,
            specs: alloc_vec_in(self.arena, specs),
        })
    }

    /// Parse the declared names of a spec and skip the rest of it.
    fn parse_spec(&mut self, kind: GenDeclKind) -> Spec<'a> {
        let pos = self.token_pos();
        let mut names = vec![self.parse_identifier()];
        if kind != GenDeclKind::Type {
            while self.current_token() == SyntaxKind::CommaToken {
                self.next_token();
                names.push(self.parse_identifier());
            }
        }

        let mut depth = 0u32;
        loop {
            match self.current_token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken if depth == 0 => break,
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => {
                    depth += 1;
                }
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.next_token();
        }

        let kind = if kind == GenDeclKind::Type { SyntaxKind::TypeSpec } else { SyntaxKind::ValueSpec };
        Spec {
            data: NodeData::new(kind, pos, self.prev_token_end.max(pos)),
            names: alloc_vec_in(self.arena, names),
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    fn parse_parameters(&mut self) -> &'a FieldList<'a> {
        let pos = self.token_pos();
        let mut items = Vec::new();
        if self.expect_token(SyntaxKind::OpenParenToken) {
            while !matches!(
                self.current_token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                let saved_pos = self.scanner.token_start();
                items.push(self.parse_parameter_item());
                if self.current_token() == SyntaxKind::CommaToken {
                    self.next_token();
                } else if self.current_token() != SyntaxKind::CloseParenToken
                    || self.scanner.token_start() == saved_pos
                {
                    break;
                }
            }
            self.expect_token(SyntaxKind::CloseParenToken);
        }

        let fields = self.group_parameters(items);
        self.arena.alloc(FieldList {
            data: NodeData::new(SyntaxKind::FieldList, pos, self.prev_token_end.max(pos)),
            fields,
        })
    }

    fn parse_parameter_item(&mut self) -> ParamItem<'a> {
        if self.current_token() != SyntaxKind::Identifier {
            return ParamItem::Type(self.parse_parameter_type());
        }

        let pos = self.token_pos();
        let ident = self.parse_identifier();
        match self.current_token() {
            SyntaxKind::DotToken => ParamItem::Type(self.parse_qualified_type(ident)),
            SyntaxKind::OpenBracketToken => {
                if self.bracket_introduces_array_type() {
                    ParamItem::Typed(ident, self.parse_type())
                } else {
                    ParamItem::Type(self.parse_type_arguments(TypeExpr::Ident(ident), pos))
                }
            }
            SyntaxKind::DotDotDotToken => ParamItem::Typed(ident, self.parse_parameter_type()),
            kind if can_start_type(kind) => ParamItem::Typed(ident, self.parse_type()),
            _ => ParamItem::Name(ident),
        }
    }

    /// After `name [`, decide whether the bracket starts an array type
    /// (`a [4]int`, `b []string`) or type arguments (`List[int]`).
    fn bracket_introduces_array_type(&mut self) -> bool {
        self.scanner.look_ahead(|scanner| {
            if matches!(
                scanner.scan(),
                SyntaxKind::CloseBracketToken | SyntaxKind::DotDotDotToken
            ) {
                return true;
            }
            let mut depth = 1u32;
            loop {
                match scanner.token() {
                    SyntaxKind::EndOfFileToken => return false,
                    SyntaxKind::OpenBracketToken => depth += 1,
                    SyntaxKind::CloseBracketToken => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                scanner.scan();
            }
            can_start_type(scanner.scan())
        })
    }

    fn parse_parameter_type(&mut self) -> TypeExpr<'a> {
        if self.current_token() != SyntaxKind::DotDotDotToken {
            return self.parse_type();
        }
        let pos = self.token_pos();
        self.next_token();
        let elem = self.parse_type();
        TypeExpr::Ellipsis(self.arena.alloc(EllipsisType {
            data: NodeData::new(SyntaxKind::EllipsisType, pos, self.prev_token_end),
            elem,
        }))
    }

    /// Group parameter items into fields the way Go reads them: if any item
    /// carries both a name and a type, lone identifiers are names sharing the
    /// next type (`a, b int`); otherwise every item is a type.
    fn group_parameters(&mut self, items: Vec<ParamItem<'a>>) -> NodeList<'a, Field<'a>> {
        let named = items.iter().any(|item| matches!(item, ParamItem::Typed(..)));
        let mut fields = Vec::with_capacity(items.len());

        if !named {
            for item in items {
                let ty = match item {
                    ParamItem::Name(ident) => TypeExpr::Ident(ident),
                    ParamItem::Type(ty) | ParamItem::Typed(_, ty) => ty,
                };
                fields.push(Field {
                    data: NodeData::new(SyntaxKind::Field, ty.range().pos, ty.range().end),
                    names: &[],
                    ty,
                });
            }
            return alloc_vec_in(self.arena, fields);
        }

        let mut pending: Vec<Identifier<'a>> = Vec::new();
        for item in items {
            match item {
                ParamItem::Name(ident) => pending.push(ident),
                ParamItem::Typed(ident, ty) => {
                    pending.push(ident);
                    let pos = pending[0].data.range.pos;
                    fields.push(Field {
                        data: NodeData::new(SyntaxKind::Field, pos, ty.range().end),
                        names: alloc_vec_in(self.arena, std::mem::take(&mut pending)),
                        ty,
                    });
                }
                ParamItem::Type(ty) => {
                    self.error_at(ty.range().to_span(), &messages::MIXED_NAMED_AND_UNNAMED_PARAMETERS, &[]);
                    fields.push(Field {
                        data: NodeData::new(SyntaxKind::Field, ty.range().pos, ty.range().end),
                        names: &[],
                        ty,
                    });
                }
            }
        }
        if let Some(last) = pending.last() {
            let range = last.data.range;
            self.error_at(range.to_span(), &messages::MIXED_NAMED_AND_UNNAMED_PARAMETERS, &[]);
            let pos = pending[0].data.range.pos;
            fields.push(Field {
                data: NodeData::new(SyntaxKind::Field, pos, range.end),
                names: alloc_vec_in(self.arena, pending),
                ty: TypeExpr::Missing(NodeData::new(SyntaxKind::MissingType, range.end, range.end)),
            });
        }
        alloc_vec_in(self.arena, fields)
    }

    /// Results: a parenthesised list, a single unnamed type, or nothing.
    fn parse_results(&mut self) -> Option<&'a FieldList<'a>> {
        let kind = self.current_token();
        if kind == SyntaxKind::OpenParenToken {
            return Some(self.parse_parameters());
        }
        if !can_start_type(kind) {
            return None;
        }
        let ty = self.parse_type();
        let range = ty.range();
        let field = Field {
            data: NodeData::new(SyntaxKind::Field, range.pos, range.end),
            names: &[],
            ty,
        };
        Some(self.arena.alloc(FieldList {
            data: NodeData::new(SyntaxKind::FieldList, range.pos, range.end),
            fields: self.arena.alloc_slice_fill_iter(std::iter::once(field)),
        }))
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn parse_type(&mut self) -> TypeExpr<'a> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            let pos = self.token_pos();
            return TypeExpr::Missing(NodeData::new(SyntaxKind::MissingType, pos, pos));
        }
        self.recursion_depth += 1;
        let ty = self.parse_type_worker();
        self.recursion_depth -= 1;
        ty
    }

    fn parse_type_worker(&mut self) -> TypeExpr<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::Identifier => {
                let ident = self.parse_identifier();
                if self.current_token() == SyntaxKind::DotToken {
                    self.parse_qualified_type(ident)
                } else if self.current_token() == SyntaxKind::OpenBracketToken {
                    self.parse_type_arguments(TypeExpr::Ident(ident), pos)
                } else {
                    TypeExpr::Ident(ident)
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let elem = self.parse_type();
                TypeExpr::Pointer(self.arena.alloc(PointerType {
                    data: self.node_data(SyntaxKind::PointerType, pos),
                    elem,
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_type(),
            SyntaxKind::MapKeyword => {
                self.next_token();
                self.expect_token(SyntaxKind::OpenBracketToken);
                let key = self.parse_type();
                self.expect_token(SyntaxKind::CloseBracketToken);
                let value = self.parse_type();
                TypeExpr::Map(self.arena.alloc(MapType {
                    data: self.node_data(SyntaxKind::MapType, pos),
                    key,
                    value,
                }))
            }
            SyntaxKind::ChanKeyword => {
                self.next_token();
                let dir = if self.current_token() == SyntaxKind::LessThanMinusToken {
                    self.next_token();
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type();
                TypeExpr::Chan(self.arena.alloc(ChanType {
                    data: self.node_data(SyntaxKind::ChanType, pos),
                    dir,
                    elem,
                }))
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                self.expect_token(SyntaxKind::ChanKeyword);
                let elem = self.parse_type();
                TypeExpr::Chan(self.arena.alloc(ChanType {
                    data: self.node_data(SyntaxKind::ChanType, pos),
                    dir: ChanDir::Recv,
                    elem,
                }))
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                let params = self.parse_parameters();
                let results = self.parse_results();
                TypeExpr::Func(self.arena.alloc(FuncType {
                    data: self.node_data(SyntaxKind::FuncType, pos),
                    params,
                    results,
                }))
            }
            SyntaxKind::StructKeyword => {
                self.next_token();
                if self.current_token() == SyntaxKind::OpenBraceToken {
                    self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                } else {
                    self.expect_token(SyntaxKind::OpenBraceToken);
                }
                TypeExpr::Struct(self.arena.alloc(StructType {
                    data: self.node_data(SyntaxKind::StructType, pos),
                }))
            }
            SyntaxKind::InterfaceKeyword => {
                self.next_token();
                let mut is_empty = true;
                if self.current_token() == SyntaxKind::OpenBraceToken {
                    is_empty = self
                        .scanner
                        .look_ahead(|scanner| scanner.scan() == SyntaxKind::CloseBraceToken);
                    self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                } else {
                    self.expect_token(SyntaxKind::OpenBraceToken);
                }
                TypeExpr::Interface(self.arena.alloc(InterfaceType {
                    data: self.node_data(SyntaxKind::InterfaceType, pos),
                    is_empty,
                }))
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type();
                self.expect_token(SyntaxKind::CloseParenToken);
                TypeExpr::Paren(self.arena.alloc(ParenType {
                    data: self.node_data(SyntaxKind::ParenType, pos),
                    inner,
                }))
            }
            _ => {
                self.error(&messages::TYPE_EXPECTED, &[]);
                TypeExpr::Missing(NodeData::new(SyntaxKind::MissingType, pos, pos))
            }
        }
    }

    fn node_data(&self, kind: SyntaxKind, pos: u32) -> NodeData {
        NodeData::new(kind, pos, self.prev_token_end.max(pos))
    }

    /// `pkg.Name`, optionally followed by type arguments.
    fn parse_qualified_type(&mut self, package: Identifier<'a>) -> TypeExpr<'a> {
        let pos = package.data.range.pos;
        self.next_token();
        let name = self.parse_identifier();
        let selector = TypeExpr::Selector(self.arena.alloc(SelectorType {
            data: self.node_data(SyntaxKind::SelectorType, pos),
            package,
            name,
        }));
        if self.current_token() == SyntaxKind::OpenBracketToken {
            self.parse_type_arguments(selector, pos)
        } else {
            selector
        }
    }

    fn parse_type_arguments(&mut self, base: TypeExpr<'a>, pos: u32) -> TypeExpr<'a> {
        self.next_token();
        let mut args = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
        ) {
            args.push(self.parse_type());
            if self.current_token() == SyntaxKind::CommaToken {
                self.next_token();
            } else {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        TypeExpr::Generic(self.arena.alloc(GenericType {
            data: self.node_data(SyntaxKind::GenericType, pos),
            base,
            args: alloc_vec_in(self.arena, args),
        }))
    }

    /// `[]T`, `[N]T` or `[...]T`. The length is kept as source text.
    fn parse_array_type(&mut self) -> TypeExpr<'a> {
        let pos = self.token_pos();
        self.next_token();
        let len: Option<&'a str> = match self.current_token() {
            SyntaxKind::CloseBracketToken => None,
            SyntaxKind::DotDotDotToken => {
                self.next_token();
                Some("...")
            }
            _ => {
                let start = self.token_pos() as usize;
                let mut depth = 0u32;
                while self.current_token() != SyntaxKind::EndOfFileToken {
                    match self.current_token() {
                        SyntaxKind::OpenBracketToken => depth += 1,
                        SyntaxKind::CloseBracketToken if depth == 0 => break,
                        SyntaxKind::CloseBracketToken => depth -= 1,
                        _ => {}
                    }
                    self.next_token();
                }
                let text = self.scanner.get_text_slice(start, self.prev_token_end as usize).trim();
                let text: &'a str = self.arena.alloc_str(text);
                Some(text)
            }
        };
        self.expect_token(SyntaxKind::CloseBracketToken);
        let elem = self.parse_type();
        TypeExpr::Array(self.arena.alloc(ArrayType {
            data: self.node_data(SyntaxKind::ArrayType, pos),
            len,
            elem,
        }))
    }
}
