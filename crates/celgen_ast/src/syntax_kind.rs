//! SyntaxKind enum - token and node kinds of the Go syntax tree.

/// The kind of a syntax token or node in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken,

    // Literals
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,
    RawStringLiteral,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    SemicolonToken,
    DotToken,
    DotDotDotToken,
    ColonToken,
    ColonEqualsToken,

    // Operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    LessThanMinusToken,
    PlusPlusToken,
    MinusMinusToken,
    EqualsEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    ExclamationToken,
    TildeToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,

    // Identifiers
    Identifier,

    // ========================================================================
    // Keywords
    // ========================================================================
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    SourceFile,
    ImportSpec,
    FuncDecl,
    GenDecl,
    ValueSpec,
    TypeSpec,
    FieldList,
    Field,
    Block,

    // Type expressions
    SelectorType,
    PointerType,
    ArrayType,
    MapType,
    ChanType,
    FuncType,
    StructType,
    InterfaceType,
    EllipsisType,
    ParenType,
    GenericType,
    MissingType,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::VarKeyword;

    /// Whether this kind is a reserved keyword.
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Whether this kind is a literal token.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RawStringLiteral
        )
    }

    /// Whether a line break after a token of this kind ends the statement.
    ///
    /// Go inserts a semicolon after identifiers, basic literals, the keywords
    /// `break`, `continue`, `fallthrough`, `return`, the operators `++` `--`
    /// and the closing delimiters `)` `]` `}`.
    pub fn triggers_semicolon(self) -> bool {
        self == SyntaxKind::Identifier
            || self.is_literal()
            || matches!(
                self,
                SyntaxKind::BreakKeyword
                    | SyntaxKind::ContinueKeyword
                    | SyntaxKind::FallthroughKeyword
                    | SyntaxKind::ReturnKeyword
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
            )
    }

    /// Look up a keyword from its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "chan" => Some(SyntaxKind::ChanKeyword),
            "const" => Some(SyntaxKind::ConstKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "defer" => Some(SyntaxKind::DeferKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "fallthrough" => Some(SyntaxKind::FallthroughKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "func" => Some(SyntaxKind::FuncKeyword),
            "go" => Some(SyntaxKind::GoKeyword),
            "goto" => Some(SyntaxKind::GotoKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "interface" => Some(SyntaxKind::InterfaceKeyword),
            "map" => Some(SyntaxKind::MapKeyword),
            "package" => Some(SyntaxKind::PackageKeyword),
            "range" => Some(SyntaxKind::RangeKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "select" => Some(SyntaxKind::SelectKeyword),
            "struct" => Some(SyntaxKind::StructKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "type" => Some(SyntaxKind::TypeKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            _ => None,
        }
    }

    /// The source text of a punctuation, operator or keyword token.
    pub fn token_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::ColonEqualsToken => ":=",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::AmpersandCaretToken => "&^",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::AmpersandCaretEqualsToken => "&^=",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::LessThanMinusToken => "<-",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::ChanKeyword => "chan",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeferKeyword => "defer",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::FallthroughKeyword => "fallthrough",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FuncKeyword => "func",
            SyntaxKind::GoKeyword => "go",
            SyntaxKind::GotoKeyword => "goto",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::MapKeyword => "map",
            SyntaxKind::PackageKeyword => "package",
            SyntaxKind::RangeKeyword => "range",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SelectKeyword => "select",
            SyntaxKind::StructKeyword => "struct",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::VarKeyword => "var",
            _ => return None,
        };
        Some(text)
    }
}
