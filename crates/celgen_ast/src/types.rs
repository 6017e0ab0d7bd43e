//! Flag types and small enums shared by the scanner, parser and AST.

bitflags::bitflags! {
    /// Flags describing a scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        const NONE                  = 0;
        const PRECEDING_LINE_BREAK  = 1 << 0;
        const UNTERMINATED          = 1 << 1;
        /// A semicolon the scanner inserted at a line break or end of file.
        const IMPLICIT_SEMICOLON    = 1 << 2;
        const HEX_SPECIFIER         = 1 << 3;
        const BINARY_SPECIFIER      = 1 << 4;
        const OCTAL_SPECIFIER       = 1 << 5;
        const CONTAINS_SEPARATOR    = 1 << 6;
        const SCIENTIFIC            = 1 << 7;

        const NUMERIC_LITERAL_FLAGS = Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits()
            | Self::SCIENTIFIC.bits();
    }
}

/// Channel direction of a `chan` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Which keyword introduced a generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDeclKind {
    Type,
    Var,
    Const,
}

impl GenDeclKind {
    pub fn keyword(self) -> &'static str {
        match self {
            GenDeclKind::Type => "type",
            GenDeclKind::Var => "var",
            GenDeclKind::Const => "const",
        }
    }
}
