//! Parser utility functions.

use celgen_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a type expression.
///
/// `...` is not included: it only introduces the final parameter type.
pub fn can_start_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::AsteriskToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanMinusToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::FuncKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
    )
}

/// Check if a token kind starts a top-level declaration.
pub fn is_declaration_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::FuncKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::ImportKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_start_type() {
        assert!(can_start_type(SyntaxKind::MapKeyword));
        assert!(can_start_type(SyntaxKind::LessThanMinusToken));
        assert!(!can_start_type(SyntaxKind::DotDotDotToken));
        assert!(!can_start_type(SyntaxKind::OpenBraceToken));
        assert!(!can_start_type(SyntaxKind::CommaToken));
    }
}
