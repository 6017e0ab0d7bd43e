//! The Go scanner/lexer.
//!
//! Converts source text into the token stream the parser consumes. Positions
//! are byte offsets. Following the Go lexical rules, a newline (or end of
//! file) directly after an identifier, a basic literal, one of the keywords
//! `break` `continue` `fallthrough` `return`, the operators `++` `--` or a
//! closing `)` `]` `}` is reported as a [`SyntaxKind::SemicolonToken`]
//! flagged with [`TokenFlags::IMPLICIT_SEMICOLON`].

use crate::char_codes::*;
use celgen_ast::syntax_kind::SyntaxKind;
use celgen_ast::types::TokenFlags;
use celgen_core::text::TextSpan;
use celgen_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
    pub insert_semicolon: bool,
}

/// The scanner converts Go source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: String,
    /// Current byte position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The text of the current token.
    token_value: String,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Whether a newline after the current token ends the statement.
    insert_semicolon: bool,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        let pos = if text.starts_with('\u{FEFF}') { '\u{FEFF}'.len_utf8() } else { 0 };
        Self {
            text: text.to_string(),
            pos,
            token_start: pos,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            insert_semicolon: false,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Get the full source text length.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Look ahead: save state, call f, restore state and return result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let diagnostic_count = self.diagnostics.len();
        let result = f(self);
        self.restore_state(state);
        self.truncate_diagnostics(diagnostic_count);
        result
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's text value.
    ///
    /// Identifiers and numeric literals carry their source text; string and
    /// rune literals carry the text between the quotes with escape sequences
    /// left intact.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            insert_semicolon: self.insert_semicolon,
        }
    }

    /// Restore the full scanner state from a saved state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.insert_semicolon = state.insert_semicolon;
    }

    /// Get the source text between two byte offsets.
    pub fn get_text_slice(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or("")
    }

    fn truncate_diagnostics(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    fn error(&mut self, start: usize, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(start as u32, self.pos.max(start) as u32);
        self.diagnostics.add(Diagnostic::with_span(span, message, args));
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Skip whitespace and comments.
    ///
    /// Returns `true` when a statement-ending newline was reached while
    /// `stop_at_newline` is set. In that case `token_start` is left at the
    /// newline and the newline itself has been consumed.
    fn skip_trivia(&mut self, stop_at_newline: bool) -> bool {
        loop {
            let Some(b) = self.byte_at(0) else {
                if stop_at_newline {
                    self.token_start = self.pos;
                    return true;
                }
                return false;
            };
            match b {
                b'\n' => {
                    if stop_at_newline {
                        self.token_start = self.pos;
                        self.pos += 1;
                        return true;
                    }
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                _ if is_white_space(b) => self.pos += 1,
                b'/' if self.byte_at(1) == Some(b'/') => {
                    // Line comment; the newline is handled on the next turn.
                    let rest = &self.text.as_bytes()[self.pos..];
                    let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                    self.pos += len;
                }
                b'/' if self.byte_at(1) == Some(b'*') => {
                    let start = self.pos;
                    let body = &self.text.as_bytes()[self.pos + 2..];
                    let (len, terminated) = match memchr::memmem::find(body, b"*/") {
                        Some(idx) => (idx, true),
                        None => (body.len(), false),
                    };
                    let has_newline = memchr::memchr(b'\n', &body[..len]).is_some();
                    self.pos += 2 + len + if terminated { 2 } else { 0 };
                    if !terminated {
                        self.error(start, &messages::ASTERISK_SLASH_EXPECTED, &[]);
                    }
                    if has_newline {
                        // A general comment spanning lines acts like a newline.
                        if stop_at_newline {
                            self.token_start = start;
                            return true;
                        }
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                }
                _ => return false,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        let insert_semicolon = std::mem::replace(&mut self.insert_semicolon, false);
        if self.skip_trivia(insert_semicolon) {
            self.token_flags |= TokenFlags::IMPLICIT_SEMICOLON;
            self.token_value.push('\n');
            self.token = SyntaxKind::SemicolonToken;
            return self.token;
        }
        self.token_start = self.pos;

        let Some(b) = self.byte_at(0) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match b {
            b'(' => { self.pos += 1; SyntaxKind::OpenParenToken }
            b')' => { self.pos += 1; SyntaxKind::CloseParenToken }
            b'{' => { self.pos += 1; SyntaxKind::OpenBraceToken }
            b'}' => { self.pos += 1; SyntaxKind::CloseBraceToken }
            b'[' => { self.pos += 1; SyntaxKind::OpenBracketToken }
            b']' => { self.pos += 1; SyntaxKind::CloseBracketToken }
            b';' => { self.pos += 1; SyntaxKind::SemicolonToken }
            b',' => { self.pos += 1; SyntaxKind::CommaToken }
            b'~' => { self.pos += 1; SyntaxKind::TildeToken }

            b'.' => self.scan_dot(),
            b':' => self.scan_pair(b'=', SyntaxKind::ColonEqualsToken, SyntaxKind::ColonToken),
            b'=' => self.scan_pair(b'=', SyntaxKind::EqualsEqualsToken, SyntaxKind::EqualsToken),
            b'!' => self.scan_pair(b'=', SyntaxKind::ExclamationEqualsToken, SyntaxKind::ExclamationToken),
            b'*' => self.scan_pair(b'=', SyntaxKind::AsteriskEqualsToken, SyntaxKind::AsteriskToken),
            b'/' => self.scan_pair(b'=', SyntaxKind::SlashEqualsToken, SyntaxKind::SlashToken),
            b'%' => self.scan_pair(b'=', SyntaxKind::PercentEqualsToken, SyntaxKind::PercentToken),
            b'^' => self.scan_pair(b'=', SyntaxKind::CaretEqualsToken, SyntaxKind::CaretToken),
            b'+' => self.scan_plus_or_minus(b'+'),
            b'-' => self.scan_plus_or_minus(b'-'),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_bar(),

            b'"' => self.scan_string_literal(),
            b'`' => self.scan_raw_string_literal(),
            b'\'' => self.scan_rune_literal(),

            b'0'..=b'9' => self.scan_number(),

            _ => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
                Some(ch) => {
                    let start = self.pos;
                    self.pos += ch.len_utf8();
                    self.error(start, &messages::INVALID_CHARACTER, &[&ch.to_string()]);
                    SyntaxKind::Unknown
                }
                None => {
                    self.pos += 1;
                    SyntaxKind::Unknown
                }
            },
        };

        self.insert_semicolon = self.token.triggers_semicolon();
        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Scan a one-byte operator that may be followed by `second`.
    fn scan_pair(&mut self, second: u8, long: SyntaxKind, short: SyntaxKind) -> SyntaxKind {
        if self.byte_at(1) == Some(second) {
            self.pos += 2;
            long
        } else {
            self.pos += 1;
            short
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.byte_at(1).map_or(false, is_decimal_digit) {
            self.scan_number()
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_plus_or_minus(&mut self, op: u8) -> SyntaxKind {
        let plus = op == b'+';
        match self.byte_at(1) {
            Some(next) if next == op => {
                self.pos += 2;
                if plus { SyntaxKind::PlusPlusToken } else { SyntaxKind::MinusMinusToken }
            }
            Some(b'=') => {
                self.pos += 2;
                if plus { SyntaxKind::PlusEqualsToken } else { SyntaxKind::MinusEqualsToken }
            }
            _ => {
                self.pos += 1;
                if plus { SyntaxKind::PlusToken } else { SyntaxKind::MinusToken }
            }
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'-'), _) => {
                self.pos += 2;
                SyntaxKind::LessThanMinusToken
            }
            (Some(b'<'), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::LessThanLessThanEqualsToken
            }
            (Some(b'<'), _) => {
                self.pos += 2;
                SyntaxKind::LessThanLessThanToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::LessThanEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::LessThanToken
            }
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'>'), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::GreaterThanToken
            }
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'&'), _) => {
                self.pos += 2;
                SyntaxKind::AmpersandAmpersandToken
            }
            (Some(b'^'), Some(b'=')) => {
                self.pos += 3;
                SyntaxKind::AmpersandCaretEqualsToken
            }
            (Some(b'^'), _) => {
                self.pos += 2;
                SyntaxKind::AmpersandCaretToken
            }
            (Some(b'='), _) => {
                self.pos += 2;
                SyntaxKind::AmpersandEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::AmpersandToken
            }
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'|') => {
                self.pos += 2;
                SyntaxKind::BarBarToken
            }
            Some(b'=') => {
                self.pos += 2;
                SyntaxKind::BarEqualsToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::BarToken
            }
        }
    }

    /// Scan the body of a quoted literal up to `quote`. Newlines and end of
    /// file terminate the literal with an error.
    fn scan_quoted(&mut self, quote: u8, unterminated: &DiagnosticMessage) -> String {
        let start = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        loop {
            match self.byte_at(0) {
                None | Some(b'\n') => {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(start, unterminated, &[]);
                    return self.text[body_start..self.pos].to_string();
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.current_char() {
                        if escaped != '\n' {
                            self.pos += escaped.len_utf8();
                        }
                    }
                }
                Some(b) if b == quote => {
                    let value = self.text[body_start..self.pos].to_string();
                    self.pos += 1;
                    return value;
                }
                Some(_) => {
                    let len = self.current_char().map_or(1, char::len_utf8);
                    self.pos += len;
                }
            }
        }
    }

    fn scan_string_literal(&mut self) -> SyntaxKind {
        self.token_value = self.scan_quoted(b'"', &messages::UNTERMINATED_STRING_LITERAL);
        SyntaxKind::StringLiteral
    }

    fn scan_rune_literal(&mut self) -> SyntaxKind {
        self.token_value = self.scan_quoted(b'\'', &messages::UNTERMINATED_RUNE_LITERAL);
        SyntaxKind::RuneLiteral
    }

    fn scan_raw_string_literal(&mut self) -> SyntaxKind {
        let start = self.pos;
        let body = &self.text.as_bytes()[self.pos + 1..];
        match memchr::memchr(b'`', body) {
            Some(len) => {
                self.token_value = self.text[start + 1..start + 1 + len].to_string();
                self.pos = start + len + 2;
            }
            None => {
                self.token_value = self.text[start + 1..].to_string();
                self.pos = self.text.len();
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(start, &messages::UNTERMINATED_RAW_STRING_LITERAL, &[]);
            }
        }
        SyntaxKind::RawStringLiteral
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let mut valid = true;

        let prefix = if self.byte_at(0) == Some(b'0') {
            self.byte_at(1).map(|b| b.to_ascii_lowercase())
        } else {
            None
        };

        match prefix {
            Some(b'x') => {
                self.pos += 2;
                self.token_flags |= TokenFlags::HEX_SPECIFIER;
                let mut digits = self.scan_digits(is_hex_digit);
                if self.byte_at(0) == Some(b'.') {
                    self.pos += 1;
                    kind = SyntaxKind::FloatLiteral;
                    digits += self.scan_digits(is_hex_digit);
                }
                valid = digits > 0;
                if matches!(self.byte_at(0), Some(b'p' | b'P')) {
                    kind = SyntaxKind::FloatLiteral;
                    valid &= self.scan_exponent();
                } else if kind == SyntaxKind::FloatLiteral {
                    // Hexadecimal mantissas require a `p` exponent.
                    valid = false;
                }
            }
            Some(b'b') => {
                self.pos += 2;
                self.token_flags |= TokenFlags::BINARY_SPECIFIER;
                valid = self.scan_digits(is_binary_digit) > 0;
            }
            Some(b'o') => {
                self.pos += 2;
                self.token_flags |= TokenFlags::OCTAL_SPECIFIER;
                valid = self.scan_digits(is_octal_digit) > 0;
            }
            _ => {
                self.scan_digits(is_decimal_digit);
                if self.byte_at(0) == Some(b'.') {
                    self.pos += 1;
                    kind = SyntaxKind::FloatLiteral;
                    self.scan_digits(is_decimal_digit);
                }
                if matches!(self.byte_at(0), Some(b'e' | b'E')) {
                    kind = SyntaxKind::FloatLiteral;
                    valid = self.scan_exponent();
                }
            }
        }

        if self.byte_at(0) == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImaginaryLiteral;
        }

        // Trailing identifier characters such as `0x1g` or `12abc`.
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
            valid = false;
        }

        self.token_value = self.text[start..self.pos].to_string();
        if !valid {
            let text = self.token_value.clone();
            self.error(start, &messages::INVALID_NUMERIC_LITERAL, &[&text]);
        }
        kind
    }

    /// Scan an exponent (`e`, `E`, `p` or `P`, optional sign, digits).
    fn scan_exponent(&mut self) -> bool {
        self.pos += 1;
        self.token_flags |= TokenFlags::SCIENTIFIC;
        if matches!(self.byte_at(0), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.scan_digits(is_decimal_digit) > 0
    }

    /// Consume digits accepted by `is_digit` and `_` separators; returns the
    /// number of digits.
    fn scan_digits(&mut self, is_digit: fn(u8) -> bool) -> usize {
        let mut count = 0;
        while let Some(b) = self.byte_at(0) {
            if is_digit(b) {
                count += 1;
            } else if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let text = &self.text[start..self.pos];
        let kind = SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier);
        self.token_value = text.to_string();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            out.push(kind);
        }
        out
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) [ ] { } , ."),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::CommaToken,
                SyntaxKind::DotToken,
            ]
        );
    }

    #[test]
    fn test_scan_go_operators() {
        assert_eq!(
            kinds("&^= &^ <- := ... <<= >>"),
            vec![
                SyntaxKind::AmpersandCaretEqualsToken,
                SyntaxKind::AmpersandCaretToken,
                SyntaxKind::LessThanMinusToken,
                SyntaxKind::ColonEqualsToken,
                SyntaxKind::DotDotDotToken,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::GreaterThanGreaterThanToken,
            ]
        );
    }

    #[test]
    fn test_implicit_semicolon_at_eof() {
        let mut scanner = Scanner::new("return");
        assert_eq!(scanner.scan(), SyntaxKind::ReturnKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert!(scanner.token_flags().contains(TokenFlags::IMPLICIT_SEMICOLON));
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_look_ahead_restores_semicolon_state() {
        let mut scanner = Scanner::new("x\ny");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        let next = scanner.look_ahead(|s| s.scan());
        assert_eq!(next, SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "y");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let mut scanner = Scanner::new("\u{FEFF}package");
        assert_eq!(scanner.scan(), SyntaxKind::PackageKeyword);
        assert!(scanner.diagnostics().is_empty());
    }
}
