//! Character classes of the Go lexical grammar.

/// Go whitespace: space, tab and carriage return. Newlines are handled
/// separately because they may end a statement.
#[inline]
pub fn is_white_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

#[inline]
pub fn is_decimal_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Whether `ch` may start an identifier (`letter` in the Go grammar).
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Whether `ch` may continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || unicode_xid::UnicodeXID::is_xid_continue(ch)
}
