//! Lexical primitives for HTTP field values as described by
//! [[RFC7230, Section 3.2.6](https://tools.ietf.org/html/rfc7230#section-3.2.6)].
//!
//! Every scanner takes the remaining input and returns what it read along with the input left after
//! it. None of them fail: input that does not match yields an empty value and is left unconsumed, so
//! callers decide how to recover.

use std::borrow::Cow;
use std::fmt::{self, Write};

#[rustfmt::skip]
pub const TOKEN_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0, b'#', b'$', b'%', b'&',b'\'',    0,    0, b'*', b'+',    0, b'-', b'.',    0, // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9',    0,    0,    0,    0,    0,    0, // 3
    0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
 b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',    0,    0,    0, b'^', b'_', // 5
 b'`', b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o', // 6
 b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z',    0, b'|',    0, b'~',    0, // 7
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 8
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 9
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // A
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // B
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // C
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // D
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // E
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // F
];

/// Returns whether the given byte is a `tchar`.
pub fn is_token_char(byte: u8) -> bool {
    TOKEN_CHAR_MAP[byte as usize] != 0
}

/// A helper function used to determine whether a given byte slice is a valid token. Tokens as used
/// in [[RFC7230](https://tools.ietf.org/html/rfc7230#section-3.2.6)] are visible ASCII-US
/// characters excluding delimiters.
pub fn is_token(token: &[u8]) -> bool {
    if token.is_empty() {
        return false;
    }

    for &byte in token {
        if !is_token_char(byte) {
            return false;
        }
    }

    true
}

/// Returns whether the given byte is optional whitespace (`OWS`).
pub fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Trims leading spaces and tabs.
pub fn skip_whitespace(value: &str) -> &str {
    value.trim_start_matches(|c| c == ' ' || c == '\t')
}

/// Returns the next byte that is not whitespace without consuming anything.
pub fn peek(value: &str) -> Option<u8> {
    skip_whitespace(value).bytes().next()
}

/// Consumes `expected` if it is the very next byte. Whitespace is not skipped, since some grammars
/// (the separators in `Warning`) are exactly one space.
///
/// `expected` must be ASCII.
pub fn consume(value: &str, expected: u8) -> (&str, bool) {
    debug_assert!(expected.is_ascii());

    match value.as_bytes().first() {
        Some(&byte) if byte == expected => (&value[1..], true),
        _ => (value, false),
    }
}

/// Reads the longest run of token characters.
pub fn token(value: &str) -> (&str, &str) {
    let end = value
        .bytes()
        .position(|byte| !is_token_char(byte))
        .unwrap_or_else(|| value.len());
    value.split_at(end)
}

/// Skips whitespace, then reads everything up to the next whitespace or comma. This is looser than
/// [`token`] and is meant for opaque identifiers such as `host:port` or `[::1]:80`.
///
/// A bracketed IP-literal is read whole, so `[v9.a51c00de,route=51]:8080` is one identifier. Commas
/// in a bracket-less host still end it.
pub fn chomp(value: &str) -> (&str, &str) {
    let value = skip_whitespace(value);
    let bytes = value.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'[' => {
                index = bytes[index..]
                    .iter()
                    .position(|&byte| byte == b']')
                    .map_or(bytes.len(), |close| index + close + 1);
            }
            byte if is_whitespace(byte) || byte == b',' => break,
            _ => index += 1,
        }
    }

    value.split_at(index)
}

/// Reads a run of ASCII digits. Returns `None` when there are no digits at all, which is distinct
/// from reading `0`. Values that do not fit are saturated.
pub fn number(value: &str) -> (Option<u32>, &str) {
    let end = value
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or_else(|| value.len());

    if end == 0 {
        return (None, value);
    }

    let (digits, rest) = value.split_at(end);
    let number = digits.bytes().fold(0u32, |number, digit| {
        number
            .saturating_mul(10)
            .saturating_add(u32::from(digit - b'0'))
    });
    (Some(number), rest)
}

/// Reads a `quoted-string`, unescaping every `quoted-pair`. Leading whitespace is skipped.
///
/// If the value does not start with `"`, an empty string is returned and nothing is consumed. An
/// unterminated string yields its interior and consumes the rest of the input.
pub fn quoted(value: &str) -> (Cow<'_, str>, &str) {
    match delimited(value, b'"', b'"') {
        Some(scanned) => (scanned.body, scanned.rest),
        None => (Cow::Borrowed(""), value),
    }
}

/// Like [`quoted`], but returns `None` unless a complete quoted string was present.
pub fn quoted_terminated(value: &str) -> Option<(Cow<'_, str>, &str)> {
    delimited(value, b'"', b'"')
        .filter(|scanned| scanned.terminated)
        .map(|scanned| (scanned.body, scanned.rest))
}

/// Reads a parenthesized `comment`, which may nest, unescaping every `quoted-pair`. Leading
/// whitespace is skipped.
///
/// If the value does not start with `(`, an empty string is returned and nothing is consumed. An
/// unterminated comment yields everything up to the end of the input as its body.
pub fn comment(value: &str) -> (Cow<'_, str>, &str) {
    match delimited(value, b'(', b')') {
        Some(scanned) => (scanned.body, scanned.rest),
        None => (Cow::Borrowed(""), value),
    }
}

/// Writes `value` as a `quoted-string`, escaping `"` and `\`.
pub fn write_quoted<W>(writer: &mut W, value: &str) -> fmt::Result
where
    W: Write,
{
    write_delimited(writer, value, '"', '"')
}

/// Writes `value` as a `comment`, escaping `(`, `)` and `\`.
pub fn write_comment<W>(writer: &mut W, value: &str) -> fmt::Result
where
    W: Write,
{
    write_delimited(writer, value, '(', ')')
}

fn write_delimited<W>(writer: &mut W, value: &str, open: char, close: char) -> fmt::Result
where
    W: Write,
{
    writer.write_char(open)?;

    for c in value.chars() {
        if c == open || c == close || c == '\\' {
            writer.write_char('\\')?;
        }

        writer.write_char(c)?;
    }

    writer.write_char(close)
}

/// The result of scanning a delimited construct.
struct Delimited<'a> {
    body: Cow<'a, str>,
    rest: &'a str,
    terminated: bool,
}

/// Scans a construct opened by `open` and closed by `close`. When the two differ, unescaped inner
/// `open`/`close` pairs nest and are kept in the body. The body only allocates if it contained a
/// `quoted-pair`.
fn delimited(value: &str, open: u8, close: u8) -> Option<Delimited<'_>> {
    let value = skip_whitespace(value);
    let bytes = value.as_bytes();

    if bytes.first() != Some(&open) {
        return None;
    }

    let nests = open != close;
    let mut depth = 0usize;
    let mut unescaped: Option<String> = None;
    let mut run_start = 1;
    let mut index = 1;

    // Only ASCII bytes are ever compared against, so every index used for slicing below sits on a
    // character boundary even when the value contains multi-byte characters.
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => {
                unescaped
                    .get_or_insert_with(String::new)
                    .push_str(&value[run_start..index]);
                run_start = index + 1;
                index += 2;
                continue;
            }
            byte if byte == close && depth == 0 => {
                return Some(Delimited {
                    body: finish(value, unescaped, run_start, index),
                    rest: &value[index + 1..],
                    terminated: true,
                });
            }
            byte if byte == close => depth -= 1,
            byte if nests && byte == open => depth += 1,
            _ => {}
        }

        index += 1;
    }

    Some(Delimited {
        body: finish(value, unescaped, run_start, bytes.len()),
        rest: "",
        terminated: false,
    })
}

fn finish(value: &str, unescaped: Option<String>, start: usize, end: usize) -> Cow<'_, str> {
    let start = start.min(end);

    match unescaped {
        Some(mut body) => {
            body.push_str(&value[start..end]);
            Cow::Owned(body)
        }
        None => Cow::Borrowed(&value[start..end]),
    }
}

#[cfg(test)]
mod test {
    use crate::syntax;

    #[test]
    fn test_is_token() {
        assert_eq!(true, syntax::is_token(b"this-is_a_~token~"));
        assert_eq!(true, syntax::is_token(b"token"));
        assert_eq!(true, syntax::is_token(b"`quirky`|token"));
        assert_eq!(false, syntax::is_token(b"not a token"));
        assert_eq!(false, syntax::is_token(b"host:80"));
        assert_eq!(false, syntax::is_token(b""));
    }

    #[test]
    fn test_peek_and_consume() {
        assert_eq!(syntax::peek(" \t(x)"), Some(b'('));
        assert_eq!(syntax::peek("  "), None);
        assert_eq!(syntax::consume(" x", b' '), ("x", true));
        assert_eq!(syntax::consume("  x", b'x'), ("  x", false));
        assert_eq!(syntax::consume("", b';'), ("", false));
    }

    #[test]
    fn test_token() {
        assert_eq!(syntax::token("GET, HEAD"), ("GET", ", HEAD"));
        assert_eq!(syntax::token("for=1.2.3.4"), ("for", "=1.2.3.4"));
        assert_eq!(syntax::token(" GET"), ("", " GET"));
        assert_eq!(syntax::token(""), ("", ""));
    }

    #[test]
    fn test_chomp() {
        assert_eq!(syntax::chomp(" \tfoo.example.com:8080 (x)"), ("foo.example.com:8080", " (x)"));
        assert_eq!(syntax::chomp("1.0, 1.1 foo"), ("1.0", ", 1.1 foo"));
        assert_eq!(syntax::chomp("  , bar"), ("", ", bar"));
        assert_eq!(syntax::chomp("[fe80::a%25en1]:80"), ("[fe80::a%25en1]:80", ""));
        assert_eq!(
            syntax::chomp("[v9.a51c00de,route=51]:8080 \"text\""),
            ("[v9.a51c00de,route=51]:8080", " \"text\"")
        );
        assert_eq!(syntax::chomp("[a, b] c"), ("[a, b]", " c"));
        assert_eq!(syntax::chomp("[unterminated, x"), ("[unterminated, x", ""));
        assert_eq!(syntax::chomp("funky,reg-name"), ("funky", ",reg-name"));
    }

    #[test]
    fn test_number() {
        assert_eq!(syntax::number("299 -"), (Some(299), " -"));
        assert_eq!(syntax::number("0"), (Some(0), ""));
        assert_eq!(syntax::number("?????"), (None, "?????"));
        assert_eq!(syntax::number("99999999999999").0, Some(u32::max_value()));
    }

    #[test]
    fn test_quoted() {
        assert_eq!(syntax::quoted(r#""good" rest"#), ("good".into(), " rest"));
        assert_eq!(syntax::quoted(r#" "with \"escaped\" quotes""#).0, r#"with "escaped" quotes"#);
        assert_eq!(syntax::quoted(r#""\"escaped\" quotes""#).0, r#""escaped" quotes"#);
        assert_eq!(syntax::quoted(r#""a, b" , c"#), ("a, b".into(), " , c"));
        assert_eq!(syntax::quoted("unquoted"), ("".into(), "unquoted"));
        assert_eq!(syntax::quoted(r#""unterminated"#), ("unterminated".into(), ""));
        assert_eq!(syntax::quoted(r#""unterminated\""#), (r#"unterminated""#.into(), ""));
        assert_eq!(syntax::quoted(r#""trailing\"#), ("trailing".into(), ""));
        assert_eq!(syntax::quoted(r#""caf\é""#).0, "café");
    }

    #[test]
    fn test_quoted_terminated() {
        assert_eq!(syntax::quoted_terminated(r#""x";y"#), Some(("x".into(), ";y")));
        assert_eq!(syntax::quoted_terminated(r#""x"#), None);
        assert_eq!(syntax::quoted_terminated("x"), None);
    }

    #[test]
    fn test_comment() {
        assert_eq!(syntax::comment("(a(b)c) rest"), ("a(b)c".into(), " rest"));
        assert_eq!(syntax::comment("(a(b"), ("a(b".into(), ""));
        assert_eq!(
            syntax::comment(r"(comment (with \) quoting) and nesting)").0,
            "comment (with ) quoting) and nesting"
        );
        assert_eq!(syntax::comment(r"(\strange quoting)").0, "strange quoting");
        assert_eq!(syntax::comment("no comment"), ("".into(), "no comment"));
    }

    #[test]
    fn test_escaping_is_inverted_by_scanning() {
        let values = [
            "",
            "plain",
            r#"quote " and backslash \"#,
            "(nested (parens))",
            r"unbalanced ) ( \",
            r"\\\",
        ];

        for value in values.iter() {
            let mut quoted = String::new();
            syntax::write_quoted(&mut quoted, value).unwrap();
            assert_eq!(syntax::quoted(&quoted), ((*value).into(), ""));

            let mut comment = String::new();
            syntax::write_comment(&mut comment, value).unwrap();
            assert_eq!(syntax::comment(&comment), ((*value).into(), ""));
        }
    }

    #[test]
    fn test_write_delimited() {
        let mut buffer = String::new();
        syntax::write_comment(&mut buffer, r"a (b) \c").unwrap();
        assert_eq!(buffer, r"(a \(b\) \\c)");

        let mut buffer = String::new();
        syntax::write_quoted(&mut buffer, r#"say "hi" \o/"#).unwrap();
        assert_eq!(buffer, r#""say \"hi\" \\o/""#);
    }
}
