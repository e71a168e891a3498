use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};

use crate::header::elements;
use crate::header::{HeaderName, HeaderValue, TypedHeader};
use crate::log::trace;
use crate::syntax;

/// The `"Via"` typed header as described by
/// [[RFC7230, Section 5.7.1](https://tools.ietf.org/html/rfc7230#section-5.7.1)].
///
/// Entries are in the order the intermediaries appended them, so the first entry is the one
/// closest to the original sender.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Via(pub Vec<ViaEntry>);

entry_list!(Via, ViaEntry);

/// One element of the `"Via"` header.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ViaEntry {
    /// The protocol the message was received with, always including the protocol name: `HTTP/1.1`
    /// rather than `1.1`. Empty only if the entry was built that way.
    pub received_proto: String,

    /// The host (and optionally port) or pseudonym of the recipient. Empty if the element did not
    /// have one.
    pub received_by: String,

    /// The comment following the recipient, unescaped. Empty if there was none.
    pub comment: String,
}

impl ViaEntry {
    /// Constructs an entry with no comment.
    pub fn new<Proto, By>(received_proto: Proto, received_by: By) -> Self
    where
        Proto: Into<String>,
        By: Into<String>,
    {
        ViaEntry {
            received_proto: received_proto.into(),
            received_by: received_by.into(),
            comment: String::new(),
        }
    }

    /// Sets the comment.
    pub fn with_comment<Comment>(mut self, comment: Comment) -> Self
    where
        Comment: Into<String>,
    {
        self.comment = comment.into();
        self
    }

    fn parse(element: &str) -> (Option<ViaEntry>, &str) {
        let (protocol, rest) = syntax::chomp(element);

        if protocol.is_empty() {
            trace!("skipping via element without a protocol");
            return (None, rest);
        }

        let received_proto = if protocol.contains('/') {
            protocol.to_string()
        } else {
            format!("HTTP/{}", protocol)
        };

        let (received_by, rest) = syntax::chomp(rest);
        let (comment, rest) = match syntax::peek(rest) {
            Some(b'(') => syntax::comment(rest),
            _ => (Cow::Borrowed(""), rest),
        };

        let entry = ViaEntry {
            received_proto,
            received_by: received_by.to_string(),
            comment: comment.into_owned(),
        };
        (Some(entry), rest)
    }
}

impl Display for ViaEntry {
    /// Writes the entry in wire form, with the `HTTP/` protocol name left implicit.
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let protocol = if self.received_proto.starts_with("HTTP/") {
            &self.received_proto["HTTP/".len()..]
        } else {
            self.received_proto.as_str()
        };

        write!(formatter, "{} {}", protocol, self.received_by)?;

        if !self.comment.is_empty() {
            formatter.write_str(" ")?;
            syntax::write_comment(formatter, &self.comment)?;
        }

        Ok(())
    }
}

impl TypedHeader for Via {
    type DecodeError = Infallible;

    /// Returns the statically assigned [`HeaderName`] for this header.
    fn header_name() -> &'static HeaderName {
        &HeaderName::Via
    }

    /// Converts the raw header values to the [`Via`] header type. Based on the syntax provided by
    /// [[RFC7230, Section 5.7.1](https://tools.ietf.org/html/rfc7230#section-5.7.1)], this header
    /// has the following syntax:
    ///
    /// ```text
    /// Via = 1#( received-protocol RWS received-by [ RWS comment ] )
    /// received-protocol = [ protocol-name "/" ] protocol-version
    /// received-by       = ( uri-host [ ":" port ] ) / pseudonym
    /// pseudonym         = token
    /// ```
    ///
    /// Decoding never fails. An element without a protocol is skipped, and an element without a
    /// recipient is kept with an empty [`ViaEntry::received_by`]. A protocol given without a name
    /// is taken to be HTTP.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::{Via, ViaEntry};
    /// use httpfield::{HeaderValue, TypedHeader};
    ///
    /// let raw_header = vec![
    ///     HeaderValue::try_from("1.1 foo.example.com:8080 (corporate)").unwrap(),
    ///     HeaderValue::try_from("2 bar.example.net").unwrap(),
    /// ];
    ///
    /// assert_eq!(
    ///     Via::decode(&mut raw_header.iter()).unwrap(),
    ///     Some(Via(vec![
    ///         ViaEntry::new("HTTP/1.1", "foo.example.com:8080").with_comment("corporate"),
    ///         ViaEntry::new("HTTP/2", "bar.example.net"),
    ///     ]))
    /// );
    /// ```
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Iter: Iterator<Item = &'header HeaderValue>,
    {
        Ok(elements::parse_elements(values, ViaEntry::parse).map(Via))
    }

    /// Converts the [`Via`] type to a single raw header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::{Via, ViaEntry};
    /// use httpfield::{HeaderValue, TypedHeader};
    ///
    /// let typed_header = Via(vec![
    ///     ViaEntry::new("HTTP/1.0", "foo"),
    ///     ViaEntry::new("FSTR/3", "bar").with_comment("some (new) protocol"),
    /// ]);
    /// let mut raw_header = vec![];
    /// typed_header.encode(&mut raw_header);
    ///
    /// assert_eq!(raw_header, vec![r"1.0 foo, FSTR/3 bar (some \(new\) protocol)"]);
    /// ```
    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>,
    {
        super::encode_joined(self.iter(), values);
    }
}

#[cfg(test)]
mod test {
    use std::convert::TryFrom;

    use crate::header::types::{Via, ViaEntry};
    use crate::header::{HeaderValue, TypedHeader};

    fn decode(lines: &[&str]) -> Option<Via> {
        let values = lines
            .iter()
            .map(|line| HeaderValue::try_from(*line).unwrap())
            .collect::<Vec<_>>();
        Via::decode(&mut values.iter()).unwrap()
    }

    fn entry(received_proto: &str, received_by: &str, comment: &str) -> ViaEntry {
        ViaEntry::new(received_proto, received_by).with_comment(comment)
    }

    #[test]
    fn test_via_decode() {
        let tests = vec![
            (vec!["1.0 foo"], vec![entry("HTTP/1.0", "foo", "")]),
            (vec!["1.0 \tfoo"], vec![entry("HTTP/1.0", "foo", "")]),
            (vec!["1.0 foo  "], vec![entry("HTTP/1.0", "foo", "")]),
            (vec!["1.0 foo  ,"], vec![entry("HTTP/1.0", "foo", "")]),
            (
                vec!["1.0 foo\t (comment)"],
                vec![entry("HTTP/1.0", "foo", "comment")],
            ),
            (
                vec!["1.0 foo,1.0   bar\t, \t 1.0 baz,,", "1.1 qux"],
                vec![
                    entry("HTTP/1.0", "foo", ""),
                    entry("HTTP/1.0", "bar", ""),
                    entry("HTTP/1.0", "baz", ""),
                    entry("HTTP/1.1", "qux", ""),
                ],
            ),
            (
                vec!["HTTP/2 foo", "FSTR/3 bar (some new protocol)"],
                vec![
                    entry("HTTP/2", "foo", ""),
                    entry("FSTR/3", "bar", "some new protocol"),
                ],
            ),
            (
                vec!["1.1 foo (comment (with) nesting)"],
                vec![entry("HTTP/1.1", "foo", "comment (with) nesting")],
            ),
            (
                vec!["1.1 foo (comment (with nesting))"],
                vec![entry("HTTP/1.1", "foo", "comment (with nesting)")],
            ),
            (
                vec![r"1.1 foo (comment with \) quoting)"],
                vec![entry("HTTP/1.1", "foo", "comment with ) quoting")],
            ),
            (
                vec![r"1.1 foo (comment (with \) quoting) and nesting)"],
                vec![entry(
                    "HTTP/1.1",
                    "foo",
                    "comment (with ) quoting) and nesting",
                )],
            ),
            (
                vec![r"1.1 foo (\strange quoting)"],
                vec![entry("HTTP/1.1", "foo", "strange quoting")],
            ),
            (
                vec!["1.1 foo (comment, with a comma), 1.0 bar"],
                vec![
                    entry("HTTP/1.1", "foo", "comment, with a comma"),
                    entry("HTTP/1.0", "bar", ""),
                ],
            ),
        ];

        for (lines, expected) in tests {
            assert_eq!(decode(&lines), Some(Via(expected)), "{:?}", lines);
        }
    }

    #[test]
    fn test_via_decode_malformed() {
        let tests = vec![
            (vec!["1.0"], vec![entry("HTTP/1.0", "", "")]),
            (
                vec!["1.0, 1.1 foo, 1.2, 1.3 bar"],
                vec![
                    entry("HTTP/1.0", "", ""),
                    entry("HTTP/1.1", "foo", ""),
                    entry("HTTP/1.2", "", ""),
                    entry("HTTP/1.3", "bar", ""),
                ],
            ),
            (
                vec!["1.1 foo (unterminated", "1.1 bar"],
                vec![
                    entry("HTTP/1.1", "foo", "unterminated"),
                    entry("HTTP/1.1", "bar", ""),
                ],
            ),
            (
                vec!["1.1 foo (unterminated (with nesting)"],
                vec![entry("HTTP/1.1", "foo", "unterminated (with nesting)")],
            ),
            (
                vec![r"1.1 foo (unterminated with \quoting (and nesting", "1.1 bar"],
                vec![
                    entry("HTTP/1.1", "foo", "unterminated with quoting (and nesting"),
                    entry("HTTP/1.1", "bar", ""),
                ],
            ),
            (
                vec!["1.1 foo junk, 1.1 bar"],
                vec![entry("HTTP/1.1", "foo", ""), entry("HTTP/1.1", "bar", "")],
            ),
        ];

        for (lines, expected) in tests {
            assert_eq!(decode(&lines), Some(Via(expected)), "{:?}", lines);
        }
    }

    #[test]
    fn test_via_absent_and_empty() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&["", " , "]), Some(Via::new()));
    }

    #[test]
    fn test_via_encode() {
        let mut raw_header = vec![];
        Via(vec![
            entry("HTTP/1.1", "foo.example.com:8080", "corporate"),
            entry("HTTP/2", "bar", ""),
            entry("FSTR/3", "baz", r"a \ b"),
        ])
        .encode(&mut raw_header);

        assert_eq!(
            raw_header,
            vec![r"1.1 foo.example.com:8080 (corporate), 2 bar, FSTR/3 baz (a \\ b)"]
        );
    }

    #[test]
    fn test_via_encode_empty() {
        let mut raw_header = vec![];
        Via::new().encode(&mut raw_header);
        assert_eq!(raw_header, vec![""]);
        assert_eq!(Via::decode(&mut raw_header.iter()).unwrap(), Some(Via::new()));
    }
}
