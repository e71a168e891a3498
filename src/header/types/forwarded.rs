use itertools::Itertools;
use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;

use crate::header::elements;
use crate::header::{HeaderName, HeaderValue, TypedHeader};
use crate::log::trace;
use crate::syntax;

/// The `"Forwarded"` typed header as described by
/// [[RFC7239, Section 4](https://tools.ietf.org/html/rfc7239#section-4)].
///
/// Any well-formed elements at the end of the header are recovered even if malformed elements
/// precede them, so the information appended by a trusted gateway is available no matter what the
/// (untrusted) client sent. Deciding which elements to trust is up to the caller.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Forwarded(pub Vec<ForwardedElem>);

entry_list!(Forwarded, ForwardedElem);

/// One element of the `"Forwarded"` header.
///
/// The standard parameters have fields of their own. Empty fields were not present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForwardedElem {
    /// The user-agent facing interface of the proxy.
    pub by: String,

    /// The node making the request to the proxy.
    pub for_: String,

    /// The `"Host"` header as received by the proxy.
    pub host: String,

    /// The protocol used to make the request, lowercased.
    pub proto: String,

    /// Extension parameters, keyed by lowercased name.
    pub ext: HashMap<String, String>,
}

impl ForwardedElem {
    /// Returns the IP address and port of the `for` node.
    ///
    /// Either part is `None` or `0` respectively if it is missing or could not be parsed, which is
    /// the case for obfuscated identifiers and `unknown`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    ///
    /// use httpfield::header::types::ForwardedElem;
    ///
    /// let mut elem = ForwardedElem::default();
    ///
    /// elem.for_ = "[2001:db8:cafe::17]:4711".to_string();
    /// assert_eq!(
    ///     elem.for_addr(),
    ///     (Some(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0xcafe, 0, 0, 0, 0, 0x17))), 4711)
    /// );
    ///
    /// elem.for_ = "192.0.2.43".to_string();
    /// assert_eq!(elem.for_addr(), (Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 43))), 0));
    ///
    /// elem.for_ = "_hidden:_port".to_string();
    /// assert_eq!(elem.for_addr(), (None, 0));
    /// ```
    pub fn for_addr(&self) -> (Option<IpAddr>, u16) {
        node_addr(&self.for_)
    }

    /// Returns the IP address and port of the `by` node. See [`ForwardedElem::for_addr`].
    pub fn by_addr(&self) -> (Option<IpAddr>, u16) {
        node_addr(&self.by)
    }

    fn parse(element: &str) -> (Option<ForwardedElem>, &str) {
        let mut elem = ForwardedElem::default();
        let mut rest = element;

        loop {
            let (name, after_name) = syntax::token(rest);

            if name.is_empty() {
                let after_name = syntax::skip_whitespace(after_name);

                match syntax::consume(after_name, b';') {
                    (after_separator, true) => {
                        rest = syntax::skip_whitespace(after_separator);
                        continue;
                    }
                    _ => break,
                }
            }

            let (after_equals, has_value) =
                syntax::consume(syntax::skip_whitespace(after_name), b'=');

            if !has_value {
                trace!("forwarded parameter {:?} has no value", name);
                break;
            }

            let after_equals = syntax::skip_whitespace(after_equals);
            let (value, after_value) = if after_equals.starts_with('"') {
                match syntax::quoted_terminated(after_equals) {
                    Some(quoted) => quoted,
                    None => {
                        trace!("forwarded parameter {:?} has an unterminated value", name);
                        break;
                    }
                }
            } else {
                let (value, after_value) = syntax::token(after_equals);
                (Cow::Borrowed(value), after_value)
            };

            let value = value.into_owned();

            match name.to_ascii_lowercase().as_str() {
                "by" => elem.by = value,
                "for" => elem.for_ = value,
                "host" => elem.host = value,
                "proto" => elem.proto = value.to_ascii_lowercase(),
                _ => {
                    elem.ext.insert(name.to_ascii_lowercase(), value);
                }
            }

            rest = after_value;
        }

        (Some(elem), rest)
    }
}

impl Display for ForwardedElem {
    /// Writes the element in wire form: the standard parameters that are present, followed by the
    /// extension parameters ordered by name, separated by `;`.
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let standard = [
            ("for", &self.for_),
            ("by", &self.by),
            ("host", &self.host),
            ("proto", &self.proto),
        ];
        let standard = standard
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|&(name, value)| (name, value.as_str()));
        let extensions = self
            .ext
            .iter()
            .sorted()
            .map(|(name, value)| (name.as_str(), value.as_str()));

        for (index, (name, value)) in standard.chain(extensions).enumerate() {
            if index > 0 {
                formatter.write_str(";")?;
            }

            write!(formatter, "{}=", name)?;

            if syntax::is_token(value.as_bytes()) {
                formatter.write_str(value)?;
            } else {
                syntax::write_quoted(formatter, value)?;
            }
        }

        Ok(())
    }
}

/// Splits a `node` into its address and port. The port follows the last `:` outside of brackets,
/// and brackets around an IPv6 address are removed.
fn node_addr(node: &str) -> (Option<IpAddr>, u16) {
    if let Ok(address) = node.parse() {
        return (Some(address), 0);
    }

    let bracket_end = node.find(']');
    let (address, port) = match node.rfind(':') {
        Some(index) if bracket_end.map_or(true, |end| index > end) => {
            (&node[..index], &node[index + 1..])
        }
        _ => (node, ""),
    };

    let address = address.strip_prefix('[').unwrap_or(address);
    let address = address.strip_suffix(']').unwrap_or(address);
    (address.parse().ok(), port.parse().unwrap_or(0))
}

impl TypedHeader for Forwarded {
    type DecodeError = Infallible;

    /// Returns the statically assigned [`HeaderName`] for this header.
    fn header_name() -> &'static HeaderName {
        &HeaderName::Forwarded
    }

    /// Converts the raw header values to the [`Forwarded`] header type. Based on the syntax
    /// provided by [[RFC7239, Section 4](https://tools.ietf.org/html/rfc7239#section-4)], this
    /// header has the following syntax:
    ///
    /// ```text
    /// Forwarded   = 1#forwarded-element
    /// forwarded-element = [ forwarded-pair ] *( ";" [ forwarded-pair ] )
    /// forwarded-pair = token "=" value
    /// value          = token / quoted-string
    /// ```
    ///
    /// Decoding never fails and every element is kept. Parameter names are case-insensitive, and a
    /// repeated parameter keeps its last value. Scanning of an element stops at a parameter without
    /// a value or with an unterminated quoted value, keeping the parameters read so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::Forwarded;
    /// use httpfield::{HeaderValue, TypedHeader};
    ///
    /// let raw_header = vec![
    ///     HeaderValue::try_from(r#"for="_gazonk", For="[2001:db8:cafe::17]:4711""#).unwrap(),
    ///     HeaderValue::try_from("for=192.0.2.60;proto=HTTP;by=203.0.113.43;secret=x").unwrap(),
    /// ];
    /// let forwarded = Forwarded::decode(&mut raw_header.iter()).unwrap().unwrap();
    ///
    /// assert_eq!(forwarded.len(), 3);
    /// assert_eq!(forwarded[0].for_, "_gazonk");
    /// assert_eq!(forwarded[1].for_, "[2001:db8:cafe::17]:4711");
    /// assert_eq!(forwarded[2].proto, "http");
    /// assert_eq!(forwarded[2].by, "203.0.113.43");
    /// assert_eq!(forwarded[2].ext["secret"], "x");
    /// ```
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Iter: Iterator<Item = &'header HeaderValue>,
    {
        Ok(elements::parse_elements(values, ForwardedElem::parse).map(Forwarded))
    }

    /// Converts the [`Forwarded`] type to a single raw header value.
    ///
    /// An element with no parameters at all is written as nothing, so it is lost when the value is
    /// decoded again: encoding `[ForwardedElem::default(), elem]` and decoding the result gives
    /// `[elem]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use httpfield::header::types::{Forwarded, ForwardedElem};
    /// use httpfield::TypedHeader;
    ///
    /// let elem = ForwardedElem {
    ///     for_: "[2001:db8:cafe::17]:4711".to_string(),
    ///     proto: "https".to_string(),
    ///     ..ForwardedElem::default()
    /// };
    /// let mut raw_header = vec![];
    /// Forwarded::from(elem).encode(&mut raw_header);
    ///
    /// assert_eq!(raw_header, vec![r#"for="[2001:db8:cafe::17]:4711";proto=https"#]);
    /// ```
    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>,
    {
        super::encode_joined(self.iter(), values);
    }
}
