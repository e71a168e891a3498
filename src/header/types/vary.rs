use std::convert::{Infallible, TryFrom};

use crate::header::elements;
use crate::header::{HeaderName, HeaderValue, TypedHeader};
use crate::syntax;

/// The `"Vary"` typed header as described by
/// [[RFC7231, Section 7.1.4](https://tools.ietf.org/html/rfc7231#section-7.1.4)].
///
/// A wildcard (`Vary: *`) is kept as a list holding the single extension name `*`; see
/// [`Vary::is_wildcard`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vary(pub Vec<HeaderName>);

entry_list!(Vary, HeaderName);

impl Vary {
    /// Returns whether the response varies on something other than request headers.
    pub fn is_wildcard(&self) -> bool {
        self.iter().any(|name| name == "*")
    }
}

impl TypedHeader for Vary {
    type DecodeError = Infallible;

    /// Returns the statically assigned [`HeaderName`] for this header.
    fn header_name() -> &'static HeaderName {
        &HeaderName::Vary
    }

    /// Converts the raw header values to the [`Vary`] header type. Based on the syntax provided by
    /// [[RFC7231, Section 7.1.4](https://tools.ietf.org/html/rfc7231#section-7.1.4)], this header
    /// has the following syntax:
    ///
    /// ```text
    /// Vary = "*" / 1#field-name
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::Vary;
    /// use httpfield::{HeaderName, HeaderValue, TypedHeader};
    ///
    /// let raw_header = vec![HeaderValue::try_from("cookie, accept-encoding").unwrap()];
    /// let vary = Vary::decode(&mut raw_header.iter()).unwrap().unwrap();
    ///
    /// assert_eq!(vary.as_slice(), [HeaderName::Cookie, HeaderName::AcceptEncoding]);
    /// assert_eq!(vary[1].to_string(), "Accept-Encoding");
    /// ```
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Iter: Iterator<Item = &'header HeaderValue>,
    {
        let names = elements::parse_elements(values, |element| {
            let (name, rest) = syntax::token(element);
            (HeaderName::try_from(name).ok(), rest)
        });
        Ok(names.map(Vary))
    }

    /// Converts the [`Vary`] type to a single raw header value, with every name in canonical form.
    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>,
    {
        super::encode_joined(self.iter(), values);
    }
}
