use std::convert::Infallible;

use crate::header::elements;
use crate::header::{HeaderName, HeaderValue, TypedHeader};
use crate::syntax;

/// The `"Allow"` typed header as described by
/// [[RFC7231, Section 7.4.1](https://tools.ietf.org/html/rfc7231#section-7.4.1)].
///
/// A present but empty header means that the resource allows no methods at all.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Allow(pub Vec<String>);

entry_list!(Allow, String);

impl TypedHeader for Allow {
    type DecodeError = Infallible;

    /// Returns the statically assigned [`HeaderName`] for this header.
    fn header_name() -> &'static HeaderName {
        &HeaderName::Allow
    }

    /// Converts the raw header values to the [`Allow`] header type. Based on the syntax provided by
    /// [[RFC7231, Section 7.4.1](https://tools.ietf.org/html/rfc7231#section-7.4.1)], this header
    /// has the following syntax:
    ///
    /// ```text
    /// Allow  = #method
    /// method = token
    /// ```
    ///
    /// Anything following the method token in an element is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::header::types::Allow;
    /// use httpfield::{HeaderValue, TypedHeader};
    ///
    /// let raw_header = vec![HeaderValue::try_from("GET, HEAD, OPTIONS").unwrap()];
    /// let allow = Allow::decode(&mut raw_header.iter()).unwrap().unwrap();
    ///
    /// assert_eq!(allow.as_slice(), ["GET", "HEAD", "OPTIONS"]);
    /// ```
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Iter: Iterator<Item = &'header HeaderValue>,
    {
        let methods = elements::parse_elements(values, |element| {
            let (method, rest) = syntax::token(element);
            let method = Some(method)
                .filter(|method| !method.is_empty())
                .map(str::to_string);
            (method, rest)
        });
        Ok(methods.map(Allow))
    }

    /// Converts the [`Allow`] type to a single raw header value.
    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>,
    {
        super::encode_joined(self.iter(), values);
    }
}
