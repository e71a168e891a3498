//! Header Value

use std::convert::{Infallible, TryFrom};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str;

/// One physical header line's value, UTF-8 encoded.
///
/// Several values with the same header name form a single logical comma-separated list. The
/// typed headers read all of them; see [`HeaderMapExtension`](crate::HeaderMapExtension).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HeaderValue(String);

impl HeaderValue {
    /// Returns a `&str` representation of the header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::HeaderValue;
    ///
    /// let header_value = HeaderValue::try_from("1.1 proxy.example.net").unwrap();
    /// assert_eq!(header_value.as_str(), "1.1 proxy.example.net")
    /// ```
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Converts a string into a [`HeaderValue`] with no validation.
    ///
    /// Used by the typed header encoders, which only ever emit what they were given plus
    /// separators, quotes and escapes. Control characters supplied by the caller are passed
    /// through as is.
    pub(crate) fn from_string_unchecked(value: String) -> Self {
        HeaderValue(value)
    }

    /// Returns whether the length of the header value is zero.
    ///
    /// The length is in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::HeaderValue;
    ///
    /// assert_eq!(HeaderValue::try_from("GET").unwrap().is_empty(), false);
    /// assert_eq!(HeaderValue::try_from("").unwrap().is_empty(), true);
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the header value in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for HeaderValue {
    fn as_ref(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl AsRef<str> for HeaderValue {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for HeaderValue {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<HeaderValue> for String {
    fn from(value: HeaderValue) -> Self {
        value.0
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<HeaderValue> for str {
    fn eq(&self, other: &HeaderValue) -> bool {
        self == other.0
    }
}

impl<'header> PartialEq<&'header str> for HeaderValue {
    fn eq(&self, other: &&'header str) -> bool {
        self.0 == *other
    }
}

impl<'header> PartialEq<HeaderValue> for &'header str {
    fn eq(&self, other: &HeaderValue) -> bool {
        *self == other.0
    }
}

impl<'a> TryFrom<&'a str> for HeaderValue {
    type Error = HeaderValueError;

    /// Accepts a `field-value` as received on one header line. Obsolete line folding is not
    /// accepted, so a value may not contain CR or LF at all.
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        for c in value.chars() {
            match c {
                '\r' | '\n' => return Err(HeaderValueError::InvalidLineBreak),
                '\t' => {}
                c if c.is_ascii() && (c < ' ' || c == '\x7f') => {
                    return Err(HeaderValueError::InvalidASCII);
                }
                _ => {}
            }
        }

        Ok(HeaderValue(value.to_string()))
    }
}

impl<'a> TryFrom<&'a [u8]> for HeaderValue {
    type Error = HeaderValueError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        str::from_utf8(value)
            .map_err(|_| HeaderValueError::InvalidUTF8)
            .and_then(HeaderValue::try_from)
    }
}

impl TryFrom<String> for HeaderValue {
    type Error = HeaderValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HeaderValue::try_from(value.as_str())
    }
}

/// A possible error value when converting to a [`HeaderValue`] from a `&[u8]` or `&str`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HeaderValueError {
    /// The header value contained unallowed ASCII-US control characters.
    InvalidASCII,

    /// The header value contained a CR or LF.
    InvalidLineBreak,

    /// The header value was invalid UTF-8.
    InvalidUTF8,
}

impl Display for HeaderValueError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::HeaderValueError::*;

        match self {
            InvalidASCII => write!(formatter, "invalid header value ASCII character"),
            InvalidLineBreak => write!(formatter, "invalid header value line break"),
            InvalidUTF8 => write!(formatter, "invalid header value UTF-8"),
        }
    }
}

impl Error for HeaderValueError {}

impl From<Infallible> for HeaderValueError {
    fn from(_: Infallible) -> Self {
        HeaderValueError::InvalidASCII
    }
}
