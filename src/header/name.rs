//! Header Name

use std::convert::{Infallible, TryFrom};
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::syntax;

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($variant:ident, $name:expr, $canonical_name:expr);
        )+
    ) => {
        /// An HTTP header name.
        ///
        /// Names compare case-insensitively. The headers this crate has typed support for (and a
        /// few that commonly show up in `Vary`) are variants, any other valid token is an
        /// [`ExtensionHeaderName`].
        #[derive(Clone, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum HeaderName {
        $(
            $(#[$docs])*
            $variant,
        )+

            /// A header name that is not one of the named variants.
            Extension(ExtensionHeaderName)
        }

        impl HeaderName {
            /// Returns the lowercase representation of the header name.
            ///
            /// # Examples
            ///
            /// ```
            /// use httpfield::HeaderName;
            ///
            /// assert_eq!(HeaderName::Forwarded.as_str(), "forwarded");
            /// ```
            pub fn as_str(&self) -> &str {
                use self::HeaderName::*;

                match *self {
                $(
                    $variant => $name,
                )+
                    Extension(ref extension) => extension.as_str()
                }
            }

            /// Returns the canonical representation of the header name, as it would be written on
            /// the wire.
            ///
            /// # Examples
            ///
            /// ```
            /// use httpfield::HeaderName;
            ///
            /// assert_eq!(HeaderName::AcceptEncoding.canonical_name(), "Accept-Encoding");
            /// ```
            pub fn canonical_name(&self) -> &str {
                use self::HeaderName::*;

                match *self {
                $(
                    $variant => $canonical_name,
                )+
                    Extension(ref extension) => extension.canonical_name()
                }
            }

            fn standard(name: &[u8]) -> Option<HeaderName> {
            $(
                if name.eq_ignore_ascii_case($name.as_bytes()) {
                    return Some(HeaderName::$variant);
                }
            )+
                None
            }
        }

    }
}

impl HeaderName {
    /// Creates an extension header name after checking that it is a non-empty token. The name is
    /// canonicalized: the first letter and every letter after a `-` are uppercased, the rest are
    /// lowercased.
    fn extension(name: &[u8]) -> Result<HeaderName, HeaderNameError> {
        if name.is_empty() {
            return Err(HeaderNameError::Empty);
        }

        if !syntax::is_token(name) {
            return Err(HeaderNameError::InvalidCharacter);
        }

        let mut upper = true;
        let canonical = name
            .iter()
            .map(|&byte| {
                let byte = if upper {
                    byte.to_ascii_uppercase()
                } else {
                    byte.to_ascii_lowercase()
                };
                upper = byte == b'-';
                char::from(byte)
            })
            .collect::<String>();
        let lowercase = canonical.to_ascii_lowercase();
        Ok(HeaderName::Extension(ExtensionHeaderName(
            canonical, lowercase,
        )))
    }
}

impl AsRef<str> for HeaderName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Debug for HeaderName {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.canonical_name())
    }
}

impl Display for HeaderName {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.canonical_name())
    }
}

impl PartialEq<str> for HeaderName {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl<'header> PartialEq<&'header str> for HeaderName {
    fn eq(&self, other: &&'header str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl<'a> TryFrom<&'a [u8]> for HeaderName {
    type Error = HeaderNameError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        match HeaderName::standard(value) {
            Some(name) => Ok(name),
            None => HeaderName::extension(value),
        }
    }
}

impl<'a> TryFrom<&'a str> for HeaderName {
    type Error = HeaderNameError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        HeaderName::try_from(value.as_bytes())
    }
}

/// A header name that has no variant of its own.
///
/// The name is displayed in canonical form (`X-Request-Id`), while hashing and equality use the
/// lowercase form.
#[derive(Clone)]
pub struct ExtensionHeaderName(String, String);

impl ExtensionHeaderName {
    /// Returns the lowercase representation of the extension header name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::HeaderName;
    ///
    /// match HeaderName::try_from("X-Forwarded-For").unwrap() {
    ///     HeaderName::Extension(extension) => assert_eq!(extension.as_str(), "x-forwarded-for"),
    ///     _ => panic!("expected extension header name")
    /// }
    /// ```
    pub fn as_str(&self) -> &str {
        self.1.as_str()
    }

    /// Returns the canonical form of the extension header name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::convert::TryFrom;
    ///
    /// use httpfield::HeaderName;
    ///
    /// let name = HeaderName::try_from("x-forwarded-FOR").unwrap();
    /// assert_eq!(name.canonical_name(), "X-Forwarded-For");
    /// ```
    pub fn canonical_name(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for ExtensionHeaderName {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl Display for ExtensionHeaderName {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl Eq for ExtensionHeaderName {}

impl Hash for ExtensionHeaderName {
    fn hash<TState>(&self, state: &mut TState)
    where
        TState: Hasher,
    {
        self.1.hash(state);
    }
}

impl PartialEq for ExtensionHeaderName {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

/// A possible error value when converting to a [`HeaderName`] from a `&[u8]` or `&str`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HeaderNameError {
    /// The header name was empty.
    Empty,

    /// The header name contained a character that is not allowed in a token.
    InvalidCharacter,
}

impl Display for HeaderNameError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::HeaderNameError::*;

        match self {
            Empty => write!(formatter, "empty header name"),
            InvalidCharacter => write!(formatter, "invalid header name character"),
        }
    }
}

impl Error for HeaderNameError {}

impl From<Infallible> for HeaderNameError {
    fn from(_: Infallible) -> Self {
        HeaderNameError::Empty
    }
}

standard_headers! {
    /// Accept-Encoding
    /// [[RFC7231, Section 5.3.4](https://tools.ietf.org/html/rfc7231#section-5.3.4)]
    (AcceptEncoding, "accept-encoding", "Accept-Encoding");

    /// Allow
    /// [[RFC7231, Section 7.4.1](https://tools.ietf.org/html/rfc7231#section-7.4.1)]
    (Allow, "allow", "Allow");

    /// Cookie
    /// [[RFC6265, Section 5.4](https://tools.ietf.org/html/rfc6265#section-5.4)]
    (Cookie, "cookie", "Cookie");

    /// Forwarded
    /// [[RFC7239, Section 4](https://tools.ietf.org/html/rfc7239#section-4)]
    (Forwarded, "forwarded", "Forwarded");

    /// User-Agent
    /// [[RFC7231, Section 5.5.3](https://tools.ietf.org/html/rfc7231#section-5.5.3)]
    (UserAgent, "user-agent", "User-Agent");

    /// Vary
    /// [[RFC7231, Section 7.1.4](https://tools.ietf.org/html/rfc7231#section-7.1.4)]
    (Vary, "vary", "Vary");

    /// Via
    /// [[RFC7230, Section 5.7.1](https://tools.ietf.org/html/rfc7230#section-5.7.1)]
    (Via, "via", "Via");

    /// Warning
    /// [[RFC7234, Section 5.5](https://tools.ietf.org/html/rfc7234#section-5.5)]
    (Warning, "warning", "Warning");
}
