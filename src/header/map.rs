use ordered_multimap::ListOrderedMultimap;

use crate::header::{HeaderName, HeaderValue};

/// A multimap from header names to the header lines received (or to be sent) under that name.
pub type HeaderMap = ListOrderedMultimap<HeaderName, HeaderValue>;

/// Typed access to a [`HeaderMap`].
///
/// # Examples
///
/// ```
/// use std::convert::TryFrom;
///
/// use httpfield::header::types::Allow;
/// use httpfield::{HeaderMap, HeaderMapExtension, HeaderName, HeaderValue};
///
/// let mut map = HeaderMap::new();
/// assert_eq!(map.typed_get::<Allow>(), None);
///
/// map.append(HeaderName::Allow, HeaderValue::try_from("GET, HEAD").unwrap());
/// map.append(HeaderName::Allow, HeaderValue::try_from("OPTIONS").unwrap());
/// assert_eq!(map.typed_get::<Allow>().unwrap().as_slice(), ["GET", "HEAD", "OPTIONS"]);
///
/// map.typed_insert(Allow::from(vec!["PUT".to_string()]));
/// assert_eq!(map.get_all(&HeaderName::Allow).count(), 1);
/// assert_eq!(map.typed_get::<Allow>().unwrap().as_slice(), ["PUT"]);
/// ```
pub trait HeaderMapExtension: private::Sealed {
    /// Replaces every value of the header with the encoding of `header`.
    fn typed_insert<Header>(&mut self, header: Header)
    where
        Header: TypedHeader;

    /// Appends the encoding of `header` after any existing values of the header.
    fn typed_append<Header>(&mut self, header: Header)
    where
        Header: TypedHeader;

    /// Decodes the header. Returns `None` if the header is absent or could not be decoded.
    fn typed_get<Header>(&self) -> Option<Header>
    where
        Header: TypedHeader;

    fn typed_try_get<Header>(&self) -> Result<Option<Header>, Header::DecodeError>
    where
        Header: TypedHeader;
}

impl HeaderMapExtension for HeaderMap {
    fn typed_insert<Header>(&mut self, header: Header)
    where
        Header: TypedHeader,
    {
        self.remove_all(Header::header_name());
        self.typed_append(header);
    }

    fn typed_append<Header>(&mut self, header: Header)
    where
        Header: TypedHeader,
    {
        let mut extend_wrapper = ExtendWrapper {
            map: self,
            name: Header::header_name(),
        };
        header.encode(&mut extend_wrapper);
    }

    fn typed_get<Header>(&self) -> Option<Header>
    where
        Header: TypedHeader,
    {
        self.typed_try_get().unwrap_or(None)
    }

    fn typed_try_get<Header>(&self) -> Result<Option<Header>, Header::DecodeError>
    where
        Header: TypedHeader,
    {
        let mut iter = self.get_all(Header::header_name());
        Header::decode(&mut iter)
    }
}

/// A header with a typed representation.
pub trait TypedHeader {
    type DecodeError;

    /// Returns the `HeaderName` associated with this `TypedHeader`.
    fn header_name() -> &'static HeaderName
    where
        Self: Sized;

    /// Decodes the header from all of its values, in order.
    ///
    /// Returns `Ok(None)` when there are no values at all, which is distinct from a header that is
    /// present but holds no elements.
    fn decode<'header, Iter>(values: &mut Iter) -> Result<Option<Self>, Self::DecodeError>
    where
        Self: Sized,
        Iter: Iterator<Item = &'header HeaderValue>;

    fn encode<Target>(&self, values: &mut Target)
    where
        Target: Extend<HeaderValue>;
}

struct ExtendWrapper<'map> {
    map: &'map mut HeaderMap,
    name: &'static HeaderName,
}

impl<'map> Extend<HeaderValue> for ExtendWrapper<'map> {
    fn extend<Iter>(&mut self, iter: Iter)
    where
        Iter: IntoIterator<Item = HeaderValue>,
    {
        for value in iter {
            self.map.append(self.name.clone(), value);
        }
    }
}

mod private {
    use super::HeaderMap;

    pub trait Sealed {}

    impl Sealed for HeaderMap {}
}
