//! Typed parsing and building of structured HTTP header fields.
//!
//! Header values are read from (and written to) a [`HeaderMap`], a multimap from header names to
//! the physical header lines received for that name. Several lines with the same name form one
//! logical comma-separated list, so the typed headers in [`header::types`] always consider every
//! line of a header when decoding.
//!
//! Parsing is lenient. A malformed element degrades locally (it is skipped, or it is kept with some
//! fields left empty) and never prevents the following elements from being recovered. This matters
//! for headers such as `Forwarded`, where the element appended by a trusted gateway must be
//! readable no matter what an untrusted client sent before it.
//!
//! # Examples
//!
//! ```
//! use std::convert::TryFrom;
//!
//! use httpfield::header::types::{Via, ViaEntry};
//! use httpfield::{HeaderMap, HeaderMapExtension, HeaderName, HeaderValue};
//!
//! let mut map = HeaderMap::new();
//! map.append(HeaderName::Via, HeaderValue::try_from("1.0 fred, 1.1 p.example.net").unwrap());
//!
//! let via = map.typed_get::<Via>().unwrap();
//! assert_eq!(via.len(), 2);
//! assert_eq!(via[1].received_proto, "HTTP/1.1");
//! assert_eq!(via[1].received_by, "p.example.net");
//!
//! map.typed_append(Via::from(ViaEntry::new("HTTP/1.1", "gw.example.org")));
//! assert_eq!(map.typed_get::<Via>().unwrap().len(), 3);
//! ```

mod log;
mod syntax;

pub mod header;

pub use crate::header::{
    HeaderMap, HeaderMapExtension, HeaderName, HeaderNameError, HeaderValue, HeaderValueError,
    TypedHeader,
};
