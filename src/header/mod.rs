//! HTTP header types
//!
//! The module provides [`HeaderName`], [`HeaderValue`], [`HeaderMap`], and the typed headers in
//! [`types`] that are read from and written to a [`HeaderMap`].
//!
//! # `HeaderName`
//!
//! The `HeaderName` type represents both the standard header names this crate knows about and any
//! other valid token. Header names compare and hash case-insensitively, so a `HeaderMap` lookup
//! for `Via` will find values inserted under `via` or `VIA`.
//!
//! # `HeaderMap`
//!
//! `HeaderMap` is a [multimap] from header names to header values. Each value is one physical
//! header line, and the values stored under one name keep their insertion order. Together they form
//! one logical comma-separated list, as if they had been joined with `", "`.
//!
//! [multimap]: https://en.wikipedia.org/wiki/Multimap

pub mod common;
pub(crate) mod elements;
pub mod map;
pub mod name;
pub mod types;
pub mod value;

pub use self::map::{HeaderMap, HeaderMapExtension, TypedHeader};
pub use self::name::{HeaderName, HeaderNameError};
pub use self::value::{HeaderValue, HeaderValueError};
