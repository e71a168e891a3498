//! Grammars shared by more than one header.

pub mod date;

pub use self::date::{format_http_date, parse_http_date, DateTimeError};
