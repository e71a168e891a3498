/// Implements the conversions shared by the headers that are a list of entries.
macro_rules! entry_list {
    ($header:ident, $entry:ty) => {
        impl $header {
            /// Constructs a new header with no entries.
            pub fn new() -> Self {
                $header::default()
            }
        }

        impl ::std::ops::Deref for $header {
            type Target = Vec<$entry>;

            fn deref(&self) -> &Vec<$entry> {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $header {
            fn deref_mut(&mut self) -> &mut Vec<$entry> {
                &mut self.0
            }
        }

        impl From<Vec<$entry>> for $header {
            fn from(entries: Vec<$entry>) -> Self {
                $header(entries)
            }
        }

        impl From<$entry> for $header {
            fn from(entry: $entry) -> Self {
                $header(vec![entry])
            }
        }

        impl ::std::iter::FromIterator<$entry> for $header {
            fn from_iter<I>(iterator: I) -> Self
            where
                I: IntoIterator<Item = $entry>,
            {
                $header(iterator.into_iter().collect())
            }
        }

        impl IntoIterator for $header {
            type Item = $entry;
            type IntoIter = ::std::vec::IntoIter<$entry>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }
    };
}

pub mod allow;
pub mod forwarded;
pub mod vary;
pub mod via;
pub mod warning;

pub use self::allow::Allow;
pub use self::forwarded::{Forwarded, ForwardedElem};
pub use self::vary::Vary;
pub use self::via::{Via, ViaEntry};
pub use self::warning::{Warning, WarningEntry};

use itertools::Itertools;
use std::fmt::Display;
use std::iter;

use crate::header::HeaderValue;

/// Encodes a list header as a single header value with its entries joined by `", "`.
///
/// An empty list is encoded as an empty value so that the header is still present.
fn encode_joined<Entries, Target>(entries: Entries, values: &mut Target)
where
    Entries: IntoIterator,
    Entries::Item: Display,
    Target: Extend<HeaderValue>,
{
    let value = entries.into_iter().join(", ");
    values.extend(iter::once(HeaderValue::from_string_unchecked(value)));
}
