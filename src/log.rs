#![allow(unused)]

//! Logging shims that compile away unless the `log` feature is enabled.

macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($tt)*);
    };
}

pub(crate) use trace;
