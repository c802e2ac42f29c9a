use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Behaviour to fulfill a promise from an input `&str`, without knowledge of its type T.
///
/// We use this at the top of the parser object graph so positionals of varying types may share one specification.
pub(crate) trait Fulfill {
    /// The declared name of the promise (display only).
    fn name(&self) -> &str;

    /// Whether the promise may go unfulfilled.
    fn is_optional(&self) -> bool;

    /// Coerce, validate, and store the token into this promise.
    fn fulfill(&mut self, token: &str) -> Result<(), Rejection>;
}

/// The reason a token was not accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum Rejection {
    #[error("it is invalid")]
    InvalidConversion,
    #[error("{0}")]
    Invalid(String),
}

/// Construct a `T` from the token, or fail.
pub(crate) fn coerce<T: FromStr>(token: &str) -> Result<T, Rejection> {
    T::from_str(token).map_err(|_| {
        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Cannot convert '{token}' to {}.",
                std::any::type_name::<T>()
            );
        }

        Rejection::InvalidConversion
    })
}
