//! Conversions of foreign errors into [`ChainError`] leaves
//!
//! A converted error becomes an opaque leaf: it carries no code, message or
//! stack of its own, and its display text surfaces through
//! [`dev_message`](crate::dev_message). Wrap it with
//! [`with_stack`](crate::with_stack) to record where it entered the chain.

use crate::config::ConfigError;
use crate::core::link::{ChainError, ForeignError};
use crate::stack::SourceLineError;

macro_rules! impl_foreign_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ChainError {
                fn from(error: $ty) -> Self {
                    Self::foreign(error)
                }
            }
        )+
    };
}

// =============================================================================
// Standard Library Error Conversions
// =============================================================================

impl_foreign_from!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
);

// =============================================================================
// Third-party and Crate Error Conversions
// =============================================================================

impl_foreign_from!(serde_json::Error, ConfigError, SourceLineError);

impl From<ForeignError> for ChainError {
    fn from(error: ForeignError) -> Self {
        Self::from_boxed(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inspect::{dev_message, explicit_code};
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> crate::Result<u16> {
        Ok(raw.parse::<u16>()?)
    }

    #[test]
    fn question_mark_converts_into_a_foreign_leaf() {
        let err = parse("seventy").unwrap_err();
        assert!(err.is_foreign());
        assert!(err.find_foreign::<std::num::ParseIntError>().is_some());
        assert_eq!(dev_message(&err), "invalid digit found in string");
        assert_eq!(explicit_code(&err), None);
    }

    #[test]
    fn io_error_keeps_its_text() {
        let err: ChainError = std::io::Error::other("socket closed").into();
        assert_eq!(err.to_string(), "socket closed");
    }

    #[test]
    fn boxed_errors_are_not_double_wrapped() {
        let boxed: ForeignError = Box::new(std::fmt::Error);
        let err = ChainError::from(boxed);
        assert!(err.find_foreign::<std::fmt::Error>().is_some());
    }

    #[test]
    fn json_errors_convert() {
        let err: ChainError = serde_json::from_str::<u8>("[").unwrap_err().into();
        assert!(err.find_foreign::<serde_json::Error>().is_some());
    }
}
