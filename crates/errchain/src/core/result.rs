//! Result type and extension traits

use crate::core::link::ChainError;
use crate::core::wrap;

/// Result type for operations failing with a [`ChainError`]
pub type Result<T> = std::result::Result<T, ChainError>;

/// Extension trait wrapping the error side of a `Result` into a chain
pub trait ResultExt<T> {
    /// Attach a classification code to the error
    fn with_code(self, code: impl Into<String>) -> Result<T>;

    /// Capture the stack where the error passed through
    fn with_stack(self) -> Result<T>;

    /// Attach a user-facing message to the error
    fn with_message<I, S>(self, parts: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Attach developer notes to the error
    fn with_dev_message<I, S>(self, parts: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Attach developer notes computed only on failure
    fn with_dev_message_lazy<F, I, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = S>,
        S: Into<String>;
}

// Matched rather than `map_err`d so no std frame sits between the caller
// and the capture.
impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ChainError>,
{
    fn with_code(self, code: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(wrap::with_code(Some(e.into()), code)),
        }
    }

    #[inline(never)]
    fn with_stack(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(wrap::with_stack(Some(e.into()))),
        }
    }

    fn with_message<I, S>(self, parts: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(wrap::with_message(Some(e.into()), parts)),
        }
    }

    fn with_dev_message<I, S>(self, parts: I) -> Result<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(wrap::with_dev_message(Some(e.into()), parts)),
        }
    }

    fn with_dev_message_lazy<F, I, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(wrap::with_dev_message(Some(e.into()), f())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inspect::{cause, code, dev_message, message, stack_trace};
    use pretty_assertions::assert_eq;

    fn read_missing() -> std::result::Result<String, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
    }

    #[test]
    fn annotates_a_foreign_failure() {
        let err = read_missing()
            .with_stack()
            .with_code("USER")
            .with_message(["config missing"])
            .with_dev_message(["looked in /etc/app"])
            .unwrap_err();

        assert_eq!(code(&err), "USER");
        assert_eq!(message::<&str>(&err, &[]), "config missing");
        assert_eq!(dev_message(&err), "looked in /etc/app, no such file");
        assert!(cause(&err).is_foreign());
        assert!(!stack_trace(&err).is_empty());
    }

    #[test]
    fn success_passes_through() {
        let value: Result<u8> = Ok::<u8, ChainError>(7).with_code("USER").with_message(["unused"]);
        assert_eq!(value.unwrap(), 7);
    }

    #[test]
    fn lazy_notes_are_only_built_on_failure() {
        let mut calls = 0;
        let ok: Result<u8> = Ok::<u8, std::io::Error>(1).with_dev_message_lazy(|| {
            calls += 1;
            ["never"]
        });
        assert!(ok.is_ok());
        assert_eq!(calls, 0);

        let err = read_missing()
            .with_dev_message_lazy(|| [format!("attempt {}", 2)])
            .unwrap_err();
        assert_eq!(dev_message(&err), "attempt 2, no such file");
    }
}
