//! Chain constructors and wrapping operations
//!
//! Every operation takes the existing error by value (or `None`) and returns
//! a new chain head owning it. Operations that need a root when given `None`
//! synthesize a stacked root capturing the caller's stack.
//!
//! ```rust
//! use errchain::{code, dev_message, message, with_code, with_dev_message, with_message, with_stack};
//!
//! let err = with_dev_message(
//!     Some(with_message(Some(with_code(Some(with_stack(None)), "USER")), ["try again"])),
//!     ["db timeout"],
//! );
//!
//! assert_eq!(code(&err), "USER");
//! assert_eq!(message::<&str>(&err, &[]), "try again");
//! assert_eq!(dev_message(&err), "db timeout");
//! ```

use std::fmt;

use crate::config::ChainConfig;
use crate::core::inspect::MESSAGE_SEPARATOR;
use crate::core::link::ChainError;

fn collect_parts<I, S>(parts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parts.into_iter().map(Into::into).collect()
}

/// Stacked root carrying the configured default code
fn default_root(config: &ChainConfig) -> ChainError {
    ChainError::stacked(None, config.default_code.as_str(), config)
}

fn root_or_default(err: Option<ChainError>, config: &ChainConfig) -> ChainError {
    match err {
        Some(err) => err,
        None => default_root(config),
    }
}

/// New chain: a stacked root with the default code under developer notes
#[inline(never)]
pub fn new<I, S>(parts: I) -> ChainError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ChainConfig::current();
    ChainError::dev_messaged(Some(default_root(&config)), collect_parts(parts))
}

/// [`new`] with a formatted note, usually via [`new_error!`](crate::new_error)
#[inline(never)]
pub fn newf(args: fmt::Arguments<'_>) -> ChainError {
    let config = ChainConfig::current();
    ChainError::dev_messaged(Some(default_root(&config)), vec![args.to_string()])
}

/// New chain: a stacked root with `code` under developer notes
#[inline(never)]
pub fn new_with_code<I, S>(code: impl Into<String>, parts: I) -> ChainError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ChainConfig::current();
    let root = ChainError::stacked(None, code, &config);
    ChainError::dev_messaged(Some(root), collect_parts(parts))
}

/// [`new_with_code`] with a formatted note
#[inline(never)]
pub fn new_with_codef(code: impl Into<String>, args: fmt::Arguments<'_>) -> ChainError {
    let config = ChainConfig::current();
    let root = ChainError::stacked(None, code, &config);
    ChainError::dev_messaged(Some(root), vec![args.to_string()])
}

/// Attach a classification code.
///
/// Without an existing error, a stacked root with an empty code is captured
/// first, so the new code is the only one in the chain.
#[inline(never)]
pub fn with_code(err: Option<ChainError>, code: impl Into<String>) -> ChainError {
    let cause = match err {
        Some(err) => err,
        None => {
            let config = ChainConfig::current();
            ChainError::stacked(None, "", &config)
        }
    };
    ChainError::coded(Some(cause), code)
}

/// Capture the caller's stack in a new link, even if the chain already
/// holds one
#[inline(never)]
pub fn with_stack(err: Option<ChainError>) -> ChainError {
    let config = ChainConfig::current();
    ChainError::stacked(err, "", &config)
}

/// Attach a user-facing message; `parts` are joined with `": "`
#[inline(never)]
pub fn with_message<I, S>(err: Option<ChainError>, parts: I) -> ChainError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ChainConfig::current();
    let text = collect_parts(parts).join(MESSAGE_SEPARATOR);
    ChainError::messaged(Some(root_or_default(err, &config)), text)
}

/// Attach a formatted user-facing message
#[inline(never)]
pub fn with_messagef(err: Option<ChainError>, args: fmt::Arguments<'_>) -> ChainError {
    let config = ChainConfig::current();
    ChainError::messaged(Some(root_or_default(err, &config)), args.to_string())
}

/// Attach developer notes, stored in the order given
#[inline(never)]
pub fn with_dev_message<I, S>(err: Option<ChainError>, parts: I) -> ChainError
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let config = ChainConfig::current();
    ChainError::dev_messaged(Some(root_or_default(err, &config)), collect_parts(parts))
}

/// Attach one formatted developer note
#[inline(never)]
pub fn with_dev_messagef(err: Option<ChainError>, args: fmt::Arguments<'_>) -> ChainError {
    let config = ChainConfig::current();
    ChainError::dev_messaged(Some(root_or_default(err, &config)), vec![args.to_string()])
}

impl ChainError {
    /// Wrap this error with a classification code
    #[inline(never)]
    pub fn with_code(self, code: impl Into<String>) -> Self {
        with_code(Some(self), code)
    }

    /// Wrap this error with a fresh stack capture
    #[inline(never)]
    pub fn with_stack(self) -> Self {
        with_stack(Some(self))
    }

    /// Wrap this error with a user-facing message
    #[inline(never)]
    pub fn with_message<I, S>(self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        with_message(Some(self), parts)
    }

    /// Wrap this error with a formatted user-facing message
    #[inline(never)]
    pub fn with_messagef(self, args: fmt::Arguments<'_>) -> Self {
        with_messagef(Some(self), args)
    }

    /// Wrap this error with developer notes
    #[inline(never)]
    pub fn with_dev_message<I, S>(self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        with_dev_message(Some(self), parts)
    }

    /// Wrap this error with a formatted developer note
    #[inline(never)]
    pub fn with_dev_messagef(self, args: fmt::Arguments<'_>) -> Self {
        with_dev_messagef(Some(self), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CODE_CRITICAL;
    use crate::core::inspect::{
        cause, dev_message, dev_messages, explicit_code, message, messages, stack_trace,
    };
    use crate::core::link::Link;
    use pretty_assertions::assert_eq;

    fn is_stacked_root(err: &ChainError) -> bool {
        matches!(err.link(), Link::Stacked { cause: None, .. })
    }

    #[test]
    fn new_builds_dev_notes_over_default_root() {
        let err = new(["disk", "full"]);
        assert_eq!(err.link().dev_notes(), Some(&["disk".to_string(), "full".to_string()][..]));
        assert_eq!(explicit_code(&err), Some(CODE_CRITICAL));
        assert!(is_stacked_root(cause(&err)));
        assert_eq!(dev_message(&err), "disk: full");
    }

    #[test]
    fn newf_formats_a_single_note() {
        let err = newf(format_args!("retry {} of {}", 2, 3));
        assert_eq!(dev_messages(&err), vec!["retry 2 of 3"]);
    }

    #[test]
    fn new_with_code_uses_the_given_code() {
        let err = new_with_code("USER", ["bad input"]);
        assert_eq!(explicit_code(&err), Some("USER"));
        assert_eq!(err.to_string(), "[USER] bad input");

        let err = new_with_codef("PANIC", format_args!("slot {}", 7));
        assert_eq!(err.to_string(), "[PANIC] slot 7");
    }

    #[test]
    fn with_code_on_nothing_captures_an_uncoded_root() {
        let err = with_code(None, "USER");
        let root = cause(&err);
        assert!(is_stacked_root(root));
        assert_eq!(root.link().code(), Some(""));
        assert_eq!(explicit_code(&err), Some("USER"));
    }

    #[test]
    fn with_code_wraps_existing_error_directly() {
        let base = ChainError::foreign(std::fmt::Error);
        let err = with_code(Some(base.clone()), "USER");
        assert!(err.link().cause().is_some_and(|cause| cause.ptr_eq(&base)));
    }

    #[test]
    fn with_stack_preserves_every_capture() {
        let once = with_stack(None);
        let twice = with_stack(Some(once.clone()));
        let stacked = twice
            .links()
            .filter(|error| error.link().frames().is_some())
            .count();
        assert_eq!(stacked, 2);
        assert!(!stack_trace(&twice).is_empty());
        assert!(std::ptr::eq(stack_trace(&twice), twice.link().frames().unwrap_or(&[])));
    }

    #[test]
    fn with_message_joins_parts_with_colon() {
        let err = with_message(None, ["payment", "declined"]);
        assert_eq!(messages(&err), vec!["payment: declined"]);
        assert!(is_stacked_root(cause(&err)));
        assert_eq!(explicit_code(&err), Some(CODE_CRITICAL));
    }

    #[test]
    fn with_messagef_formats_the_fragment() {
        let err = with_messagef(None, format_args!("{} items left", 3));
        assert_eq!(message::<&str>(&err, &[]), "3 items left");
    }

    #[test]
    fn with_dev_message_keeps_parts_verbatim() {
        let err = with_dev_message(None, ["a", "b", "c"]);
        assert_eq!(dev_messages(&err), vec!["a", "b", "c"]);
        assert_eq!(dev_message(&err), "a: b: c");

        let err = with_dev_messagef(Some(err), format_args!("attempt {}", 1));
        assert_eq!(dev_message(&err), "attempt 1, a: b: c");
    }

    #[test]
    fn fluent_methods_match_free_functions() {
        let err = with_stack(None)
            .with_code("USER")
            .with_message(["try again"])
            .with_dev_message(["db timeout"])
            .with_messagef(format_args!("order {}", 42))
            .with_dev_messagef(format_args!("shard {}", 3))
            .with_stack();

        assert_eq!(explicit_code(&err), Some("USER"));
        assert_eq!(message::<&str>(&err, &[]), "order 42: try again");
        assert_eq!(dev_message(&err), "shard 3, db timeout");
        assert_eq!(err.to_string(), "[USER] shard 3, db timeout (order 42: try again)");
    }

    #[test]
    fn wrapping_leaves_the_predecessor_untouched() {
        let base = with_message(None, ["base"]);
        let before = base.to_string();
        let _wrapped = with_message(Some(base.clone()), ["outer"]);
        assert_eq!(base.to_string(), before);
        assert_eq!(messages(&base), vec!["base"]);
    }
}
