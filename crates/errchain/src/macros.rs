//! Formatted construction macros
//!
//! Each macro forwards `format!`-style arguments to the matching `*f`
//! function without allocating an intermediate `String`.

/// Create a new chain with a formatted developer note
///
/// # Examples
///
/// ```rust
/// use errchain::new_error;
///
/// let id = 42;
/// let err = new_error!("order {id} not found");
/// assert_eq!(errchain::dev_message(&err), "order 42 not found");
/// ```
#[macro_export]
macro_rules! new_error {
    ($($arg:tt)+) => {
        $crate::newf(::std::format_args!($($arg)+))
    };
}

/// Create a new chain with a code and a formatted developer note
///
/// # Examples
///
/// ```rust
/// use errchain::new_error_with_code;
///
/// let err = new_error_with_code!("USER", "quota of {} exceeded", 10);
/// assert_eq!(errchain::code(&err), "USER");
/// ```
#[macro_export]
macro_rules! new_error_with_code {
    ($code:expr, $($arg:tt)+) => {
        $crate::new_with_codef($code, ::std::format_args!($($arg)+))
    };
}

/// Wrap an optional error with a formatted user-facing message
///
/// # Examples
///
/// ```rust
/// use errchain::with_message;
///
/// let err = with_message!(None, "{} items could not be saved", 3);
/// assert_eq!(errchain::message::<&str>(&err, &[]), "3 items could not be saved");
/// ```
#[macro_export]
macro_rules! with_message {
    ($err:expr, $($arg:tt)+) => {
        $crate::with_messagef($err, ::std::format_args!($($arg)+))
    };
}

/// Wrap an optional error with a formatted developer note
///
/// # Examples
///
/// ```rust
/// use errchain::with_dev_message;
///
/// let base = errchain::new(["socket closed"]);
/// let err = with_dev_message!(Some(base), "peer {}", "10.0.0.7");
/// assert_eq!(errchain::dev_message(&err), "peer 10.0.0.7, socket closed");
/// ```
#[macro_export]
macro_rules! with_dev_message {
    ($err:expr, $($arg:tt)+) => {
        $crate::with_dev_messagef($err, ::std::format_args!($($arg)+))
    };
}

/// Return early with an error if a condition is not met
///
/// Without an explicit error, a new chain naming the failed condition is
/// returned.
///
/// # Examples
///
/// ```rust
/// use errchain::{Result, ensure, new_error_with_code};
///
/// fn reserve(seats: u32) -> Result<u32> {
///     ensure!(seats > 0);
///     ensure!(seats <= 8, new_error_with_code!("USER", "{seats} seats requested"));
///     Ok(seats)
/// }
///
/// assert!(reserve(2).is_ok());
/// assert!(reserve(0).is_err());
/// assert_eq!(errchain::code(&reserve(9).unwrap_err()), "USER");
/// ```
#[macro_export]
macro_rules! ensure {
    ($condition:expr $(,)?) => {
        if !($condition) {
            return ::std::result::Result::Err(::std::convert::From::from($crate::newf(
                ::std::format_args!("condition failed: {}", ::std::stringify!($condition)),
            )));
        }
    };
    ($condition:expr, $error:expr $(,)?) => {
        if !($condition) {
            return ::std::result::Result::Err(::std::convert::From::from($error));
        }
    };
}
