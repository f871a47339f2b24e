//! # errchain
//!
//! Annotated error chains: attach a classification code, user-facing
//! messages, developer notes and a captured call stack to an error in any
//! order, then read any of them back from the chain head.
//!
//! ## Quick Start
//!
//! ```rust
//! use errchain::prelude::*;
//!
//! fn load_profile(id: u64) -> Result<String> {
//!     std::fs::read_to_string(format!("/nonexistent/profiles/{id}.json"))
//!         .with_stack()
//!         .with_code(CODE_USER)
//!         .with_message(["profile not found"])
//!         .with_dev_message([format!("profile {id}")])
//! }
//!
//! let err = load_profile(7).unwrap_err();
//! assert_eq!(errchain::code(&err), "USER");
//! assert_eq!(errchain::user_message(&err), "profile not found");
//! assert!(errchain::dev_message(&err).starts_with("profile 7, "));
//! assert!(!errchain::stack_trace(&err).is_empty());
//! ```
//!
//! ## Layout
//!
//! - [`core`](mod@crate::core) - the chain model, wrapping operations and inspection
//! - [`stack`](mod@crate::stack) - stack capture and frame resolution
//! - [`config`] - process-wide defaults and capture knobs
//! - [`report`] - serializable snapshot for observability sinks
//!
//! `message`/`user_message` are meant for end users; `dev_message` and the
//! stack are diagnostics and must not be rendered on the same surface.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod core;
pub mod report;
pub mod stack;

// === Ergonomic Macros ===
pub mod macros;

// === Public API Exports ===

/// Chain handle, link variants and iterator
pub use crate::core::{ChainError, ForeignError, Link, Links};

/// Result type alias for `Result<T, ChainError>`
pub use crate::core::Result;

/// Extension trait for Result types
pub use crate::core::ResultExt;

/// Constructors and wrapping operations
pub use crate::core::{
    new, new_with_code, new_with_codef, newf, with_code, with_dev_message, with_dev_messagef,
    with_message, with_messagef, with_stack,
};

/// Inspection
pub use crate::core::{
    cause, code, dev_message, dev_messages, explicit_code, message, messages, stack, stack_trace,
    user_message,
};

/// Configuration
pub use config::{CODE_CRITICAL, CODE_PANIC, CODE_USER, ChainConfig, ConfigError};

/// Observability snapshot
pub use report::ErrorReport;

/// Stack frames
pub use stack::{SourceLineError, StackFrame};

/// Convenient prelude with everything you need
pub mod prelude {
    pub use super::{
        CODE_CRITICAL, CODE_PANIC, CODE_USER, ChainConfig, ChainError, ErrorReport, Result,
        ResultExt, StackFrame,
    };

    pub use crate::{ensure, new_error, new_error_with_code, with_dev_message, with_message};
}
