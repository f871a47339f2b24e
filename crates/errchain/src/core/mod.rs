//! Core error-chain types and operations
//!
//! This module contains the chain model and everything that builds or reads it:
//! - [`link`](crate::core::link) - [`ChainError`] handle and its [`Link`] variants
//! - [`wrap`](crate::core::wrap) - constructors and `with_*` wrapping operations
//! - [`inspect`](crate::core::inspect) - traversal and aggregation over a chain
//! - [`conversion`](crate::core::conversion) - foreign error conversions
//! - [`result`](crate::core::result) - Result type and extension trait

pub mod conversion;
pub mod inspect;
pub mod link;
pub mod result;
pub mod wrap;

// Re-export core types
pub use inspect::{
    cause, code, dev_message, dev_messages, explicit_code, message, messages, stack, stack_trace,
    user_message,
};
pub use link::{ChainError, ForeignError, Link, Links};
pub use result::{Result, ResultExt};
pub use wrap::{
    new, new_with_code, new_with_codef, newf, with_code, with_dev_message, with_dev_messagef,
    with_message, with_messagef, with_stack,
};
