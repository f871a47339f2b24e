//! Call-stack capture and frame resolution
//!
//! - [`capture`](crate::stack::capture) - snapshot the stack at construction time
//! - [`resolve`](crate::stack::resolve) - split symbols, filter and classify frames
//! - [`frame`](crate::stack::frame) - [`StackFrame`] and display-time source lookup

pub mod capture;
pub mod frame;
pub mod resolve;

pub use capture::capture;
pub use frame::{SOURCE_PLACEHOLDER, SourceLineError, StackFrame};
