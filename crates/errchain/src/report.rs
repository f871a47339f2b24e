//! Serializable snapshot of a chain for observability tooling
//!
//! An [`ErrorReport`] runs every inspection once and keeps the results, so a
//! chain can be shipped to a log pipeline or an error tracker as one record.
//! User-facing and diagnostic fields stay separate; a sink that renders to end
//! users must only show [`ErrorReport::message`].

use serde::{Deserialize, Serialize};

use crate::core::ChainError;
use crate::core::inspect;
use crate::stack::StackFrame;

/// Every inspection result of one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Effective classification code
    pub code: String,

    /// User-facing message, falling back to the configured default
    pub message: String,

    /// Message fragments, newest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,

    /// Composed developer message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dev_message: String,

    /// Developer notes, newest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dev_messages: Vec<String>,

    /// Frames of the outermost stack capture, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<StackFrame>,
}

impl ErrorReport {
    /// Inspect `err` and capture the results
    pub fn from_error(err: &ChainError) -> Self {
        Self {
            code: inspect::code(err),
            message: inspect::user_message(err),
            messages: inspect::messages(err),
            dev_message: inspect::dev_message(err),
            dev_messages: inspect::dev_messages(err),
            stack_trace: inspect::stack_trace(err).to_vec(),
        }
    }

    /// Frames marked as belonging to the application
    pub fn in_app_frames(&self) -> impl Iterator<Item = &StackFrame> {
        self.stack_trace.iter().filter(|frame| frame.in_app)
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Emit one `error` level event with the report as structured fields.
    ///
    /// The user-facing text goes to `user_message`; `message` stays the
    /// event's own text.
    pub fn log(&self) {
        tracing::error!(
            code = %self.code,
            user_message = %self.message,
            dev_message = %self.dev_message,
            frames = self.stack_trace.len(),
            in_app_frames = self.in_app_frames().count(),
            "error chain reported"
        );
    }
}

impl From<&ChainError> for ErrorReport {
    fn from(err: &ChainError) -> Self {
        Self::from_error(err)
    }
}
