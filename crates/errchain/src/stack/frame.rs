//! [`StackFrame`] and its display-time source lookup

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder rendered when no source text is available for a frame
pub const SOURCE_PLACEHOLDER: &str = "...";

/// Failure to read the source line behind a frame
#[derive(Debug, Error)]
pub enum SourceLineError {
    /// The source file could not be opened or read
    #[error("failed to read source file {path}: {source}")]
    Io {
        /// File recorded in the frame
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// One resolved frame of a captured call stack
///
/// Frames are created by the capturer and never modified afterwards.
/// Every field is omitted from the serialized form while at its zero value
/// and restored as that zero value when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StackFrame {
    /// Source file containing the instruction
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,

    /// 1-based line in `file`, 0 when unknown
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub line_number: u32,

    /// Item path of the function inside its package
    #[serde(skip_serializing_if = "String::is_empty")]
    pub function: String,

    /// Module path enclosing the function
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package: String,

    /// Whether the frame belongs to the configured application
    #[serde(skip_serializing_if = "is_false")]
    pub in_app: bool,

    /// Instruction pointer of the frame
    #[serde(skip_serializing_if = "is_zero_usize")]
    pub address: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero_usize(value: &usize) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl StackFrame {
    /// A frame with no address carries nothing worth rendering
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.address == 0
    }

    /// Read the source line this frame points at.
    ///
    /// Returns [`SOURCE_PLACEHOLDER`] when the line number is unknown or past
    /// the end of the file. Leading and trailing spaces and tabs are trimmed.
    pub fn source_line(&self) -> Result<String, SourceLineError> {
        if self.line_number == 0 {
            return Ok(SOURCE_PLACEHOLDER.to_string());
        }

        let io_error = |source| SourceLineError::Io {
            path: self.file.clone(),
            source,
        };

        let file = File::open(&self.file).map_err(io_error)?;
        let index = (self.line_number - 1) as usize;

        match BufReader::new(file).lines().nth(index) {
            Some(Ok(line)) => Ok(line.trim_matches([' ', '\t']).to_string()),
            Some(Err(source)) => Err(io_error(source)),
            None => Ok(SOURCE_PLACEHOLDER.to_string()),
        }
    }
}

impl fmt::Display for StackFrame {
    /// Renders `file:line (0xaddr)` followed by an indented
    /// `function: source` line when the source can be read.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        writeln!(
            f,
            "{}:{} ({:#x})",
            self.file, self.line_number, self.address
        )?;

        match self.source_line() {
            Ok(source) => writeln!(f, "\t{}: {}", self.function, source),
            Err(error) => {
                tracing::trace!(file = %self.file, %error, "source line unavailable");
                Ok(())
            }
        }
    }
}
