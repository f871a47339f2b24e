//! Chain traversal and aggregation
//!
//! Every function here is pure and total: a missing capability yields an
//! empty or default result, never an error. Walks start at the queried link
//! and move toward the root, so fragments come out newest first.

use std::borrow::Cow;

use crate::config::ChainConfig;
use crate::core::link::{ChainError, Link};
use crate::stack::StackFrame;

/// Separator between message fragments of different links
pub const MESSAGE_SEPARATOR: &str = ": ";

/// Separator between developer notes of different links
pub const DEV_MESSAGE_SEPARATOR: &str = ", ";

/// Separator between notes stored in one dev-messaged link
pub const NOTE_SEPARATOR: &str = ": ";

/// Root of the chain: the deepest link, or `err` itself for a foreign leaf
pub fn cause(err: &ChainError) -> &ChainError {
    err.links().last().unwrap_or(err)
}

/// First non-empty code walking toward the root, if any link carries one
pub fn explicit_code(err: &ChainError) -> Option<&str> {
    err.links()
        .find_map(|error| error.link().code().filter(|code| !code.is_empty()))
}

/// Effective classification code.
///
/// The outermost non-empty code wins; without one, the process-wide default.
pub fn code(err: &ChainError) -> String {
    match explicit_code(err) {
        Some(code) => code.to_string(),
        None => ChainConfig::current().default_code.clone(),
    }
}

/// Join the non-empty fragments `extract` yields for each link, newest first
fn fold_fragments<'a, F>(err: &'a ChainError, separator: &str, extract: F) -> String
where
    F: Fn(&'a ChainError) -> Option<Cow<'a, str>>,
{
    err.links()
        .filter_map(extract)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn message_fragment(error: &ChainError) -> Option<Cow<'_, str>> {
    error.link().message().map(Cow::Borrowed)
}

fn dev_fragment(error: &ChainError) -> Option<Cow<'_, str>> {
    match error.link() {
        Link::DevMessaged { notes, .. } => Some(Cow::Owned(notes.join(NOTE_SEPARATOR))),
        Link::Foreign(foreign) => Some(Cow::Owned(foreign.to_string())),
        _ => None,
    }
}

/// Composed user-facing message.
///
/// Fragments are joined with `": "`, newest first. When the chain carries no
/// fragment, the defaults are used: the single default, or several joined by
/// a space; an empty string without defaults.
pub fn message<S: AsRef<str>>(err: &ChainError, defaults: &[S]) -> String {
    let composed = fold_fragments(err, MESSAGE_SEPARATOR, message_fragment);
    if !composed.is_empty() {
        return composed;
    }

    defaults
        .iter()
        .map(AsRef::as_ref)
        .filter(|default| !default.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Message for end users, falling back to the configured default message
pub fn user_message(err: &ChainError) -> String {
    let config = ChainConfig::current();
    message(err, &[config.default_user_message.as_str()])
}

/// Individual message fragments, newest first
pub fn messages(err: &ChainError) -> Vec<String> {
    err.links()
        .filter_map(|error| error.link().message())
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .collect()
}

/// Composed developer message.
///
/// Notes of one link are joined with `": "`, links with `", "`, newest first.
/// A foreign leaf contributes its own display text, so a bare foreign error
/// yields exactly that text.
pub fn dev_message(err: &ChainError) -> String {
    fold_fragments(err, DEV_MESSAGE_SEPARATOR, dev_fragment)
}

/// Every developer note in the chain, newest link first, each link's notes
/// in their stored order. A foreign leaf contributes its display text.
pub fn dev_messages(err: &ChainError) -> Vec<String> {
    let mut notes = Vec::new();
    for error in err.links() {
        match error.link() {
            Link::DevMessaged { notes: link_notes, .. } => notes.extend(link_notes.iter().cloned()),
            Link::Foreign(foreign) => notes.push(foreign.to_string()),
            _ => {}
        }
    }
    notes
}

/// Frames of the outermost stacked link; empty if the chain has none
pub fn stack_trace(err: &ChainError) -> &[StackFrame] {
    err.links()
        .find_map(|error| error.link().frames())
        .unwrap_or(&[])
}

/// Rendered frames of the outermost stacked link
pub fn stack(err: &ChainError) -> String {
    stack_trace(err)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Display text of a chain link: `[code] dev message (message)`, each part
/// omitted when empty
pub(crate) fn error_string(err: &ChainError) -> String {
    let code = code(err);
    let dev = dev_message(err);
    let msg = message::<&str>(err, &[]);

    let mut parts = Vec::with_capacity(3);
    if !code.is_empty() {
        parts.push(format!("[{code}]"));
    }
    if !dev.is_empty() {
        parts.push(dev);
    }
    if !msg.is_empty() {
        parts.push(format!("({msg})"));
    }
    parts.join(" ")
}
