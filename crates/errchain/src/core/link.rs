//! [`ChainError`] handle and the [`Link`] variants it points at

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::config::ChainConfig;
use crate::core::inspect;
use crate::stack::{self, StackFrame};

/// Boxed foreign error held by a leaf link
pub type ForeignError = Box<dyn StdError + Send + Sync + 'static>;

/// One node of an error chain
///
/// Each variant exposes only the capabilities it carries; all chain variants
/// own exactly one optional predecessor, a foreign leaf owns none.
#[non_exhaustive]
pub enum Link {
    /// Classification code
    Coded {
        /// Code, possibly empty
        code: String,
        /// Predecessor
        cause: Option<ChainError>,
    },

    /// Captured call stack plus an optional code
    Stacked {
        /// Code, empty when the stack was attached without one
        code: String,
        /// Frames, oldest first
        frames: Vec<StackFrame>,
        /// Predecessor
        cause: Option<ChainError>,
    },

    /// One user-facing message fragment
    Messaged {
        /// Fragment text
        message: String,
        /// Predecessor
        cause: Option<ChainError>,
    },

    /// Developer-facing notes
    DevMessaged {
        /// Notes in the order they were supplied
        notes: Vec<String>,
        /// Predecessor
        cause: Option<ChainError>,
    },

    /// A foreign error with no capabilities of its own
    Foreign(ForeignError),
}

impl Link {
    /// Predecessor of a chain link; `None` for roots and foreign leaves
    pub fn cause(&self) -> Option<&ChainError> {
        match self {
            Self::Coded { cause, .. }
            | Self::Stacked { cause, .. }
            | Self::Messaged { cause, .. }
            | Self::DevMessaged { cause, .. } => cause.as_ref(),
            Self::Foreign(_) => None,
        }
    }

    /// Code capability, present on coded and stacked links even when empty
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Coded { code, .. } | Self::Stacked { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Message capability
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Messaged { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Developer-notes capability
    pub fn dev_notes(&self) -> Option<&[String]> {
        match self {
            Self::DevMessaged { notes, .. } => Some(notes),
            _ => None,
        }
    }

    /// Stack capability
    pub fn frames(&self) -> Option<&[StackFrame]> {
        match self {
            Self::Stacked { frames, .. } => Some(frames),
            _ => None,
        }
    }

    /// Foreign leaf payload
    pub fn foreign(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Foreign(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    fn take_cause(&mut self) -> Option<ChainError> {
        match self {
            Self::Coded { cause, .. }
            | Self::Stacked { cause, .. }
            | Self::Messaged { cause, .. }
            | Self::DevMessaged { cause, .. } => cause.take(),
            Self::Foreign(_) => None,
        }
    }
}

impl Drop for Link {
    // Unlink iteratively so dropping a long chain does not recurse.
    fn drop(&mut self) {
        let mut next = self.take_cause();
        while let Some(error) = next {
            next = match Arc::try_unwrap(error.link) {
                Ok(mut link) => link.take_cause(),
                Err(_) => None,
            };
        }
    }
}

// Shows only this link's own payload; the predecessor is listed by
// `ChainError`'s impl, which walks the chain without recursing.
impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coded { code, .. } => {
                f.debug_struct("Coded").field("code", code).finish_non_exhaustive()
            }
            Self::Stacked { code, frames, .. } => f
                .debug_struct("Stacked")
                .field("code", code)
                .field("frames", &frames.len())
                .finish_non_exhaustive(),
            Self::Messaged { message, .. } => f
                .debug_struct("Messaged")
                .field("message", message)
                .finish_non_exhaustive(),
            Self::DevMessaged { notes, .. } => f
                .debug_struct("DevMessaged")
                .field("notes", notes)
                .finish_non_exhaustive(),
            Self::Foreign(error) => f.debug_tuple("Foreign").field(error).finish(),
        }
    }
}

/// Head of an immutable chain of annotated error links
///
/// Cloning is cheap and shares the chain; wrapping never modifies an
/// existing link, so one error can be the predecessor of many chains built
/// concurrently.
#[derive(Clone)]
pub struct ChainError {
    link: Arc<Link>,
}

impl fmt::Debug for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.links().map(Self::link)).finish()
    }
}

impl ChainError {
    fn from_link(link: Link) -> Self {
        Self {
            link: Arc::new(link),
        }
    }

    /// Wrap a foreign error as an opaque leaf
    pub fn foreign<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_link(Link::Foreign(Box::new(error)))
    }

    /// Wrap an already boxed foreign error as an opaque leaf
    pub fn from_boxed(error: ForeignError) -> Self {
        Self::from_link(Link::Foreign(error))
    }

    /// Wrap `cause` in a coded link
    pub fn coded(cause: Option<Self>, code: impl Into<String>) -> Self {
        Self::from_link(Link::Coded {
            code: code.into(),
            cause,
        })
    }

    /// Wrap `cause` in a stacked link capturing the caller's stack with `config`
    #[inline(never)]
    pub fn stacked(cause: Option<Self>, code: impl Into<String>, config: &ChainConfig) -> Self {
        Self::with_frames(
            cause,
            code,
            stack::capture(stack::capture::CAPTURE_SKIP, config),
        )
    }

    /// Wrap `cause` in a stacked link holding already captured frames
    pub fn with_frames(cause: Option<Self>, code: impl Into<String>, frames: Vec<StackFrame>) -> Self {
        Self::from_link(Link::Stacked {
            code: code.into(),
            frames,
            cause,
        })
    }

    /// Wrap `cause` in a messaged link
    pub fn messaged(cause: Option<Self>, message: impl Into<String>) -> Self {
        Self::from_link(Link::Messaged {
            message: message.into(),
            cause,
        })
    }

    /// Wrap `cause` in a dev-messaged link
    pub fn dev_messaged(cause: Option<Self>, notes: Vec<String>) -> Self {
        Self::from_link(Link::DevMessaged { notes, cause })
    }

    /// The link this handle points at
    #[inline]
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Whether this is a foreign leaf
    #[inline]
    pub fn is_foreign(&self) -> bool {
        matches!(*self.link, Link::Foreign(_))
    }

    /// Whether two handles point at the same link
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.link, &other.link)
    }

    /// Iterate from this link toward the root
    pub fn links(&self) -> Links<'_> {
        Links { next: Some(self) }
    }

    /// Find a foreign leaf of type `E` in the chain
    pub fn find_foreign<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.links()
            .filter_map(|error| error.link.foreign())
            .find_map(|foreign| foreign.downcast_ref::<E>())
    }
}

/// Iterator over a chain, head first
#[derive(Debug, Clone)]
pub struct Links<'a> {
    next: Option<&'a ChainError>,
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a ChainError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.link.cause();
        Some(current)
    }
}

impl std::iter::FusedIterator for Links<'_> {}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.link {
            Link::Foreign(error) => fmt::Display::fmt(error, f),
            _ => f.write_str(&inspect::error_string(self)),
        }
    }
}

impl StdError for ChainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.link {
            Link::Foreign(error) => error.source(),
            link => link.cause().map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}
