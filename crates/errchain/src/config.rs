//! Process-wide configuration for chain construction and inspection
//!
//! The configuration holds the default classification code, the fallback
//! user-facing message, and the knobs of the stack capturer. It is meant to be
//! installed once at startup with [`ChainConfig::init`]; afterwards every
//! constructor loads it once per call and injects it into the capturer.
//!
//! ```rust
//! use errchain::config::{ChainConfig, CODE_USER};
//!
//! ChainConfig::default()
//!     .with_default_code(CODE_USER)
//!     .with_app_prefix("my_service")
//!     .init()
//!     .expect("valid configuration");
//!
//! assert_eq!(ChainConfig::current().default_code, CODE_USER);
//! ```
//!
//! Storage is an [`ArcSwap`], so reads are lock-free and installing a new
//! configuration never tears a concurrent read. Links that were already built
//! keep whatever values they captured; only later calls observe the change.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code for conditions that should abort the current unit of work
pub const CODE_PANIC: &str = "PANIC";

/// Code for unexpected internal failures (the default)
pub const CODE_CRITICAL: &str = "CRITICAL";

/// Code for failures caused by user input
pub const CODE_USER: &str = "USER";

/// Fallback message shown to end users when a chain carries no message
pub const DEFAULT_USER_MESSAGE: &str = "Oops, something went wrong. Please try again later...";

/// Default bound on captured frames
pub const DEFAULT_MAX_STACK_DEPTH: usize = 50;

/// Upper bound accepted by [`ChainConfig::validate`]
pub const MAX_STACK_DEPTH_LIMIT: usize = 1024;

/// Environment variable names read by [`ChainConfig::from_env`]
pub mod env {
    /// Overrides [`ChainConfig::default_code`](super::ChainConfig::default_code)
    pub const DEFAULT_CODE: &str = "ERRCHAIN_DEFAULT_CODE";
    /// Overrides [`ChainConfig::default_user_message`](super::ChainConfig::default_user_message)
    pub const DEFAULT_USER_MESSAGE: &str = "ERRCHAIN_DEFAULT_USER_MESSAGE";
    /// Overrides [`ChainConfig::max_stack_depth`](super::ChainConfig::max_stack_depth)
    pub const MAX_STACK_DEPTH: &str = "ERRCHAIN_MAX_STACK_DEPTH";
    /// Overrides [`ChainConfig::app_prefix`](super::ChainConfig::app_prefix)
    pub const APP_PREFIX: &str = "ERRCHAIN_APP_PREFIX";
}

static GLOBAL_CONFIG: LazyLock<ArcSwap<ChainConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ChainConfig::default()));

/// Errors raised while building or installing a [`ChainConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Stack depth outside `1..=MAX_STACK_DEPTH_LIMIT`
    #[error("max stack depth must be between 1 and {limit}, got {depth}")]
    InvalidDepth {
        /// Rejected depth
        depth: usize,
        /// Accepted upper bound
        limit: usize,
    },

    /// An environment value that could not be parsed
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Raw value
        value: String,
    },
}

/// Configuration shared by the constructors, the stack capturer and the
/// aggregation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Code reported when no link in a chain carries a non-empty code
    pub default_code: String,
    /// Fallback passed to [`message`](crate::message) by [`user_message`](crate::user_message)
    pub default_user_message: String,
    /// Maximum number of frames kept per capture, counted after filtering
    pub max_stack_depth: usize,
    /// Module prefix marking a frame as in-application. Empty disables the match.
    pub app_prefix: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            default_code: CODE_CRITICAL.to_string(),
            default_user_message: DEFAULT_USER_MESSAGE.to_string(),
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            app_prefix: String::new(),
        }
    }
}

impl ChainConfig {
    /// Set the default classification code
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_code(mut self, code: impl Into<String>) -> Self {
        self.default_code = code.into();
        self
    }

    /// Set the fallback user-facing message
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_user_message(mut self, message: impl Into<String>) -> Self {
        self.default_user_message = message.into();
        self
    }

    /// Set the capture depth
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    /// Set the application module prefix used for in-app classification
    #[must_use = "builder methods must be chained or built"]
    pub fn with_app_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app_prefix = prefix.into();
        self
    }

    /// Check the configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stack_depth == 0 || self.max_stack_depth > MAX_STACK_DEPTH_LIMIT {
            return Err(ConfigError::InvalidDepth {
                depth: self.max_stack_depth,
                limit: MAX_STACK_DEPTH_LIMIT,
            });
        }
        Ok(())
    }

    /// Load configuration from environment variables, starting from defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(code) = lookup(env::DEFAULT_CODE) {
            config.default_code = code;
        }

        if let Some(message) = lookup(env::DEFAULT_USER_MESSAGE) {
            config.default_user_message = message;
        }

        if let Some(depth) = lookup(env::MAX_STACK_DEPTH) {
            config.max_stack_depth =
                depth
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: env::MAX_STACK_DEPTH.to_string(),
                        value: depth.clone(),
                    })?;
        }

        if let Some(prefix) = lookup(env::APP_PREFIX) {
            config.app_prefix = prefix;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate and install this configuration process-wide.
    ///
    /// Typically called once at application startup. Subsequent calls
    /// replace the previous value for every later construction.
    pub fn init(self) -> Result<(), ConfigError> {
        self.validate()?;
        tracing::debug!(
            default_code = %self.default_code,
            max_stack_depth = self.max_stack_depth,
            app_prefix = %self.app_prefix,
            "errchain configuration installed"
        );
        GLOBAL_CONFIG.store(Arc::new(self));
        Ok(())
    }

    /// Get the process-wide configuration
    #[inline]
    pub fn current() -> Arc<Self> {
        GLOBAL_CONFIG.load_full()
    }
}
