//! Error types for host introspection and advancement resolution
//!
//! Lookup failures are recoverable: they either leave a single field at its
//! default or make the current strategy give up. Only `ResolveError` reaches
//! the caller, and only once every strategy has failed.

use thiserror::Error;

use crate::strategies::StrategyKind;

/// Result type for host lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// Failure while locating or reading a member of a host object
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The member, method or class does not exist on this host version
    #[error("{what} not found on {owner}")]
    NotFound { owner: String, what: String },

    /// The member exists but its access check cannot be lifted
    #[error("access to {member} on {owner} denied")]
    AccessDenied { owner: String, member: String },

    /// A value was located but has the wrong shape
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// The host threw while running a method or constructor
    #[error("{method} failed: {message}")]
    Invocation { method: String, message: String },
}

impl LookupError {
    /// Create a not-found error
    pub fn not_found(owner: impl Into<String>, what: impl Into<String>) -> Self {
        Self::NotFound {
            owner: owner.into(),
            what: what.into(),
        }
    }

    /// Create an access-denied error
    pub fn access_denied(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self::AccessDenied {
            owner: owner.into(),
            member: member.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invocation {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Whether this error means "the member is not there" rather than a real failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure of a whole resolution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// Every enabled strategy failed (or none was enabled for this version)
    #[error("all display strategies failed ({} attempted)", attempts.len())]
    StrategyExhausted {
        attempts: Vec<(StrategyKind, LookupError)>,
    },
}

/// Failure while loading resolver configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
