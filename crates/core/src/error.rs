//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures. Every failure
/// is terminal for the request that produced it; nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, malformed, or expired credential. The caller must
    /// re-authenticate; the detail never distinguishes *why* the credential
    /// was rejected.
    #[error("not authenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated principal, insufficient rights. The detail names what
    /// was missing (required role, cross-tenant access, ...).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A requested resource was not found after tenant scoping.
    #[error("not found")]
    NotFound,

    /// A domain invariant was violated (last active admin, employee quota).
    /// The detail carries the remediation message.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A value failed validation (e.g. malformed input). Recoverable by the
    /// caller resubmitting a corrected request.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A uniqueness or state conflict (duplicate company name, duplicate
    /// check-in).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
