//! Domain error type shared by the db and api layers.

/// Failure of a domain operation, independent of transport.
///
/// The `Display` text of each variant is the human-readable description
/// returned to API clients, so keep it short and lowercase.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The resource does not exist or is not owned by the caller.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// An argument failed shape or length validation.
    #[error("{0}")]
    Validation(String),

    /// Missing, forged or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure on a single argument.
    pub fn invalid_argument(field: &str, reason: &str) -> Self {
        Self::Validation(format!("invalid argument value: {field} {reason}"))
    }
}
