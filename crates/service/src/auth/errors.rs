use thiserror::Error;

/// Authentication failures; both map to 401 at the HTTP edge.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingCredentials => 1001,
            AuthError::InvalidToken(_) => 1002,
        }
    }
}
