use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Every violated rule, collected rather than failing on the first one.
    #[error("validation error: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Turn a list of collected messages into `Ok(())` when empty.
    pub fn check(messages: Vec<String>) -> Result<(), ModelError> {
        if messages.is_empty() { Ok(()) } else { Err(ModelError::Validation(messages)) }
    }
}
