/// Errors raised by domain validation, before any request is sent.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid feedback: {0}")]
    InvalidFeedback(#[from] validator::ValidationErrors),
}
