//! User feedback submitted through the feedback form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Feedback {
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
    /// The form requires at least 10 characters.
    #[validate(length(min = 10))]
    pub message: String,
}

impl Feedback {
    /// Check the form constraints before the feedback is sent.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}
