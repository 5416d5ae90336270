//! Grouping paths and their membership lists.
//!
//! A grouping such as `tmp:testiwta:testiwta-aux` owns four member lists,
//! each addressed by a group path with a list suffix
//! (`tmp:testiwta:testiwta-aux:include`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Membership lists that make up a grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Basis,
    Include,
    Exclude,
    Owners,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basis => "basis",
            Self::Include => "include",
            Self::Exclude => "exclude",
            Self::Owners => "owners",
        }
    }
}

/// A validated grouping path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupingPath(String);

impl GroupingPath {
    /// Validate and wrap a grouping path.
    ///
    /// The path must be non-empty and contain neither whitespace nor `/`,
    /// since it is placed verbatim into request URLs.
    pub fn new(path: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.is_empty() {
            return Err(CoreError::Validation(
                "grouping path must not be empty".to_string(),
            ));
        }
        if path.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(CoreError::Validation(format!(
                "grouping path '{path}' must not contain whitespace or '/'"
            )));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of one of this grouping's member lists.
    pub fn group(&self, kind: ListKind) -> GroupPath {
        GroupPath {
            grouping: self.clone(),
            kind,
        }
    }
}

impl fmt::Display for GroupingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GroupingPath {
    type Error = CoreError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<GroupingPath> for String {
    fn from(path: GroupingPath) -> Self {
        path.0
    }
}

impl std::str::FromStr for GroupingPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// One member list of a grouping, e.g. `tmp:x:x-aux:include`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupPath {
    pub grouping: GroupingPath,
    pub kind: ListKind,
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.grouping, self.kind.as_str())
    }
}

/// Validate a list of member identifiers (UH usernames or numbers).
///
/// The list must be non-empty and no entry may be blank or contain `/` or
/// `,`, which would corrupt the path segments they are joined into.
pub fn validate_identifiers<S: AsRef<str>>(identifiers: &[S]) -> Result<(), CoreError> {
    if identifiers.is_empty() {
        return Err(CoreError::Validation(
            "at least one identifier is required".to_string(),
        ));
    }
    for id in identifiers {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(CoreError::Validation(
                "identifiers must not be blank".to_string(),
            ));
        }
        if id.contains(['/', ',']) || id.chars().any(char::is_whitespace) {
            return Err(CoreError::Validation(format!(
                "identifier '{id}' contains an invalid character"
            )));
        }
    }
    Ok(())
}
