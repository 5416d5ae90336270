//! Paging and attribute parameters for grouping queries.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largest page the member table ever requests.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Column a member page is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "uid")]
    Uid,
    #[serde(rename = "uhUuid")]
    UhUuid,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Uid => "uid",
            Self::UhUuid => "uhUuid",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "name" => Ok(Self::Name),
            "uid" => Ok(Self::Uid),
            "uhUuid" => Ok(Self::UhUuid),
            _ => Err(CoreError::Validation(format!(
                "Invalid sort column '{s}'. Must be one of: name, uid, uhUuid"
            ))),
        }
    }
}

/// One page of a grouping's members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub sort_by: SortBy,
    pub is_ascending: bool,
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Name,
            is_ascending: true,
            page: 1,
            size: 20,
        }
    }
}

impl PageQuery {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page == 0 {
            return Err(CoreError::Validation(
                "page numbers start at 1".to_string(),
            ));
        }
        if self.size == 0 || self.size > MAX_PAGE_SIZE {
            return Err(CoreError::Validation(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.size
            )));
        }
        Ok(())
    }

    /// Query-string pairs in the order the API documents them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("sortBy".to_string(), self.sort_by.as_str().to_string()),
            ("isAscending".to_string(), self.is_ascending.to_string()),
        ]
    }
}

/// Self-service membership preferences of a grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptAttribute {
    OptIn,
    OptOut,
}

impl OptAttribute {
    /// Attribute name used when none is configured.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::OptIn => "opt-in",
            Self::OptOut => "opt-out",
        }
    }
}
