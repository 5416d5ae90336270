//! Domain types for the groupings administration API.
//!
//! Everything here is free of I/O: job handles and status envelopes for
//! asynchronous server jobs, the generic `resultCode` response shape,
//! validated grouping paths, paging queries, feedback submissions, and the
//! endpoint path builders shared by every client action.

pub mod endpoints;
pub mod error;
pub mod feedback;
pub mod grouping;
pub mod job;
pub mod query;
pub mod response;

pub use error::CoreError;
pub use feedback::Feedback;
pub use grouping::{GroupPath, GroupingPath, ListKind};
pub use job::{JobHandle, JobStatus};
pub use query::{OptAttribute, PageQuery, SortBy};
pub use response::{ApiResponse, ResultCode};
