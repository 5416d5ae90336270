//! HTTP client for the groupings administration API.
//!
//! [`GroupingsApi`] exposes every action the administration front-end
//! issues. Actions backed by a long-running server job go through
//! [`AsyncActionClient`], which starts the job and polls its status until
//! the job completes. Requests travel through the [`Transport`] trait;
//! [`HttpTransport`] is the `reqwest` implementation.

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod poller;
pub mod transport;

pub use actions::GroupingsApi;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use poller::{AsyncActionClient, PollConfig};
pub use transport::{ApiRequest, HttpTransport, RequestBody, Transport};
