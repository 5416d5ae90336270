use std::time::Duration;

use groupings_core::OptAttribute;

use crate::error::ConfigError;
use crate::poller::PollConfig;

/// Per-request HTTP timeout when none is configured.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL without a trailing `/`.
    pub base_url: String,
    /// Uid of the acting user, sent as the `current_user` header.
    pub current_user: String,
    /// Job polling behaviour for `*/async` actions.
    pub poll: PollConfig,
    /// Timeout applied to every individual HTTP request.
    pub request_timeout: Duration,
    /// Attribute name of the opt-in preference.
    pub opt_in_attribute: String,
    /// Attribute name of the opt-out preference.
    pub opt_out_attribute: String,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL and user.
    pub fn new(base_url: impl Into<String>, current_user: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            current_user: current_user.into(),
            poll: PollConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            opt_in_attribute: OptAttribute::OptIn.default_name().to_string(),
            opt_out_attribute: OptAttribute::OptOut.default_name().to_string(),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default     |
    /// |----------------------------------|-------------|
    /// | `GROUPINGS_API_BASE_URL`         | (required)  |
    /// | `GROUPINGS_CURRENT_USER`         | (required)  |
    /// | `GROUPINGS_POLL_INTERVAL_MS`     | `5000`      |
    /// | `GROUPINGS_POLL_MAX_ATTEMPTS`    | unbounded   |
    /// | `GROUPINGS_POLL_TIMEOUT_SECS`    | unbounded   |
    /// | `GROUPINGS_REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `GROUPINGS_OPT_IN`               | `opt-in`    |
    /// | `GROUPINGS_OPT_OUT`              | `opt-out`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required(&lookup, "GROUPINGS_API_BASE_URL")?;
        let current_user = required(&lookup, "GROUPINGS_CURRENT_USER")?;
        let mut config = Self::new(base_url, current_user);

        if let Some(ms) = parsed::<u64, _>(&lookup, "GROUPINGS_POLL_INTERVAL_MS")? {
            config.poll.interval = Duration::from_millis(ms);
        }
        config.poll.max_attempts = parsed(&lookup, "GROUPINGS_POLL_MAX_ATTEMPTS")?;
        config.poll.timeout =
            parsed::<u64, _>(&lookup, "GROUPINGS_POLL_TIMEOUT_SECS")?.map(Duration::from_secs);
        if let Some(secs) = parsed::<u64, _>(&lookup, "GROUPINGS_REQUEST_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "GROUPINGS_REQUEST_TIMEOUT_SECS",
                    value: secs.to_string(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(name) = non_blank(&lookup, "GROUPINGS_OPT_IN")? {
            config.opt_in_attribute = name;
        }
        if let Some(name) = non_blank(&lookup, "GROUPINGS_OPT_OUT")? {
            config.opt_out_attribute = name;
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

/// Optional value that must not be blank when present.
fn non_blank<F>(lookup: &F, var: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Invalid { var, value }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

fn parsed<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
