//! `groupings` -- command-line client for the groupings API.
//!
//! # Environment variables
//!
//! | Variable                      | Required | Default | Description                          |
//! |-------------------------------|----------|---------|--------------------------------------|
//! | `GROUPINGS_API_BASE_URL`      | yes      | --      | API base URL                         |
//! | `GROUPINGS_CURRENT_USER`      | yes      | --      | uid sent as the `current_user` header |
//! | `GROUPINGS_POLL_INTERVAL_MS`  | no       | `5000`  | Delay between job status polls       |
//! | `GROUPINGS_POLL_MAX_ATTEMPTS` | no       | --      | Give up after this many polls        |
//! | `GROUPINGS_POLL_TIMEOUT_SECS` | no       | --      | Give up after this long              |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use groupings_client::cli::{self, Cli};
use groupings_client::{ClientConfig, GroupingsApi};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupings_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "groupings command failed");
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.base_url, user = %config.current_user, "Loaded configuration");

    let api = GroupingsApi::new(&config)?;
    let result = cli::run(&api, args.command).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
