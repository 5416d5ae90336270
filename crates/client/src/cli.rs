//! Command-line front-end: one subcommand per API action.

use clap::{Parser, Subcommand};
use groupings_core::{Feedback, GroupingPath, PageQuery, SortBy};
use serde_json::Value;

use crate::actions::GroupingsApi;
use crate::error::ClientError;

#[derive(Debug, Parser)]
#[command(name = "groupings", about = "Manage grouping memberships from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add members to the include list
    AddInclude {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
        /// Run as a server job and wait for it to finish
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Add members to the exclude list
    AddExclude {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Remove members from the include list
    RemoveInclude {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
    },
    /// Remove members from the exclude list
    RemoveExclude {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
    },
    /// Empty the include list
    ResetInclude {
        path: GroupingPath,
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Empty the exclude list
    ResetExclude {
        path: GroupingPath,
        #[arg(long = "async")]
        run_async: bool,
    },
    AddOwners {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
    },
    RemoveOwners {
        path: GroupingPath,
        #[arg(required = true)]
        uids: Vec<String>,
    },
    AddAdmin {
        uid: String,
    },
    RemoveAdmin {
        uid: String,
    },
    /// Look up member attributes
    Members {
        #[arg(required = true)]
        uids: Vec<String>,
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Count the grouping's members
    Count {
        path: GroupingPath,
    },
    /// List one page of the grouping's members
    List {
        path: GroupingPath,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
        #[arg(long, default_value = "name")]
        sort_by: String,
        #[arg(long)]
        descending: bool,
    },
    /// Join the include list as the acting user
    OptIn {
        path: GroupingPath,
    },
    /// Join the exclude list as the acting user
    OptOut {
        path: GroupingPath,
    },
    /// Enable or disable a sync destination
    SyncDest {
        path: GroupingPath,
        sync_dest_id: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Replace the grouping description
    Description {
        path: GroupingPath,
        text: String,
    },
    /// Send feedback to the administrators
    Feedback {
        #[arg(long)]
        email: String,
        #[arg(long = "type", default_value = "general")]
        kind: String,
        #[arg(long, default_value = "")]
        name: String,
        message: String,
    },
}

/// Execute one command and return its JSON result.
pub async fn run(api: &GroupingsApi, command: Command) -> Result<Value, ClientError> {
    let response = match command {
        Command::AddInclude {
            path,
            uids,
            run_async: true,
        } => api.add_include_members_async(&path, &uids).await?,
        Command::AddInclude { path, uids, .. } => api.add_include_members(&path, &uids).await?,
        Command::AddExclude {
            path,
            uids,
            run_async: true,
        } => api.add_exclude_members_async(&path, &uids).await?,
        Command::AddExclude { path, uids, .. } => api.add_exclude_members(&path, &uids).await?,
        Command::RemoveInclude { path, uids } => api.remove_include_members(&path, &uids).await?,
        Command::RemoveExclude { path, uids } => api.remove_exclude_members(&path, &uids).await?,
        Command::ResetInclude {
            path,
            run_async: true,
        } => api.reset_include_group_async(&path).await?,
        Command::ResetInclude { path, .. } => api.reset_include_group(&path).await?,
        Command::ResetExclude {
            path,
            run_async: true,
        } => api.reset_exclude_group_async(&path).await?,
        Command::ResetExclude { path, .. } => api.reset_exclude_group(&path).await?,
        Command::AddOwners { path, uids } => api.add_owners(&path, &uids).await?,
        Command::RemoveOwners { path, uids } => api.remove_owners(&path, &uids).await?,
        Command::AddAdmin { uid } => api.add_admin(&uid).await?,
        Command::RemoveAdmin { uid } => api.remove_admin(&uid).await?,
        Command::Members {
            uids,
            run_async: true,
        } => api.member_attribute_results_async(&uids).await?,
        Command::Members { uids, .. } => api.member_attribute_results(&uids).await?,
        Command::Count { path } => {
            let count = api.get_number_of_grouping_members(&path).await?;
            return Ok(Value::from(count));
        }
        Command::List {
            path,
            page,
            size,
            sort_by,
            descending,
        } => {
            let query = PageQuery {
                sort_by: SortBy::from_str(&sort_by)?,
                is_ascending: !descending,
                page,
                size,
            };
            api.get_grouping_members(&path, &query).await?
        }
        Command::OptIn { path } => api.opt_in(&path).await?,
        Command::OptOut { path } => api.opt_out(&path).await?,
        Command::SyncDest {
            path,
            sync_dest_id,
            enabled,
        } => api.update_sync_dest(&path, &sync_dest_id, enabled).await?,
        Command::Description { path, text } => api.update_description(&path, &text).await?,
        Command::Feedback {
            email,
            kind,
            name,
            message,
        } => {
            let feedback = Feedback {
                name,
                email,
                kind,
                message,
            };
            api.send_feedback(&feedback).await?;
            return Ok(Value::Null);
        }
    };

    Ok(serde_json::to_value(response)?)
}
