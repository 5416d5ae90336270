//! Every action the administration front-end issues against the API.
//!
//! Synchronous actions return the endpoint's response body directly.
//! `*_async` actions start a server job and resolve with the same shape
//! once the job completes (see [`AsyncActionClient`]).

use std::sync::Arc;

use groupings_core::grouping::validate_identifiers;
use groupings_core::{endpoints, ApiResponse, Feedback, GroupPath, GroupingPath, PageQuery};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::poller::AsyncActionClient;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Client for the groupings API, acting as one configured user.
#[derive(Clone)]
pub struct GroupingsApi {
    transport: Arc<dyn Transport>,
    poller: AsyncActionClient,
    current_user: String,
    opt_in_attribute: String,
    opt_out_attribute: String,
}

impl GroupingsApi {
    /// Create a client talking HTTP to the configured base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            poller: AsyncActionClient::new(Arc::clone(&transport), config.poll.clone()),
            transport,
            current_user: config.current_user.clone(),
            opt_in_attribute: config.opt_in_attribute.clone(),
            opt_out_attribute: config.opt_out_attribute.clone(),
        }
    }

    pub fn poller(&self) -> &AsyncActionClient {
        &self.poller
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    // ---- grouping settings ----

    pub async fn update_sync_dest(
        &self,
        path: &GroupingPath,
        sync_dest_id: &str,
        enabled: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::sync_destination(
            path,
            sync_dest_id,
            enabled,
        )))
        .await
    }

    pub async fn update_opt_in(
        &self,
        path: &GroupingPath,
        enabled: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::opt_attribute(
            path,
            &self.opt_in_attribute,
            enabled,
        )))
        .await
    }

    pub async fn update_opt_out(
        &self,
        path: &GroupingPath,
        enabled: bool,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::opt_attribute(
            path,
            &self.opt_out_attribute,
            enabled,
        )))
        .await
    }

    /// Replace the grouping description. The text is sent unquoted.
    pub async fn update_description(
        &self,
        path: &GroupingPath,
        description: &str,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::description(path)).raw_json(description))
            .await
    }

    // ---- include / exclude membership ----

    pub async fn add_include_members(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::put(endpoints::include_members(path)).json(json!(identifiers)))
            .await
    }

    pub async fn add_include_members_async(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.poller
            .run_async_action(
                ApiRequest::put(endpoints::include_members_async(path)).json(json!(identifiers)),
            )
            .await
    }

    pub async fn add_exclude_members(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::put(endpoints::exclude_members(path)).json(json!(identifiers)))
            .await
    }

    pub async fn add_exclude_members_async(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.poller
            .run_async_action(
                ApiRequest::put(endpoints::exclude_members_async(path)).json(json!(identifiers)),
            )
            .await
    }

    pub async fn remove_include_members(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::delete(endpoints::include_members(path)).json(json!(identifiers)))
            .await
    }

    pub async fn remove_exclude_members(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::delete(endpoints::exclude_members(path)).json(json!(identifiers)))
            .await
    }

    /// Empty the include list.
    pub async fn reset_include_group(
        &self,
        path: &GroupingPath,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::delete(endpoints::reset_include(path)))
            .await
    }

    pub async fn reset_include_group_async(
        &self,
        path: &GroupingPath,
    ) -> Result<ApiResponse, ClientError> {
        self.poller
            .run_async_action(ApiRequest::delete(endpoints::reset_include_async(path)))
            .await
    }

    /// Empty the exclude list.
    pub async fn reset_exclude_group(
        &self,
        path: &GroupingPath,
    ) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::delete(endpoints::reset_exclude(path)))
            .await
    }

    pub async fn reset_exclude_group_async(
        &self,
        path: &GroupingPath,
    ) -> Result<ApiResponse, ClientError> {
        self.poller
            .run_async_action(ApiRequest::delete(endpoints::reset_exclude_async(path)))
            .await
    }

    /// Run any `*/async` request under a cancellation token.
    pub async fn run_cancellable<R>(
        &self,
        initiate: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        self.poller.run_async_action_until(initiate, cancel).await
    }

    // ---- self-service ----

    /// Add the acting user to the include list.
    pub async fn opt_in(&self, path: &GroupingPath) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::opt_in_self(
            path,
            &self.current_user,
        )))
        .await
    }

    /// Add the acting user to the exclude list.
    pub async fn opt_out(&self, path: &GroupingPath) -> Result<ApiResponse, ClientError> {
        self.call(ApiRequest::put(endpoints::opt_out_self(
            path,
            &self.current_user,
        )))
        .await
    }

    // ---- owners and admins ----

    pub async fn add_owners(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::post(endpoints::owners(path, identifiers)))
            .await
    }

    pub async fn remove_owners(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::delete(endpoints::owners(path, identifiers)))
            .await
    }

    pub async fn add_admin(&self, uid: &str) -> Result<ApiResponse, ClientError> {
        validate_identifiers(&[uid])?;
        self.call(ApiRequest::post(endpoints::admin(uid))).await
    }

    pub async fn remove_admin(&self, uid: &str) -> Result<ApiResponse, ClientError> {
        validate_identifiers(&[uid])?;
        self.call(ApiRequest::delete(endpoints::admin(uid))).await
    }

    /// Remove one member from several groups in a single request.
    pub async fn remove_from_groups(
        &self,
        uid: &str,
        group_paths: &[GroupPath],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(&[uid])?;
        if group_paths.is_empty() {
            return Err(groupings_core::CoreError::Validation(
                "at least one group path is required".to_string(),
            )
            .into());
        }
        self.call(ApiRequest::delete(endpoints::remove_from_groups(
            group_paths,
            uid,
        )))
        .await
    }

    // ---- lookups ----

    /// Attributes (name, uid, uhUuid) of the given members.
    pub async fn member_attribute_results(
        &self,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::post(endpoints::MEMBERS).json(json!(identifiers)))
            .await
    }

    pub async fn member_attribute_results_async(
        &self,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.poller
            .run_async_action(ApiRequest::post(endpoints::MEMBERS_ASYNC).json(json!(identifiers)))
            .await
    }

    /// One page of the grouping's resolved members.
    pub async fn get_grouping_members(
        &self,
        path: &GroupingPath,
        query: &PageQuery,
    ) -> Result<ApiResponse, ClientError> {
        query.validate()?;
        self.call(ApiRequest::get(endpoints::grouping(path)).query(query.to_query_pairs()))
            .await
    }

    pub async fn get_number_of_grouping_members(
        &self,
        path: &GroupingPath,
    ) -> Result<u64, ClientError> {
        self.call(ApiRequest::get(endpoints::member_count(path)))
            .await
    }

    /// Which of `identifiers` come from the basis list.
    pub async fn get_grouping_members_is_basis(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::post(endpoints::is_basis(path)).json(json!(identifiers)))
            .await
    }

    /// Which lists each of `identifiers` appears in.
    pub async fn get_grouping_members_where_listed(
        &self,
        path: &GroupingPath,
        identifiers: &[String],
    ) -> Result<ApiResponse, ClientError> {
        validate_identifiers(identifiers)?;
        self.call(ApiRequest::post(endpoints::where_listed(path)).json(json!(identifiers)))
            .await
    }

    // ---- email ----

    pub async fn send_feedback(&self, feedback: &Feedback) -> Result<(), ClientError> {
        feedback.check()?;
        self.transport
            .send(ApiRequest::post(endpoints::FEEDBACK).json(serde_json::to_value(feedback)?))
            .await?;
        Ok(())
    }

    pub async fn send_stack_trace(&self, stack_trace: &str) -> Result<(), ClientError> {
        self.transport
            .send(ApiRequest::post(endpoints::STACK_TRACE).plain_text(stack_trace))
            .await?;
        Ok(())
    }

    // ---- private helpers ----

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let body = self.transport.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}
