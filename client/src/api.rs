use async_trait::async_trait;
use serde::Deserialize;

use tradepost_core::{
    draft::ItemDraft,
    event::SwapCompletion,
    ids::{ChatId, RequestId},
    item::Item,
    swap::SwapRequest,
    user::Viewer,
};

use crate::{error::ClientError, session::AuthToken};

/// Result of the accept command. The completion payload matches the
/// `swap:accepted` broadcast, so the command echo and the remote event flow
/// through the same store path. A successful response without a chat id is
/// the recoverable inconsistency described in the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOutcome {
    #[serde(default)]
    pub chat_id: Option<ChatId>,
    #[serde(flatten)]
    pub completion: SwapCompletion,
}

/// The snapshot-fetch and command surface of the marketplace service.
///
/// One attempt per call; implementations surface non-success as
/// [`ClientError::Transport`] and never retry.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Public item listing, for anonymous viewers.
    async fn fetch_items(&self) -> Result<Vec<Item>, ClientError>;

    /// Item listing scoped to exclude the viewer's own postings.
    async fn fetch_items_excluding_own(&self, token: &AuthToken)
        -> Result<Vec<Item>, ClientError>;

    async fn fetch_viewer(&self, token: &AuthToken) -> Result<Viewer, ClientError>;

    async fn fetch_swap_requests(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<SwapRequest>, ClientError>;

    async fn post_item(&self, token: &AuthToken, draft: &ItemDraft) -> Result<Item, ClientError>;

    async fn accept_request(
        &self,
        token: &AuthToken,
        id: &RequestId,
    ) -> Result<AcceptOutcome, ClientError>;

    async fn reject_request(
        &self,
        token: &AuthToken,
        id: &RequestId,
    ) -> Result<SwapRequest, ClientError>;

    async fn delete_request(&self, token: &AuthToken, id: &RequestId)
        -> Result<(), ClientError>;
}
