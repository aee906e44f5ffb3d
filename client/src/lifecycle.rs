//! The swap lifecycle commands: accept, reject, delete, and item posting.
//!
//! Every command follows the same shape: check legality against local state,
//! send the remote command, and on success apply the echoed result through
//! the same store paths the push stream uses. Failures leave local state as
//! it was before the command.

use tracing::{info, warn};

use tradepost_core::{
    draft::ItemDraft,
    event::PushEvent,
    ids::RequestId,
    item::Item,
    swap::SwapRequest,
};

use crate::{
    engine::{Navigation, SyncEngine},
    error::ClientError,
};

impl SyncEngine {
    /// Accept a pending received request. On success the completion payload
    /// is applied locally (both items flip, the request leaves the store) and
    /// a navigation to the opened chat is scheduled.
    pub async fn accept_request(&mut self, id: &RequestId) -> Result<(), ClientError> {
        let token = self.session.require_token()?.clone();
        let viewer_id = self
            .session
            .viewer_id()
            .ok_or(ClientError::AuthRequired)?
            .clone();

        let request = self.active_request(id)?;
        request.ensure_accept(&viewer_id)?;

        let outcome = self.api.accept_request(&token, id).await?;

        let Some(chat_id) = outcome.chat_id else {
            // The remote accepted but named no chat session. Skip the local
            // effect; the swap:accepted broadcast will still converge us.
            warn!(request = %id, "accept confirmed without a chat session id");
            return Err(ClientError::invariant(
                "accept succeeded without a chat session id",
            ));
        };

        info!(request = %id, chat = %chat_id, "swap accepted");
        self.apply_completion(outcome.completion);
        self.schedule_navigation(Navigation::Chat(chat_id));
        Ok(())
    }

    /// Reject a pending received request. The rejected request stays in the
    /// store with its updated status, keeping its delete affordance visible.
    pub async fn reject_request(&mut self, id: &RequestId) -> Result<(), ClientError> {
        let token = self.session.require_token()?.clone();
        let viewer_id = self
            .session
            .viewer_id()
            .ok_or(ClientError::AuthRequired)?
            .clone();

        let request = self.active_request(id)?;
        request.ensure_reject(&viewer_id)?;

        let updated = self.api.reject_request(&token, id).await?;
        info!(request = %id, "swap rejected");
        self.requests.upsert(updated);
        Ok(())
    }

    /// Delete a terminal request. The removal is optimistic: the entry comes
    /// out of the store first and is restored at its prior position if the
    /// remote delete fails.
    pub async fn delete_request(&mut self, id: &RequestId) -> Result<(), ClientError> {
        let token = self.session.require_token()?.clone();

        let request = self.active_request(id)?;
        request.ensure_delete()?;

        let index = self.requests.index_of(id).unwrap_or(0);
        let Some(snapshot) = self.requests.remove(id) else {
            return Err(ClientError::invariant(format!(
                "swap request {id} is not in the active set"
            )));
        };

        match self.api.delete_request(&token, id).await {
            Ok(()) => {
                info!(request = %id, "swap request deleted");
                Ok(())
            }
            Err(err) => {
                warn!(request = %id, error = %err, "delete failed, restoring request");
                self.requests.insert_at(index, snapshot);
                Err(err)
            }
        }
    }

    /// Validate and post a new item listing. The created item enters the
    /// store through the same path an `item:create` push would take.
    pub async fn post_item(&mut self, draft: &ItemDraft) -> Result<Item, ClientError> {
        draft.validate()?;
        let token = self.session.require_token()?.clone();

        let created = self.api.post_item(&token, draft).await?;
        info!(item = %created.id, "item posted");
        self.apply_event(PushEvent::ItemCreated(created.clone()));
        Ok(created)
    }

    fn active_request(&self, id: &RequestId) -> Result<&SwapRequest, ClientError> {
        self.requests.get(id).ok_or_else(|| {
            ClientError::invariant(format!("swap request {id} is not in the active set"))
        })
    }
}
