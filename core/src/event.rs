use serde::{Deserialize, Serialize};

use crate::{
    ids::{ChatId, ItemId, RequestId},
    item::Item,
    swap::SwapRequest,
};

/// Compound payload of `swap:accepted`: both item flips plus the request
/// removal, which must be applied as one observable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCompletion {
    pub offered_item: Item,
    pub desired_item: Item,
    pub request_id: RequestId,
}

/// Payload of `chat:start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRef {
    #[serde(rename = "_id")]
    pub id: ChatId,
}

/// Every event kind the push channel can deliver. The set is closed on
/// purpose: adding a kind is a compile-time-checked change to every match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PushEvent {
    #[serde(rename = "item:create")]
    ItemCreated(Item),
    #[serde(rename = "item:update")]
    ItemUpdated(Item),
    #[serde(rename = "item:delete")]
    ItemDeleted(ItemId),
    #[serde(rename = "swap:accepted")]
    SwapAccepted(SwapCompletion),
    #[serde(rename = "swapRequest:create")]
    SwapRequestCreated(SwapRequest),
    #[serde(rename = "swapRequest:update")]
    SwapRequestUpdated(SwapRequest),
    #[serde(rename = "swapRequest:delete")]
    SwapRequestDeleted(RequestId),
    #[serde(rename = "chat:start")]
    ChatStarted(ChatRef),
}

impl PushEvent {
    /// Wire name of the event, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PushEvent::ItemCreated(_) => "item:create",
            PushEvent::ItemUpdated(_) => "item:update",
            PushEvent::ItemDeleted(_) => "item:delete",
            PushEvent::SwapAccepted(_) => "swap:accepted",
            PushEvent::SwapRequestCreated(_) => "swapRequest:create",
            PushEvent::SwapRequestUpdated(_) => "swapRequest:update",
            PushEvent::SwapRequestDeleted(_) => "swapRequest:delete",
            PushEvent::ChatStarted(_) => "chat:start",
        }
    }
}
