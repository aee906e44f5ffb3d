use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::{ChatId, RequestId, UserId},
    item::Item,
    store::Keyed,
    user::UserRef,
};

/// Lifecycle status of a swap request. `Accepted` and `Rejected` are
/// terminal: the only operation left is deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SwapStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Accepted | SwapStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected lifecycle transition, raised before any command leaves the
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} a swap request that is already {status}")]
    NotPending {
        action: &'static str,
        status: SwapStatus,
    },
    #[error("only the receiver may {action} a swap request")]
    NotReceiver { action: &'static str },
    #[error("cannot delete a swap request that is still {status}")]
    NotTerminal { status: SwapStatus },
}

/// A barter proposal between two users. The embedded items are display
/// snapshots taken at creation time; the item store holds the canonical
/// records once the snapshot fetch lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[serde(rename = "_id")]
    pub id: RequestId,
    pub sender: UserRef,
    pub receiver: UserRef,
    pub offered_item: Item,
    pub desired_item: Item,
    pub status: SwapStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
}

impl SwapRequest {
    /// Whether the given user is the sender or the receiver.
    pub fn involves(&self, user: &UserId) -> bool {
        self.sender.id == *user || self.receiver.id == *user
    }

    pub fn ensure_accept(&self, actor: &UserId) -> Result<(), TransitionError> {
        self.ensure_receiver_action("accept", actor)
    }

    pub fn ensure_reject(&self, actor: &UserId) -> Result<(), TransitionError> {
        self.ensure_receiver_action("reject", actor)
    }

    /// Deletion is only legal once the request is terminal. A pending
    /// request keeps its accept/reject affordance instead.
    pub fn ensure_delete(&self) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            Ok(())
        } else {
            Err(TransitionError::NotTerminal {
                status: self.status,
            })
        }
    }

    fn ensure_receiver_action(
        &self,
        action: &'static str,
        actor: &UserId,
    ) -> Result<(), TransitionError> {
        if self.status != SwapStatus::Pending {
            return Err(TransitionError::NotPending {
                action,
                status: self.status,
            });
        }
        if self.receiver.id != *actor {
            return Err(TransitionError::NotReceiver { action });
        }
        Ok(())
    }
}

impl Keyed for SwapRequest {
    type Key = RequestId;

    fn key(&self) -> &RequestId {
        &self.id
    }
}
