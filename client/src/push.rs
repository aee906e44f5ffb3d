use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use tradepost_core::{event::PushEvent, ids::UserId};

use crate::error::ClientError;

/// A viewer-scoped push stream. Joining places the viewer in their own
/// delivery room; events arrive in emission order until [`Subscription::cancel`]
/// or drop.
#[async_trait]
pub trait PushChannel: Send + Sync {
    async fn join(&self, viewer: &UserId) -> Result<Subscription, ClientError>;
}

/// Handle for one active push stream. Cancelling closes the receiving end so
/// the emitter observes the departure; dropping the handle cancels too, so a
/// deactivated session can never keep receiving.
pub struct Subscription {
    viewer: UserId,
    events: mpsc::UnboundedReceiver<PushEvent>,
    cancelled: bool,
}

impl Subscription {
    pub fn new(viewer: UserId, events: mpsc::UnboundedReceiver<PushEvent>) -> Self {
        Self {
            viewer,
            events,
            cancelled: false,
        }
    }

    pub fn viewer_id(&self) -> &UserId {
        &self.viewer
    }

    /// Next already-delivered event, without waiting.
    pub fn try_next(&mut self) -> Option<PushEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. `None` once the emitting side is gone.
    pub async fn next(&mut self) -> Option<PushEvent> {
        self.events.recv().await
    }

    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.events.close();
        debug!(viewer = %self.viewer, "push subscription cancelled");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// In-process push channel: one room per viewer id, keyed delivery. Used by
/// the demo binary and the engine tests; a socket-backed channel implements
/// the same trait against the live service.
#[derive(Default)]
pub struct LocalPushChannel {
    rooms: DashMap<UserId, mpsc::UnboundedSender<PushEvent>>,
}

impl LocalPushChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to the viewer's room. Returns false when the viewer
    /// has no live subscription, in which case the event is dropped.
    pub fn emit(&self, viewer: &UserId, event: PushEvent) -> bool {
        let stale = match self.rooms.get(viewer) {
            Some(sender) => sender.send(event).is_err(),
            None => return false,
        };
        // The guard above must be dropped before removal.
        if stale {
            self.rooms.remove(viewer);
            return false;
        }
        true
    }
}

#[async_trait]
impl PushChannel for LocalPushChannel {
    async fn join(&self, viewer: &UserId) -> Result<Subscription, ClientError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.rooms.insert(viewer.clone(), sender);
        debug!(viewer = %viewer, "joined push room");
        Ok(Subscription::new(viewer.clone(), receiver))
    }
}
