use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tradepost_core::{
    event::{PushEvent, SwapCompletion},
    ids::ChatId,
    item::Item,
    store::EntityStore,
    swap::SwapRequest,
    user::Viewer,
};

use crate::{
    api::MarketApi,
    error::ClientError,
    push::{PushChannel, Subscription},
    session::{AuthToken, Session},
};

/// A view change requested by the engine, consumed by whatever surface is
/// driving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Chat(ChatId),
}

/// The state synchronization engine: entity stores reconciled from three
/// inputs (snapshot fetches, the push stream, and command echoes), plus the
/// session that scopes them to one viewer.
pub struct SyncEngine {
    pub(crate) api: Arc<dyn MarketApi>,
    pub(crate) push: Arc<dyn PushChannel>,
    pub(crate) session: Session,
    pub(crate) items: EntityStore<Item>,
    pub(crate) requests: EntityStore<SwapRequest>,
    pub(crate) subscription: Option<Subscription>,
    seen_chats: HashSet<ChatId>,
    navigations: mpsc::UnboundedSender<Navigation>,
}

impl SyncEngine {
    /// Build an engine plus the receiving end of its navigation requests.
    pub fn new(
        api: Arc<dyn MarketApi>,
        push: Arc<dyn PushChannel>,
    ) -> (Self, mpsc::UnboundedReceiver<Navigation>) {
        let (navigations, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            api,
            push,
            session: Session::default(),
            items: EntityStore::new(),
            requests: EntityStore::new(),
            subscription: None,
            seen_chats: HashSet::new(),
            navigations,
        };
        (engine, receiver)
    }

    /// Bring the engine to a live baseline. With a token: fetch the viewer
    /// profile, swap requests, and the scoped item listing concurrently, then
    /// join the push room — joining waits until the viewer id is known, so no
    /// event can arrive for an unidentified session. Without a token: public
    /// items only, no session, no subscription. A failure at any step leaves
    /// the engine exactly as it was.
    pub async fn activate(&mut self, token: Option<AuthToken>) -> Result<(), ClientError> {
        match token {
            None => {
                let items = self.api.fetch_items().await?;
                info!(items = items.len(), "activated anonymous session");
                self.items.replace_all(items);
                Ok(())
            }
            Some(token) => {
                let (viewer, requests, items) = tokio::try_join!(
                    self.api.fetch_viewer(&token),
                    self.api.fetch_swap_requests(&token),
                    self.api.fetch_items_excluding_own(&token),
                )?;

                // Join before touching session or stores: a failed join
                // would otherwise strand a half-activated engine.
                let subscription = self.push.join(&viewer.id).await?;
                info!(
                    viewer = %viewer.id,
                    items = items.len(),
                    requests = requests.len(),
                    "activated authenticated session"
                );

                self.session.begin(token, viewer);
                self.items.replace_all(items);
                self.requests.replace_all(requests);
                self.subscription = Some(subscription);
                Ok(())
            }
        }
    }

    /// Tear down the push subscription, keeping session and stores intact.
    pub fn deactivate(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }

    /// End the session entirely: cancel the subscription, forget the
    /// credential and viewer, and drop the viewer-scoped request store.
    pub fn logout(&mut self) {
        self.deactivate();
        self.session.clear();
        self.requests.replace_all(Vec::new());
    }

    /// Apply one push event to local state.
    ///
    /// Events are applied in arrival order with no sequence numbers; when a
    /// snapshot fetch and a push race, whichever lands last wins. Both carry
    /// server state, so the divergence is bounded by one event and heals on
    /// the next snapshot.
    pub fn apply_event(&mut self, event: PushEvent) {
        debug!(event = event.kind(), "applying push event");
        match event {
            PushEvent::ItemCreated(item) | PushEvent::ItemUpdated(item) => {
                self.items.upsert(item);
            }
            PushEvent::ItemDeleted(id) => {
                self.items.remove(&id);
            }
            PushEvent::SwapAccepted(completion) => {
                self.apply_completion(completion);
            }
            PushEvent::SwapRequestCreated(request) | PushEvent::SwapRequestUpdated(request) => {
                if self.session.is_party(&request) {
                    self.requests.upsert(request);
                } else {
                    debug!(request = %request.id, "dropping swap request event for other parties");
                }
            }
            PushEvent::SwapRequestDeleted(id) => {
                // The store only ever holds requests the viewer is party to,
                // so a bare-id delete needs no party check beyond having a
                // viewer at all.
                if self.session.is_authenticated() {
                    self.requests.remove(&id);
                }
            }
            PushEvent::ChatStarted(chat) => {
                if self.seen_chats.insert(chat.id.clone()) {
                    self.schedule_navigation(Navigation::Chat(chat.id));
                } else {
                    debug!(chat = %chat.id, "chat session already seen, skipping navigation");
                }
            }
        }
    }

    /// Apply a swap completion as one unit: both item flips and the request
    /// removal become visible in the same call, never one without the others.
    pub(crate) fn apply_completion(&mut self, completion: SwapCompletion) {
        let SwapCompletion {
            offered_item,
            desired_item,
            request_id,
        } = completion;
        self.items.upsert(offered_item);
        self.items.upsert(desired_item);
        self.requests.remove(&request_id);
    }

    pub(crate) fn schedule_navigation(&self, navigation: Navigation) {
        if self.navigations.send(navigation).is_err() {
            warn!("navigation receiver is gone, dropping view change");
        }
    }

    /// Drain every already-delivered push event, returning how many were
    /// applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.subscription.as_mut().and_then(Subscription::try_next) {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for and apply the next push event. `None` when there is no
    /// subscription or the channel closed.
    pub async fn next_event(&mut self) -> Option<PushEvent> {
        let event = self.subscription.as_mut()?.next().await?;
        self.apply_event(event.clone());
        Some(event)
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.session.viewer()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// The item listing in display order, newest first.
    pub fn items(&self) -> &[Item] {
        self.items.entries()
    }

    /// Requests the viewer sent, in store order. Empty when anonymous.
    pub fn sent_requests(&self) -> Vec<&SwapRequest> {
        self.requests_where(|request, viewer_id| request.sender.id == *viewer_id)
    }

    /// Requests the viewer received, in store order. Empty when anonymous.
    pub fn received_requests(&self) -> Vec<&SwapRequest> {
        self.requests_where(|request, viewer_id| request.receiver.id == *viewer_id)
    }

    fn requests_where(
        &self,
        keep: impl Fn(&SwapRequest, &tradepost_core::ids::UserId) -> bool,
    ) -> Vec<&SwapRequest> {
        let Some(viewer_id) = self.session.viewer_id() else {
            return Vec::new();
        };
        self.requests
            .entries()
            .iter()
            .filter(|request| keep(request, viewer_id))
            .collect()
    }
}
