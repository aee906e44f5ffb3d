//! Shared fixtures and an in-memory API double for engine tests.

use std::sync::Mutex;

use async_trait::async_trait;

use tradepost_core::{
    draft::{ImageAttachment, ItemDraft},
    ids::{RequestId, UserId},
    item::{Category, Item, ItemStatus},
    swap::{SwapRequest, SwapStatus},
    user::{UserRef, Viewer},
};

use crate::{
    api::{AcceptOutcome, MarketApi},
    error::ClientError,
    push::{PushChannel, Subscription},
    session::AuthToken,
};

pub fn token() -> AuthToken {
    AuthToken::new("test-token")
}

pub fn user_ref(id: &str) -> UserRef {
    UserRef::new(id, format!("User {id}"))
}

pub fn viewer(id: &str) -> Viewer {
    Viewer {
        id: id.into(),
        fullname: format!("User {id}"),
        email: None,
    }
}

pub fn item(id: &str, owner: &str) -> Item {
    Item {
        id: id.into(),
        title: format!("item {id}"),
        category: Category::Notes,
        description: "fixture".to_owned(),
        book_type: None,
        images: vec!["cover.png".to_owned()],
        owner: user_ref(owner),
        status: ItemStatus::Available,
    }
}

pub fn swapped_item(id: &str, owner: &str) -> Item {
    Item {
        status: ItemStatus::Swapped,
        ..item(id, owner)
    }
}

pub fn request(id: &str, sender: &str, receiver: &str, status: SwapStatus) -> SwapRequest {
    SwapRequest {
        id: id.into(),
        sender: user_ref(sender),
        receiver: user_ref(receiver),
        offered_item: item(&format!("{id}-offered"), sender),
        desired_item: item(&format!("{id}-desired"), receiver),
        status,
        chat_id: None,
    }
}

pub fn draft() -> ItemDraft {
    ItemDraft {
        title: "Lab notes".to_owned(),
        category: Category::Notes,
        description: "Weeks one through six".to_owned(),
        book_type: None,
        images: vec![ImageAttachment {
            file_name: "cover.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0u8; 4],
        }],
    }
}

/// Push channel whose join always fails, for activation error paths.
pub struct FailingPush;

#[async_trait]
impl PushChannel for FailingPush {
    async fn join(&self, _viewer: &UserId) -> Result<Subscription, ClientError> {
        Err(ClientError::transport("push channel unavailable"))
    }
}

/// Scripted API double. Unscripted calls fail with a transport error so a
/// test cannot silently depend on a response it never arranged.
#[derive(Default)]
pub struct MockApi {
    pub public_items: Vec<Item>,
    pub scoped_items: Vec<Item>,
    pub viewer: Option<Viewer>,
    pub requests: Vec<SwapRequest>,
    pub accept_outcome: Option<AcceptOutcome>,
    pub rejected: Option<SwapRequest>,
    pub created_item: Option<Item>,
    pub fail_delete: bool,
    pub accepts: Mutex<Vec<RequestId>>,
    pub deletes: Mutex<Vec<RequestId>>,
}

#[async_trait]
impl MarketApi for MockApi {
    async fn fetch_items(&self) -> Result<Vec<Item>, ClientError> {
        Ok(self.public_items.clone())
    }

    async fn fetch_items_excluding_own(
        &self,
        _token: &AuthToken,
    ) -> Result<Vec<Item>, ClientError> {
        Ok(self.scoped_items.clone())
    }

    async fn fetch_viewer(&self, _token: &AuthToken) -> Result<Viewer, ClientError> {
        self.viewer
            .clone()
            .ok_or_else(|| ClientError::transport("no viewer scripted"))
    }

    async fn fetch_swap_requests(
        &self,
        _token: &AuthToken,
    ) -> Result<Vec<SwapRequest>, ClientError> {
        Ok(self.requests.clone())
    }

    async fn post_item(
        &self,
        _token: &AuthToken,
        _draft: &ItemDraft,
    ) -> Result<Item, ClientError> {
        self.created_item
            .clone()
            .ok_or_else(|| ClientError::transport("no created item scripted"))
    }

    async fn accept_request(
        &self,
        _token: &AuthToken,
        id: &RequestId,
    ) -> Result<AcceptOutcome, ClientError> {
        self.accepts.lock().unwrap().push(id.clone());
        self.accept_outcome
            .clone()
            .ok_or_else(|| ClientError::transport("no accept outcome scripted"))
    }

    async fn reject_request(
        &self,
        _token: &AuthToken,
        _id: &RequestId,
    ) -> Result<SwapRequest, ClientError> {
        self.rejected
            .clone()
            .ok_or_else(|| ClientError::transport("no rejection scripted"))
    }

    async fn delete_request(
        &self,
        _token: &AuthToken,
        id: &RequestId,
    ) -> Result<(), ClientError> {
        self.deletes.lock().unwrap().push(id.clone());
        if self.fail_delete {
            Err(ClientError::transport("delete returned status 500"))
        } else {
            Ok(())
        }
    }
}
