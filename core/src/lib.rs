//! Domain model for the tradepost marketplace client.
//!
//! Pure data and rules only: entity records and their wire shapes, the
//! ordered keyed [`store::EntityStore`], the closed [`event::PushEvent`]
//! vocabulary, item draft validation, and swap lifecycle legality. All I/O
//! lives in `tradepost-client`.

pub mod draft;
pub mod event;
pub mod ids;
pub mod item;
pub mod store;
pub mod swap;
pub mod user;

pub use draft::{DraftError, ImageAttachment, ItemDraft};
pub use event::{ChatRef, PushEvent, SwapCompletion};
pub use ids::{ChatId, ItemId, RequestId, UserId};
pub use item::{BookType, Category, Item, ItemStatus};
pub use store::{EntityStore, Keyed, Upserted};
pub use swap::{SwapRequest, SwapStatus, TransitionError};
pub use user::{UserRef, Viewer};
