//! Client-side state synchronization for the tradepost barter marketplace.
//!
//! The engine keeps two keyed entity stores (item listings and the viewer's
//! swap requests) reconciled from three inputs: snapshot fetches over HTTP,
//! a viewer-scoped push stream, and the echoed results of the viewer's own
//! commands. [`engine::SyncEngine`] is the entry point; the swap lifecycle
//! commands live on it too.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
mod lifecycle;
pub mod push;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{AcceptOutcome, MarketApi};
pub use config::ClientConfig;
pub use engine::{Navigation, SyncEngine};
pub use error::ClientError;
pub use http::HttpMarketApi;
pub use push::{LocalPushChannel, PushChannel, Subscription};
pub use session::{AuthToken, Session};
