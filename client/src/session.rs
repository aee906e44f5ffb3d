use std::fmt;

use tradepost_core::{ids::UserId, swap::SwapRequest, user::Viewer};

use crate::error::ClientError;

/// Bearer credential for authenticated calls. Redacted in Debug output so it
/// cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// The current viewer identity and credential, created at activation and
/// torn down at deactivation. Passed explicitly to everything that filters
/// by viewer; there is no ambient global.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<AuthToken>,
    viewer: Option<Viewer>,
}

impl Session {
    pub fn begin(&mut self, token: AuthToken, viewer: Viewer) {
        self.token = Some(token);
        self.viewer = Some(viewer);
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.viewer = None;
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn require_token(&self) -> Result<&AuthToken, ClientError> {
        self.token.as_ref().ok_or(ClientError::AuthRequired)
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    pub fn viewer_id(&self) -> Option<&UserId> {
        self.viewer.as_ref().map(|viewer| &viewer.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.viewer.is_some()
    }

    /// Whether the current viewer is a party to the request. An absent
    /// viewer is never a party, which is what makes the anonymous path drop
    /// every swap-request event instead of misfiling it.
    pub fn is_party(&self, request: &SwapRequest) -> bool {
        self.viewer_id()
            .is_some_and(|viewer_id| request.involves(viewer_id))
    }
}
