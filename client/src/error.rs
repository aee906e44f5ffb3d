use thiserror::Error;
use tradepost_core::{draft::DraftError, swap::TransitionError};

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way an engine operation can fail. No variant is fatal to the
/// process; failures are scoped to the triggering operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A fetch, command, or channel call was unreachable or returned a
    /// non-success status. Single attempt, no retry; local state is left
    /// unchanged. Expired or invalid tokens on authenticated calls land
    /// here rather than as a distinct kind.
    #[error("transport failure: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A command or authenticated fetch was attempted with no credential
    /// token present.
    #[error("authentication required")]
    AuthRequired,

    /// Draft validation failed before any network call.
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// An illegal lifecycle transition, rejected before any network call.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The remote confirmed an operation but the response was inconsistent
    /// (e.g. an accept with no chat session id). The local effect is
    /// skipped; remote-origin convergence still applies.
    #[error("invariant violation: {message}")]
    Invariant { message: String },
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    pub fn transport_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport_with(err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_pass_through_the_draft_message() {
        let err = ClientError::from(DraftError::NoImages);
        assert_eq!(err.to_string(), "at least one image is required");
    }

    #[test]
    fn transport_errors_carry_their_message() {
        let err = ClientError::transport("accept returned status 503");
        assert_eq!(
            err.to_string(),
            "transport failure: accept returned status 503"
        );
    }
}
