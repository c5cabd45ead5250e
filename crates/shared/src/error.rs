use thiserror::Error;

use crate::protocol::ErrorBody;

/// Failures surfaced by the remote collaborators of a quick action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The server rejected the call with a structured body; the nested
    /// message is what the user sees.
    #[error("{}", body.message)]
    Remote { body: ErrorBody },
    /// The call never produced a server response.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server rejected the call but the payload lacked the expected
    /// nested message field.
    #[error("remote rejection (status {status}) carried no message body")]
    MalformedFailure { status: u16 },
    /// A collaborator was never wired up for this component instance.
    #[error("{0}")]
    Unavailable(String),
}

impl ActionError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            body: ErrorBody::new(message),
        }
    }
}
