use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session lifecycle. `AwaitingReply` covers the one outstanding provider
/// call; a success or a failure is the only way out of it. A failure
/// restores the phase the call was made from, so resubmitting is always a
/// valid retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    AwaitingReply,
    Idle,
    Ended,
}

/// Calls made in the wrong phase are caller errors, not handled races.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has not been started")]
    NotStarted,
    #[error("session is already started")]
    AlreadyStarted,
    #[error("session has ended")]
    Ended,
    #[error("a provider call is already outstanding")]
    Busy,
}
