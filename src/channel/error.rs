//! Error types for the update channel.

use thiserror::Error;

/// Errors surfaced by [`MessageChannel`](super::MessageChannel).
///
/// These never escape the UI call site: the caller converts them into a
/// status-bar warning so a broken link can't take the tick loop down.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Patient id was empty or whitespace-only.
    #[error("patient id is empty")]
    EmptyPatientId,

    /// Update text was empty or whitespace-only.
    #[error("update text is empty")]
    EmptyText,

    /// The envelope failed to serialize.
    #[error("failed to serialize update: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The client refused the dispatch (e.g. its request queue is full).
    #[error("failed to dispatch update: {0}")]
    Dispatch(String),
}
