//! Error types for the interview engine.
//!
//! Only session-protocol violations surface as errors. Degenerate sensor
//! input is absorbed by the scorers and never reaches this type.

use crate::session::SessionId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The id was never registered, or the session is no longer active
    #[error("Session {0} not found or not active")]
    UnknownSession(SessionId),

    /// A terminal transition was requested on a session that already took one
    #[error("Session {0} has already been finalized")]
    AlreadyFinalized(SessionId),

    /// Malformed payload rejected by an explicit decode helper
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
