//! Error types for decodable-dispatch.

use thiserror::Error;

use crate::handler::HandlerFailure;

/// Boxed error returned by handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// The payload decoded, but every handler that accepted it failed.
    #[error("All {} matching handler(s) failed for {message_type}", .failures.len())]
    HandlerFailed {
        /// Type name of the last decoded message.
        message_type: &'static str,
        /// Every failure, in registration order.
        failures: Vec<HandlerFailure>,
    },

    /// No registered message type could be decoded from the payload.
    #[error("Unsupported message: no registered handler could decode the payload")]
    Unsupported,
}

/// Result type alias using DispatchError.
pub type Result<T> = std::result::Result<T, DispatchError>;
