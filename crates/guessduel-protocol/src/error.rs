//! Error types for the protocol layer.

/// Errors raised while turning requests and responses into bytes and back.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Malformed bytes, a missing field, or an unknown request type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Well-formed but meaningless, e.g. a declared digit above 9.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
