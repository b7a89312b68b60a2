/// A well-framed byte range was rejected by the message format.
///
/// Malformed application data inside a correctly framed message is not
/// transient, so parse errors are never retried by the framing layer.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl ParseError {
    /// Wrap an underlying format error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// The message format failed to produce bytes for an outgoing message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SerializeError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl SerializeError {
    /// Wrap an underlying format error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}
