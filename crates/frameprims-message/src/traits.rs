use bytes::BytesMut;

use crate::error::{ParseError, SerializeError};

/// A serialization format carried over frameprims framing.
///
/// The format value captures everything needed to interpret a body:
/// which message kind to produce and any extension table the format
/// consults live as fields of the implementing type, fixed when the
/// codec is constructed.
///
/// Implementations must be pure with respect to the byte range they are
/// given: `parse` sees exactly one complete message body (possibly
/// empty) and must not assume anything about surrounding stream bytes.
pub trait MessageFormat {
    /// The message type this format produces and consumes.
    type Message;

    /// Parse one complete message from `body`.
    fn parse(&self, body: &[u8]) -> Result<Self::Message, ParseError>;

    /// Serialize `message`, appending its bytes to `dst`.
    ///
    /// On error nothing useful may be in `dst`; the framing layer
    /// discards the buffer rather than emitting a partial body.
    fn serialize(&self, message: &Self::Message, dst: &mut BytesMut)
        -> Result<(), SerializeError>;
}
