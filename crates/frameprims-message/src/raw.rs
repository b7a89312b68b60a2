use bytes::{Bytes, BytesMut};

use crate::error::{ParseError, SerializeError};
use crate::traits::MessageFormat;

/// The identity format: messages are opaque byte strings.
///
/// Useful for relays that frame without interpreting payloads, and as
/// the baseline format in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormat;

impl MessageFormat for RawFormat {
    type Message = Bytes;

    fn parse(&self, body: &[u8]) -> Result<Bytes, ParseError> {
        Ok(Bytes::copy_from_slice(body))
    }

    fn serialize(&self, message: &Bytes, dst: &mut BytesMut) -> Result<(), SerializeError> {
        dst.extend_from_slice(message);
        Ok(())
    }
}
