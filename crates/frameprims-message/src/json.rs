use std::marker::PhantomData;

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ParseError, SerializeError};
use crate::traits::MessageFormat;

/// A typed JSON message format.
///
/// Parses bodies into `T` and serializes `T` back out with serde_json.
/// The type parameter plays the role of the message prototype: one
/// `JsonFormat<T>` instance decodes exactly one message kind.
pub struct JsonFormat<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFormat<T> {
    /// A format for message type `T`.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonFormat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonFormat<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for JsonFormat<T> {}

impl<T> std::fmt::Debug for JsonFormat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFormat").finish()
    }
}

impl<T: Serialize + DeserializeOwned> MessageFormat for JsonFormat<T> {
    type Message = T;

    fn parse(&self, body: &[u8]) -> Result<T, ParseError> {
        serde_json::from_slice(body).map_err(ParseError::new)
    }

    fn serialize(&self, message: &T, dst: &mut BytesMut) -> Result<(), SerializeError> {
        let encoded = serde_json::to_vec(message).map_err(SerializeError::new)?;
        dst.extend_from_slice(&encoded);
        Ok(())
    }
}
