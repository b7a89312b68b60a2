use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use frameprims_message::MessageFormat;

use crate::codec::FrameConfig;
use crate::decoder::FrameDecoder;
use crate::error::{CodecError, Result};
use crate::header::HeaderFormat;
use crate::state::FrameState;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Reads complete messages from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete,
/// parsed messages.
pub struct FrameReader<T, F> {
    inner: T,
    buf: BytesMut,
    decoder: FrameDecoder<F>,
    state: FrameState,
}

impl<T: Read, F: MessageFormat> FrameReader<T, F> {
    /// Create a frame reader with default configuration.
    pub fn new(inner: T, format: F, header: HeaderFormat) -> Self {
        Self::with_config(inner, format, header, FrameConfig::default())
    }

    /// Create a frame reader with explicit configuration.
    pub fn with_config(inner: T, format: F, header: HeaderFormat, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            decoder: FrameDecoder::with_config(format, header, config),
            state: FrameState::new(),
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(CodecError::ConnectionClosed)` when EOF is reached.
    pub fn read_message(&mut self) -> Result<F::Message> {
        loop {
            if let Some(message) = self.decoder.decode(&mut self.buf, &mut self.state)? {
                return Ok(message);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CodecError::Io(err)),
            };

            if read == 0 {
                return Err(CodecError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        self.decoder.config()
    }
}
