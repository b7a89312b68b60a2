use bytes::BytesMut;
use frameprims_message::MessageFormat;
use tracing::{debug, trace, warn};

use crate::codec::FrameConfig;
use crate::error::{CodecError, Result};
use crate::header::HeaderFormat;
use crate::state::FrameState;

/// Decodes length-prefixed messages from an incrementally filled buffer.
///
/// The decoder itself holds only immutable configuration; all
/// per-connection progress lives in the [`FrameState`] handed into each
/// call, so one decoder instance may serve any number of connections.
///
/// Decoding is a two-phase state machine per frame: learn the body
/// length from the header, then wait until the whole body is buffered
/// and hand exactly that byte range to the message format.
pub struct FrameDecoder<F> {
    format: F,
    header: HeaderFormat,
    config: FrameConfig,
}

impl<F: MessageFormat> FrameDecoder<F> {
    /// Create a decoder with default configuration.
    pub fn new(format: F, header: HeaderFormat) -> Self {
        Self::with_config(format, header, FrameConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(format: F, header: HeaderFormat, config: FrameConfig) -> Self {
        Self {
            format,
            header,
            config,
        }
    }

    /// Try to decode one complete message from `src`.
    ///
    /// Returns `Ok(None)` when more bytes are needed; append to `src`
    /// and call again. Varint header bytes already folded into `state`
    /// are not left in `src` for re-reading, so the outcome depends only
    /// on the concatenated byte stream, never on how it was chunked.
    ///
    /// On success exactly the frame's bytes have been consumed from
    /// `src`; trailing bytes belong to the next frame. On any error the
    /// state is reset so the connection can be torn down or
    /// resynchronized by the caller.
    pub fn decode(&self, src: &mut BytesMut, state: &mut FrameState) -> Result<Option<F::Message>> {
        trace!(available = src.len(), "decode");

        let length = match state.message_length() {
            Some(length) => length,
            None => {
                let length = match self.header.read_length(src, state) {
                    Ok(Some(length)) => length,
                    Ok(None) => return Ok(None),
                    Err(err) => {
                        warn!(code = ?err.code(), "error finding message length header");
                        state.reset();
                        return Err(err);
                    }
                };
                if length > self.config.max_message_size {
                    state.reset();
                    return Err(CodecError::MessageTooLarge {
                        size: length,
                        max: self.config.max_message_size,
                    });
                }
                debug!(length, "message length");
                state.message_length = Some(length);
                length
            }
        };

        if src.len() < length {
            return Ok(None); // Need more data; length stays learned
        }

        let body = src.split_to(length);
        state.reset();
        match self.format.parse(&body) {
            Ok(message) => Ok(Some(message)),
            Err(err) => {
                warn!(error = %err, "error decoding message from input stream");
                Err(CodecError::Parse(err))
            }
        }
    }

    /// The strategy this decoder frames with.
    pub fn header(&self) -> HeaderFormat {
        self.header
    }

    /// Current decoder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
