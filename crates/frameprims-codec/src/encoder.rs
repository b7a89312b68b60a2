use bytes::BytesMut;
use frameprims_message::MessageFormat;
use tracing::trace;

use crate::codec::FrameConfig;
use crate::error::{CodecError, Result};
use crate::header::HeaderFormat;

/// Encodes messages as length-prefixed frames.
///
/// The mirror of [`FrameDecoder`](crate::decoder::FrameDecoder):
/// serialize the body, compute its header with the same strategy, emit
/// `header ++ body` as one contiguous unit. Stateless beyond immutable
/// configuration, so a single encoder serves any number of connections.
pub struct FrameEncoder<F> {
    format: F,
    header: HeaderFormat,
    config: FrameConfig,
}

impl<F: MessageFormat> FrameEncoder<F> {
    /// Create an encoder with default configuration.
    pub fn new(format: F, header: HeaderFormat) -> Self {
        Self::with_config(format, header, FrameConfig::default())
    }

    /// Create an encoder with explicit configuration.
    pub fn with_config(format: F, header: HeaderFormat, config: FrameConfig) -> Self {
        Self {
            format,
            header,
            config,
        }
    }

    /// Frame one message and append it to `dst`.
    ///
    /// Nothing is appended to `dst` unless the whole frame can be
    /// produced.
    pub fn encode(&self, message: &F::Message, dst: &mut BytesMut) -> Result<()> {
        let mut body = BytesMut::new();
        self.format
            .serialize(message, &mut body)
            .map_err(CodecError::Serialize)?;

        if body.len() > self.config.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: body.len(),
                max: self.config.max_message_size,
            });
        }

        trace!(length = body.len(), "encode");
        dst.reserve(self.header.header_width(body.len()) + body.len());
        self.header.encode_length(body.len(), dst)?;
        dst.extend_from_slice(&body);
        Ok(())
    }

    /// The strategy this encoder frames with.
    pub fn header(&self) -> HeaderFormat {
        self.header
    }

    /// Current encoder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
