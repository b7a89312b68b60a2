use bytes::BytesMut;
use frameprims_message::MessageFormat;

use crate::decoder::FrameDecoder;
use crate::encoder::FrameEncoder;
use crate::error::Result;
use crate::header::HeaderFormat;
use crate::state::FrameState;

/// Default maximum message body size: 16 MiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Configuration shared by the decode and encode paths.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum message body size in bytes. Default: 16 MiB.
    pub max_message_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// A bidirectional codec unit for one connection: a decoder, the
/// mirrored encoder, and the connection's frame state.
///
/// Create one `FrameCodec` per connection and keep it with that
/// connection's processing context. The host pipeline feeds arriving
/// bytes to [`decode`](FrameCodec::decode) and outgoing messages to
/// [`encode`](FrameCodec::encode). An `Ok(None)` from decode means
/// "call again once more bytes exist".
///
/// With the `async` feature enabled this type also implements
/// `tokio_util::codec::{Decoder, Encoder}`, so it installs directly
/// into a tokio pipeline via `Framed`.
pub struct FrameCodec<F> {
    decoder: FrameDecoder<F>,
    encoder: FrameEncoder<F>,
    state: FrameState,
}

impl<F: MessageFormat + Clone> FrameCodec<F> {
    /// Create a codec with default configuration.
    pub fn new(format: F, header: HeaderFormat) -> Self {
        Self::with_config(format, header, FrameConfig::default())
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(format: F, header: HeaderFormat, config: FrameConfig) -> Self {
        Self {
            decoder: FrameDecoder::with_config(format.clone(), header, config.clone()),
            encoder: FrameEncoder::with_config(format, header, config),
            state: FrameState::new(),
        }
    }
}

impl<F: MessageFormat> FrameCodec<F> {
    /// Decode one message from `src` if a complete frame is buffered.
    pub fn decode(&mut self, src: &mut BytesMut) -> Result<Option<F::Message>> {
        self.decoder.decode(src, &mut self.state)
    }

    /// Frame one message and append it to `dst`.
    pub fn encode(&mut self, message: &F::Message, dst: &mut BytesMut) -> Result<()> {
        self.encoder.encode(message, dst)
    }

    /// Parsing progress of the in-flight inbound frame, if any.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// The strategy this codec frames with.
    pub fn header(&self) -> HeaderFormat {
        self.decoder.header()
    }
}

#[cfg(feature = "async")]
impl<F: MessageFormat> tokio_util::codec::Decoder for FrameCodec<F> {
    type Item = F::Message;
    type Error = crate::error::CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<F::Message>> {
        self.decoder.decode(src, &mut self.state)
    }
}

#[cfg(feature = "async")]
impl<F: MessageFormat> tokio_util::codec::Encoder<F::Message> for FrameCodec<F> {
    type Error = crate::error::CodecError;

    fn encode(&mut self, message: F::Message, dst: &mut BytesMut) -> Result<()> {
        self.encoder.encode(&message, dst)
    }
}
