use frameprims_message::{ParseError, SerializeError};

/// Stable diagnostic codes reported alongside codec failures.
///
/// Hosts key connection policy off these codes, so a code never changes
/// meaning between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    /// A well-framed body was rejected by the message format.
    BodyParse = 0,
    /// A malformed or unrepresentable length header.
    HeaderEncoding = 1,
    /// A failure while serializing or emitting an outgoing message.
    Write = 2,
    /// The configured message size ceiling was exceeded.
    MessageTooLarge = 3,
    /// A stream-level I/O failure.
    Io = 4,
    /// Invalid codec configuration.
    Config = 5,
}

/// Errors that can occur during frame encoding/decoding.
///
/// "More bytes needed" is not an error: decode paths signal it with
/// `Ok(None)` and expect to be called again once more input exists.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A varint length header ran past its maximum width.
    #[error("varint length header exceeds 5 bytes")]
    VarintTooLong,

    /// A decoded length does not fit the supported length range.
    #[error("decoded length {0} exceeds the 32-bit length range")]
    LengthOverflow(u64),

    /// A length cannot be represented in the configured header width.
    #[error("length {length} does not fit in a {width}-byte header")]
    LengthTooLarge { length: usize, width: usize },

    /// A message exceeds the configured maximum size.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// The framed body was rejected by the message format.
    #[error("error decoding message from input stream: {0}")]
    Parse(#[source] ParseError),

    /// The message format failed to serialize an outgoing message.
    #[error("error writing message to output stream: {0}")]
    Serialize(#[source] SerializeError),

    /// Header width outside the supported range.
    #[error("unsupported header width {0} (expected 1..=8)")]
    InvalidWidth(usize),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl CodecError {
    /// The stable diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::BodyParse,
            Self::VarintTooLong | Self::LengthOverflow(_) | Self::LengthTooLarge { .. } => {
                ErrorCode::HeaderEncoding
            }
            Self::Serialize(_) => ErrorCode::Write,
            Self::MessageTooLarge { .. } => ErrorCode::MessageTooLarge,
            Self::Io(_) | Self::ConnectionClosed => ErrorCode::Io,
            Self::InvalidWidth(_) => ErrorCode::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
