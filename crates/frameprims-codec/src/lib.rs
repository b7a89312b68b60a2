//! Incremental length-prefixed message framing for stream transports.
//!
//! This is the core value-add layer of frameprims. A byte stream
//! arrives in arbitrarily sized chunks; this crate finds message
//! boundaries, buffers partial frames across arrivals, and hands each
//! complete body to a message format exactly once, symmetrically on
//! decode and encode. Three length-prefix strategies are supported:
//! - A 4-byte big-endian header ([`HeaderFormat::fixed`])
//! - A big-endian header of configurable width ([`HeaderFormat::fixed_length`])
//! - A self-delimiting base-128 varint header ([`HeaderFormat::varint`])
//!
//! No partial reads, no buffer management in user code.

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod reader;
pub mod state;
pub mod writer;

pub use codec::{FrameCodec, FrameConfig, DEFAULT_MAX_MESSAGE_SIZE};
pub use decoder::FrameDecoder;
pub use encoder::FrameEncoder;
pub use error::{CodecError, ErrorCode, Result};
pub use header::{HeaderFormat, DEFAULT_HEADER_WIDTH, MAX_VARINT_WIDTH};
pub use reader::FrameReader;
pub use state::FrameState;
pub use writer::FrameWriter;
