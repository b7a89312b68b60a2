use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CodecError, Result};
use crate::state::FrameState;

/// Default fixed header width: 4 bytes.
pub const DEFAULT_HEADER_WIDTH: usize = 4;

/// Maximum number of bytes in a varint length header (32-bit range).
pub const MAX_VARINT_WIDTH: usize = 5;

/// Widest supported fixed header field.
const MAX_FIXED_WIDTH: usize = 8;

/// High bit of a varint byte: set on every byte except the last.
const CONTINUATION_BIT: u8 = 0x80;

/// Length-prefix encoding strategy, chosen at codec construction and
/// immutable afterwards. One value is safely shared by every connection
/// using the codec.
///
/// Constructed only through [`fixed`](HeaderFormat::fixed),
/// [`fixed_length`](HeaderFormat::fixed_length) and
/// [`varint`](HeaderFormat::varint), so a value always carries a valid
/// width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFormat {
    kind: HeaderKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderKind {
    /// Big-endian unsigned length of `width` bytes.
    Fixed { width: usize },
    /// Self-delimiting base-128 varint, 1-5 bytes.
    Varint,
}

impl HeaderFormat {
    /// Fixed header with the default 4-byte width.
    pub fn fixed() -> Self {
        Self {
            kind: HeaderKind::Fixed {
                width: DEFAULT_HEADER_WIDTH,
            },
        }
    }

    /// Fixed header with an explicit field width.
    ///
    /// Widths outside `1..=8` cannot hold a valid length and are
    /// rejected here rather than at decode time.
    pub fn fixed_length(width: usize) -> Result<Self> {
        if width == 0 || width > MAX_FIXED_WIDTH {
            return Err(CodecError::InvalidWidth(width));
        }
        Ok(Self {
            kind: HeaderKind::Fixed { width },
        })
    }

    /// Varint header.
    pub fn varint() -> Self {
        Self {
            kind: HeaderKind::Varint,
        }
    }

    /// The fixed field width, or `None` for the self-delimiting varint.
    pub fn fixed_width(&self) -> Option<usize> {
        match self.kind {
            HeaderKind::Fixed { width } => Some(width),
            HeaderKind::Varint => None,
        }
    }

    /// Number of header bytes needed to frame a `length`-byte body.
    pub fn header_width(&self, length: usize) -> usize {
        match self.kind {
            HeaderKind::Fixed { width } => width,
            HeaderKind::Varint => varint_width(length as u64),
        }
    }

    /// Try to read a body length from the front of `src`.
    ///
    /// Returns `Ok(None)` when more bytes are needed. The fixed strategy
    /// consumes nothing until the full header is available, so retrying
    /// with the same bytes is safe. The varint strategy consumes header
    /// bytes destructively, parking them in `state` so the next call
    /// resumes where this one stopped.
    pub fn read_length(&self, src: &mut BytesMut, state: &mut FrameState) -> Result<Option<usize>> {
        match self.kind {
            HeaderKind::Fixed { width } => {
                if src.len() < width {
                    return Ok(None); // Need more data
                }
                let value = src.get_uint(width);
                let length =
                    usize::try_from(value).map_err(|_| CodecError::LengthOverflow(value))?;
                Ok(Some(length))
            }
            HeaderKind::Varint => {
                while src.has_remaining() {
                    let byte = src.get_u8();
                    state.partial.push(byte);
                    if byte & CONTINUATION_BIT == 0 {
                        let length = decode_varint(&state.partial)?;
                        state.partial.clear();
                        return Ok(Some(length));
                    }
                    if state.partial.len() >= MAX_VARINT_WIDTH {
                        return Err(CodecError::VarintTooLong);
                    }
                }
                Ok(None) // Need more data; progress kept in state
            }
        }
    }

    /// Append the header bytes for a `length`-byte body to `dst`.
    ///
    /// A length the strategy cannot represent is an error and leaves
    /// `dst` untouched. Lengths are never silently truncated.
    pub fn encode_length(&self, length: usize, dst: &mut BytesMut) -> Result<()> {
        match self.kind {
            HeaderKind::Fixed { width } => {
                if width < MAX_FIXED_WIDTH && (length as u64) >> (8 * width) != 0 {
                    return Err(CodecError::LengthTooLarge { length, width });
                }
                dst.put_uint(length as u64, width);
            }
            HeaderKind::Varint => {
                let value = u32::try_from(length)
                    .map_err(|_| CodecError::LengthOverflow(length as u64))?;
                put_varint(value, dst);
            }
        }
        Ok(())
    }
}

/// Decode a complete little-endian-group varint.
///
/// `bytes` holds at most [`MAX_VARINT_WIDTH`] bytes, the last of which
/// has its continuation bit clear.
fn decode_varint(bytes: &[u8]) -> Result<usize> {
    let mut value: u64 = 0;
    for (index, byte) in bytes.iter().enumerate() {
        value |= u64::from(byte & !CONTINUATION_BIT) << (7 * index);
    }
    if value > u64::from(u32::MAX) {
        return Err(CodecError::LengthOverflow(value));
    }
    Ok(value as usize)
}

/// Append `value` as a varint: 7-bit groups, low-order first,
/// continuation bit on all but the last byte. Zero is a single `0x00`.
fn put_varint(mut value: u32, dst: &mut BytesMut) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            dst.put_u8(byte);
            return;
        }
        dst.put_u8(byte | CONTINUATION_BIT);
    }
}

/// Number of varint bytes needed to encode `value`.
fn varint_width(mut value: u64) -> usize {
    let mut width = 1;
    while value >= u64::from(CONTINUATION_BIT) {
        value >>= 7;
        width += 1;
    }
    width
}
