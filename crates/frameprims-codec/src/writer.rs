use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use frameprims_message::MessageFormat;

use crate::codec::FrameConfig;
use crate::encoder::FrameEncoder;
use crate::error::{CodecError, Result};
use crate::header::HeaderFormat;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes complete framed messages to any `Write` stream.
pub struct FrameWriter<T, F> {
    inner: T,
    buf: BytesMut,
    encoder: FrameEncoder<F>,
}

impl<T: Write, F: MessageFormat> FrameWriter<T, F> {
    /// Create a frame writer with default configuration.
    pub fn new(inner: T, format: F, header: HeaderFormat) -> Self {
        Self::with_config(inner, format, header, FrameConfig::default())
    }

    /// Create a frame writer with explicit configuration.
    pub fn with_config(inner: T, format: F, header: HeaderFormat, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            encoder: FrameEncoder::with_config(format, header, config),
        }
    }

    /// Frame and send one message (blocking).
    pub fn send(&mut self, message: &F::Message) -> Result<()> {
        self.buf.clear();
        self.encoder.encode(message, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(CodecError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(CodecError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        self.encoder.config()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use bytes::Bytes;
    use frameprims_message::RawFormat;

    use super::*;
    use crate::decoder::FrameDecoder;
    use crate::state::FrameState;

    fn decode_all(header: HeaderFormat, wire: &[u8]) -> Vec<Bytes> {
        let decoder = FrameDecoder::new(RawFormat, header);
        let mut src = BytesMut::from(wire);
        let mut state = FrameState::new();
        let mut messages = Vec::new();
        while let Some(message) = decoder.decode(&mut src, &mut state).unwrap() {
            messages.push(message);
            if src.is_empty() {
                break;
            }
        }
        assert!(src.is_empty());
        messages
    }

    #[test]
    fn write_single_message() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::new(cursor, RawFormat, HeaderFormat::fixed());

        writer.send(&Bytes::from_static(b"hello")).unwrap();

        let wire = writer.into_inner().into_inner();
        let messages = decode_all(HeaderFormat::fixed(), &wire);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].as_ref(), b"hello");
    }

    #[test]
    fn write_multiple_messages() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::new(cursor, RawFormat, HeaderFormat::varint());

        writer.send(&Bytes::from_static(b"one")).unwrap();
        writer.send(&Bytes::from_static(b"two")).unwrap();
        writer.send(&Bytes::from_static(b"three")).unwrap();

        let wire = writer.into_inner().into_inner();
        let messages = decode_all(HeaderFormat::varint(), &wire);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].as_ref(), b"one");
        assert_eq!(messages[1].as_ref(), b"two");
        assert_eq!(messages[2].as_ref(), b"three");
    }

    #[test]
    fn oversized_message_rejected() {
        let cfg = FrameConfig {
            max_message_size: 4,
        };
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::with_config(cursor, RawFormat, HeaderFormat::fixed(), cfg);

        let err = writer.send(&Bytes::from_static(b"oversized")).unwrap_err();
        assert!(matches!(err, CodecError::MessageTooLarge { .. }));

        // Nothing reached the stream.
        assert!(writer.into_inner().into_inner().is_empty());
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink, RawFormat, HeaderFormat::fixed());

        writer.send(&Bytes::from_static(b"x")).unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let inner = InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        };

        let mut writer = FrameWriter::new(inner, RawFormat, HeaderFormat::varint());
        writer.send(&Bytes::from_static(b"retry")).unwrap();

        let inner = writer.into_inner();
        assert!(!inner.data.is_empty());
    }

    #[test]
    fn handles_would_block_write_and_flush() {
        let inner = WouldBlockWriteThenFlush {
            wrote_once: false,
            flush_would_block: false,
            data: Vec::new(),
        };

        let mut writer = FrameWriter::new(inner, RawFormat, HeaderFormat::varint());
        writer.send(&Bytes::from_static(b"retry")).unwrap();

        let inner = writer.into_inner();
        assert!(!inner.data.is_empty());
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut writer = FrameWriter::new(ZeroWriter, RawFormat, HeaderFormat::fixed());
        let err = writer.send(&Bytes::from_static(b"x")).unwrap_err();
        assert!(matches!(err, CodecError::ConnectionClosed));
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::new(cursor, RawFormat, HeaderFormat::fixed());

        let _ = writer.get_ref();
        let _ = writer.get_mut();
        let _ = writer.config();
        let _inner = writer.into_inner();
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct WouldBlockWriteThenFlush {
        wrote_once: bool,
        flush_would_block: bool,
        data: Vec<u8>,
    }

    impl Write for WouldBlockWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::WouldBlock));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_would_block {
                self.flush_would_block = true;
                return Err(std::io::Error::from(ErrorKind::WouldBlock));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn written_bytes_read_back() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::new(cursor, RawFormat, HeaderFormat::varint());

        writer.send(&Bytes::from_static(b"z")).unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = crate::reader::FrameReader::new(
            Cursor::new(wire),
            RawFormat,
            HeaderFormat::varint(),
        );
        let message = reader.read_message().unwrap();
        assert_eq!(message.as_ref(), b"z");
    }
}
