/// Per-connection, per-in-flight-frame parsing progress.
///
/// Owned exclusively by one connection's decoding context and passed
/// `&mut` into decode calls. The decoder sets the learned length exactly
/// once per frame and clears everything as soon as the frame's body is
/// consumed, so the next frame starts clean.
#[derive(Debug, Default)]
pub struct FrameState {
    pub(crate) message_length: Option<usize>,
    pub(crate) partial: Vec<u8>,
}

impl FrameState {
    /// Fresh state, positioned at the start of a frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// The body length learned from the header, if known yet.
    pub fn message_length(&self) -> Option<usize> {
        self.message_length
    }

    /// Header bytes collected so far for a frame whose length is not
    /// yet known. Non-empty only for the varint strategy, which consumes
    /// header bytes destructively as they arrive.
    pub fn partial_header(&self) -> &[u8] {
        &self.partial
    }

    /// Clear all progress so the next frame starts clean.
    pub fn reset(&mut self) {
        self.message_length = None;
        self.partial.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = FrameState::new();
        assert_eq!(state.message_length(), None);
        assert!(state.partial_header().is_empty());
    }

    #[test]
    fn reset_clears_progress() {
        let mut state = FrameState::new();
        state.message_length = Some(42);
        state.partial.push(0x80);

        state.reset();

        assert_eq!(state.message_length(), None);
        assert!(state.partial_header().is_empty());
    }
}
