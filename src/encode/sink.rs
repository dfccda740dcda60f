use crate::buffer::pixel::PixelBuffer;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PixbleedError, PixbleedResult};

/// A produced frame: a buffer snapshot plus its ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based position in the sequence.
    pub index: FrameIndex,
    /// Pixels for this frame.
    pub buffer: PixelBuffer,
}

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Channels per pixel (3 or 4).
    pub channels: u8,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of produced frames.
///
/// Ordering contract: `accept` is called once per frame in strictly increasing
/// [`FrameIndex`] order, between a single `begin` and a single `end`.
pub trait FrameSink {
    /// Called once before any frames are accepted.
    fn begin(&mut self, cfg: SinkConfig) -> PixbleedResult<()>;
    /// Take ownership of the next frame.
    fn accept(&mut self, frame: Frame) -> PixbleedResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> PixbleedResult<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the sink and return its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PixbleedResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn accept(&mut self, frame: Frame) -> PixbleedResult<()> {
        if self.cfg.is_none() {
            return Err(PixbleedError::sink("in-memory sink not started"));
        }
        if let Some(last) = self.frames.last()
            && frame.index <= last.index
        {
            return Err(PixbleedError::sink(
                "in-memory sink received out-of-order frame index",
            ));
        }
        self.frames.push(frame);
        Ok(())
    }

    fn end(&mut self) -> PixbleedResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
