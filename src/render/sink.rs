use crate::foundation::core::Raster;
use crate::foundation::error::ScanlensResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy)]
pub struct SinkConfig {
    /// Initial output width in pixels.
    pub width: u32,
    /// Initial output height in pixels.
    pub height: u32,
}

/// Sink contract for consuming rendered frames.
///
/// `push_frame` is called with strictly increasing frame indices. Frames carry
/// their own dimensions; a resize mid-run changes them without a new `begin`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ScanlensResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, index: u64, frame: &Raster) -> ScanlensResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ScanlensResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Raster)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u64, Raster)] {
        &self.frames
    }

    /// Whether `end` has been observed.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ScanlensResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &Raster) -> ScanlensResult<()> {
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ScanlensResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Sink that discards every frame; useful for headless event-only runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ScanlensResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _index: u64, _frame: &Raster) -> ScanlensResult<()> {
        Ok(())
    }

    fn end(&mut self) -> ScanlensResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
