use crate::{
    buffer::pixel::PixelBuffer,
    effects::frame::{PassStats, run_pass},
    effects::params::{EffectParameters, Persistence},
    encode::sink::{Frame, FrameSink, SinkConfig},
    foundation::core::FrameIndex,
    foundation::error::{PixbleedError, PixbleedResult},
    foundation::rng::{RandomSource, SplitMix64, frame_seed},
};

/// Pixels a sequence is generated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A single image; every frame derives from it.
    Still(PixelBuffer),
    /// Decoded animation frames. Output frame `i` is built from source frame `i % len`, and the
    /// per-frame pass count grows by `iteration_growth` for each source frame consumed.
    Timeline(Vec<PixelBuffer>),
}

impl Source {
    fn frame(&self, i: u64) -> Option<&PixelBuffer> {
        match self {
            Source::Still(buf) => Some(buf),
            Source::Timeline(frames) if frames.is_empty() => None,
            Source::Timeline(frames) => frames.get((i % frames.len() as u64) as usize),
        }
    }

    fn is_timeline(&self) -> bool {
        matches!(self, Source::Timeline(_))
    }
}

/// Sequence-level settings that sit beside [`EffectParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceSpec {
    /// Number of frames to produce (>= 1).
    pub frame_count: u32,
    /// Passes per frame (for timelines: passes for the first frame).
    pub per_frame_iterations: u32,
    /// Extra passes added per consumed timeline frame.
    pub iteration_growth: u32,
    /// Base seed; each frame re-seeds from `frame_seed(seed, index)`.
    pub seed: u64,
}

impl Default for SequenceSpec {
    fn default() -> Self {
        Self {
            frame_count: 1,
            per_frame_iterations: 1,
            iteration_growth: 0,
            seed: 0,
        }
    }
}

/// Lifecycle of a [`SequenceDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, not started.
    Idle,
    /// Started; frames remain.
    Running,
    /// All frames emitted and the sink closed.
    Done,
}

/// What one [`SequenceDriver::step`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Index of the emitted frame.
    pub index: FrameIndex,
    /// Passes run for this frame.
    pub iterations: u32,
    /// Counters summed over this frame's passes.
    pub pass: PassStats,
}

/// Totals for a whole sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequenceStats {
    /// Frames emitted.
    pub frames: u64,
    /// Displacement passes run.
    pub passes: u64,
    /// Blocks that triggered, over all passes.
    pub blocks_triggered: u64,
}

/// Drives a sequence of displacement frames into a [`FrameSink`].
///
/// `Idle -> Running -> Done`. [`SequenceDriver::step`] produces exactly one frame, so a caller
/// that needs cancellation can check its flag between steps; frame boundaries are the only
/// preemption points.
pub struct SequenceDriver<R: RandomSource = SplitMix64> {
    params: EffectParameters,
    spec: SequenceSpec,
    source: Option<Source>,
    working: Option<PixelBuffer>,
    rng: R,
    state: DriverState,
    next_frame: u64,
    stats: SequenceStats,
}

impl SequenceDriver<SplitMix64> {
    /// Driver using the default [`SplitMix64`] generator.
    pub fn new(source: Source, params: EffectParameters, spec: SequenceSpec) -> Self {
        Self::with_rng(source, params, spec, SplitMix64::new(spec.seed))
    }
}

impl<R: RandomSource> SequenceDriver<R> {
    /// Driver using a caller-supplied random source.
    pub fn with_rng(source: Source, params: EffectParameters, spec: SequenceSpec, rng: R) -> Self {
        Self {
            params,
            spec,
            source: Some(source),
            working: None,
            rng,
            state: DriverState::Idle,
            next_frame: 0,
            stats: SequenceStats::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Totals so far.
    pub fn stats(&self) -> SequenceStats {
        self.stats
    }

    /// The pristine buffer the next frame starts from, for read-only preview or diffing.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()?.frame(self.next_frame)
    }

    /// The working buffer as left by the last emitted frame.
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.working.as_ref()
    }

    /// Passes run for frame `index`.
    pub fn iterations_for(&self, index: u64) -> u32 {
        let timeline = self.source.as_ref().is_some_and(Source::is_timeline);
        if !timeline {
            return self.spec.per_frame_iterations;
        }
        let growth = u64::from(self.spec.iteration_growth).saturating_mul(index);
        u64::from(self.spec.per_frame_iterations)
            .saturating_add(growth)
            .min(u64::from(u32::MAX)) as u32
    }

    /// Validate configuration, seed the working buffer and open the sink.
    pub fn start(&mut self, sink: &mut dyn FrameSink) -> PixbleedResult<()> {
        if self.state != DriverState::Idle {
            return Err(PixbleedError::config("sequence already started"));
        }
        self.params.validate()?;
        if self.spec.frame_count == 0 {
            return Err(PixbleedError::config("frame_count must be >= 1"));
        }
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| PixbleedError::config("sequence has no source"))?;
        let first = source
            .frame(0)
            .ok_or_else(|| PixbleedError::config("source timeline is empty"))?;
        if let Source::Timeline(frames) = source
            && frames.iter().any(|f| {
                f.width() != first.width()
                    || f.height() != first.height()
                    || f.channels() != first.channels()
            })
        {
            return Err(PixbleedError::config(
                "all timeline frames must share dimensions and channel count",
            ));
        }

        let cfg = SinkConfig {
            width: first.width(),
            height: first.height(),
            channels: first.channels(),
            frame_count: u64::from(self.spec.frame_count),
        };
        self.working = Some(first.clone());
        sink.begin(cfg)?;
        self.state = DriverState::Running;
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frame_count,
            "sequence started"
        );
        Ok(())
    }

    /// Produce and emit the next frame. Returns `None` once the sequence is `Done`.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> PixbleedResult<Option<FrameReport>> {
        match self.state {
            DriverState::Idle => return Err(PixbleedError::config("sequence not started")),
            DriverState::Done => return Ok(None),
            DriverState::Running => {}
        }

        let i = self.next_frame;
        let iterations = self.iterations_for(i);
        let (Some(source), Some(working)) = (self.source.as_ref(), self.working.as_mut()) else {
            return Err(PixbleedError::config("sequence buffers released (unexpected)"));
        };
        let original = source
            .frame(i)
            .ok_or_else(|| PixbleedError::config("source timeline is empty"))?;

        // A timeline frame always starts from its own source pixels.
        if self.params.persistence == Persistence::ResetEachFrame || source.is_timeline() {
            working.restore_from(original);
        }

        self.rng.seed(frame_seed(self.spec.seed, i));
        let mut pass = PassStats::default();
        for _ in 0..iterations {
            pass.merge(run_pass(working, &self.params, &mut self.rng));
        }

        let frame = Frame {
            index: FrameIndex(i),
            buffer: working.clone(),
        };
        sink.accept(frame)?;

        self.stats.frames += 1;
        self.stats.passes += u64::from(iterations);
        self.stats.blocks_triggered += pass.blocks_triggered;
        self.next_frame += 1;
        tracing::debug!(
            frame = i,
            iterations,
            triggered = pass.blocks_triggered,
            "frame emitted"
        );

        if self.next_frame >= u64::from(self.spec.frame_count) {
            sink.end()?;
            self.state = DriverState::Done;
            self.source = None;
            self.working = None;
            tracing::info!(
                frames = self.stats.frames,
                passes = self.stats.passes,
                triggered = self.stats.blocks_triggered,
                "sequence done"
            );
        }

        Ok(Some(FrameReport {
            index: FrameIndex(i),
            iterations,
            pass,
        }))
    }

    /// Start (if idle) and step until done.
    pub fn run(mut self, sink: &mut dyn FrameSink) -> PixbleedResult<SequenceStats> {
        if self.state == DriverState::Idle {
            self.start(sink)?;
        }
        while self.step(sink)?.is_some() {}
        Ok(self.stats)
    }
}

/// Run a whole sequence with the default generator.
#[tracing::instrument(skip(source, sink))]
pub fn run_sequence(
    source: Source,
    params: EffectParameters,
    spec: SequenceSpec,
    sink: &mut dyn FrameSink,
) -> PixbleedResult<SequenceStats> {
    SequenceDriver::new(source, params, spec).run(sink)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/driver.rs"]
mod tests;
