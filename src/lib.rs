//! Pixbleed is a stochastic pixel-displacement effect engine.
//!
//! Given a decoded raster image it produces a sequence of frames in which blocks of pixels are
//! probabilistically copied ("bleed") or swapped ("diffuse") to nearby locations.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded bytes -> [`PixelBuffer`] (or a timeline of them for animated GIFs)
//! 2. **Displace**: [`run_pass`] walks block origins in raster order, asks the
//!    [`DisplacementRule`] whether to trigger, and applies the [`BlockTransform`]
//! 3. **Sequence**: [`SequenceDriver`] repeats passes per frame under a [`Persistence`] policy
//! 4. **Emit**: every produced [`Frame`] goes to a [`FrameSink`] (PNG directory, `ffmpeg`, memory)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic per seed**: every frame re-seeds the [`RandomSource`] from its index.
//! - **No IO in the core**: decoding and sinks live at the edges.
//! - **Live-buffer semantics**: displacements read and write the buffer being mutated, so a pixel
//!   may move more than once per pass.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod buffer;
mod effects;
mod encode;
mod foundation;
mod sequence;

pub use assets::decode::{decode_frames, decode_image};
pub use buffer::pixel::PixelBuffer;
pub use effects::block::BlockTransform;
pub use effects::frame::{PassStats, run_pass};
pub use effects::params::{AxisMode, EffectParameters, Persistence, TransferMode};
pub use effects::rule::{Displacement, DisplacementRule};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::png::{PngSequenceSink, encode_png, frame_file_name};
pub use encode::sink::{Frame, FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Fps, FrameIndex};
pub use foundation::error::{PixbleedError, PixbleedResult};
pub use foundation::rng::{RandomSource, SplitMix64, frame_seed};
pub use sequence::driver::{
    DriverState, FrameReport, SequenceDriver, SequenceSpec, SequenceStats, Source, run_sequence,
};
