//! Frame sinks and encoders.
//!
//! Sinks consume produced frames in sequence order and are driven by
//! [`SequenceDriver`](crate::SequenceDriver).

/// `ffmpeg`-based sink (video or animated GIF via the system `ffmpeg`).
pub mod ffmpeg;
/// PNG encoding and the PNG sequence directory sink.
pub mod png;
/// Generic frame sink trait and built-in in-memory sink.
pub mod sink;
