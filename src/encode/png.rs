use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::buffer::pixel::PixelBuffer;
use crate::encode::sink::{Frame, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PixbleedError, PixbleedResult};

/// Encode a buffer as PNG bytes (RGB8 or RGBA8 depending on its channel count).
pub fn encode_png(buf: &PixelBuffer) -> PixbleedResult<Vec<u8>> {
    let (w, h) = (buf.width(), buf.height());
    let raw = buf.as_bytes().to_vec();
    let img = match buf.channels() {
        3 => image::RgbImage::from_raw(w, h, raw).map(image::DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(w, h, raw).map(image::DynamicImage::ImageRgba8),
        c => {
            return Err(PixbleedError::encode(format!(
                "unsupported channel count {c}"
            )));
        }
    }
    .ok_or_else(|| PixbleedError::encode("pixel data does not match image dimensions"))?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| PixbleedError::encode(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// File name used for frame `idx` inside a PNG sequence directory.
pub fn frame_file_name(idx: FrameIndex) -> String {
    format!("frame_{:05}.png", idx.0)
}

/// Sink that writes every frame as `frame_NNNNN.png` into a directory.
///
/// `begin` creates the directory and removes `frame_*.png` files left by earlier runs, so the
/// directory always holds exactly the frames of the latest sequence.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
    started: bool,
}

impl PngSequenceSink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
            started: false,
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PixbleedResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frame directory '{}'", self.dir.display()))?;
        let removed = clear_stale_frames(&self.dir)?;
        if removed > 0 {
            tracing::debug!(dir = %self.dir.display(), removed, "cleared stale frames");
        }
        self.written.clear();
        self.started = true;
        Ok(())
    }

    fn accept(&mut self, frame: Frame) -> PixbleedResult<()> {
        if !self.started {
            return Err(PixbleedError::sink("png sequence sink not started"));
        }
        let bytes = encode_png(&frame.buffer)?;
        let path = self.dir.join(frame_file_name(frame.index));
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write frame '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PixbleedResult<()> {
        self.started = false;
        Ok(())
    }
}

fn clear_stale_frames(dir: &Path) -> PixbleedResult<usize> {
    let mut removed = 0;
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list frame directory '{}'", dir.display()))?;
    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        let is_frame = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("frame_") && n.ends_with(".png"));
        if is_frame && path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove stale frame '{}'", path.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
