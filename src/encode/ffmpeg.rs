use crate::encode::sink::{Frame, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PixbleedError, PixbleedResult};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file path. A `.gif` extension selects animated GIF output, anything else h264.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Output frame rate.
    pub fps: Fps,
    /// Background color used to flatten alpha for video output (RGB8).
    pub bg_rgb: [u8; 3],
}

impl FfmpegSinkOpts {
    /// Create options for writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            fps: Fps::default(),
            bg_rgb: [0, 0, 0],
        }
    }

    fn is_gif(&self) -> bool {
        self.out_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    flatten: bool,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink; `ffmpeg` is spawned in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            flatten: false,
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> PixbleedResult<()> {
        if self.opts.fps.num == 0 || self.opts.fps.den == 0 {
            return Err(PixbleedError::config("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PixbleedError::config(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        let gif = self.opts.is_gif();
        if !gif && (!cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2)) {
            return Err(PixbleedError::config(
                "ffmpeg sink width/height must be even (required for yuv420p video output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(PixbleedError::config(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(PixbleedError::encode(
                "ffmpeg is required for video output, but was not found on PATH",
            ));
        }

        // Video output has no alpha; flatten RGBA before writing. GIF keeps it for paletteuse.
        self.flatten = !gif && cfg.channels == 4;
        let in_pix_fmt = if cfg.channels == 4 && !self.flatten {
            "rgba"
        } else {
            "rgb24"
        };

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            in_pix_fmt,
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", self.opts.fps.num, self.opts.fps.den),
            "-i",
            "pipe:0",
        ]);
        if gif {
            cmd.args([
                "-vf",
                "split[a][b];[a]palettegen[p];[b][p]paletteuse",
                "-loop",
                "0",
            ]);
        } else {
            cmd.args([
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]);
        }
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            PixbleedError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PixbleedError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PixbleedError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.scratch = if self.flatten {
            vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 3]
        } else {
            Vec::new()
        };
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        tracing::debug!(out = %self.opts.out_path.display(), gif, "spawned ffmpeg");
        Ok(())
    }

    fn accept(&mut self, frame: Frame) -> PixbleedResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PixbleedError::sink("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && frame.index <= last
        {
            return Err(PixbleedError::sink(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(frame.index);

        let buf = &frame.buffer;
        if buf.width() != cfg.width || buf.height() != cfg.height || buf.channels() != cfg.channels
        {
            return Err(PixbleedError::sink(format!(
                "frame shape mismatch: got {}x{}x{}, expected {}x{}x{}",
                buf.width(),
                buf.height(),
                buf.channels(),
                cfg.width,
                cfg.height,
                cfg.channels
            )));
        }

        let bytes: &[u8] = if self.flatten {
            flatten_rgba8_over_bg(&mut self.scratch, buf.as_bytes(), self.opts.bg_rgb)?;
            &self.scratch
        } else {
            buf.as_bytes()
        };

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PixbleedError::sink("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(bytes).map_err(|e| {
            PixbleedError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> PixbleedResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| PixbleedError::sink("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            PixbleedError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PixbleedError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| PixbleedError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(PixbleedError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

/// Composite straight-alpha RGBA8 over an opaque background, producing RGB8.
fn flatten_rgba8_over_bg(dst: &mut [u8], src: &[u8], bg_rgb: [u8; 3]) -> PixbleedResult<()> {
    if !src.len().is_multiple_of(4) || dst.len() != src.len() / 4 * 3 {
        return Err(PixbleedError::encode(
            "flatten_rgba8_over_bg expects rgba8 src and matching rgb8 dst",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(&s[..3]);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255(u16::from(s[c]), a) + mul_div255(u16::from(bg_rgb[c]), inv);
            d[c] = v.min(255) as u8;
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PixbleedResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
