use crate::foundation::error::{PixbleedError, PixbleedResult};

/// Tightly packed, row-major 8-bit raster with 3 (RGB) or 4 (RGBA) channels.
///
/// Invariant: `pixels.len() == width * height * channels` at all times.
///
/// Edge access is tolerant: [`PixelBuffer::get`] returns 0 outside the image and
/// [`PixelBuffer::set`] silently drops writes it cannot place. Displacement passes rely on this to
/// produce partial blocks at image borders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing pixel bytes.
    pub fn from_raw(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> PixbleedResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(PixbleedError::config(format!(
                "pixel buffer must have 3 or 4 channels, got {channels}"
            )));
        }
        let expected = byte_len(width, height, channels)?;
        if pixels.len() != expected {
            return Err(PixbleedError::config(format!(
                "pixel buffer length {} does not match {width}x{height}x{channels}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Buffer of the given size with every pixel set to `fill` (its length must equal `channels`).
    pub fn filled(width: u32, height: u32, fill: &[u8]) -> PixbleedResult<Self> {
        let channels = u8::try_from(fill.len())
            .map_err(|_| PixbleedError::config("fill pixel has too many channels"))?;
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| PixbleedError::config("pixel buffer size overflow"))?;
        Self::from_raw(width, height, channels, fill.repeat(count))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel (3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Overwrite this buffer's bytes from `src` without reallocating when sizes agree.
    pub fn restore_from(&mut self, src: &PixelBuffer) {
        if self.width == src.width && self.height == src.height && self.channels == src.channels {
            self.pixels.copy_from_slice(&src.pixels);
        } else {
            self.clone_from(src);
        }
    }

    /// `true` when `(x, y)` lies in `[0, width) x [0, height)`.
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Byte at `(x, y, channel)`, or 0 outside the image or channel range.
    pub fn get(&self, x: u32, y: u32, channel: u8) -> u8 {
        if !self.in_bounds(x, y) || channel >= self.channels {
            return 0;
        }
        self.pixels[self.offset(x, y) + channel as usize]
    }

    /// Strict variant of [`PixelBuffer::get`].
    pub fn try_get(&self, x: u32, y: u32, channel: u8) -> PixbleedResult<u8> {
        if !self.in_bounds(x, y) {
            return Err(PixbleedError::out_of_range(format!(
                "({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        if channel >= self.channels {
            return Err(PixbleedError::out_of_range(format!(
                "channel {channel} outside {} channels",
                self.channels
            )));
        }
        Ok(self.pixels[self.offset(x, y) + channel as usize])
    }

    /// Write one byte.
    ///
    /// Coordinates up to and including `width`/`height` are accepted; a write whose byte offset
    /// then falls past the end of the buffer is dropped, as is any write beyond that boundary.
    pub fn set(&mut self, x: u32, y: u32, channel: u8, value: u8) {
        if x > self.width || y > self.height || channel >= self.channels {
            return;
        }
        let idx = self.offset(x, y) + channel as usize;
        if let Some(b) = self.pixels.get_mut(idx) {
            *b = value;
        }
    }

    /// Integer mean of the first three channels.
    ///
    /// Fully transparent RGBA pixels (alpha exactly 0) report 255 so the brightness tolerance
    /// never selects them.
    pub fn brightness(&self, x: u32, y: u32) -> u8 {
        if !self.in_bounds(x, y) {
            return 0;
        }
        let base = self.offset(x, y);
        if self.channels == 4 && self.pixels[base + 3] == 0 {
            return 255;
        }
        let sum: u32 = self.pixels[base..base + 3].iter().map(|&c| u32::from(c)).sum();
        (sum / 3) as u8
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }
}

fn byte_len(width: u32, height: u32, channels: u8) -> PixbleedResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| PixbleedError::config("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel.rs"]
mod tests;
