use std::io::Cursor;

use image::AnimationDecoder as _;

use crate::{
    buffer::pixel::PixelBuffer,
    foundation::error::{PixbleedError, PixbleedResult},
};

/// Decode encoded image bytes into a [`PixelBuffer`].
///
/// Sources with an alpha channel decode to RGBA8, everything else to RGB8.
pub fn decode_image(bytes: &[u8]) -> PixbleedResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PixbleedError::decode(format!("decode image from memory: {e}")))?;
    let (width, height) = (dyn_img.width(), dyn_img.height());
    if dyn_img.color().has_alpha() {
        PixelBuffer::from_raw(width, height, 4, dyn_img.to_rgba8().into_raw())
    } else {
        PixelBuffer::from_raw(width, height, 3, dyn_img.to_rgb8().into_raw())
    }
}

/// Decode every frame of an animated GIF as RGBA8; other formats yield a single frame.
pub fn decode_frames(bytes: &[u8]) -> PixbleedResult<Vec<PixelBuffer>> {
    let format = image::guess_format(bytes)
        .map_err(|e| PixbleedError::decode(format!("unrecognized image format: {e}")))?;
    if format != image::ImageFormat::Gif {
        return Ok(vec![decode_image(bytes)?]);
    }

    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| PixbleedError::decode(format!("open gif: {e}")))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| PixbleedError::decode(format!("decode gif frames: {e}")))?;
    if frames.is_empty() {
        return Err(PixbleedError::decode("gif contains no frames"));
    }

    frames
        .into_iter()
        .map(|f| {
            let rgba = f.into_buffer();
            let (w, h) = rgba.dimensions();
            PixelBuffer::from_raw(w, h, 4, rgba.into_raw())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
