/// Encoded bytes to [`PixelBuffer`](crate::PixelBuffer).
pub mod decode;
