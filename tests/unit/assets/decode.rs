use std::io::Cursor;

use super::*;

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn opaque_png_decodes_to_rgb() {
    let img = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let bytes = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Png);

    let buf = decode_image(&bytes).unwrap();
    assert_eq!((buf.width(), buf.height(), buf.channels()), (2, 1, 3));
    assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn png_with_alpha_decodes_to_straight_rgba() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let bytes = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let buf = decode_image(&bytes).unwrap();
    assert_eq!(buf.channels(), 4);
    assert_eq!(buf.as_bytes(), &[100, 50, 200, 128]);
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(PixbleedError::Decode(_))
    ));
    assert!(matches!(
        decode_frames(b"not an image"),
        Err(PixbleedError::Decode(_))
    ));
}

#[test]
fn still_formats_decode_as_a_single_frame() {
    let img = image::RgbImage::from_raw(1, 1, vec![7, 8, 9]).unwrap();
    let bytes = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Png);
    let frames = decode_frames(&bytes).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].as_bytes(), &[7, 8, 9]);
}

#[test]
fn animated_gif_decodes_every_frame() {
    let mut bytes = Vec::new();
    {
        let mut enc = image::codecs::gif::GifEncoder::new(&mut bytes);
        for shade in [0u8, 255] {
            let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([shade, shade, shade, 255]));
            enc.encode_frame(image::Frame::new(img)).unwrap();
        }
    }

    let frames = decode_frames(&bytes).unwrap();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f.channels() == 4 && f.width() == 2));
    assert_eq!(frames[0].get(0, 0, 0), 0);
    assert_eq!(frames[1].get(0, 0, 0), 255);
}
