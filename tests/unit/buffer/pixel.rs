use super::*;

fn rgb_2x2() -> PixelBuffer {
    PixelBuffer::from_raw(
        2,
        2,
        3,
        vec![
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ],
    )
    .unwrap()
}

#[test]
fn from_raw_enforces_length_and_channels() {
    assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 11]).is_err());
    assert!(PixelBuffer::from_raw(2, 2, 2, vec![0; 8]).is_err());
    assert!(PixelBuffer::from_raw(2, 2, 4, vec![0; 16]).is_ok());
}

#[test]
fn get_reads_row_major_and_tolerates_out_of_range() {
    let buf = rgb_2x2();
    assert_eq!(buf.get(1, 0, 2), 6);
    assert_eq!(buf.get(0, 1, 0), 7);
    assert_eq!(buf.get(2, 0, 0), 0);
    assert_eq!(buf.get(0, 2, 0), 0);
    assert_eq!(buf.get(0, 0, 3), 0);
}

#[test]
fn try_get_reports_out_of_range() {
    let buf = rgb_2x2();
    assert_eq!(buf.try_get(1, 1, 1).unwrap(), 11);
    assert!(matches!(
        buf.try_get(2, 0, 0),
        Err(PixbleedError::OutOfRange(_))
    ));
    assert!(matches!(
        buf.try_get(0, 0, 3),
        Err(PixbleedError::OutOfRange(_))
    ));
}

#[test]
fn set_drops_writes_past_the_boundary() {
    let mut buf = rgb_2x2();
    let before = buf.clone();
    buf.set(3, 0, 0, 99);
    buf.set(0, 3, 0, 99);
    buf.set(2, 1, 0, 99);
    buf.set(0, 2, 0, 99);
    buf.set(0, 0, 5, 99);
    assert_eq!(buf, before);
}

#[test]
fn set_on_boundary_column_spills_into_next_row() {
    let mut buf = rgb_2x2();
    buf.set(2, 0, 0, 99);
    assert_eq!(buf.get(0, 1, 0), 99);
}

#[test]
fn brightness_is_integer_mean_of_rgb() {
    let buf = PixelBuffer::filled(1, 1, &[10, 20, 31]).unwrap();
    assert_eq!(buf.brightness(0, 0), 20);
}

#[test]
fn transparent_pixels_report_full_brightness() {
    let clear = PixelBuffer::filled(1, 1, &[0, 0, 0, 0]).unwrap();
    assert_eq!(clear.brightness(0, 0), 255);
    let opaque = PixelBuffer::filled(1, 1, &[0, 0, 0, 1]).unwrap();
    assert_eq!(opaque.brightness(0, 0), 0);
}

#[test]
fn restore_from_copies_pixels() {
    let original = rgb_2x2();
    let mut working = original.clone();
    working.set(0, 0, 0, 200);
    working.restore_from(&original);
    assert_eq!(working, original);

    let mut other = PixelBuffer::filled(1, 1, &[0, 0, 0, 0]).unwrap();
    other.restore_from(&original);
    assert_eq!(other, original);
}
