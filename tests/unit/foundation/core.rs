use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30000, 1001).unwrap().as_f64(), 30000.0 / 1001.0);
}

#[test]
fn frame_index_orders_numerically() {
    assert!(FrameIndex(2) < FrameIndex(10));
}
