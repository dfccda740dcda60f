use super::*;

/// 3x3 single-channel-like RGB image where every pixel holds its own index in all channels.
fn indexed(w: u32, h: u32) -> PixelBuffer {
    let mut px = Vec::new();
    for i in 0..(w * h) {
        px.extend_from_slice(&[i as u8, i as u8, i as u8]);
    }
    PixelBuffer::from_raw(w, h, 3, px).unwrap()
}

fn params(axis: AxisMode, mode: TransferMode, wrap: bool, block_size: u32) -> EffectParameters {
    EffectParameters {
        max_offset: 4,
        axis_mode: axis,
        transfer_mode: mode,
        wrap,
        block_size,
        ..EffectParameters::default()
    }
}

#[test]
fn copy_x_moves_horizontally_only() {
    let mut buf = indexed(3, 3);
    BlockTransform::apply(&mut buf, 0, 1, 2, &params(AxisMode::X, TransferMode::Copy, false, 1));
    assert_eq!(buf.get(2, 1, 0), 3);
    assert_eq!(buf.get(0, 1, 0), 3);
    assert_eq!(buf.get(2, 2, 0), 8);
}

#[test]
fn copy_y_moves_vertically_only() {
    let mut buf = indexed(3, 3);
    BlockTransform::apply(&mut buf, 1, 0, 2, &params(AxisMode::Y, TransferMode::Copy, false, 1));
    assert_eq!(buf.get(1, 2, 0), 1);
    assert_eq!(buf.get(2, 2, 0), 8);
}

#[test]
fn copy_both_moves_diagonally() {
    let mut buf = indexed(3, 3);
    BlockTransform::apply(&mut buf, 0, 0, 1, &params(AxisMode::Both, TransferMode::Copy, false, 1));
    assert_eq!(buf.get(1, 1, 0), 0);
    assert_eq!(buf.get(1, 0, 0), 1);
    assert_eq!(buf.get(0, 1, 0), 3);
}

#[test]
fn swap_exchanges_and_is_an_involution() {
    let original = indexed(3, 3);
    let p = params(AxisMode::X, TransferMode::Swap, false, 1);

    let mut buf = original.clone();
    BlockTransform::apply(&mut buf, 0, 0, 2, &p);
    assert_eq!(buf.get(0, 0, 0), 2);
    assert_eq!(buf.get(2, 0, 0), 0);

    BlockTransform::apply(&mut buf, 0, 0, 2, &p);
    assert_eq!(buf, original);
}

#[test]
fn unwrapped_destinations_past_the_edge_are_dropped() {
    let original = indexed(3, 3);
    let mut buf = original.clone();
    BlockTransform::apply(&mut buf, 2, 2, 3, &params(AxisMode::Both, TransferMode::Copy, false, 1));
    assert_eq!(buf, original);

    // Swap must not touch the source when the destination is outside.
    BlockTransform::apply(&mut buf, 2, 0, 1, &params(AxisMode::X, TransferMode::Swap, false, 1));
    assert_eq!(buf, original);
}

#[test]
fn wrap_folds_the_destination_origin() {
    let mut buf = indexed(3, 3);
    BlockTransform::apply(&mut buf, 2, 0, 2, &params(AxisMode::X, TransferMode::Copy, true, 1));
    // (2 + 2) % 3 == 1
    assert_eq!(buf.get(1, 0, 0), 2);
    assert_eq!(buf.get(0, 0, 0), 0);
}

#[test]
fn wrapped_block_is_still_clipped_at_the_edge() {
    let mut buf = indexed(3, 3);
    // Origin (0,0), block 2x2, distance 2 -> tx = 2: column 2 receives column 0, column 3 is off-image.
    BlockTransform::apply(&mut buf, 0, 0, 2, &params(AxisMode::X, TransferMode::Copy, true, 2));
    assert_eq!(buf.get(2, 0, 0), 0);
    assert_eq!(buf.get(2, 1, 0), 3);
    assert_eq!(buf.get(1, 0, 0), 1);
    assert_eq!(buf.get(2, 2, 0), 8);
}

#[test]
fn block_reads_its_own_earlier_writes() {
    // 4x1 row, block of 2, distance 1: pixel 0 -> 1 first, then (already overwritten) pixel 1 -> 2.
    let mut buf = indexed(4, 1);
    BlockTransform::apply(&mut buf, 0, 0, 1, &params(AxisMode::X, TransferMode::Copy, false, 2));
    assert_eq!(
        buf.as_bytes(),
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3]
    );
}
