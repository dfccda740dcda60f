use crate::{
    buffer::pixel::PixelBuffer,
    effects::params::{AxisMode, EffectParameters, TransferMode},
};

/// Moves one `block_size x block_size` block of pixels by a triggered distance.
///
/// Reads and writes go straight to the live buffer: a block sees every displacement already
/// applied earlier in the same pass.
pub struct BlockTransform;

impl BlockTransform {
    /// Displace the block whose origin is `(x, y)` by `distance`.
    ///
    /// With `wrap` the displaced origin is folded back into the image; the block's remaining
    /// pixels are not, so blocks may still be clipped at the right/bottom edge. Pixel pairs with
    /// either end outside the image are skipped.
    pub fn apply(buf: &mut PixelBuffer, x: u32, y: u32, distance: u32, params: &EffectParameters) {
        let (w, h) = (u64::from(buf.width()), u64::from(buf.height()));
        if w == 0 || h == 0 {
            return;
        }
        let (x, y) = (u64::from(x), u64::from(y));
        let mut tx = x + u64::from(distance);
        let mut ty = y + u64::from(distance);
        if params.wrap {
            tx %= w;
            ty %= h;
        }

        let size = u64::from(params.block_size);
        for i in 0..size {
            for j in 0..size {
                let (dx, dy) = match params.axis_mode {
                    AxisMode::X => (tx + i, y + j),
                    AxisMode::Y => (x + i, ty + j),
                    AxisMode::Both => (tx + i, ty + j),
                };
                let Some(src) = point_in(buf, x + i, y + j) else {
                    continue;
                };
                let Some(dst) = point_in(buf, dx, dy) else {
                    continue;
                };
                match params.transfer_mode {
                    TransferMode::Copy => copy_pixel(buf, src, dst),
                    TransferMode::Swap => swap_pixel(buf, src, dst),
                }
            }
        }
    }
}

fn point_in(buf: &PixelBuffer, x: u64, y: u64) -> Option<(u32, u32)> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    buf.in_bounds(x, y).then_some((x, y))
}

fn copy_pixel(buf: &mut PixelBuffer, (sx, sy): (u32, u32), (dx, dy): (u32, u32)) {
    for c in 0..buf.channels() {
        let v = buf.get(sx, sy, c);
        buf.set(dx, dy, c, v);
    }
}

fn swap_pixel(buf: &mut PixelBuffer, (ax, ay): (u32, u32), (bx, by): (u32, u32)) {
    for c in 0..buf.channels() {
        let tmp = buf.get(ax, ay, c);
        let other = buf.get(bx, by, c);
        buf.set(ax, ay, c, other);
        buf.set(bx, by, c, tmp);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/block.rs"]
mod tests;
