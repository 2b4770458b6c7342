use crate::foundation::core::{LensParams, Point, Raster};
use crate::foundation::error::ScanlensResult;

/// Inverse-mapped radial lens distortion.
///
/// Every destination pixel inside the lens samples the source at a distance
/// remapped by `normalized.powf(intensity)`; with `intensity > 1` the sampling
/// point is pulled toward the focus, so the neighborhood of the focus appears
/// magnified (outward bulge). Pixels at or beyond the lens radius are copied
/// unchanged, which bounds the per-frame cost to the lens bounding box rather
/// than the whole raster.
///
/// Source samples that land outside the raster produce transparent black
/// instead of clamping; clamping smears edge pixels into streaks.
pub fn warp_into(
    src: &Raster,
    dst: &mut Raster,
    focus: Point,
    params: &LensParams,
) -> ScanlensResult<()> {
    params.validate()?;
    dst.resize(src.width(), src.height());
    dst.data_mut().copy_from_slice(src.data());

    // Identity exponent: the copy above already is the answer.
    if params.intensity == 1.0 {
        return Ok(());
    }
    if !focus.x.is_finite() || !focus.y.is_finite() {
        return Ok(());
    }

    let w = i64::from(src.width());
    let h = i64::from(src.height());
    let r = params.radius;

    let x0 = ((focus.x - r).floor() as i64).clamp(0, w);
    let x1 = (((focus.x + r).ceil() as i64) + 1).clamp(0, w);
    let y0 = ((focus.y - r).floor() as i64).clamp(0, h);
    let y1 = (((focus.y + r).ceil() as i64) + 1).clamp(0, h);

    let src_data = src.data();
    let dst_data = dst.data_mut();
    let r2 = r * r;

    for y in y0..y1 {
        let dy = y as f64 - focus.y;
        for x in x0..x1 {
            let dx = x as f64 - focus.x;
            let dist2 = dx * dx + dy * dy;
            if dist2 >= r2 {
                continue;
            }

            let dist = dist2.sqrt();
            let (sx, sy) = if dist == 0.0 {
                (focus.x.round() as i64, focus.y.round() as i64)
            } else {
                let distorted = (dist / r).powf(params.intensity) * r;
                let scale = distorted / dist;
                (
                    (focus.x + dx * scale).round() as i64,
                    (focus.y + dy * scale).round() as i64,
                )
            };

            let out_idx = ((y * w + x) as usize) * 4;
            if sx < 0 || sy < 0 || sx >= w || sy >= h {
                dst_data[out_idx..out_idx + 4].fill(0);
            } else {
                let src_idx = ((sy * w + sx) as usize) * 4;
                dst_data[out_idx..out_idx + 4].copy_from_slice(&src_data[src_idx..src_idx + 4]);
            }
        }
    }

    Ok(())
}

/// Allocating convenience wrapper around [`warp_into`].
pub fn warped(src: &Raster, focus: Point, params: &LensParams) -> ScanlensResult<Raster> {
    let mut dst = Raster::new(src.width(), src.height());
    warp_into(src, &mut dst, focus, params)?;
    Ok(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/lens/warp.rs"]
mod tests;
