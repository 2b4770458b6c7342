use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::error::{ScanlensError, ScanlensResult};

/// Separable Gaussian blur over premultiplied RGBA8 with a Q16 fixed-point
/// kernel.
///
/// Kernels are cached by `(radius, sigma)` and scratch buffers are reused, so
/// repeated glow passes at the same settings are allocation-free after warmup.
pub(crate) struct BlurEngine {
    kernels: HashMap<BlurKernelKey, Arc<Vec<u32>>>,
    scratch: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BlurKernelKey {
    radius_px: u32,
    sigma_bits: u32,
}

impl BlurEngine {
    pub(crate) fn new() -> Self {
        Self {
            kernels: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    /// Blur `src` into `dst`. Radius 0 is an identity copy.
    pub(crate) fn blur(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        width: u32,
        height: u32,
        radius_px: u32,
        sigma: f32,
    ) -> ScanlensResult<()> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ScanlensError::raster("blur buffer size overflow"))?;
        if src.len() != expected || dst.len() != expected {
            return Err(ScanlensError::raster(
                "blur expects buffers matching width*height*4",
            ));
        }
        if radius_px == 0 {
            dst.copy_from_slice(src);
            return Ok(());
        }

        let key = BlurKernelKey {
            radius_px,
            sigma_bits: sigma.to_bits(),
        };
        let kernel = match self.kernels.get(&key) {
            Some(k) => k.clone(),
            None => {
                let k = Arc::new(gaussian_kernel_q16(radius_px, sigma)?);
                self.kernels.insert(key, k.clone());
                k
            }
        };

        self.scratch.resize(expected, 0);
        horizontal_pass(src, &mut self.scratch, width, height, &kernel);
        vertical_pass(&self.scratch, dst, width, height, &kernel);
        Ok(())
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ScanlensResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ScanlensError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ScanlensError::raster("gaussian kernel sum is zero"));
    }

    // Quantize to Q16 and push the rounding remainder into the center tap so
    // the weights always sum to exactly 1.0.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
