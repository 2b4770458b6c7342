use crate::foundation::error::{ScanlensError, ScanlensResult};

pub use kurbo::{Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output pixel dimensions of a frame.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Validate canvas invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ScanlensError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Canvas center point.
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Half of the canvas diagonal, the largest useful lens radius.
    pub fn half_diagonal(&self) -> f64 {
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        (cx * cx + cy * cy).sqrt()
    }
}

/// A width x height grid of premultiplied RGBA8 pixels, row-major.
///
/// This is the unit of exchange for the whole pipeline: the text rasterizer
/// fills one, the lens warp maps one into another, sinks consume one per frame.
/// The `data.len() == width * height * 4` invariant is maintained by every
/// constructor and mutator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Allocate a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap an existing pixel buffer, validating its length.
    pub fn from_parts(width: u32, height: u32, data: Vec<u8>) -> ScanlensResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ScanlensError::raster("raster byte size overflow"))?;
        if data.len() != expected {
            return Err(ScanlensError::raster(format!(
                "raster buffer length {} does not match {}x{} rgba8",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow pixel bytes (premultiplied RGBA8, row-major).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reallocate for new dimensions if they changed, clearing to transparent.
    ///
    /// A raster that went through `resize` never retains stale dimensions: the
    /// buffer is re-derived from the requested size every call.
    pub fn resize(&mut self, width: u32, height: u32) {
        let len = (width as usize) * (height as usize) * 4;
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.data.clear();
            self.data.resize(len, 0);
        } else {
            self.data.fill(0);
        }
    }

    /// Read one pixel. Coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Write one pixel. Coordinates must be in range.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Canvas dimensions of this raster.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Distortion shape of the lens.
///
/// `intensity == 1` is the identity mapping; values above 1 bulge pixels
/// outward from the focus (the sampling point is pulled toward the focus, so
/// the area near it appears magnified). The exponent convention is outward
/// bulge and is covered by tests; it must not be inverted.
pub struct LensParams {
    /// Lens radius in pixels. Must be finite and > 0.
    pub radius: f64,
    /// Power-law exponent. Must be finite and >= 1.
    pub intensity: f64,
}

impl LensParams {
    /// Build validated lens parameters.
    pub fn new(radius: f64, intensity: f64) -> ScanlensResult<Self> {
        let p = Self { radius, intensity };
        p.validate()?;
        Ok(p)
    }

    /// Validate lens parameter invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ScanlensError::validation(
                "lens radius must be finite and > 0",
            ));
        }
        if !self.intensity.is_finite() || self.intensity < 1.0 {
            return Err(ScanlensError::validation(
                "lens intensity must be finite and >= 1",
            ));
        }
        Ok(())
    }

    /// Coerce arbitrary floats into the valid parameter domain.
    ///
    /// Non-finite or non-positive radii fall back to 1 px; non-finite
    /// intensities fall back to the identity exponent.
    pub fn clamped(radius: f64, intensity: f64) -> Self {
        let radius = if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            1.0
        };
        let intensity = if intensity.is_finite() {
            intensity.max(1.0)
        } else {
            1.0
        };
        Self { radius, intensity }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
