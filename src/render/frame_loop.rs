use std::sync::Arc;

use crate::foundation::core::{Canvas, LensParams, Raster};
use crate::foundation::error::{ScanlensError, ScanlensResult};
use crate::lens::warp::warp_into;
use crate::raster::text::{TextLine, TextRasterizer, TextStyle};
use crate::render::sink::{FrameSink, SinkConfig};
use crate::render::stage::{DriverSpec, LensRadius, SceneSpec, Stage};
use crate::scan::driver::{CenterDriver, FocusDriver, SineDriver};
use crate::scan::path::ScanPathController;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Display surface size as reported by the host's resize signal.
pub struct SurfaceSize {
    /// Logical width in points.
    pub width: f64,
    /// Logical height in points.
    pub height: f64,
    /// Device pixel ratio.
    pub scale: f64,
}

impl SurfaceSize {
    /// Build a validated surface size.
    pub fn new(width: f64, height: f64, scale: f64) -> ScanlensResult<Self> {
        let s = Self {
            width,
            height,
            scale,
        };
        s.validate()?;
        Ok(s)
    }

    /// Validate surface invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("scale", self.scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScanlensError::validation(format!(
                    "surface {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Physical pixel dimensions for this surface.
    pub fn to_canvas(&self) -> Canvas {
        Canvas {
            width: (self.width * self.scale).round().max(1.0) as u32,
            height: (self.height * self.scale).round().max(1.0) as u32,
        }
    }
}

/// Per-frame render driver: resize check, conditional text re-rasterization,
/// focus sampling, lens warp, presentation.
///
/// Raster buffers are re-derived from the current surface size on every frame,
/// so a stale-size buffer cannot survive a resize. The text raster is rebuilt
/// only when the scene text/style or the surface changed; lens motion alone
/// reuses the cached raster.
///
/// A rasterization failure stops the loop and leaves the previously presented
/// frame in place; it is reported through `tracing`, never as a panic or a
/// sequencer-visible error.
pub struct FrameLoop {
    rasterizer: TextRasterizer,
    font: Arc<Vec<u8>>,
    size: SurfaceSize,
    sink: Box<dyn FrameSink>,

    spec: Option<SceneSpec>,
    scene_dirty: bool,
    driver: Option<Box<dyn FocusDriver>>,

    source: Raster,
    dest: Raster,
    lines: Vec<TextLine>,

    began: bool,
    frame_index: u64,
    running: bool,
}

impl FrameLoop {
    /// Create a loop rendering to `sink` at the given initial surface size.
    pub fn new(
        font: Arc<Vec<u8>>,
        size: SurfaceSize,
        sink: Box<dyn FrameSink>,
    ) -> ScanlensResult<Self> {
        size.validate()?;
        Ok(Self {
            rasterizer: TextRasterizer::new(),
            font,
            size,
            sink,
            spec: None,
            scene_dirty: true,
            driver: None,
            source: Raster::new(0, 0),
            dest: Raster::new(0, 0),
            lines: Vec::new(),
            began: false,
            frame_index: 0,
            running: true,
        })
    }

    /// Apply a host resize signal; affected buffers are rebuilt before the
    /// next warp.
    pub fn resize(&mut self, size: SurfaceSize) -> ScanlensResult<()> {
        size.validate()?;
        self.size = size;
        Ok(())
    }

    /// Whether the loop still accepts render ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frame_index
    }

    /// Measured lines of the currently cached scene raster.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Permanently stop the loop and finalize the sink.
    pub fn finish(&mut self) -> ScanlensResult<()> {
        if self.running {
            self.running = false;
            if self.began {
                self.sink.end()?;
            }
        }
        Ok(())
    }

    fn build_driver(spec: &DriverSpec) -> ScanlensResult<Box<dyn FocusDriver>> {
        Ok(match spec {
            DriverSpec::Center => Box::new(CenterDriver),
            DriverSpec::Sine => Box::new(SineDriver),
            DriverSpec::ScanLines {
                scan_secs,
                jump_secs,
            } => Box::new(ScanPathController::new(*scan_secs, *jump_secs)?),
        })
    }

    fn text_style(&self, spec: &SceneSpec) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            size_px: spec.text.size_px,
            color: spec.text.color,
            line_spacing: spec.text.line_spacing,
            glow: spec.text.glow,
        }
    }
}

impl Stage for FrameLoop {
    fn configure(&mut self, spec: &SceneSpec) -> ScanlensResult<()> {
        if self.spec.as_ref() == Some(spec) {
            return Ok(());
        }

        let text_changed = self
            .spec
            .as_ref()
            .is_none_or(|cur| cur.text != spec.text);
        let driver_changed = self
            .spec
            .as_ref()
            .is_none_or(|cur| cur.lens.map(|l| l.driver) != spec.lens.map(|l| l.driver));

        if driver_changed {
            self.driver = match &spec.lens {
                Some(lens) => Some(Self::build_driver(&lens.driver)?),
                None => None,
            };
        }
        if text_changed {
            self.scene_dirty = true;
        }
        self.spec = Some(spec.clone());
        Ok(())
    }

    fn render(&mut self, now: f64) -> ScanlensResult<()> {
        if !self.running {
            return Ok(());
        }
        let Some(spec) = self.spec.clone() else {
            return Ok(());
        };

        let canvas = self.size.to_canvas();
        if self.scene_dirty || self.source.canvas() != canvas {
            let style = self.text_style(&spec);
            match self.rasterizer.rasterize(&spec.text.content, &style, canvas) {
                Ok((raster, lines)) => {
                    self.source = raster;
                    self.lines = lines;
                    self.scene_dirty = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "scene rasterization failed; stopping frame loop");
                    self.running = false;
                    return Ok(());
                }
            }
        }

        let frame = match &spec.lens {
            None => &self.source,
            Some(lens) => {
                let radius = match lens.radius {
                    LensRadius::Px(px) => px,
                    LensRadius::HalfDiagonal => canvas.half_diagonal(),
                };
                let params = LensParams::clamped(radius, lens.intensity);
                let focus = match self.driver.as_mut() {
                    Some(d) => d.focus(now, canvas, &self.lines),
                    None => canvas.center(),
                };
                warp_into(&self.source, &mut self.dest, focus, &params)?;
                &self.dest
            }
        };

        if !self.began {
            self.sink.begin(SinkConfig {
                width: canvas.width,
                height: canvas.height,
            })?;
            self.began = true;
        }
        if let Err(e) = self.sink.push_frame(self.frame_index, frame) {
            tracing::warn!(error = %e, "frame sink rejected frame");
        }
        self.frame_index += 1;
        Ok(())
    }

    fn clear(&mut self) -> ScanlensResult<()> {
        self.spec = None;
        self.driver = None;
        self.lines.clear();
        self.scene_dirty = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame_loop.rs"]
mod tests;
