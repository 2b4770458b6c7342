use crate::foundation::core::{Canvas, Point};
use crate::raster::text::TextLine;

/// Per-frame source of the lens focus.
///
/// Drivers are sampled exactly once per rendered frame with the current time,
/// surface size, and the measured text lines of the active scene.
pub trait FocusDriver {
    /// Current focus in raster pixel coordinates.
    fn focus(&mut self, now: f64, canvas: Canvas, lines: &[TextLine]) -> Point;
}

/// Sinusoidal sweep across the text area; the free-roaming lens motion.
#[derive(Clone, Copy, Debug, Default)]
pub struct SineDriver;

impl FocusDriver for SineDriver {
    fn focus(&mut self, now: f64, canvas: Canvas, _lines: &[TextLine]) -> Point {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        Point::new(
            w / 2.0 + (now * 2.0).sin() * (w * 0.3),
            h / 2.0 + (now * 1.5).cos() * (h * 0.15),
        )
    }
}

/// Fixed canvas-center focus; the full-frame bulge used by step texts.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenterDriver;

impl FocusDriver for CenterDriver {
    fn focus(&mut self, _now: f64, canvas: Canvas, _lines: &[TextLine]) -> Point {
        canvas.center()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scan/driver.rs"]
mod tests;
