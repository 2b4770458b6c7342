use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{ScanlensError, ScanlensResult};
use crate::foundation::math::{clamp01, lerp};
use crate::raster::text::TextLine;
use crate::scan::driver::FocusDriver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Current sub-state of the scanning motion.
pub enum ScanPhase {
    /// Sweeping across one line, start edge to end edge.
    Scan {
        /// Index of the line being swept.
        line: usize,
    },
    /// Fast transition from the end of one line to the start of the next.
    Jump {
        /// Line the lens is leaving.
        from: usize,
        /// Line the lens is heading to.
        to: usize,
    },
}

/// Moves the lens focus across text lines: sweep a line, jump to the next,
/// wrapping to the first line after the last (cyclic, until stopped).
///
/// The controller is a pure function of sampled time. Phase boundaries are
/// advanced by whole durations so long gaps between samples transition through
/// as many phases as elapsed without accumulating drift. With no lines it
/// holds the last known focus.
#[derive(Clone, Debug)]
pub struct ScanPathController {
    scan_secs: f64,
    jump_secs: f64,
    phase: ScanPhase,
    phase_start: Option<f64>,
    last_focus: Point,
    cycles: u64,
}

impl ScanPathController {
    /// Create a controller with the given phase durations in seconds.
    pub fn new(scan_secs: f64, jump_secs: f64) -> ScanlensResult<Self> {
        if !scan_secs.is_finite() || scan_secs <= 0.0 {
            return Err(ScanlensError::validation(
                "scan duration must be finite and > 0",
            ));
        }
        if !jump_secs.is_finite() || jump_secs <= 0.0 {
            return Err(ScanlensError::validation(
                "jump duration must be finite and > 0",
            ));
        }
        Ok(Self {
            scan_secs,
            jump_secs,
            phase: ScanPhase::Scan { line: 0 },
            phase_start: None,
            last_focus: Point::ZERO,
            cycles: 0,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Completed passes over the full line set.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sample the focus at `now` for the given lines.
    pub fn sample(&mut self, now: f64, lines: &[TextLine]) -> Point {
        if lines.is_empty() {
            return self.last_focus;
        }

        // A scene swap can shrink the line set under us; restart at line 0
        // rather than indexing a line that no longer exists.
        let n = lines.len();
        if self.max_index() >= n {
            self.phase = ScanPhase::Scan { line: 0 };
            self.phase_start = None;
        }

        let start = *self.phase_start.get_or_insert(now);
        let mut elapsed = (now - start).max(0.0);
        loop {
            let dur = self.phase_duration();
            if elapsed < dur {
                break;
            }
            elapsed -= dur;
            self.phase_start = Some(self.phase_start.unwrap_or(now) + dur);
            self.transition(n);
        }

        let t = clamp01(elapsed / self.phase_duration());
        let focus = match self.phase {
            ScanPhase::Scan { line } => {
                let l = &lines[line];
                let e = Ease::InOutQuad.apply(t);
                Point::new(lerp(l.start_x, l.end_x, e), l.y)
            }
            ScanPhase::Jump { from, to } => {
                let a = &lines[from];
                let b = &lines[to];
                let e = Ease::InOutQuart.apply(t);
                Point::new(lerp(a.end_x, b.start_x, e), lerp(a.y, b.y, e))
            }
        };
        self.last_focus = focus;
        focus
    }

    fn phase_duration(&self) -> f64 {
        match self.phase {
            ScanPhase::Scan { .. } => self.scan_secs,
            ScanPhase::Jump { .. } => self.jump_secs,
        }
    }

    fn max_index(&self) -> usize {
        match self.phase {
            ScanPhase::Scan { line } => line,
            ScanPhase::Jump { from, to } => from.max(to),
        }
    }

    fn transition(&mut self, line_count: usize) {
        self.phase = match self.phase {
            ScanPhase::Scan { line } => ScanPhase::Jump {
                from: line,
                to: (line + 1) % line_count,
            },
            ScanPhase::Jump { to, .. } => {
                if to == 0 {
                    self.cycles += 1;
                }
                ScanPhase::Scan { line: to }
            }
        };
    }
}

impl FocusDriver for ScanPathController {
    fn focus(&mut self, now: f64, _canvas: Canvas, lines: &[TextLine]) -> Point {
        self.sample(now, lines)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scan/path.rs"]
mod tests;
