use crate::animation::clock::{Clock, ManualClock};
use crate::audio::cue::AudioTrigger;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ScanlensError, ScanlensResult};
use crate::render::stage::Stage;
use crate::sequence::act::{ActCtx, SequenceEvent};
use crate::sequence::acts::build_acts;
use crate::sequence::model::SequenceConfig;
use crate::sequence::sequencer::ActSequencer;

/// Aggregate result of an offline run.
#[derive(Debug, Default)]
pub struct OfflineRun {
    /// Ticks executed (one per frame interval).
    pub ticks: u64,
    /// Every event the sequence emitted, in order.
    pub events: Vec<SequenceEvent>,
}

/// Owns the sequencer, stage, audio trigger, and event buffer for one session.
///
/// Interactive hosts call [`tick`](Self::tick) once per display refresh with
/// their clock's time; offline renders step a manual timeline through
/// [`run_offline`](Self::run_offline).
pub struct SequenceRunner {
    sequencer: ActSequencer,
    stage: Box<dyn Stage>,
    audio: AudioTrigger,
    canvas: Canvas,
    events: Vec<SequenceEvent>,
}

impl SequenceRunner {
    /// Build a runner for `config`, rendering through `stage`.
    pub fn new(
        config: &SequenceConfig,
        stage: Box<dyn Stage>,
        audio: AudioTrigger,
        canvas: Canvas,
    ) -> ScanlensResult<Self> {
        config.validate()?;
        canvas.validate()?;
        let sequencer = ActSequencer::new(build_acts(config))?;
        Ok(Self {
            sequencer,
            stage,
            audio,
            canvas,
            events: Vec::new(),
        })
    }

    /// Identifier of the active act.
    pub fn current_act(&self) -> &'static str {
        self.sequencer.current_id()
    }

    /// Index of the active act.
    pub fn current_index(&self) -> usize {
        self.sequencer.current_index()
    }

    /// Update the surface dimensions used by subsequent ticks.
    pub fn set_canvas(&mut self, canvas: Canvas) -> ScanlensResult<()> {
        canvas.validate()?;
        self.canvas = canvas;
        Ok(())
    }

    /// Advance the sequence to the clock's current time.
    ///
    /// Convenience for interactive hosts driving the runner from a
    /// [`SystemClock`](crate::SystemClock) on every display refresh.
    pub fn tick_now(&mut self, clock: &dyn Clock) -> ScanlensResult<Vec<SequenceEvent>> {
        self.tick(clock.now())
    }

    /// Advance the sequence to `now` and drain the events it produced.
    pub fn tick(&mut self, now: f64) -> ScanlensResult<Vec<SequenceEvent>> {
        let mut ctx = ActCtx {
            canvas: self.canvas,
            audio: &mut self.audio,
            stage: self.stage.as_mut(),
            events: &mut self.events,
        };
        self.sequencer.tick(&mut ctx, now)?;
        Ok(std::mem::take(&mut self.events))
    }

    /// Restart the sequence from the first act (replay).
    pub fn replay(&mut self) -> ScanlensResult<Vec<SequenceEvent>> {
        let mut ctx = ActCtx {
            canvas: self.canvas,
            audio: &mut self.audio,
            stage: self.stage.as_mut(),
            events: &mut self.events,
        };
        self.sequencer.reset(&mut ctx)?;
        Ok(std::mem::take(&mut self.events))
    }

    /// Step the sequence at a fixed frame rate for `duration_secs` of
    /// sequence time, collecting every event.
    ///
    /// Time is synthetic: tick `i` runs at `i / fps`, so the run is exactly
    /// reproducible and never sleeps.
    #[tracing::instrument(skip(self))]
    pub fn run_offline(&mut self, fps: f64, duration_secs: f64) -> ScanlensResult<OfflineRun> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ScanlensError::validation("fps must be finite and > 0"));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ScanlensError::validation(
                "duration_secs must be finite and > 0",
            ));
        }

        let frames = (duration_secs * fps).ceil() as u64;
        let clock = ManualClock::new();
        let mut run = OfflineRun::default();
        for i in 0..frames {
            clock.set(i as f64 / fps);
            let mut events = self.tick_now(&clock)?;
            run.events.append(&mut events);
            run.ticks += 1;
        }
        Ok(run)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/runner.rs"]
mod tests;
