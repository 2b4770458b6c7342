use crate::audio::cue::AudioTrigger;
use crate::foundation::core::Canvas;
use crate::foundation::error::ScanlensResult;
use crate::render::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of one act tick.
pub enum ActStatus {
    /// The act wants more ticks.
    Running,
    /// The act's completion condition fired; the sequencer should advance.
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Finale sub-step.
pub enum FinaleStep {
    /// Year reveal.
    Reveal,
    /// Database search with the display name.
    Search,
    /// The celebration itself.
    Boom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
/// Observable outputs of the sequence, beyond rendered frames.
///
/// The external UI layer consumes these to drive everything the engine
/// deliberately does not render: terminal text, popup chrome, confetti.
pub enum SequenceEvent {
    /// A new act was mounted.
    ActStarted {
        /// Act identifier.
        id: String,
    },
    /// The boot typewriter text changed.
    BootText {
        /// Full text typed so far.
        text: String,
    },
    /// The purge act moved to a new step.
    PurgeStep {
        /// Step index.
        index: usize,
        /// Step text (post-glitch).
        text: String,
    },
    /// A progress counter changed.
    Progress {
        /// Owning act identifier.
        act: String,
        /// Progress in percent.
        percent: u8,
    },
    /// The download act switched titles.
    DownloadTitle {
        /// New title.
        title: String,
    },
    /// The install act spawned a popup.
    PopupSpawned {
        /// Popup text.
        text: String,
        /// Horizontal offset from center, in percent of the surface.
        x_pct: f64,
        /// Vertical offset from center, in percent of the surface.
        y_pct: f64,
    },
    /// The finale moved to a new step.
    FinaleStep {
        /// New step.
        step: FinaleStep,
    },
    /// A search log line appeared.
    SearchLine {
        /// Log line content.
        line: String,
    },
    /// Confetti should fire.
    ConfettiBurst,
}

/// Everything an act may touch while mounted.
///
/// There is no shared mutable state between acts beyond what flows through
/// this context; the only cross-act datum, the active index, belongs to the
/// sequencer alone.
pub struct ActCtx<'a> {
    /// Current surface dimensions.
    pub canvas: Canvas,
    /// Audio trigger for cue playback.
    pub audio: &'a mut AudioTrigger,
    /// Render stage for frame output.
    pub stage: &'a mut dyn Stage,
    /// Event buffer drained by the host after every tick.
    pub events: &'a mut Vec<SequenceEvent>,
}

/// One self-contained timed phase of the sequence.
///
/// `mount` resets all per-mount state, so a replayed act starts from scratch.
/// `tick` is a pure function of the sampled time relative to the first tick
/// after mount. `unmount` must release everything the act started — it runs on
/// every exit path, including an operator skip.
pub trait Act {
    /// Stable act identifier.
    fn id(&self) -> &'static str;
    /// Reset per-mount state and stage the initial scene.
    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> ScanlensResult<()>;
    /// Advance internal timers to `now`, render, and report status.
    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> ScanlensResult<ActStatus>;
    /// Tear down everything this act started.
    fn unmount(&mut self, ctx: &mut ActCtx<'_>);
}
