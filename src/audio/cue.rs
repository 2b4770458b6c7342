use crate::foundation::error::ScanlensResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Fixed set of audio cue names the sequence may trigger.
pub enum AudioCue {
    /// Deep rising boot drone.
    Boot,
    /// Keyboard click.
    Type,
    /// Harsh digital glitch.
    Error,
    /// Coin-style success arpeggio.
    Success,
    /// Bass explosion hit.
    Explosion,
    /// Sci-fi pass-by sweep.
    Whoosh,
}

impl AudioCue {
    /// Stable lowercase cue name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Type => "type",
            Self::Error => "error",
            Self::Success => "success",
            Self::Explosion => "explosion",
            Self::Whoosh => "whoosh",
        }
    }
}

/// External audio backend. Synthesis is entirely out of scope; the engine only
/// delivers cue names.
pub trait AudioSink {
    /// Play one cue. Failures are reported but never block the sequence.
    fn play(&mut self, cue: AudioCue) -> ScanlensResult<()>;
}

/// Audio sink that drops every cue.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) -> ScanlensResult<()> {
        Ok(())
    }
}

/// Factory deferred until the first cue actually fires.
pub type AudioFactory = Box<dyn FnOnce() -> ScanlensResult<Box<dyn AudioSink>>>;

/// Lazily-initialized audio trigger with an explicit lifecycle.
///
/// The underlying sink is created on the first cue and lives for the rest of
/// the session; it is never torn down mid-sequence. A factory or playback
/// failure downgrades the trigger to a logged no-op — the visual sequence
/// keeps progressing regardless.
pub struct AudioTrigger {
    factory: Option<AudioFactory>,
    sink: Option<Box<dyn AudioSink>>,
    disabled: bool,
}

impl AudioTrigger {
    /// Trigger that constructs its sink from `factory` on first use.
    pub fn new(factory: AudioFactory) -> Self {
        Self {
            factory: Some(factory),
            sink: None,
            disabled: false,
        }
    }

    /// Trigger around an already-constructed sink.
    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self {
            factory: None,
            sink: Some(sink),
            disabled: false,
        }
    }

    /// Trigger that silently drops every cue.
    pub fn disabled() -> Self {
        Self {
            factory: None,
            sink: None,
            disabled: true,
        }
    }

    /// Whether a sink has been constructed yet.
    pub fn is_initialized(&self) -> bool {
        self.sink.is_some()
    }

    /// Fire one cue. Never fails and never blocks.
    pub fn play(&mut self, cue: AudioCue) {
        if self.disabled {
            return;
        }
        if self.sink.is_none() {
            match self.factory.take() {
                Some(factory) => match factory() {
                    Ok(sink) => self.sink = Some(sink),
                    Err(e) => {
                        tracing::warn!(error = %e, "audio sink construction failed; audio disabled");
                        self.disabled = true;
                        return;
                    }
                },
                None => {
                    self.disabled = true;
                    return;
                }
            }
        }
        if let Some(sink) = self.sink.as_mut()
            && let Err(e) = sink.play(cue)
        {
            tracing::warn!(cue = cue.as_str(), error = %e, "audio cue failed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
