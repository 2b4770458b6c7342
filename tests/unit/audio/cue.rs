use super::*;
use std::cell::RefCell;
use std::rc::Rc;

struct RecordingSink {
    played: Rc<RefCell<Vec<AudioCue>>>,
    fail: bool,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, cue: AudioCue) -> ScanlensResult<()> {
        if self.fail {
            return Err(crate::foundation::error::ScanlensError::raster(
                "speaker on fire",
            ));
        }
        self.played.borrow_mut().push(cue);
        Ok(())
    }
}

#[test]
fn cue_names_are_stable() {
    assert_eq!(AudioCue::Boot.as_str(), "boot");
    assert_eq!(AudioCue::Type.as_str(), "type");
    assert_eq!(AudioCue::Error.as_str(), "error");
    assert_eq!(AudioCue::Success.as_str(), "success");
    assert_eq!(AudioCue::Explosion.as_str(), "explosion");
    assert_eq!(AudioCue::Whoosh.as_str(), "whoosh");
}

#[test]
fn sink_is_constructed_lazily_on_first_cue() {
    let played = Rc::new(RefCell::new(Vec::new()));
    let played_factory = played.clone();
    let constructed = Rc::new(RefCell::new(false));
    let constructed_factory = constructed.clone();

    let mut trigger = AudioTrigger::new(Box::new(move || {
        *constructed_factory.borrow_mut() = true;
        Ok(Box::new(RecordingSink {
            played: played_factory,
            fail: false,
        }) as Box<dyn AudioSink>)
    }));

    assert!(!trigger.is_initialized());
    assert!(!*constructed.borrow());

    trigger.play(AudioCue::Boot);
    assert!(trigger.is_initialized());
    assert!(*constructed.borrow());

    trigger.play(AudioCue::Type);
    assert_eq!(*played.borrow(), vec![AudioCue::Boot, AudioCue::Type]);
}

#[test]
fn factory_failure_disables_audio_without_erroring() {
    let mut trigger = AudioTrigger::new(Box::new(|| {
        Err(crate::foundation::error::ScanlensError::raster(
            "no audio device",
        ))
    }));
    trigger.play(AudioCue::Boot);
    trigger.play(AudioCue::Success);
    assert!(!trigger.is_initialized());
}

#[test]
fn playback_failure_is_swallowed() {
    let played = Rc::new(RefCell::new(Vec::new()));
    let mut trigger = AudioTrigger::with_sink(Box::new(RecordingSink {
        played: played.clone(),
        fail: true,
    }));
    trigger.play(AudioCue::Explosion);
    assert!(played.borrow().is_empty());
    // Still initialized; one bad cue does not tear the sink down.
    assert!(trigger.is_initialized());
}

#[test]
fn disabled_trigger_drops_everything() {
    let mut trigger = AudioTrigger::disabled();
    trigger.play(AudioCue::Whoosh);
    assert!(!trigger.is_initialized());
}

#[test]
fn null_audio_accepts_all_cues() {
    let mut sink = NullAudio;
    for cue in [
        AudioCue::Boot,
        AudioCue::Type,
        AudioCue::Error,
        AudioCue::Success,
        AudioCue::Explosion,
        AudioCue::Whoosh,
    ] {
        assert!(sink.play(cue).is_ok());
    }
}
