use super::*;
use crate::audio::cue::AudioTrigger;
use crate::foundation::core::Canvas;
use crate::render::stage::{SceneSpec, Stage};
use std::cell::RefCell;
use std::rc::Rc;

struct NoopStage;

impl Stage for NoopStage {
    fn configure(&mut self, _spec: &SceneSpec) -> crate::ScanlensResult<()> {
        Ok(())
    }
    fn render(&mut self, _now: f64) -> crate::ScanlensResult<()> {
        Ok(())
    }
    fn clear(&mut self) -> crate::ScanlensResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct ActLog {
    mounts: Vec<&'static str>,
    unmounts: Vec<&'static str>,
}

struct CountingAct {
    id: &'static str,
    ticks_to_complete: u32,
    ticks: u32,
    log: Rc<RefCell<ActLog>>,
}

impl CountingAct {
    fn boxed(
        id: &'static str,
        ticks_to_complete: u32,
        log: Rc<RefCell<ActLog>>,
    ) -> Box<dyn Act> {
        Box::new(Self {
            id,
            ticks_to_complete,
            ticks: 0,
            log,
        })
    }
}

impl Act for CountingAct {
    fn id(&self) -> &'static str {
        self.id
    }

    fn mount(&mut self, _ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.ticks = 0;
        self.log.borrow_mut().mounts.push(self.id);
        Ok(())
    }

    fn tick(&mut self, _ctx: &mut ActCtx<'_>, _now: f64) -> crate::ScanlensResult<ActStatus> {
        self.ticks += 1;
        if self.ticks >= self.ticks_to_complete {
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, _ctx: &mut ActCtx<'_>) {
        self.log.borrow_mut().unmounts.push(self.id);
    }
}

fn ctx_parts() -> (AudioTrigger, NoopStage, Vec<SequenceEvent>) {
    (AudioTrigger::disabled(), NoopStage, Vec::new())
}

fn canvas() -> Canvas {
    Canvas {
        width: 320,
        height: 200,
    }
}

#[test]
fn rejects_empty_sequence() {
    assert!(ActSequencer::new(Vec::new()).is_err());
}

#[test]
fn first_tick_mounts_act_zero() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 10, log.clone()),
        CountingAct::boxed("b", 10, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    assert_eq!(seq.current_index(), 0);
    seq.tick(&mut ctx, 0.0).unwrap();
    assert_eq!(log.borrow().mounts, vec!["a"]);
    assert!(events
        .iter()
        .any(|e| matches!(e, SequenceEvent::ActStarted { id } if id == "a")));
}

#[test]
fn completion_advances_exactly_one_act() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 2, log.clone()),
        CountingAct::boxed("b", 2, log.clone()),
        CountingAct::boxed("c", 2, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    seq.tick(&mut ctx, 0.0).unwrap();
    assert_eq!(seq.current_index(), 0);
    seq.tick(&mut ctx, 0.1).unwrap();
    assert_eq!(seq.current_index(), 1);
    assert_eq!(log.borrow().mounts, vec!["a", "b"]);
    assert_eq!(log.borrow().unmounts, vec!["a"]);
}

#[test]
fn unmount_precedes_next_mount() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 1, log.clone()),
        CountingAct::boxed("b", 1, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    seq.tick(&mut ctx, 0.0).unwrap();
    let log = log.borrow();
    assert_eq!(log.mounts, vec!["a", "b"]);
    assert_eq!(log.unmounts, vec!["a"]);
}

#[test]
fn stale_token_does_not_re_advance() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 1, log.clone()),
        CountingAct::boxed("b", 100, log.clone()),
        CountingAct::boxed("c", 100, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    // Act a completes on its first tick and the sequencer moves to b.
    seq.tick(&mut ctx, 0.0).unwrap();
    seq.tick(&mut ctx, 0.1).unwrap();
    assert_eq!(seq.current_index(), 1);

    // b's token advances once...
    let token = seq.token();
    assert!(seq.advance(token, &mut ctx).unwrap());
    assert_eq!(seq.current_index(), 2);
    // ...and firing the same completion again is a guarded no-op.
    assert!(!seq.advance(token, &mut ctx).unwrap());
    assert_eq!(seq.current_index(), 2);
}

#[test]
fn advance_from_last_act_wraps_to_first() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 1, log.clone()),
        CountingAct::boxed("b", 1, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    seq.tick(&mut ctx, 0.0).unwrap(); // a completes -> b
    seq.tick(&mut ctx, 0.1).unwrap(); // b completes -> wraps to a
    assert_eq!(seq.current_index(), 0);
    assert_eq!(log.borrow().mounts, vec!["a", "b", "a"]);
}

#[test]
fn reset_replays_from_act_zero() {
    let log = Rc::new(RefCell::new(ActLog::default()));
    let mut seq = ActSequencer::new(vec![
        CountingAct::boxed("a", 1, log.clone()),
        CountingAct::boxed("b", 100, log.clone()),
    ])
    .unwrap();

    let (mut audio, mut stage, mut events) = ctx_parts();
    let mut ctx = ActCtx {
        canvas: canvas(),
        audio: &mut audio,
        stage: &mut stage,
        events: &mut events,
    };

    seq.tick(&mut ctx, 0.0).unwrap();
    assert_eq!(seq.current_index(), 1);

    let pre_reset = seq.token();
    seq.reset(&mut ctx).unwrap();
    assert_eq!(seq.current_index(), 0);
    assert_eq!(seq.current_id(), "a");
    // Tokens from before the reset are dead.
    assert!(!seq.advance(pre_reset, &mut ctx).unwrap());
    assert_eq!(seq.current_index(), 0);
}
