use crate::foundation::error::{ScanlensError, ScanlensResult};
use crate::sequence::act::{Act, ActCtx, ActStatus, SequenceEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Proof of which mount a completion signal belongs to.
///
/// Tokens are minted when an act mounts and die when it unmounts; an
/// `advance` carrying a token from an earlier mount is ignored. This is what
/// keeps a timer that outlived its act from double-advancing the sequence.
pub struct MountToken {
    generation: u64,
}

/// Orchestrates the ordered act list: exactly one act mounted at a time,
/// strictly forward transitions, wrap-around replay after the last act.
///
/// The active index is mutated only here. Mounting the next act happens only
/// after the previous act's `unmount` returned.
pub struct ActSequencer {
    acts: Vec<Box<dyn Act>>,
    index: usize,
    generation: u64,
    mounted: bool,
}

impl ActSequencer {
    /// Create a sequencer over a non-empty act list.
    pub fn new(acts: Vec<Box<dyn Act>>) -> ScanlensResult<Self> {
        if acts.is_empty() {
            return Err(ScanlensError::validation("sequence needs at least one act"));
        }
        Ok(Self {
            acts,
            index: 0,
            generation: 0,
            mounted: false,
        })
    }

    /// Number of acts.
    pub fn len(&self) -> usize {
        self.acts.len()
    }

    /// Always false; the constructor rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    /// Index of the active act.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Identifier of the active act.
    pub fn current_id(&self) -> &'static str {
        self.acts[self.index].id()
    }

    /// Token for the current mount.
    pub fn token(&self) -> MountToken {
        MountToken {
            generation: self.generation,
        }
    }

    /// Tick the active act, advancing to the next act if it completed.
    pub fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> ScanlensResult<()> {
        if !self.mounted {
            self.mount_current(ctx)?;
        }
        let status = self.acts[self.index].tick(ctx, now)?;
        if status == ActStatus::Complete {
            let token = self.token();
            self.advance(token, ctx)?;
        }
        Ok(())
    }

    /// Advance past the act identified by `token`.
    ///
    /// Returns `false` (and does nothing) when the token is stale — the act it
    /// belonged to has already been advanced past or torn down.
    pub fn advance(&mut self, token: MountToken, ctx: &mut ActCtx<'_>) -> ScanlensResult<bool> {
        if token.generation != self.generation {
            tracing::debug!(
                token = token.generation,
                current = self.generation,
                "ignoring stale act completion"
            );
            return Ok(false);
        }
        self.unmount_current(ctx);
        self.index = (self.index + 1) % self.acts.len();
        self.mount_current(ctx)?;
        Ok(true)
    }

    /// Tear down the active act and restart from act 0 (replay).
    pub fn reset(&mut self, ctx: &mut ActCtx<'_>) -> ScanlensResult<()> {
        self.unmount_current(ctx);
        self.index = 0;
        self.mount_current(ctx)
    }

    fn mount_current(&mut self, ctx: &mut ActCtx<'_>) -> ScanlensResult<()> {
        ctx.events.push(SequenceEvent::ActStarted {
            id: self.acts[self.index].id().to_owned(),
        });
        self.acts[self.index].mount(ctx)?;
        self.mounted = true;
        Ok(())
    }

    fn unmount_current(&mut self, ctx: &mut ActCtx<'_>) {
        if self.mounted {
            self.acts[self.index].unmount(ctx);
            self.mounted = false;
        }
        // A new generation invalidates every token minted for the old mount.
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
