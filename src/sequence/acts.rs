use crate::audio::cue::AudioCue;
use crate::foundation::math::Splitmix64;
use crate::raster::text::GlowStyle;
use crate::render::stage::{DriverSpec, LensRadius, LensSpec, SceneSpec, Stage as _, TextSpec};
use crate::sequence::act::{Act, ActCtx, ActStatus, FinaleStep, SequenceEvent};
use crate::sequence::model::{
    BootConfig, DownloadConfig, FinaleConfig, InstallConfig, PurgeConfig, ScanConfig,
    SequenceConfig,
};

const LINE_SPACING: f32 = 1.1;

const GLITCH_RATE: f64 = 0.08;
const GLITCH_CHARS: &[char] = &['▓', '▒', '░', '#', '%', '&', '$', '@', '!', '?'];

fn elapsed(start: &mut Option<f64>, now: f64) -> f64 {
    let s = *start.get_or_insert(now);
    (now - s).max(0.0)
}

/// Replace a fraction of visible characters with glitch glyphs.
///
/// Whitespace survives so line structure is stable; everything else is fair
/// game at `rate` probability per character.
pub(crate) fn glitch_text(text: &str, rng: &mut Splitmix64, rate: f64) -> String {
    text.chars()
        .map(|c| {
            if !c.is_whitespace() && rng.next_f64() < rate {
                GLITCH_CHARS[rng.next_index(GLITCH_CHARS.len())]
            } else {
                c
            }
        })
        .collect()
}

/// Build the full greeting sequence from its configuration.
pub(crate) fn build_acts(config: &SequenceConfig) -> Vec<Box<dyn Act>> {
    vec![
        Box::new(BootAct::new(config.boot.clone())),
        Box::new(ScanAct::new(config.scan.clone())),
        Box::new(PurgeAct::new(config.purge.clone(), config.seed)),
        Box::new(DownloadAct::new(config.download.clone(), config.seed)),
        Box::new(InstallAct::new(config.install.clone(), config.seed)),
        Box::new(FinaleAct::new(config.finale.clone(), config.resolved_name())),
    ]
}

// --- boot ---

/// Typewriter boot log, one cue per revealed character batch.
pub struct BootAct {
    cfg: BootConfig,
    start: Option<f64>,
    typed: usize,
}

impl BootAct {
    /// Create the act from its config.
    pub fn new(cfg: BootConfig) -> Self {
        Self {
            cfg,
            start: None,
            typed: 0,
        }
    }

    fn total_chars(&self) -> usize {
        self.cfg.lines.iter().map(|l| l.chars().count()).sum()
    }

    fn visible_text(&self, typed: usize) -> String {
        let mut remaining = typed;
        let mut out = Vec::new();
        for line in &self.cfg.lines {
            let len = line.chars().count();
            if remaining >= len {
                out.push(line.clone());
                remaining -= len;
            } else {
                if remaining > 0 {
                    out.push(line.chars().take(remaining).collect());
                }
                break;
            }
        }
        out.join("\n")
    }

    fn spec(&self, text: String) -> SceneSpec {
        SceneSpec {
            text: TextSpec {
                content: text,
                color: self.cfg.color,
                size_px: self.cfg.size_px,
                line_spacing: LINE_SPACING,
                glow: None,
            },
            lens: None,
        }
    }
}

impl Act for BootAct {
    fn id(&self) -> &'static str {
        "boot"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        self.typed = 0;
        ctx.audio.play(AudioCue::Boot);
        ctx.stage.configure(&self.spec(String::new()))
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);
        let total = self.total_chars();
        let typed = ((t / self.cfg.char_secs) as usize).min(total);

        if typed != self.typed {
            self.typed = typed;
            let text = self.visible_text(typed);
            ctx.audio.play(AudioCue::Type);
            ctx.events.push(SequenceEvent::BootText { text: text.clone() });
            ctx.stage.configure(&self.spec(text))?;
        }
        ctx.stage.render(now)?;

        let done_at = total as f64 * self.cfg.char_secs + self.cfg.hold_secs;
        if t >= done_at {
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

// --- scan ---

/// Scanning-lens prompt: the lens sweeps each text line and jumps to the next
/// for a fixed number of full cycles.
pub struct ScanAct {
    cfg: ScanConfig,
    start: Option<f64>,
}

impl ScanAct {
    /// Create the act from its config.
    pub fn new(cfg: ScanConfig) -> Self {
        Self { cfg, start: None }
    }

    fn spec(&self) -> SceneSpec {
        SceneSpec {
            text: TextSpec {
                content: self.cfg.text.clone(),
                color: self.cfg.color,
                size_px: self.cfg.size_px,
                line_spacing: LINE_SPACING,
                glow: (self.cfg.glow_radius_px > 0).then_some(GlowStyle {
                    radius_px: self.cfg.glow_radius_px,
                }),
            },
            lens: Some(LensSpec {
                intensity: self.cfg.intensity,
                radius: LensRadius::Px(self.cfg.radius_px),
                driver: DriverSpec::ScanLines {
                    scan_secs: self.cfg.scan_secs,
                    jump_secs: self.cfg.jump_secs,
                },
            }),
        }
    }

    fn duration(&self) -> f64 {
        let per_line = self.cfg.scan_secs + self.cfg.jump_secs;
        f64::from(self.cfg.cycles) * self.cfg.line_count() as f64 * per_line
    }
}

impl Act for ScanAct {
    fn id(&self) -> &'static str {
        "scan"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        ctx.audio.play(AudioCue::Whoosh);
        ctx.stage.configure(&self.spec())
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);
        ctx.stage.render(now)?;
        if t >= self.duration() {
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

// --- purge ---

/// Fisheye step texts over a purge counter, ending in an explosion.
pub struct PurgeAct {
    cfg: PurgeConfig,
    seed: u64,
    start: Option<f64>,
    step: Option<usize>,
    percent: u8,
    exploded: bool,
}

impl PurgeAct {
    /// Create the act from its config and the sequence seed.
    pub fn new(cfg: PurgeConfig, seed: u64) -> Self {
        Self {
            cfg,
            seed,
            start: None,
            step: None,
            percent: 0,
            exploded: false,
        }
    }

    fn step_text(&self, index: usize) -> String {
        let raw = &self.cfg.steps[index];
        if self.cfg.glitch {
            let mut rng = Splitmix64::new(self.seed ^ (index as u64).wrapping_add(1));
            glitch_text(raw, &mut rng, GLITCH_RATE)
        } else {
            raw.clone()
        }
    }

    fn spec(&self, text: String) -> SceneSpec {
        SceneSpec {
            text: TextSpec {
                content: text,
                color: self.cfg.color,
                size_px: self.cfg.size_px,
                line_spacing: LINE_SPACING,
                glow: None,
            },
            lens: Some(LensSpec {
                intensity: self.cfg.intensity,
                radius: LensRadius::HalfDiagonal,
                driver: DriverSpec::Center,
            }),
        }
    }
}

impl Act for PurgeAct {
    fn id(&self) -> &'static str {
        "purge"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        self.step = None;
        self.percent = 0;
        self.exploded = false;
        ctx.audio.play(AudioCue::Error);
        Ok(())
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);

        let step = ((t / self.cfg.step_secs) as usize).min(self.cfg.steps.len() - 1);
        if self.step != Some(step) {
            self.step = Some(step);
            let text = self.step_text(step);
            ctx.audio.play(AudioCue::Type);
            ctx.events.push(SequenceEvent::PurgeStep {
                index: step,
                text: text.clone(),
            });
            ctx.stage.configure(&self.spec(text))?;
        }

        let percent = ((t / self.cfg.percent_secs) as u64).min(100) as u8;
        if percent != self.percent {
            self.percent = percent;
            ctx.events.push(SequenceEvent::Progress {
                act: self.id().to_owned(),
                percent,
            });
        }

        ctx.stage.render(now)?;

        let done_at =
            (self.cfg.steps.len() - 1) as f64 * self.cfg.step_secs + self.cfg.final_hold_secs;
        if t >= done_at {
            if !self.exploded {
                self.exploded = true;
                ctx.audio.play(AudioCue::Explosion);
            }
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

// --- download ---

/// Hyperspeed download: progress ticks up while titles switch on seeded
/// chance. Switch decisions hang off the tick index, so any sampling cadence
/// reproduces the same run.
pub struct DownloadAct {
    cfg: DownloadConfig,
    seed: u64,
    start: Option<f64>,
    ticks_done: u64,
    title: usize,
    percent: u8,
    succeeded: bool,
}

impl DownloadAct {
    /// Create the act from its config and the sequence seed.
    pub fn new(cfg: DownloadConfig, seed: u64) -> Self {
        Self {
            cfg,
            seed,
            start: None,
            ticks_done: 0,
            title: 0,
            percent: 0,
            succeeded: false,
        }
    }

    fn spec(&self) -> SceneSpec {
        SceneSpec {
            text: TextSpec {
                content: self.cfg.titles[self.title].clone(),
                color: self.cfg.color,
                size_px: self.cfg.size_px,
                line_spacing: LINE_SPACING,
                glow: None,
            },
            lens: Some(LensSpec {
                intensity: self.cfg.intensity,
                radius: LensRadius::HalfDiagonal,
                driver: DriverSpec::Center,
            }),
        }
    }

    fn full_at(&self) -> f64 {
        (100.0 / self.cfg.percent_per_tick).ceil() * self.cfg.tick_secs
    }
}

impl Act for DownloadAct {
    fn id(&self) -> &'static str {
        "download"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        self.ticks_done = 0;
        self.title = 0;
        self.percent = 0;
        self.succeeded = false;
        ctx.audio.play(AudioCue::Whoosh);
        ctx.events.push(SequenceEvent::DownloadTitle {
            title: self.cfg.titles[0].clone(),
        });
        ctx.stage.configure(&self.spec())
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);

        let ticks = (t / self.cfg.tick_secs) as u64;
        let mut switched = false;
        for k in self.ticks_done + 1..=ticks {
            let mut rng = Splitmix64::new(self.seed ^ k.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            if rng.next_f64() < self.cfg.switch_probability {
                self.title = rng.next_index(self.cfg.titles.len());
                switched = true;
            }
        }
        self.ticks_done = self.ticks_done.max(ticks);
        if switched {
            ctx.audio.play(AudioCue::Type);
            ctx.events.push(SequenceEvent::DownloadTitle {
                title: self.cfg.titles[self.title].clone(),
            });
            ctx.stage.configure(&self.spec())?;
        }

        let percent = ((ticks as f64 * self.cfg.percent_per_tick) as u64).min(100) as u8;
        if percent != self.percent {
            self.percent = percent;
            ctx.events.push(SequenceEvent::Progress {
                act: self.id().to_owned(),
                percent,
            });
        }
        if percent >= 100 && !self.succeeded {
            self.succeeded = true;
            ctx.audio.play(AudioCue::Success);
        }

        ctx.stage.render(now)?;

        if t >= self.full_at() + self.cfg.done_hold_secs {
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

// --- install ---

/// Installer popups spawned at seeded positions around the surface center.
pub struct InstallAct {
    cfg: InstallConfig,
    seed: u64,
    start: Option<f64>,
    spawned: usize,
}

impl InstallAct {
    /// Create the act from its config and the sequence seed.
    pub fn new(cfg: InstallConfig, seed: u64) -> Self {
        Self {
            cfg,
            seed,
            start: None,
            spawned: 0,
        }
    }

    fn spec(&self) -> SceneSpec {
        SceneSpec {
            text: TextSpec {
                content: self.cfg.footer.clone(),
                color: [0xFF, 0xFF, 0xFF, 0xFF],
                size_px: 24.0,
                line_spacing: LINE_SPACING,
                glow: None,
            },
            lens: None,
        }
    }
}

impl Act for InstallAct {
    fn id(&self) -> &'static str {
        "install"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        self.spawned = 0;
        ctx.stage.configure(&self.spec())
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);

        let count = ((t / self.cfg.spawn_secs) as usize).min(self.cfg.tasks.len());
        for i in self.spawned..count {
            let mut rng = Splitmix64::new(self.seed ^ ((i as u64).wrapping_add(0x5EED)));
            let j = self.cfg.jitter_pct;
            let x_pct = rng.next_f64() * (2.0 * j) - j;
            let y_pct = rng.next_f64() * (2.0 * j) - j;
            ctx.audio.play(AudioCue::Type);
            ctx.events.push(SequenceEvent::PopupSpawned {
                text: self.cfg.tasks[i].clone(),
                x_pct,
                y_pct,
            });
        }
        self.spawned = count;

        ctx.stage.render(now)?;

        let done_at = self.cfg.tasks.len() as f64 * self.cfg.spawn_secs + self.cfg.tail_secs;
        if t >= done_at {
            Ok(ActStatus::Complete)
        } else {
            Ok(ActStatus::Running)
        }
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

// --- finale ---

/// Reveal, search, and boom: the terminal act. Without a configured hold it
/// runs until the host replays the sequence.
pub struct FinaleAct {
    cfg: FinaleConfig,
    name: String,
    start: Option<f64>,
    step: Option<FinaleStep>,
}

impl FinaleAct {
    /// Create the act from its config and the resolved display name.
    pub fn new(cfg: FinaleConfig, name: String) -> Self {
        Self {
            cfg,
            name,
            start: None,
            step: None,
        }
    }

    fn spec_for(&self, step: FinaleStep) -> SceneSpec {
        let content = match step {
            FinaleStep::Reveal => "2026\nTIMELINE REBOOTED".to_owned(),
            FinaleStep::Search => "> SEARCHING DATABASE...".to_owned(),
            FinaleStep::Boom => format!("HAPPY NEW YEAR\n{}", self.name),
        };
        SceneSpec {
            text: TextSpec {
                content,
                color: self.cfg.color,
                size_px: self.cfg.size_px,
                line_spacing: LINE_SPACING,
                glow: Some(GlowStyle { radius_px: 16 }),
            },
            lens: None,
        }
    }

    fn enter_step(&mut self, ctx: &mut ActCtx<'_>, step: FinaleStep) -> crate::ScanlensResult<()> {
        self.step = Some(step);
        ctx.events.push(SequenceEvent::FinaleStep { step });
        match step {
            FinaleStep::Reveal => {}
            FinaleStep::Search => {
                for line in [
                    "> SEARCHING DATABASE...".to_owned(),
                    "> DETECTING AWESOME HUMAN...".to_owned(),
                    format!("> MATCH FOUND: {}", self.name),
                ] {
                    ctx.events.push(SequenceEvent::SearchLine { line });
                }
            }
            FinaleStep::Boom => {
                ctx.audio.play(AudioCue::Success);
                ctx.events.push(SequenceEvent::ConfettiBurst);
            }
        }
        ctx.stage.configure(&self.spec_for(step))
    }
}

impl Act for FinaleAct {
    fn id(&self) -> &'static str {
        "finale"
    }

    fn mount(&mut self, ctx: &mut ActCtx<'_>) -> crate::ScanlensResult<()> {
        self.start = None;
        self.step = None;
        ctx.audio.play(AudioCue::Boot);
        Ok(())
    }

    fn tick(&mut self, ctx: &mut ActCtx<'_>, now: f64) -> crate::ScanlensResult<ActStatus> {
        let t = elapsed(&mut self.start, now);

        let step = if t < self.cfg.reveal_secs {
            FinaleStep::Reveal
        } else if t < self.cfg.reveal_secs + self.cfg.search_secs {
            FinaleStep::Search
        } else {
            FinaleStep::Boom
        };
        if self.step != Some(step) {
            self.enter_step(ctx, step)?;
        }

        ctx.stage.render(now)?;

        if let Some(hold) = self.cfg.hold_secs
            && t >= self.cfg.reveal_secs + self.cfg.search_secs + hold
        {
            return Ok(ActStatus::Complete);
        }
        Ok(ActStatus::Running)
    }

    fn unmount(&mut self, ctx: &mut ActCtx<'_>) {
        let _ = ctx.stage.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/acts.rs"]
mod tests;
