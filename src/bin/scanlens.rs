//! Command-line front end: render the greeting sequence to PNG frames, or run
//! it headless and stream its events as JSON lines.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use scanlens::{
    AudioCue, AudioSink, AudioTrigger, Canvas, FrameLoop, FrameSink, Raster, ScanlensResult,
    SequenceConfig, SequenceRunner, SinkConfig, SurfaceSize,
};

#[derive(Parser, Debug)]
#[command(name = "scanlens", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the sequence as numbered PNG frames.
    Render(RenderArgs),
    /// Run the sequence headless and print its events as JSON lines.
    Events(EventsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Sequence configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display name substituted into the finale.
    #[arg(long)]
    name: Option<String>,

    /// Frames (ticks) per second of sequence time.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Seconds of sequence time to run.
    #[arg(long, default_value_t = 40.0)]
    duration: f64,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Font file (TTF/OTF) used for all text.
    #[arg(long)]
    font: PathBuf,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out: PathBuf,

    /// Surface width in points.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Surface height in points.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Events(args) => cmd_events(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<SequenceConfig> {
    let mut config = match &common.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            SequenceConfig::from_json_str(&json)?
        }
        None => SequenceConfig::default(),
    };
    if let Some(name) = &common.name {
        config.display_name = Some(name.clone());
    }
    Ok(config)
}

struct PngDirSink {
    dir: PathBuf,
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ScanlensResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| anyhow::anyhow!("create output dir '{}': {e}", self.dir.display()))?;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &Raster) -> ScanlensResult<()> {
        let path = self.dir.join(format!("frame_{index:05}.png"));
        image::save_buffer_with_format(
            &path,
            frame.data(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| anyhow::anyhow!("write png '{}': {e}", path.display()))?;
        Ok(())
    }

    fn end(&mut self) -> ScanlensResult<()> {
        Ok(())
    }
}

struct CueLog;

impl AudioSink for CueLog {
    fn play(&mut self, cue: AudioCue) -> ScanlensResult<()> {
        println!("{{\"event\":\"audio\",\"cue\":\"{}\"}}", cue.as_str());
        Ok(())
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let font_bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;

    let size = SurfaceSize::new(args.width, args.height, args.scale)?;
    let canvas = size.to_canvas();
    let sink = PngDirSink {
        dir: args.out.clone(),
    };
    let stage = FrameLoop::new(Arc::new(font_bytes), size, Box::new(sink))?;

    let mut runner = SequenceRunner::new(
        &config,
        Box::new(stage),
        AudioTrigger::disabled(),
        canvas,
    )?;
    let run = runner.run_offline(args.common.fps, args.common.duration)?;

    eprintln!(
        "rendered {} ticks into {} ({} events)",
        run.ticks,
        args.out.display(),
        run.events.len()
    );
    Ok(())
}

fn cmd_events(args: EventsArgs) -> anyhow::Result<()> {
    let config = load_config(&args.common)?;
    let canvas = Canvas {
        width: 800,
        height: 600,
    };

    // Headless: frames are discarded, cues and events go to stdout.
    let stage = HeadlessStage;
    let mut runner = SequenceRunner::new(
        &config,
        Box::new(stage),
        AudioTrigger::with_sink(Box::new(CueLog)),
        canvas,
    )?;

    let run = runner.run_offline(args.common.fps, args.common.duration)?;
    for event in &run.events {
        println!("{}", serde_json::to_string(event)?);
    }
    eprintln!("{} ticks, {} events", run.ticks, run.events.len());
    Ok(())
}

/// Stage that accepts every scene and renders nothing.
struct HeadlessStage;

impl scanlens::Stage for HeadlessStage {
    fn configure(&mut self, _spec: &scanlens::SceneSpec) -> ScanlensResult<()> {
        Ok(())
    }

    fn render(&mut self, _now: f64) -> ScanlensResult<()> {
        Ok(())
    }

    fn clear(&mut self) -> ScanlensResult<()> {
        Ok(())
    }
}
