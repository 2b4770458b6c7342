//! Scanlens renders a timed, multi-act greeting animation into RGBA8 pixel
//! frames, CPU only.
//!
//! The signature effect is a per-pixel radial lens: text is rasterized into an
//! offscreen buffer, then every destination pixel inside the lens radius is
//! inverse-mapped through a power-law remap around a moving focus. A state
//! machine sweeps the focus across text lines (scan), snaps it to the next
//! line (jump), and wraps forever. An act sequencer strings together the
//! timed phases of the overall animation and guards against stale completions.
//!
//! # Pipeline overview
//!
//! 1. **Stage**: the active act describes the scene ([`SceneSpec`])
//! 2. **Rasterize**: [`TextRasterizer`] builds the source raster when text or
//!    surface change (never for lens motion alone)
//! 3. **Warp**: [`warp_into`] maps source to destination around the sampled
//!    focus
//! 4. **Present**: the frame goes to a [`FrameSink`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: every timer samples an injectable clock and
//!   every jittered choice draws from the sequence seed.
//! - **Graceful degradation**: audio and presentation failures are logged and
//!   swallowed; the visual sequence keeps progressing.
//! - **Premultiplied RGBA8** end-to-end.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod audio;
mod foundation;
mod lens;
mod raster;
mod render;
mod scan;
mod sequence;

pub use animation::clock::{Clock, ManualClock, SystemClock};
pub use animation::ease::Ease;
pub use audio::cue::{AudioCue, AudioFactory, AudioSink, AudioTrigger, NullAudio};
pub use foundation::core::{Canvas, LensParams, Point, Raster, Rect, Vec2};
pub use foundation::error::{ScanlensError, ScanlensResult};
pub use lens::warp::{warp_into, warped};
pub use raster::text::{GlowStyle, TextLine, TextRasterizer, TextStyle};
pub use render::frame_loop::{FrameLoop, SurfaceSize};
pub use render::sink::{FrameSink, InMemorySink, NullSink, SinkConfig};
pub use render::stage::{DriverSpec, LensRadius, LensSpec, SceneSpec, Stage, TextSpec};
pub use scan::driver::{CenterDriver, FocusDriver, SineDriver};
pub use scan::path::{ScanPathController, ScanPhase};
pub use sequence::act::{Act, ActCtx, ActStatus, FinaleStep, SequenceEvent};
pub use sequence::acts::{BootAct, DownloadAct, FinaleAct, InstallAct, PurgeAct, ScanAct};
pub use sequence::model::{
    BootConfig, DownloadConfig, FinaleConfig, InstallConfig, PurgeConfig, ScanConfig,
    SequenceConfig,
};
pub use sequence::runner::{OfflineRun, SequenceRunner};
pub use sequence::sequencer::{ActSequencer, MountToken};
