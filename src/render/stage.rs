use crate::foundation::error::ScanlensResult;
use crate::raster::text::GlowStyle;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text content and styling of the staged scene.
pub struct TextSpec {
    /// Text content; `'\n'` separates lines.
    pub content: String,
    /// Straight-alpha RGBA8 text color.
    pub color: [u8; 4],
    /// Font size in pixels.
    pub size_px: f32,
    /// Line height factor relative to `size_px`.
    pub line_spacing: f32,
    /// Optional bloom halo.
    pub glow: Option<GlowStyle>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// How the lens radius is resolved against the surface.
pub enum LensRadius {
    /// Fixed radius in pixels.
    Px(f64),
    /// Half the surface diagonal; covers the whole frame.
    HalfDiagonal,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Which focus driver moves the lens.
pub enum DriverSpec {
    /// Fixed focus at the surface center.
    Center,
    /// Sinusoidal sweep over the surface.
    Sine,
    /// Line-scanning state machine over the scene's text lines.
    ScanLines {
        /// Seconds to sweep one line.
        scan_secs: f64,
        /// Seconds to jump between lines.
        jump_secs: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Lens placement over the staged scene.
pub struct LensSpec {
    /// Power-law bulge exponent; coerced into the valid domain at render time.
    pub intensity: f64,
    /// Lens radius resolution.
    pub radius: LensRadius,
    /// Focus driver selection.
    pub driver: DriverSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Complete desired state of the render stage for the active act.
///
/// Configuring an equal spec is a no-op; changing only the lens never forces
/// the text to re-rasterize.
pub struct SceneSpec {
    /// Text block to rasterize.
    pub text: TextSpec,
    /// Optional lens; `None` presents the text unwarped.
    pub lens: Option<LensSpec>,
}

/// The act-facing rendering seam.
///
/// Acts describe what should be on screen with [`SceneSpec`] and ask for one
/// frame per tick; the canonical implementation is
/// [`FrameLoop`](crate::FrameLoop). `clear` detaches the current scene on act
/// teardown so a stale act can never keep rendering.
pub trait Stage {
    /// Replace the staged scene. Idempotent for equal specs.
    fn configure(&mut self, spec: &SceneSpec) -> ScanlensResult<()>;
    /// Render and present one frame at `now`.
    fn render(&mut self, now: f64) -> ScanlensResult<()>;
    /// Drop the staged scene; subsequent renders are no-ops until reconfigured.
    fn clear(&mut self) -> ScanlensResult<()>;
}
