use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Canvas, Raster};
use crate::foundation::error::{ScanlensError, ScanlensResult};
use crate::raster::blur::BlurEngine;
use crate::raster::compose::premul_over_in_place;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// RGBA8 brush color carried through Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Bloom halo configuration.
///
/// The glow is not a true Gaussian bloom: each line is composited from three
/// soft underlay passes with decreasing blur radius and increasing opacity,
/// then one solid pass on top. Cheap enough to run per re-rasterization.
pub struct GlowStyle {
    /// Blur radius of the widest underlay pass, in pixels.
    pub radius_px: u32,
}

impl GlowStyle {
    /// Underlay passes as `(blur radius, pass opacity)`, widest first.
    fn passes(self) -> [(u32, f32); 3] {
        let r = self.radius_px;
        [(r, 0.35), ((r / 2).max(1), 0.5), ((r / 4).max(1), 0.7)]
    }
}

#[derive(Clone, Debug)]
/// Styling for one rasterized text block.
pub struct TextStyle {
    /// Raw font bytes (TTF/OTF).
    pub font: Arc<Vec<u8>>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color as straight-alpha RGBA8.
    pub color: [u8; 4],
    /// Line height factor relative to `size_px`.
    pub line_spacing: f32,
    /// Optional bloom halo.
    pub glow: Option<GlowStyle>,
}

impl TextStyle {
    /// Validate style invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.font.is_empty() {
            return Err(ScanlensError::validation("text font bytes must be non-empty"));
        }
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ScanlensError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(ScanlensError::validation(
                "text line_spacing must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Measured placement of one rasterized text line.
///
/// Coordinates are in raster pixels; `y` is the vertical center of the line.
/// The scan controller uses these to know where to sweep the lens.
pub struct TextLine {
    /// Line text content (may be empty).
    pub content: String,
    /// Left edge of the rendered glyphs.
    pub start_x: f64,
    /// Right edge of the rendered glyphs.
    pub end_x: f64,
    /// Vertical center of the line.
    pub y: f64,
}

/// Compute per-line `(start_x, end_x, y_center)` for a horizontally centered
/// block of lines, vertically centered as a whole around the canvas middle.
pub(crate) fn block_geometry(
    line_widths: &[f64],
    canvas: Canvas,
    line_height: f64,
) -> Vec<(f64, f64, f64)> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let total = line_height * line_widths.len() as f64;
    let first_center = (h - total) / 2.0 + line_height / 2.0;

    line_widths
        .iter()
        .enumerate()
        .map(|(i, &lw)| {
            let start_x = (w - lw) / 2.0;
            let y = first_center + line_height * i as f64;
            (start_x, start_x + lw, y)
        })
        .collect()
}

struct RegisteredFont {
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
}

/// Renders styled multi-line text blocks into premultiplied RGBA8 rasters.
///
/// Parley does shaping and per-line layout; `vello_cpu` rasterizes glyph runs.
/// Safe to call once per frame, but callers are expected to cache the result
/// and re-rasterize only when text, style, or surface size change.
pub struct TextRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: HashMap<usize, RegisteredFont>,
    blur: BlurEngine,
    glow_out: Vec<u8>,
    glow_blurred: Vec<u8>,
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer {
    /// Construct a rasterizer with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
            blur: BlurEngine::new(),
            glow_out: Vec::new(),
            glow_blurred: Vec::new(),
        }
    }

    /// Rasterize `text` into a `canvas`-sized raster.
    ///
    /// Splits on `'\n'` (empty input yields a single empty line), centers the
    /// block, and returns the measured bounding box of every line alongside
    /// the pixels.
    pub fn rasterize(
        &mut self,
        text: &str,
        style: &TextStyle,
        canvas: Canvas,
    ) -> ScanlensResult<(Raster, Vec<TextLine>)> {
        style.validate()?;
        canvas.validate()?;
        let w16: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ScanlensError::raster("raster width exceeds u16"))?;
        let h16: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ScanlensError::raster("raster height exceeds u16"))?;

        let font_key = Arc::as_ptr(&style.font) as usize;
        if !self.fonts.contains_key(&font_key) {
            let registered = register_font(&mut self.font_ctx, &style.font)?;
            self.fonts.insert(font_key, registered);
        }

        let contents: Vec<&str> = text.split('\n').collect();
        let brush = TextBrushRgba8 {
            r: style.color[0],
            g: style.color[1],
            b: style.color[2],
            a: style.color[3],
        };

        let mut layouts = Vec::with_capacity(contents.len());
        let mut widths = Vec::with_capacity(contents.len());
        for line in &contents {
            if line.is_empty() {
                layouts.push(None);
                widths.push(0.0f64);
                continue;
            }
            let font = &self.fonts[&font_key];
            let mut builder =
                self.layout_ctx
                    .ranged_builder(&mut self.font_ctx, line, 1.0, true);
            builder.push_default(parley::style::StyleProperty::FontStack(
                parley::style::FontStack::Source(std::borrow::Cow::Owned(
                    font.family_name.clone(),
                )),
            ));
            builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
            builder.push_default(parley::style::StyleProperty::Brush(brush));
            let mut layout: parley::Layout<TextBrushRgba8> = builder.build(line);
            layout.break_all_lines(None);
            widths.push(f64::from(layout.width()));
            layouts.push(Some(layout));
        }

        let line_height = f64::from(style.size_px) * f64::from(style.line_spacing);
        let geometry = block_geometry(&widths, canvas, line_height);

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.reset();
        let font_data = self.fonts[&font_key].font_data.clone();
        for (layout, &(start_x, _end_x, y_center)) in layouts.iter().zip(geometry.iter()) {
            let Some(layout) = layout else { continue };
            let top = y_center - f64::from(layout.height()) / 2.0;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate(
                vello_cpu::kurbo::Vec2::new(start_x, top),
            ));
            draw_layout(&mut ctx, layout, &font_data);
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        let text_bytes = pixmap.data_as_u8_slice();

        let raster = match style.glow {
            None => Raster::from_parts(canvas.width, canvas.height, text_bytes.to_vec())?,
            Some(glow) => {
                let len = text_bytes.len();
                self.glow_out.clear();
                self.glow_out.resize(len, 0);
                self.glow_blurred.resize(len, 0);
                for (radius, opacity) in glow.passes() {
                    let sigma = (radius as f32 / 2.0).max(0.5);
                    self.blur.blur(
                        text_bytes,
                        &mut self.glow_blurred,
                        canvas.width,
                        canvas.height,
                        radius,
                        sigma,
                    )?;
                    premul_over_in_place(&mut self.glow_out, &self.glow_blurred, opacity)?;
                }
                premul_over_in_place(&mut self.glow_out, text_bytes, 1.0)?;
                Raster::from_parts(canvas.width, canvas.height, self.glow_out.clone())?
            }
        };

        let lines = contents
            .iter()
            .zip(geometry.iter())
            .map(|(content, &(start_x, end_x, y))| TextLine {
                content: (*content).to_owned(),
                start_x,
                end_x,
                y,
            })
            .collect();

        Ok((raster, lines))
    }
}

fn register_font(
    font_ctx: &mut parley::FontContext,
    font_bytes: &Arc<Vec<u8>>,
) -> ScanlensResult<RegisteredFont> {
    let families = font_ctx.collection.register_fonts(
        parley::fontique::Blob::from(font_bytes.as_ref().clone()),
        None,
    );
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| ScanlensError::validation("no font families registered from font bytes"))?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| ScanlensError::validation("registered font family has no name"))?
        .to_string();

    let font_data = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    Ok(RegisteredFont {
        family_name,
        font_data,
    })
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font_data: &vello_cpu::peniko::FontData,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font_data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/text.rs"]
mod tests;
