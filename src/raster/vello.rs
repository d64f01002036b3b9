use std::borrow::Cow;

use vello_cpu::kurbo::{self, Shape};

use crate::foundation::error::{DrawingError, DrawingResult};
use crate::foundation::geometry::Point;
use crate::foundation::math::unpremultiply;
use crate::image::buffer::{Image, OwnedImage};
use crate::parallel::executor::default_executor;
use crate::pixel::format::Bgra32;
use crate::raster::service::{Brush, BrushStyle, FontSpec, Rasterizer};

const PATH_TOLERANCE: f64 = 0.1;

/// [`Rasterizer`] drawing paths with `vello_cpu` and laying out text with `parley`.
///
/// Fonts are registered on first use; rendering the same font bytes again reuses the
/// registered family.
pub struct VelloRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Bgra32>,
    last_font: Option<(Vec<u8>, String)>,
}

impl VelloRasterizer {
    /// Create a rasterizer with empty font and layout caches.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            last_font: None,
        }
    }

    fn family_for(&mut self, bytes: &[u8]) -> DrawingResult<String> {
        if let Some((cached, name)) = &self.last_font
            && cached.as_slice() == bytes
        {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DrawingError::validation("no font families registered from font bytes")
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DrawingError::validation("registered font family has no name"))?
            .to_string();

        self.last_font = Some((bytes.to_vec(), name.clone()));
        Ok(name)
    }

    fn layout(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Bgra32,
    ) -> DrawingResult<parley::Layout<Bgra32>> {
        let family = self.family_for(&font.bytes)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));
        let mut layout: parley::Layout<Bgra32> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl Default for VelloRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VelloRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelloRasterizer")
            .field(
                "last_family",
                &self.last_font.as_ref().map(|(_, name)| name.as_str()),
            )
            .finish_non_exhaustive()
    }
}

impl Rasterizer for VelloRasterizer {
    #[tracing::instrument(skip(self))]
    fn ellipse(
        &mut self,
        width: u32,
        height: u32,
        brush: &Brush,
    ) -> DrawingResult<OwnedImage<Bgra32>> {
        let (w, h) = canvas_extent(width, height)?;
        let line = stroke_width(brush)?.min(f64::from(width.min(height) / 2));

        let (fw, fh) = (f64::from(width), f64::from(height));
        let ellipse = kurbo::Ellipse::new(
            (fw / 2.0, fh / 2.0),
            ((fw - line) / 2.0, (fh - line) / 2.0),
            0.0,
        );
        let path = ellipse.to_path(PATH_TOLERANCE);

        render(w, h, |ctx| {
            ctx.set_paint(paint(brush.color));
            match brush.style {
                BrushStyle::Fill => ctx.fill_path(&path),
                BrushStyle::Stroke => {
                    ctx.set_stroke(kurbo::Stroke::new(line.max(1.0)));
                    ctx.stroke_path(&path);
                }
            }
        })
    }

    #[tracing::instrument(skip(self))]
    fn rectangle(
        &mut self,
        width: u32,
        height: u32,
        brush: &Brush,
    ) -> DrawingResult<OwnedImage<Bgra32>> {
        let (w, h) = canvas_extent(width, height)?;
        let line = stroke_width(brush)?.min(f64::from(width.min(height) / 2));
        let (fw, fh) = (f64::from(width), f64::from(height));

        render(w, h, |ctx| {
            ctx.set_paint(paint(brush.color));
            match brush.style {
                BrushStyle::Fill => ctx.fill_rect(&kurbo::Rect::new(0.0, 0.0, fw, fh)),
                BrushStyle::Stroke => {
                    let line = line.max(1.0);
                    let half = line / 2.0;
                    let rect = kurbo::Rect::new(half, half, fw - half, fh - half);
                    ctx.set_stroke(kurbo::Stroke::new(line));
                    ctx.stroke_path(&rect.to_path(PATH_TOLERANCE));
                }
            }
        })
    }

    #[tracing::instrument(skip(self))]
    fn round_rect(
        &mut self,
        width: u32,
        height: u32,
        radius_x: u32,
        radius_y: u32,
        brush: &Brush,
    ) -> DrawingResult<OwnedImage<Bgra32>> {
        let (w, h) = canvas_extent(width, height)?;
        let line = stroke_width(brush)?.min(f64::from(width.min(height) / 2));
        let inset = match brush.style {
            BrushStyle::Fill => 0.0,
            BrushStyle::Stroke => line.max(1.0),
        };

        let (fw, fh) = (f64::from(width) - inset, f64::from(height) - inset);
        let path = rounded_rect_path(
            kurbo::Rect::new(inset / 2.0, inset / 2.0, inset / 2.0 + fw, inset / 2.0 + fh),
            f64::from(radius_x).min(fw / 2.0),
            f64::from(radius_y).min(fh / 2.0),
        );

        render(w, h, |ctx| {
            ctx.set_paint(paint(brush.color));
            match brush.style {
                BrushStyle::Fill => ctx.fill_path(&path),
                BrushStyle::Stroke => {
                    ctx.set_stroke(kurbo::Stroke::new(inset));
                    ctx.stroke_path(&path);
                }
            }
        })
    }

    #[tracing::instrument(skip(self))]
    fn polygon(
        &mut self,
        sides: u32,
        width: u32,
        height: u32,
        color: Bgra32,
    ) -> DrawingResult<OwnedImage<Bgra32>> {
        if sides < 3 {
            return Err(DrawingError::validation(format!(
                "polygon needs at least 3 sides, got {sides}"
            )));
        }
        let (w, h) = canvas_extent(width, height)?;

        let (rx, ry) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let n = f64::from(sides);
        let mut path = kurbo::BezPath::new();
        for i in 0..sides {
            let theta = (f64::from(i) + 0.5) * std::f64::consts::TAU / n;
            let p = kurbo::Point::new(theta.sin() * rx + rx, theta.cos() * ry + ry);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();

        render(w, h, |ctx| {
            ctx.set_paint(paint(color));
            ctx.fill_path(&path);
        })
    }

    #[tracing::instrument(skip(self, font), fields(size_px = font.size_px))]
    fn text(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Bgra32,
    ) -> DrawingResult<OwnedImage<Bgra32>> {
        if text.is_empty() {
            return Image::new(1, 1);
        }
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(DrawingError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let layout = self.layout(text, font, color)?;

        let width = (layout.width().ceil() as u32).max(1);
        let height = (layout.height().ceil() as u32).max(1);
        let (w, h) = canvas_extent(width, height)?;
        let face = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.clone()),
            0,
        );

        render(w, h, |ctx| {
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    ctx.set_paint(paint(run.style().brush));
                    let baseline = run.baseline();
                    let mut pen = run.offset();
                    let glyphs = run.glyphs().map(move |g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: pen + g.x,
                            y: baseline - g.y,
                        };
                        pen += g.advance;
                        glyph
                    });
                    ctx.glyph_run(&face)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        })
    }
}

/// Fill the closed path `start -> points[0] -> ... -> start` with `color` and composite it
/// source-over onto `img` in place. Parts of the path outside the image are clipped.
#[tracing::instrument(skip(img, points), fields(points = points.len()))]
pub fn draw_path(
    img: &mut Image<'_, Bgra32>,
    color: Bgra32,
    start: Point,
    points: &[Point],
) -> DrawingResult<()> {
    let (w, h) = canvas_extent(img.width()?, img.height()?)?;
    if points.is_empty() || color.a == 0 {
        return Ok(());
    }

    let to_kurbo = |p: &Point| kurbo::Point::new(f64::from(p.x), f64::from(p.y));
    let mut path = kurbo::BezPath::new();
    path.move_to(to_kurbo(&start));
    for p in points {
        path.line_to(to_kurbo(p));
    }
    path.close_path();

    let layer = render(w, h, |ctx| {
        ctx.set_paint(paint(color));
        ctx.fill_path(&path);
    })?;
    img.blend_in_place(&layer)
}

/// Rounded rectangle with independent horizontal and vertical corner radii.
fn rounded_rect_path(rect: kurbo::Rect, rx: f64, ry: f64) -> kurbo::BezPath {
    if rx <= 0.0 || ry <= 0.0 {
        return rect.to_path(PATH_TOLERANCE);
    }
    // Build circular corners in a space stretched vertically by rx / ry, then squash back.
    let k = rx / ry;
    let stretched = kurbo::RoundedRect::new(rect.x0, rect.y0 * k, rect.x1, rect.y1 * k, rx);
    kurbo::Affine::scale_non_uniform(1.0, 1.0 / k) * stretched.to_path(PATH_TOLERANCE)
}

fn canvas_extent(width: u32, height: u32) -> DrawingResult<(u16, u16)> {
    let side = |v: u32| {
        u16::try_from(v).ok().filter(|v| *v > 0).ok_or_else(|| {
            DrawingError::invalid_dimensions(format!(
                "raster canvas must be 1..={} pixels per side, got {width}x{height}",
                u16::MAX
            ))
        })
    };
    Ok((side(width)?, side(height)?))
}

fn stroke_width(brush: &Brush) -> DrawingResult<f64> {
    let w = brush.stroke_width;
    if !w.is_finite() || w < 0.0 {
        return Err(DrawingError::validation(format!(
            "stroke width must be finite and >= 0, got {w}"
        )));
    }
    Ok(f64::from(w))
}

fn paint(color: Bgra32) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn render(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> DrawingResult<OwnedImage<Bgra32>> {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    let premul = pixmap.data_as_u8_slice();
    let mut out = Image::new(u32::from(width), u32::from(height))?;
    default_executor().for_each_pixel(out.data_mut()?, |i, px| {
        let p = &premul[i * 4..i * 4 + 4];
        let [r, g, b, a] = unpremultiply([p[0], p[1], p[2], p[3]]);
        *px = Bgra32::from_rgba8(r, g, b, a);
    })?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/vello.rs"]
mod tests;
