use serde::{Deserialize, Serialize};

use crate::foundation::error::DrawingResult;
use crate::image::buffer::OwnedImage;
use crate::pixel::format::Bgra32;

/// How a shape is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushStyle {
    /// Paint the interior.
    Fill,
    /// Paint the outline with [`Brush::stroke_width`].
    #[default]
    Stroke,
}

/// Paint parameters for shape rasterization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Straight-alpha paint colour.
    pub color: Bgra32,
    /// Outline width in pixels; ignored by [`BrushStyle::Fill`] rectangles.
    pub stroke_width: f32,
    /// Fill or stroke.
    pub style: BrushStyle,
}

impl Brush {
    /// Solid fill.
    pub fn fill(color: Bgra32) -> Self {
        Self {
            color,
            stroke_width: 0.0,
            style: BrushStyle::Fill,
        }
    }

    /// Outline of the given width.
    pub fn stroke(color: Bgra32, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
            style: BrushStyle::Stroke,
        }
    }
}

/// A font face supplied as raw TrueType/OpenType bytes, plus the pixel size to render at.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Font file contents.
    pub bytes: Vec<u8>,
    /// Em size in pixels.
    pub size_px: f32,
}

impl FontSpec {
    /// Font from raw bytes at `size_px`.
    pub fn new(bytes: impl Into<Vec<u8>>, size_px: f32) -> Self {
        Self {
            bytes: bytes.into(),
            size_px,
        }
    }
}

/// Produces fresh exclusive BGRA images from vector shapes and text.
pub trait Rasterizer {
    /// Ellipse inscribed in a `width` x `height` canvas.
    ///
    /// The stroke width is clamped to half the smaller side and the radii shrink by half the
    /// stroke so the outline stays inside the canvas.
    fn ellipse(&mut self, width: u32, height: u32, brush: &Brush)
    -> DrawingResult<OwnedImage<Bgra32>>;

    /// Rectangle covering a `width` x `height` canvas.
    fn rectangle(
        &mut self,
        width: u32,
        height: u32,
        brush: &Brush,
    ) -> DrawingResult<OwnedImage<Bgra32>>;

    /// Rectangle with elliptical corners of radii `radius_x` x `radius_y`, covering a
    /// `width` x `height` canvas.
    ///
    /// Radii are clamped to half the shape's sides; a zero radius gives square corners. Strokes
    /// are clamped and inset like [`Rasterizer::rectangle`].
    fn round_rect(
        &mut self,
        width: u32,
        height: u32,
        radius_x: u32,
        radius_y: u32,
        brush: &Brush,
    ) -> DrawingResult<OwnedImage<Bgra32>>;

    /// Filled regular polygon with `sides` vertices inscribed in a `width` x `height` canvas.
    fn polygon(
        &mut self,
        sides: u32,
        width: u32,
        height: u32,
        color: Bgra32,
    ) -> DrawingResult<OwnedImage<Bgra32>>;

    /// Single-line text cropped to its layout box. Empty text yields a 1x1 transparent image.
    fn text(
        &mut self,
        text: &str,
        font: &FontSpec,
        color: Bgra32,
    ) -> DrawingResult<OwnedImage<Bgra32>>;
}
