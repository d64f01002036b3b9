use crate::effects::composite::{draw_image, set_color};
use crate::filters::service::FilterService;
use crate::foundation::error::{DrawingError, DrawingResult};
use crate::foundation::geometry::Point;
use crate::image::buffer::{Image, OwnedImage};
use crate::pixel::format::Pixel;

/// Extra transparent margin beyond the outline radius so dilation never reaches the canvas edge.
const OUTLINE_MARGIN: u32 = 5;

/// Solid outline of `img`'s silhouette, `size` pixels thick, in `color`.
///
/// The result is `(width + 2 * (size + 5)) x (height + 2 * (size + 5))` with the silhouette
/// centred. Only the outline is drawn; the source pixels are not composited back on top.
#[tracing::instrument(skip(img, filters))]
pub fn border<T: Pixel, F: FilterService>(
    img: &Image<'_, T>,
    size: i32,
    color: T,
    filters: &F,
) -> DrawingResult<OwnedImage<T>> {
    if size <= 0 {
        return Err(DrawingError::validation(format!(
            "border size must be > 0, got {size}"
        )));
    }
    let radius = size.unsigned_abs();
    let pad = radius
        .checked_add(OUTLINE_MARGIN)
        .ok_or_else(|| DrawingError::validation("border size overflows"))?;

    let mut silhouette = img.try_clone()?;
    set_color(&mut silhouette, color)?;
    let mut outline = silhouette.make_border(pad, pad, pad, pad)?;
    silhouette.dispose();

    filters.dilate(&mut outline, radius)?;

    let mut out = Image::with_size(outline.size()?)?;
    draw_image(&mut out, Point::ZERO, &outline)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/outline.rs"]
mod tests;
