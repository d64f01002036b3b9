use crate::effects::composite::{draw_image, set_alpha, set_color};
use crate::filters::service::FilterService;
use crate::foundation::error::{DrawingError, DrawingResult};
use crate::foundation::geometry::Point;
use crate::image::buffer::{Image, OwnedImage};
use crate::pixel::format::Pixel;

/// Drop shadow of `img` offset by `(x, y)`, blurred with sigma `blur`.
///
/// The shadow is `img` recoloured to `color`, its alpha scaled by `alpha` and by `color`'s own
/// alpha, padded by `blur` and blurred. The canvas is `(2|x| + width + blur) x
/// (2|y| + height + blur)`; `img` is drawn centred on top of the shadow, which sits `(x, y)` away
/// from the centre.
#[tracing::instrument(skip(img, filters))]
pub fn shadow<T: Pixel, F: FilterService>(
    img: &Image<'_, T>,
    x: i32,
    y: i32,
    blur: i32,
    alpha: f32,
    color: T,
    filters: &F,
) -> DrawingResult<OwnedImage<T>> {
    if blur < 0 {
        return Err(DrawingError::validation(format!(
            "shadow blur must be >= 0, got {blur}"
        )));
    }
    let blur = blur.unsigned_abs();
    let (width, height) = (img.width()?, img.height()?);

    let grow = |base: u32, by: u32| {
        base.checked_add(by)
            .ok_or_else(|| DrawingError::invalid_dimensions("shadow size overflows u32"))
    };
    let mut shade = img
        .try_clone()?
        .make_border_to(grow(width, blur)?, grow(height, blur)?)?;
    set_color(&mut shade, color)?;
    set_alpha(&mut shade, alpha * f32::from(color.to_rgba()[3]) / 255.0)?;
    if blur > 0 {
        filters.gaussian_blur(&mut shade, blur as f32)?;
    }

    let canvas_w = grow(grow(width, blur)?, x.unsigned_abs().saturating_mul(2))?;
    let canvas_h = grow(grow(height, blur)?, y.unsigned_abs().saturating_mul(2))?;
    let mut out = Image::new(canvas_w, canvas_h)?;

    let centred = |outer: u32, inner: u32| -> DrawingResult<i32> {
        i32::try_from((outer - inner) / 2)
            .map_err(|_| DrawingError::invalid_dimensions("shadow canvas exceeds i32"))
    };
    let shade_at = Point::new(
        centred(canvas_w, shade.width()?)?.saturating_add(x),
        centred(canvas_h, shade.height()?)?.saturating_add(y),
    );
    let img_at = Point::new(centred(canvas_w, width)?, centred(canvas_h, height)?);

    draw_image(&mut out, shade_at, &shade)?;
    shade.dispose();
    draw_image(&mut out, img_at, img)?;

    tracing::debug!(canvas_w, canvas_h, "shadow composed");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
