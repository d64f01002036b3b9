use crate::foundation::error::DrawingResult;
use crate::foundation::geometry::{Point, Rectangle};
use crate::foundation::math::unit_to_u8;
use crate::image::buffer::Image;
use crate::parallel::executor::default_executor;
use crate::pixel::format::Pixel;

/// Straight-alpha `[r, g, b, a]`.
pub type StraightRgba8 = [u8; 4];

/// Source-over composite of one straight-alpha pixel onto another.
///
/// `out.a = sa + da * (1 - sa)` and `out.c = (sc * sa + dc * da * (1 - sa)) / out.a`, with
/// alphas normalised to `[0, 1]`. A transparent source leaves `dst` untouched and an opaque source
/// replaces it.
pub fn over_pixel(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let dw = da * (1.0 - sa);
    let out_a = sa + dw;
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = unit_to_u8((f32::from(src[i]) * sa + f32::from(dst[i]) * dw) / out_a);
    }
    out[3] = unit_to_u8(out_a * 255.0);
    out
}

/// Composite `src` onto `dst` with its top-left corner at `at`.
///
/// The parts of `src` that fall outside `dst` are skipped; a fully disjoint placement is a no-op.
pub fn draw_image<T: Pixel>(
    dst: &mut Image<'_, T>,
    at: Point,
    src: &Image<'_, T>,
) -> DrawingResult<()> {
    let bounds = Rectangle::from_point_size(Point::ZERO, dst.size()?);
    let placed = Rectangle::from_point_size(at, src.size()?);
    let Some(visible) = bounds.intersect(placed) else {
        return Ok(());
    };

    let cropped;
    let src = if visible == placed {
        src
    } else {
        cropped = src.get_roi(visible - at)?;
        &cropped
    };

    let mut blended = dst.get_roi(visible)?;
    blended.blend_in_place(src)?;
    dst.set_roi(visible, &blended)
}

/// Scale every pixel's alpha by `alpha`, rounding to the nearest byte.
///
/// `alpha` is expected in `[0, 1]`; results are clamped to `[0, 255]`.
pub fn set_alpha<T: Pixel>(img: &mut Image<'_, T>, alpha: f32) -> DrawingResult<()> {
    default_executor().for_each_pixel(img.data_mut()?, |_, px| {
        let mut c = px.to_rgba();
        c[3] = unit_to_u8(f32::from(c[3]) * alpha);
        *px = T::from_rgba(c);
    })
}

/// Replace every pixel's colour with `color`'s, keeping the pixel's own alpha.
pub fn set_color<T: Pixel>(img: &mut Image<'_, T>, color: T) -> DrawingResult<()> {
    let [r, g, b, _] = color.to_rgba();
    default_executor().for_each_pixel(img.data_mut()?, |_, px| {
        *px = T::from_rgba([r, g, b, px.alpha()]);
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
