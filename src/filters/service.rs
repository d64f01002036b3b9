use crate::foundation::error::DrawingResult;
use crate::image::buffer::Image;
use crate::pixel::format::Pixel;

/// Morphological and smoothing filters applied in place.
///
/// Implementations reject non-positive parameters with
/// [`crate::DrawingError::Validation`]; callers in this crate validate before delegating.
pub trait FilterService {
    /// Per-channel maximum over a `(2 * radius + 1)` square window.
    fn dilate<T: Pixel>(&self, image: &mut Image<'_, T>, radius: u32) -> DrawingResult<()>;

    /// Per-channel minimum over a `(2 * radius + 1)` square window.
    fn erode<T: Pixel>(&self, image: &mut Image<'_, T>, radius: u32) -> DrawingResult<()>;

    /// Mean over a square window of radius `ceil(sigma)`.
    fn box_blur<T: Pixel>(&self, image: &mut Image<'_, T>, sigma: f32) -> DrawingResult<()>;

    /// Gaussian blur with standard deviation `sigma`.
    fn gaussian_blur<T: Pixel>(&self, image: &mut Image<'_, T>, sigma: f32)
    -> DrawingResult<()>;

    /// Per-channel median over a `size` x `size` window; `size` must be odd.
    fn median_blur<T: Pixel>(&self, image: &mut Image<'_, T>, size: u32) -> DrawingResult<()>;
}
