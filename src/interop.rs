//! Exchange pixels with the `image` crate.
//!
//! Both directions copy and reorder channels; no codec work happens here.

use anyhow::Context;

use crate::foundation::error::{DrawingError, DrawingResult};
use crate::image::buffer::{Image, OwnedImage};
use crate::parallel::executor::default_executor;
use crate::pixel::format::Pixel;

/// Copy into a straight-alpha `image::RgbaImage`.
pub fn to_rgba_image<T: Pixel>(img: &Image<'_, T>) -> DrawingResult<::image::RgbaImage> {
    let (width, height) = (img.width()?, img.height()?);
    let raw: Vec<u8> = img.data()?.iter().flat_map(|p| p.to_rgba()).collect();
    ::image::RgbaImage::from_raw(width, height, raw)
        .context("rgba buffer does not match image extent")
        .map_err(DrawingError::from)
}

/// Copy an `image::RgbaImage` into a new exclusive image of pixel type `T`.
pub fn from_rgba_image<T: Pixel>(
    src: &::image::RgbaImage,
) -> DrawingResult<OwnedImage<T>> {
    let raw = src.as_raw();
    let mut out = Image::new(src.width(), src.height())?;
    default_executor().for_each_pixel(out.data_mut()?, |i, px| {
        let p = &raw[i * 4..i * 4 + 4];
        *px = T::from_rgba([p[0], p[1], p[2], p[3]]);
    })?;
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/interop.rs"]
mod tests;
