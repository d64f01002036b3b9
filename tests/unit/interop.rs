use super::*;
use crate::pixel::format::{Bgra32, Rgba32};

#[test]
fn bgra_exports_in_rgba_order() {
    let img = Image::with_fill(2, 1, Bgra32::new(1, 2, 3, 4)).unwrap();
    let out = to_rgba_image(&img).unwrap();
    assert_eq!(out.dimensions(), (2, 1));
    assert_eq!(out.get_pixel(1, 0).0, [3, 2, 1, 4]);
}

#[test]
fn import_reorders_into_bgra() {
    let mut src = ::image::RgbaImage::new(3, 2);
    src.put_pixel(2, 1, ::image::Rgba([10, 20, 30, 40]));
    let img: OwnedImage<Bgra32> = from_rgba_image(&src).unwrap();
    assert_eq!(*img.pixel(2, 1).unwrap(), Bgra32::new(30, 20, 10, 40));
    assert_eq!(*img.pixel(0, 0).unwrap(), Bgra32::TRANSPARENT);
}

#[test]
fn rgba_import_keeps_bytes() {
    let src = ::image::RgbaImage::from_pixel(2, 2, ::image::Rgba([9, 8, 7, 6]));
    let img: OwnedImage<Rgba32> = from_rgba_image(&src).unwrap();
    assert_eq!(to_rgba_image(&img).unwrap(), src);
}

#[test]
fn empty_source_is_rejected() {
    let src = ::image::RgbaImage::new(0, 4);
    let err = from_rgba_image::<Bgra32>(&src).unwrap_err();
    assert!(matches!(err, DrawingError::InvalidDimensions(_)));
}

#[test]
fn disposed_image_cannot_be_exported() {
    let mut img = Image::<Bgra32>::new(1, 1).unwrap();
    img.dispose();
    assert!(to_rgba_image(&img).unwrap_err().is_disposed());
}
