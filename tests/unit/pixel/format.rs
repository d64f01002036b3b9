use super::*;

#[test]
fn layouts_are_four_bytes_without_padding() {
    assert_eq!(std::mem::size_of::<Bgra32>(), 4);
    assert_eq!(std::mem::size_of::<Rgba32>(), 4);
    assert_eq!(Bgra32::FORMAT.bytes_per_pixel(), 4);
    assert_eq!(Rgba32::FORMAT.channels(), Rgba32::CHANNELS);
}

#[test]
fn memory_order_matches_format_name() {
    let bgra = Bgra32::from_rgba8(1, 2, 3, 4);
    assert_eq!(bytemuck::bytes_of(&bgra), &[3, 2, 1, 4]);

    let rgba = Rgba32::new(1, 2, 3, 4);
    assert_eq!(bytemuck::bytes_of(&rgba), &[1, 2, 3, 4]);
}

#[test]
fn conversion_reorders_channels_only() {
    let src = Bgra32::new(10, 20, 30, 40);
    let dst: Rgba32 = src.into();
    assert_eq!(dst, Rgba32::new(30, 20, 10, 40));
    assert_eq!(Bgra32::from(dst), src);
    assert_eq!(src.alpha(), 40);
}

#[test]
fn default_is_transparent() {
    assert_eq!(Bgra32::default(), Bgra32::TRANSPARENT);
    assert_eq!(Rgba32::default(), Rgba32::TRANSPARENT);
}
