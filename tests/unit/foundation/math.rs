use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unit_to_u8_rounds_and_clamps() {
    assert_eq!(unit_to_u8(127.5), 128);
    assert_eq!(unit_to_u8(-3.0), 0);
    assert_eq!(unit_to_u8(300.0), 255);
    assert_eq!(unit_to_u8(f32::NAN), 0);
}

#[test]
fn premultiply_opaque_and_transparent() {
    assert_eq!(premultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(premultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(premultiply([255, 255, 255, 128]), [128, 128, 128, 128]);
}

#[test]
fn unpremultiply_inverts_half_alpha_white() {
    assert_eq!(unpremultiply([128, 128, 128, 128]), [255, 255, 255, 128]);
    assert_eq!(unpremultiply([0, 0, 0, 0]), [0, 0, 0, 0]);
}
