use super::*;

#[test]
fn size_rejects_negative_dimensions() {
    assert!(Size::new(-1, 4).is_err());
    assert!(Size::new(4, -1).is_err());
    assert_eq!(Size::new(3, 4).unwrap(), Size::from_unsigned(3, 4));
}

#[test]
fn point_and_size_arithmetic() {
    let p = Point::new(2, -3) + Size::from_unsigned(5, 5);
    assert_eq!(p, Point::new(7, 2));
    assert_eq!(p - Point::new(7, 2), Point::ZERO);
    assert_eq!(Size::from_unsigned(3, 4) * 2, Size::from_unsigned(6, 8));
    assert_eq!(Size::from_unsigned(7, 9) / 2, Size::from_unsigned(3, 4));
    assert_eq!(Size::from_unsigned(7, 9) / 0, Size::ZERO);
    assert_eq!(
        Size::from_unsigned(2, 2) - Size::from_unsigned(5, 1),
        Size::from_unsigned(0, 1)
    );
}

#[test]
fn rectangle_edges() {
    let r = Rectangle::new(1, 2, 3, 4);
    assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (1, 2, 4, 6));
    assert_eq!(r.bottom_right(), Point::new(4, 6));
    assert_eq!(r.size(), Size::from_unsigned(3, 4));
}

#[test]
fn rectangle_from_ltrb_validates_order() {
    assert_eq!(
        Rectangle::from_ltrb(1, 1, 4, 5).unwrap(),
        Rectangle::new(1, 1, 3, 4)
    );
    assert!(Rectangle::from_ltrb(4, 1, 1, 5).is_err());
    assert!(Rectangle::from_ltrb(1, 5, 4, 1).is_err());
}

#[test]
fn rectangle_intersect_and_union() {
    let a = Rectangle::new(0, 0, 4, 4);
    let b = Rectangle::new(2, 2, 4, 4);
    assert_eq!(a.intersect(b), Some(Rectangle::new(2, 2, 2, 2)));
    assert_eq!(a.union(b), Rectangle::new(0, 0, 6, 6));
    assert_eq!(a.intersect(Rectangle::new(10, 10, 1, 1)), None);
    assert_eq!(a.intersect(Rectangle::new(4, 0, 2, 2)), None);
}

#[test]
fn rectangle_inflate_and_offset() {
    let r = Rectangle::new(2, 2, 2, 2);
    assert_eq!(r.inflate(1, 2), Rectangle::new(1, 0, 4, 6));
    assert_eq!(r.inflate(-5, 0).width, 0);
    assert_eq!(r + Point::new(1, 1), Rectangle::new(3, 3, 2, 2));
    assert_eq!(r - Point::new(2, 2), Rectangle::new(0, 0, 2, 2));
    assert_eq!(r + Size::from_unsigned(1, 0), Rectangle::new(2, 2, 3, 2));
}

#[test]
fn rectangle_containment() {
    let outer = Rectangle::new(0, 0, 10, 10);
    assert!(outer.contains_rect(Rectangle::new(2, 2, 8, 8)));
    assert!(!outer.contains_rect(Rectangle::new(2, 2, 9, 8)));
    assert!(outer.contains_point(Point::new(9, 9)));
    assert!(!outer.contains_point(Point::new(10, 0)));
}

#[test]
fn rectangle_to_kurbo() {
    let r: kurbo::Rect = Rectangle::new(1, 2, 3, 4).into();
    assert_eq!(r, kurbo::Rect::new(1.0, 2.0, 4.0, 6.0));
}

#[test]
fn point_arithmetic_saturates() {
    assert_eq!(
        Point::new(i32::MAX, 0) + Point::new(1, 0),
        Point::new(i32::MAX, 0)
    );
    assert_eq!(
        Point::new(0, i32::MIN) - Point::new(0, 1),
        Point::new(0, i32::MIN)
    );
}
