use super::*;

const ORANGE: Bgra32 = Bgra32::from_rgba8(200, 40, 10, 255);
const BLUE: Bgra32 = Bgra32::from_rgba8(0, 0, 255, 255);

fn mono_font(size_px: f32) -> FontSpec {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSansMono.ttf").unwrap();
    FontSpec::new(bytes, size_px)
}

fn inked_columns(img: &Image<'_, Bgra32>) -> Vec<u32> {
    let (w, h) = (img.width().unwrap(), img.height().unwrap());
    (0..w)
        .filter(|&x| (0..h).any(|y| img.pixel(x, y).unwrap().a > 0))
        .collect()
}

#[test]
fn filled_rectangle_covers_the_canvas() {
    let img = VelloRasterizer::new()
        .rectangle(4, 3, &Brush::fill(ORANGE))
        .unwrap();
    assert_eq!((img.width().unwrap(), img.height().unwrap()), (4, 3));
    assert!(img.data().unwrap().iter().all(|p| *p == ORANGE));
}

#[test]
fn stroked_rectangle_leaves_the_middle_empty() {
    let img = VelloRasterizer::new()
        .rectangle(12, 12, &Brush::stroke(ORANGE, 2.0))
        .unwrap();
    assert!(img.pixel(0, 0).unwrap().a > 200);
    assert!(img.pixel(11, 6).unwrap().a > 200);
    assert_eq!(img.pixel(6, 6).unwrap().a, 0);
}

#[test]
fn filled_ellipse_is_opaque_in_the_centre_and_clear_in_corners() {
    let img = VelloRasterizer::new()
        .ellipse(20, 20, &Brush::fill(ORANGE))
        .unwrap();
    assert_eq!(*img.pixel(10, 10).unwrap(), ORANGE);
    assert_eq!(img.pixel(0, 0).unwrap().a, 0);
    assert_eq!(img.pixel(19, 19).unwrap().a, 0);
}

#[test]
fn stroked_ellipse_is_a_ring() {
    let img = VelloRasterizer::new()
        .ellipse(20, 20, &Brush::stroke(ORANGE, 2.0))
        .unwrap();
    assert!(img.pixel(10, 1).unwrap().a > 0);
    assert_eq!(img.pixel(10, 10).unwrap().a, 0);
}

#[test]
fn oversized_stroke_is_clamped() {
    let img = VelloRasterizer::new()
        .ellipse(20, 10, &Brush::stroke(ORANGE, 100.0))
        .unwrap();
    assert_eq!((img.width().unwrap(), img.height().unwrap()), (20, 10));
    assert_eq!(img.pixel(0, 0).unwrap().a, 0);
}

#[test]
fn triangle_covers_its_centre() {
    let img = VelloRasterizer::new().polygon(3, 10, 10, ORANGE).unwrap();
    assert_eq!(*img.pixel(5, 5).unwrap(), ORANGE);
    assert_eq!(img.pixel(0, 0).unwrap().a, 0);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let mut r = VelloRasterizer::new();
    let fill = Brush::fill(ORANGE);
    assert!(matches!(
        r.rectangle(0, 3, &fill),
        Err(DrawingError::InvalidDimensions(_))
    ));
    assert!(matches!(
        r.ellipse(70_000, 3, &fill),
        Err(DrawingError::InvalidDimensions(_))
    ));
    assert!(matches!(
        r.ellipse(3, 3, &Brush::stroke(ORANGE, -1.0)),
        Err(DrawingError::Validation(_))
    ));
    assert!(matches!(
        r.polygon(2, 10, 10, ORANGE),
        Err(DrawingError::Validation(_))
    ));
}

#[test]
fn filled_round_rect_clears_its_corners() {
    let img = VelloRasterizer::new()
        .round_rect(20, 20, 6, 6, &Brush::fill(ORANGE))
        .unwrap();
    assert_eq!(*img.pixel(10, 10).unwrap(), ORANGE);
    assert_eq!(*img.pixel(10, 0).unwrap(), ORANGE);
    assert_eq!(*img.pixel(0, 10).unwrap(), ORANGE);
    for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19)] {
        assert_eq!(img.pixel(x, y).unwrap().a, 0, "({x}, {y})");
    }
}

#[test]
fn round_rect_corners_can_be_elliptical() {
    let img = VelloRasterizer::new()
        .round_rect(30, 10, 12, 4, &Brush::fill(ORANGE))
        .unwrap();
    assert_eq!(img.pixel(1, 0).unwrap().a, 0);
    assert_eq!(img.pixel(28, 9).unwrap().a, 0);
    assert_eq!(*img.pixel(15, 0).unwrap(), ORANGE);
    assert_eq!(*img.pixel(15, 5).unwrap(), ORANGE);
}

#[test]
fn round_rect_without_radius_matches_rectangle() {
    let mut r = VelloRasterizer::new();
    let brush = Brush::fill(ORANGE);
    let rounded = r.round_rect(9, 7, 0, 3, &brush).unwrap();
    let square = r.rectangle(9, 7, &brush).unwrap();
    assert_eq!(rounded.data().unwrap(), square.data().unwrap());
}

#[test]
fn stroked_round_rect_is_hollow() {
    let img = VelloRasterizer::new()
        .round_rect(20, 20, 5, 5, &Brush::stroke(ORANGE, 2.0))
        .unwrap();
    assert!(img.pixel(10, 0).unwrap().a > 200);
    assert!(img.pixel(0, 10).unwrap().a > 200);
    assert_eq!(img.pixel(10, 10).unwrap().a, 0);
    assert_eq!(img.pixel(0, 0).unwrap().a, 0);
}

#[test]
fn draw_path_fills_a_triangle_in_place() {
    let mut img = Image::with_fill(10, 10, BLUE).unwrap();
    draw_path(
        &mut img,
        ORANGE,
        Point::new(0, 0),
        &[Point::new(10, 0), Point::new(0, 10)],
    )
    .unwrap();
    assert_eq!(*img.pixel(1, 1).unwrap(), ORANGE);
    assert_eq!(*img.pixel(7, 0).unwrap(), ORANGE);
    assert_eq!(*img.pixel(8, 8).unwrap(), BLUE);
    assert_eq!(*img.pixel(9, 9).unwrap(), BLUE);
}

#[test]
fn draw_path_blends_translucent_paint_and_clips() {
    let mut img = Image::with_fill(4, 4, BLUE).unwrap();
    let half_red = Bgra32::from_rgba8(255, 0, 0, 128);
    draw_path(
        &mut img,
        half_red,
        Point::new(-5, -5),
        &[Point::new(20, -5), Point::new(20, 20), Point::new(-5, 20)],
    )
    .unwrap();
    for px in img.data().unwrap() {
        assert_eq!(px.a, 255);
        assert!(px.r > 100 && px.b > 100, "{px:?}");
    }
}

#[test]
fn draw_path_without_points_or_on_disposed_image() {
    let mut img = Image::with_fill(3, 3, BLUE).unwrap();
    draw_path(&mut img, ORANGE, Point::new(1, 1), &[]).unwrap();
    assert!(img.data().unwrap().iter().all(|p| *p == BLUE));

    img.dispose();
    let err = draw_path(&mut img, ORANGE, Point::ZERO, &[Point::new(2, 2)]).unwrap_err();
    assert!(err.is_disposed());
}

#[test]
fn empty_text_is_a_single_transparent_pixel() {
    let img = VelloRasterizer::new()
        .text("", &FontSpec::new(Vec::new(), 12.0), ORANGE)
        .unwrap();
    assert_eq!((img.width().unwrap(), img.height().unwrap()), (1, 1));
    assert_eq!(*img.pixel(0, 0).unwrap(), Bgra32::TRANSPARENT);
}

#[test]
fn text_requires_positive_size_and_a_real_font() {
    let mut r = VelloRasterizer::new();
    assert!(matches!(
        r.text("hi", &FontSpec::new(Vec::new(), 0.0), ORANGE),
        Err(DrawingError::Validation(_))
    ));
    assert!(matches!(
        r.text("hi", &FontSpec::new(b"not a font".to_vec(), 12.0), ORANGE),
        Err(DrawingError::Validation(_))
    ));
}

#[test]
fn text_canvas_is_the_layout_box() {
    let mut r = VelloRasterizer::new();
    let font = mono_font(24.0);
    let layout = r.layout("Hello", &font, ORANGE).unwrap();
    let img = r.text("Hello", &font, ORANGE).unwrap();
    assert_eq!(img.width().unwrap(), layout.width().ceil() as u32);
    assert_eq!(img.height().unwrap(), layout.height().ceil() as u32);
    assert!(img.width().unwrap() > img.height().unwrap());
}

#[test]
fn text_inks_every_glyph_of_the_run() {
    let img = VelloRasterizer::new()
        .text("Hello", &mono_font(24.0), ORANGE)
        .unwrap();
    let w = img.width().unwrap();
    let columns = inked_columns(&img);
    assert!(!columns.is_empty());
    assert!(columns[0] < w / 5, "first ink at {}", columns[0]);
    assert!(columns[columns.len() - 1] > w * 4 / 5);
    assert!(img.data().unwrap().iter().any(|p| *p == ORANGE));
    assert!(
        img.data()
            .unwrap()
            .iter()
            .filter(|p| p.a == 255)
            .all(|p| *p == ORANGE)
    );
}

#[test]
fn same_font_bytes_reuse_the_registered_family() {
    let mut r = VelloRasterizer::new();
    let font = mono_font(18.0);
    let first = r.text("abc", &font, ORANGE).unwrap();
    let family = r.last_font.as_ref().map(|(_, name)| name.clone()).unwrap();
    assert!(family.contains("DejaVu"), "{family}");

    let second = r.text("abc", &font, ORANGE).unwrap();
    assert_eq!(r.family_for(&font.bytes).unwrap(), family);
    assert_eq!(first.data().unwrap(), second.data().unwrap());
}

#[test]
fn brush_round_trips_through_json() {
    let brush = Brush::stroke(ORANGE, 3.5);
    let json = serde_json::to_string(&brush).unwrap();
    assert!(json.contains("\"style\":\"stroke\""));
    let back: Brush = serde_json::from_str(&json).unwrap();
    assert_eq!(back, brush);
}
