use super::*;
use crate::foundation::core::Bgra8;

fn pattern(w: u32, h: u32) -> Image {
    let data = (0..w * h)
        .map(|i| Bgra8::new((i * 7) as u8, (i * 13) as u8, (i * 31) as u8, 255 - (i % 5) as u8))
        .collect();
    Image::from_pixels(data, w, h).unwrap()
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Quad {
    Quad::new([
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

#[test]
fn scan_region_clips_to_raster() {
    let r = ScanRegion::clipped(-5, -1, 100, 3, 10, 8);
    assert_eq!(
        r,
        ScanRegion {
            x0: 0,
            y0: 0,
            x1: 10,
            y1: 3
        }
    );
    assert_eq!(r.area(), 30);

    let inverted = ScanRegion::clipped(7, 7, 2, 2, 10, 10);
    assert!(inverted.is_empty());
    assert_eq!(inverted.area(), 0);

    let outside = ScanRegion::clipped(20, 20, 30, 30, 10, 10);
    assert!(outside.is_empty());
}

#[test]
fn draw_params_defaults_and_builders() {
    let p = DrawParams::default();
    assert_eq!((p.offset_x, p.offset_y, p.zoom, p.alpha, p.rotation_deg), (0.0, 0.0, 1.0, 1.0, 0.0));
    let p = p
        .with_offset(3.0, -2.0)
        .with_zoom(2.0)
        .with_alpha(0.5)
        .with_rotation_deg(90.0);
    assert_eq!((p.offset_x, p.offset_y, p.zoom, p.alpha, p.rotation_deg), (3.0, -2.0, 2.0, 0.5, 90.0));
}

#[test]
fn draw_params_fill_missing_fields_from_json() {
    let p: DrawParams = serde_json::from_str(r#"{"zoom": 2.5, "offset_y": 4}"#).unwrap();
    assert_eq!(p, DrawParams::default().with_zoom(2.5).with_offset(0.0, 4.0));
}

#[test]
fn perspective_params_default_alpha_from_json() {
    let json = r#"{
        "xy": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 1, "y": 1}, {"x": 0, "y": 1}],
        "uv": [{"x": 0, "y": 0}, {"x": 2, "y": 0}, {"x": 2, "y": 2}, {"x": 0, "y": 2}]
    }"#;
    let p: PerspectiveParams = serde_json::from_str(json).unwrap();
    assert_eq!(p.alpha, 1.0);
    assert_eq!(p.uv, square(0.0, 0.0, 2.0, 2.0));
}

#[test]
fn affine_region_of_centered_source() {
    let dest = Image::new(10, 10);
    let m = DrawParams::default().transform(2, 2, 10, 10);
    assert_eq!(
        affine_region(&m, 2, 2, &dest),
        ScanRegion {
            x0: 4,
            y0: 4,
            x1: 6,
            y1: 6
        }
    );
}

#[test]
fn identity_draw_reproduces_source() {
    let src = pattern(5, 4);
    for resample in [Resample::Nearest, Resample::Bilinear] {
        let mut dest = Image::new(5, 4);
        let stats = draw_affine(
            &mut dest,
            &src.view(),
            CompositeOp::Copy,
            BlendMode::Normal,
            resample,
            &DrawParams::default(),
        );
        assert_eq!(dest, src, "{resample:?}");
        assert_eq!(stats.pixels_written, 20);
    }
}

#[test]
fn centered_draw_leaves_outside_untouched() {
    let bg = Bgra8::opaque(1, 2, 3);
    let mut dest = Image::new(10, 10);
    dest.fill(bg);
    let src = pattern(2, 2);
    let stats = draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &DrawParams::default(),
    );
    assert_eq!(stats.pixels_visited, 4);
    assert_eq!(dest.pixel(4, 4), src.pixel(0, 0));
    assert_eq!(dest.pixel(5, 5), src.pixel(1, 1));
    assert_eq!(dest.pixel(3, 4), bg);
    assert_eq!(dest.pixel(6, 6), bg);
}

#[test]
fn offset_shifts_the_placement() {
    let mut dest = Image::new(10, 10);
    let src = pattern(2, 2);
    draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &DrawParams::default().with_offset(2.0, -3.0),
    );
    assert_eq!(dest.pixel(6, 1), src.pixel(0, 0));
    assert_eq!(dest.pixel(7, 2), src.pixel(1, 1));
    assert_eq!(dest.pixel(4, 4), Bgra8::TRANSPARENT);
}

#[test]
fn zoom_doubles_the_footprint() {
    let mut dest = Image::new(8, 8);
    let src = pattern(2, 2);
    let stats = draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &DrawParams::default().with_zoom(2.0),
    );
    assert_eq!(stats.pixels_visited, 16);
    // (2, 2) maps back to (0, 0), (5, 5) to (1.5, 1.5) which rounds out of the source.
    assert_eq!(dest.pixel(2, 2), src.pixel(0, 0));
    assert_eq!(dest.pixel(4, 4), src.pixel(1, 1));
    assert_eq!(dest.pixel(5, 5), Bgra8::TRANSPARENT);
}

#[test]
fn half_turn_maps_around_the_center() {
    let mut dest = Image::new(2, 2);
    dest.fill(Bgra8::opaque(9, 9, 9));
    let src = pattern(2, 2);
    draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &DrawParams::default().with_rotation_deg(180.0),
    );
    assert_eq!(dest.pixel(1, 1), src.pixel(1, 1));
    assert_eq!(dest.pixel(0, 0), Bgra8::TRANSPARENT);
}

#[test]
fn negative_zoom_is_noop() {
    let mut dest = pattern(6, 6);
    let before = dest.clone();
    let src = pattern(3, 3);
    let stats = draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Bilinear,
        &DrawParams::default().with_zoom(-1.0),
    );
    assert_eq!(dest, before);
    assert_eq!(stats, DrawStats::default());
}

#[test]
fn zero_zoom_draws_nothing() {
    let mut dest = pattern(6, 6);
    let before = dest.clone();
    let src = pattern(3, 3);
    let stats = draw_affine(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Bilinear,
        &DrawParams::default().with_zoom(0.0),
    );
    assert_eq!(dest, before);
    assert_eq!(stats.pixels_written, 0);
}

#[test]
fn quad_region_floors_and_extends() {
    let dest = Image::new(10, 10);
    let r = quad_region(&square(1.5, 2.2, 4.7, 6.0), &dest);
    assert_eq!(
        r,
        ScanRegion {
            x0: 1,
            y0: 2,
            x1: 5,
            y1: 7
        }
    );
}

#[test]
fn perspective_rectangle_fills_interior_only() {
    let bg = Bgra8::opaque(50, 60, 70);
    let mut dest = Image::new(4, 4);
    dest.fill(bg);
    let src = pattern(4, 4);
    let params = PerspectiveParams::new(square(-2.0, -2.0, 2.0, 2.0), square(0.0, 0.0, 4.0, 4.0));
    let stats = draw_perspective(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &params,
    );
    assert_eq!(stats.pixels_visited, 16);
    assert_eq!(stats.pixels_written, 9);
    for y in 1..4 {
        for x in 1..4 {
            assert_eq!(dest.pixel(x, y), src.pixel(x, y), "({x}, {y})");
        }
    }
    assert_eq!(dest.pixel(0, 0), bg);
    assert_eq!(dest.pixel(2, 0), bg);
    assert_eq!(dest.pixel(0, 3), bg);
}

#[test]
fn perspective_accepts_either_winding() {
    let src = pattern(4, 4);
    let cw = square(-2.0, -2.0, 2.0, 2.0);
    let [a, b, c, d] = *cw.corners();
    let ccw = Quad::new([a, d, c, b]);
    let uv = square(0.0, 0.0, 4.0, 4.0);
    let [ua, ub, uc, ud] = *uv.corners();
    let uv_ccw = Quad::new([ua, ud, uc, ub]);

    let mut first = Image::new(4, 4);
    let mut second = Image::new(4, 4);
    for (dest, params) in [
        (&mut first, PerspectiveParams::new(cw, uv)),
        (&mut second, PerspectiveParams::new(ccw, uv_ccw)),
    ] {
        draw_perspective(
            dest,
            &src.view(),
            CompositeOp::Copy,
            BlendMode::Normal,
            Resample::Nearest,
            &params,
        );
    }
    assert_eq!(first, second);
}

#[test]
fn degenerate_quad_draws_nothing() {
    let mut dest = pattern(8, 8);
    let before = dest.clone();
    let src = pattern(4, 4);
    let line = Quad::new([
        Point::new(-3.0, 0.0),
        Point::new(-1.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(3.0, 0.0),
    ]);
    let stats = draw_perspective(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Bilinear,
        &PerspectiveParams::new(line, square(0.0, 0.0, 4.0, 4.0)),
    );
    assert_eq!(stats.pixels_written, 0);
    assert_eq!(dest, before);
}

#[test]
fn perspective_quad_off_raster_is_empty() {
    let mut dest = Image::new(4, 4);
    let src = pattern(2, 2);
    let stats = draw_perspective(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &PerspectiveParams::new(square(50.0, 50.0, 60.0, 60.0), square(0.0, 0.0, 2.0, 2.0)),
    );
    assert_eq!(stats, DrawStats::default());
    assert_eq!(dest, Image::new(4, 4));
}

#[test]
fn quad_region_saturates_huge_bounds() {
    let dest = Image::new(8, 8);
    let full = ScanRegion {
        x0: 0,
        y0: 0,
        x1: 8,
        y1: 8,
    };
    assert_eq!(quad_region(&square(-1e19, -1e19, 1e19, 1e19), &dest), full);
    assert_eq!(
        quad_region(
            &square(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::INFINITY),
            &dest
        ),
        full
    );
}

#[test]
fn perspective_quad_beyond_i64_covers_raster() {
    let src = pattern(4, 4);
    let uv = square(0.0, 0.0, 4.0, 4.0);

    let mut dest = Image::new(8, 8);
    let stats = draw_perspective(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &PerspectiveParams::new(square(-1e19, -1e19, 1e19, 1e19), uv),
    );
    assert_eq!(stats.pixels_visited, 64);
    assert_eq!(stats.pixels_written, 64);

    let mut dest = Image::new(8, 8);
    let infinite = Quad::new([
        Point::new(f64::NEG_INFINITY, -4.0),
        Point::new(4.0, -4.0),
        Point::new(4.0, 4.0),
        Point::new(-4.0, 4.0),
    ]);
    let stats = draw_perspective(
        &mut dest,
        &src.view(),
        CompositeOp::Copy,
        BlendMode::Normal,
        Resample::Nearest,
        &PerspectiveParams::new(infinite, uv),
    );
    assert_eq!(stats.pixels_visited, 64);
}
