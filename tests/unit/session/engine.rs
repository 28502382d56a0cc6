use super::*;
use crate::foundation::core::Point;
use crate::transform::quad::Quad;

fn solid(w: u32, h: u32, px: Bgra8) -> Image {
    let mut img = Image::new(w, h);
    img.fill(px);
    img
}

#[test]
fn starts_with_default_modes_and_empty_destination() {
    let e = Engine::new();
    assert_eq!(e.composite_mode(), CompositeOp::SourceOver);
    assert_eq!(e.blend_mode(), BlendMode::Normal);
    assert_eq!(e.resample_mode(), Resample::Bilinear);
    assert_eq!(e.destination().width(), 0);
    assert_eq!(e.destination().height(), 0);
    assert!(e.destination().is_empty());
}

#[test]
fn with_opts_sets_initial_modes() {
    let opts = EngineOpts::default()
        .with_blend(BlendMode::Screen)
        .with_composite(CompositeOp::Xor)
        .with_resample(Resample::Nearest);
    let e = Engine::with_opts(opts);
    assert_eq!(e.opts(), opts);
}

#[test]
fn unknown_composite_id_keeps_current() {
    let mut e = Engine::new();
    e.set_composite_mode_id(1);
    assert_eq!(e.composite_mode(), CompositeOp::Copy);
    e.set_composite_mode_id(13);
    assert_eq!(e.composite_mode(), CompositeOp::Copy);
    e.set_composite_mode_id(-1);
    assert_eq!(e.composite_mode(), CompositeOp::Copy);
    e.set_composite_mode_id(12);
    assert_eq!(e.composite_mode(), CompositeOp::Lighter);
}

#[test]
fn unknown_blend_selector_falls_back_to_normal() {
    let mut e = Engine::new();
    e.set_blend_mode_id(3);
    assert_eq!(e.blend_mode(), BlendMode::Multiply);
    e.set_blend_mode_id(999);
    assert_eq!(e.blend_mode(), BlendMode::Normal);

    e.set_blend_mode_name("NOT IMPLICATION");
    assert_eq!(e.blend_mode(), BlendMode::NotImplication);
    e.set_blend_mode_name("multiply");
    assert_eq!(e.blend_mode(), BlendMode::Normal);
}

#[test]
fn unknown_resample_id_keeps_current() {
    let mut e = Engine::new();
    e.set_resample_mode_id(0);
    assert_eq!(e.resample_mode(), Resample::Nearest);
    e.set_resample_mode_id(2);
    assert_eq!(e.resample_mode(), Resample::Nearest);
    e.set_resample_mode(Resample::Bilinear);
    assert_eq!(e.resample_mode(), Resample::Bilinear);
}

#[test]
fn install_destination_validates_length() {
    let mut e = Engine::new();
    assert!(e.install_destination(vec![Bgra8::TRANSPARENT; 5], 2, 3).is_err());
    e.install_destination(vec![Bgra8::opaque(1, 2, 3); 6], 2, 3)
        .unwrap();
    assert_eq!(e.destination().width(), 2);
    assert_eq!(e.destination().pixel(1, 2), Bgra8::opaque(1, 2, 3));
}

#[test]
fn clear_keeps_size_and_clear_to_resizes() {
    let mut e = Engine::new();
    e.install_image(solid(3, 2, Bgra8::opaque(9, 9, 9)));
    e.clear();
    assert_eq!(e.destination(), &Image::new(3, 2));

    e.clear_to(4, 7);
    assert_eq!(e.destination().width(), 4);
    assert_eq!(e.destination().height(), 7);
    assert!(e.destination().pixels().iter().all(|p| *p == Bgra8::TRANSPARENT));
}

#[test]
fn try_clear_to_keeps_destination_on_failure() {
    let mut e = Engine::new();
    e.install_image(solid(3, 2, Bgra8::opaque(9, 9, 9)));
    let before = e.destination().clone();
    assert!(e.try_clear_to(u32::MAX, u32::MAX).is_err());
    assert_eq!(e.destination(), &before);

    e.try_clear_to(5, 1).unwrap();
    assert_eq!(e.destination(), &Image::new(5, 1));
}

#[test]
fn draw_uses_active_modes() {
    let mut e = Engine::new();
    e.install_image(solid(4, 4, Bgra8::opaque(200, 100, 50)));
    e.set_blend_mode(BlendMode::Darken);
    e.set_resample_mode(Resample::Nearest);
    let src = solid(4, 4, Bgra8::opaque(100, 150, 50));
    let stats = e.draw(&src.view(), &DrawParams::default());
    assert_eq!(stats.pixels_written, 16);
    assert!(
        e.destination()
            .pixels()
            .iter()
            .all(|p| *p == Bgra8::opaque(100, 100, 50))
    );
}

#[test]
fn draw_pixels_rejects_short_buffer() {
    let mut e = Engine::new();
    e.clear_to(2, 2);
    let short = [Bgra8::TRANSPARENT; 3];
    assert!(e.draw_pixels(&short, 2, 2, &DrawParams::default()).is_err());
    let full = [Bgra8::opaque(1, 1, 1); 4];
    let stats = e.draw_pixels(&full, 2, 2, &DrawParams::default()).unwrap();
    assert_eq!(stats.pixels_written, 4);
}

#[test]
fn draw_on_empty_destination_is_harmless() {
    let mut e = Engine::new();
    let src = solid(3, 3, Bgra8::opaque(1, 2, 3));
    assert_eq!(e.draw(&src.view(), &DrawParams::default()), DrawStats::default());
}

#[test]
fn perspective_draw_goes_through_engine() {
    let mut e = Engine::new();
    e.clear_to(6, 6);
    e.set_composite_mode(CompositeOp::Copy);
    e.set_resample_mode(Resample::Nearest);
    let src = solid(2, 2, Bgra8::opaque(10, 20, 30));
    let xy = Quad::new([
        Point::new(-2.0, -2.0),
        Point::new(2.0, -2.0),
        Point::new(2.0, 2.0),
        Point::new(-2.0, 2.0),
    ]);
    let uv = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ]);
    let stats = e.draw_perspective(&src.view(), &PerspectiveParams::new(xy, uv));
    assert_eq!(stats.pixels_written, 9);
    assert_eq!(e.destination().pixel(3, 3), Bgra8::opaque(10, 20, 30));
    assert_eq!(e.destination().pixel(1, 1), Bgra8::TRANSPARENT);
}
