use super::*;
use crate::raster::image::Image;

fn checker() -> Image {
    let data = vec![
        Bgra8::new(0, 0, 0, 255),
        Bgra8::new(100, 200, 50, 255),
        Bgra8::new(200, 100, 250, 128),
        Bgra8::new(40, 80, 120, 0),
    ];
    Image::from_pixels(data, 2, 2).unwrap()
}

#[test]
fn exact_integer_coordinates_return_stored_pixels() {
    let img = checker();
    let view = img.view();
    for y in 0..2u32 {
        for x in 0..2u32 {
            let p = Point::new(f64::from(x), f64::from(y));
            assert_eq!(sample_nearest(&view, p), img.pixel(x, y));
            assert_eq!(sample_bilinear(&view, p), img.pixel(x, y));
        }
    }
}

#[test]
fn nearest_rounds_half_up() {
    let img = checker();
    let view = img.view();
    assert_eq!(sample_nearest(&view, Point::new(0.49, 0.0)), img.pixel(0, 0));
    assert_eq!(sample_nearest(&view, Point::new(0.5, 0.0)), img.pixel(1, 0));
    assert_eq!(sample_nearest(&view, Point::new(1.4, 1.2)), img.pixel(1, 1));
    assert_eq!(sample_nearest(&view, Point::new(1.5, 0.0)), Bgra8::TRANSPARENT);
}

#[test]
fn out_of_range_and_non_finite_are_transparent() {
    let img = checker();
    let view = img.view();
    for p in [
        Point::new(-2.0, 0.0),
        Point::new(0.0, 5.0),
        Point::new(f64::NAN, 0.0),
        Point::new(0.0, f64::INFINITY),
        Point::new(f64::NEG_INFINITY, f64::NAN),
    ] {
        assert_eq!(sample_nearest(&view, p), Bgra8::TRANSPARENT, "{p:?}");
        assert_eq!(sample_bilinear(&view, p), Bgra8::TRANSPARENT, "{p:?}");
    }
}

#[test]
fn bilinear_midpoint_averages_neighbours() {
    let img = checker();
    let view = img.view();
    let px = sample_bilinear(&view, Point::new(0.5, 0.0));
    assert_eq!(px, Bgra8::new(50, 100, 25, 255));

    let px = sample_bilinear(&view, Point::new(0.5, 0.5));
    assert_eq!(px.b, ((0.0 + 100.0 + 200.0 + 40.0) / 4.0) as u8);
    assert_eq!(px.a, ((255.0 + 255.0 + 128.0) / 4.0) as u8);
}

#[test]
fn bilinear_fades_to_transparent_past_the_edge() {
    let img = Image::from_pixels(vec![Bgra8::opaque(200, 200, 200)], 1, 1).unwrap();
    let view = img.view();
    let px = sample_bilinear(&view, Point::new(0.5, 0.0));
    assert_eq!(px, Bgra8::new(100, 100, 100, 127));
    let px = sample_bilinear(&view, Point::new(-0.25, 0.0));
    assert_eq!(px.a, 191);
}

#[test]
fn resample_ids() {
    assert_eq!(Resample::from_id(0), Some(Resample::Nearest));
    assert_eq!(Resample::from_id(1), Some(Resample::Bilinear));
    assert_eq!(Resample::from_id(2), None);
    assert_eq!(Resample::default(), Resample::Bilinear);
    assert_eq!(Resample::Nearest.id(), 0);
}
