use super::*;
use crate::foundation::core::Point;

fn square_quad(origin: f64, side: f64) -> Quad {
    Quad::new(
        Point::new(origin, origin),
        Point::new(origin + side, origin),
        Point::new(origin + side, origin + side),
        Point::new(origin, origin + side),
    )
}

#[test]
fn cover_fills_the_tighter_axis() {
    // Square source into a wide target: width is the tighter axis.
    assert_eq!(fit_size(512, 512, 600, 300, FitMode::Cover), (600, 600));
    // Tall source into a wide target.
    assert_eq!(fit_size(100, 200, 400, 200, FitMode::Cover), (400, 800));
}

#[test]
fn contain_fits_entirely_inside() {
    assert_eq!(fit_size(512, 512, 600, 300, FitMode::Contain), (300, 300));
    assert_eq!(fit_size(100, 200, 400, 200, FitMode::Contain), (100, 200));
}

#[test]
fn matching_aspect_ratio_is_exact_for_both_modes() {
    assert_eq!(fit_size(100, 100, 200, 200, FitMode::Cover), (200, 200));
    assert_eq!(fit_size(100, 100, 200, 200, FitMode::Contain), (200, 200));
}

#[test]
fn resolve_centers_within_margin_band() {
    let quad = square_quad(0.0, 100.0);
    let p = resolve_placement(50, 100, &quad, 10, FitMode::Contain).unwrap();
    assert_eq!((p.canvas_w, p.canvas_h), (100, 100));
    // Available area is 80x80; a 50x100 source contains to 40x80.
    assert_eq!((p.fitted_w, p.fitted_h), (40, 80));
    assert_eq!((p.offset_x, p.offset_y), (30, 10));
}

#[test]
fn resolve_cover_overflow_pastes_from_origin() {
    let quad = square_quad(0.0, 100.0);
    let p = resolve_placement(200, 100, &quad, 0, FitMode::Cover).unwrap();
    assert_eq!((p.fitted_w, p.fitted_h), (200, 100));
    assert_eq!(p.offset_x, 0);
    assert_eq!(p.offset_y, 0);
}

#[test]
fn resolve_matches_reference_square_scenario() {
    let quad = square_quad(200.0, 600.0);
    let p = resolve_placement(512, 512, &quad, 0, FitMode::Cover).unwrap();
    assert_eq!((p.canvas_w, p.canvas_h), (600, 600));
    assert_eq!((p.fitted_w, p.fitted_h), (600, 600));
    assert_eq!((p.offset_x, p.offset_y), (0, 0));

    // The placement transform carries the opening's offset.
    let (x, y) = p.homography.apply(0.0, 0.0).unwrap();
    assert!((x - 200.0).abs() < 1e-9);
    assert!((y - 200.0).abs() < 1e-9);
}

#[test]
fn sub_two_pixel_destination_is_degenerate() {
    let quad = square_quad(0.0, 1.0);
    let err = resolve_placement(100, 100, &quad, 0, FitMode::Contain).unwrap_err();
    assert_eq!(err.code(), "degenerate_geometry");
}

#[test]
fn degenerate_corners_never_yield_a_placement() {
    let quad = Quad::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(50.0, 50.0),
    );
    let err = resolve_placement(100, 100, &quad, 0, FitMode::Contain).unwrap_err();
    assert_eq!(err.code(), "degenerate_geometry");
}

#[test]
fn zero_sized_artwork_is_invalid() {
    let quad = square_quad(0.0, 100.0);
    let err = resolve_placement(0, 100, &quad, 0, FitMode::Contain).unwrap_err();
    assert_eq!(err.code(), "artwork_invalid");
}
