use super::*;

fn perspective_quad() -> Quad {
    Quad::new(
        Point::new(210.0, 180.0),
        Point::new(820.0, 230.0),
        Point::new(800.0, 790.0),
        Point::new(190.0, 760.0),
    )
}

#[test]
fn rect_corners_round_trip_through_solve() {
    let quad = perspective_quad();
    let (w, h) = (600.0, 560.0);
    let hm = Homography::rect_to_quad(w, h, &quad).unwrap();

    let src = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)];
    for (s, expect) in src.iter().zip(quad.points()) {
        let (x, y) = hm.apply(s.0, s.1).unwrap();
        assert!((x - expect.x).abs() < 1e-6, "x: {x} vs {}", expect.x);
        assert!((y - expect.y).abs() < 1e-6, "y: {y} vs {}", expect.y);
    }
}

#[test]
fn axis_aligned_quad_yields_affine_mapping() {
    let quad = Quad::new(
        Point::new(200.0, 200.0),
        Point::new(800.0, 200.0),
        Point::new(800.0, 800.0),
        Point::new(200.0, 800.0),
    );
    let hm = Homography::rect_to_quad(600.0, 600.0, &quad).unwrap();
    let (x, y) = hm.apply(300.0, 300.0).unwrap();
    assert!((x - 500.0).abs() < 1e-9);
    assert!((y - 500.0).abs() < 1e-9);
}

#[test]
fn duplicate_corner_is_degenerate() {
    let quad = Quad::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(50.0, 50.0),
    );
    let err = Homography::rect_to_quad(100.0, 100.0, &quad).unwrap_err();
    assert_eq!(err.code(), "degenerate_geometry");
}

#[test]
fn collinear_triple_is_degenerate() {
    let quad = Quad::new(
        Point::new(0.0, 0.0),
        Point::new(50.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(0.0, 100.0),
    );
    assert!(Homography::rect_to_quad(100.0, 100.0, &quad).is_err());
}

#[test]
fn inverse_composes_to_identity() {
    let quad = perspective_quad();
    let hm = Homography::rect_to_quad(600.0, 560.0, &quad).unwrap();
    let inv = hm.invert().unwrap();

    for &(x, y) in &[(12.0, 34.0), (300.0, 280.0), (599.0, 1.0)] {
        let (u, v) = hm.apply(x, y).unwrap();
        let (bx, by) = inv.apply(u, v).unwrap();
        assert!((bx - x).abs() < 1e-6);
        assert!((by - y).abs() < 1e-6);
    }
}
