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

fn at(mask: &[u8], width: u32, x: u32, y: u32) -> u8 {
    mask[(y * width + x) as usize]
}

#[test]
fn unfeathered_mask_is_strictly_binary() {
    let quad = square_quad(20.0, 60.0);
    let mask = build_mask(100, 100, &quad, 0.0);
    assert!(mask.iter().all(|&v| v == 0 || v == 255));

    assert_eq!(at(&mask, 100, 50, 50), 255);
    assert_eq!(at(&mask, 100, 20, 50), 255);
    assert_eq!(at(&mask, 100, 79, 50), 255);
    assert_eq!(at(&mask, 100, 80, 50), 0);
    assert_eq!(at(&mask, 100, 19, 50), 0);
    assert_eq!(at(&mask, 100, 5, 5), 0);
}

#[test]
fn sub_pixel_feather_rounds_to_identity() {
    let quad = square_quad(20.0, 60.0);
    assert_eq!(build_mask(100, 100, &quad, 0.4), build_mask(100, 100, &quad, 0.0));
}

#[test]
fn feather_softens_only_the_boundary_band() {
    let quad = square_quad(20.0, 60.0);
    let mask = build_mask(100, 100, &quad, 6.0);

    // Deep inside and far outside are untouched.
    assert_eq!(at(&mask, 100, 50, 50), 255);
    assert_eq!(at(&mask, 100, 5, 50), 0);
    // The edge itself is softened.
    let edge = at(&mask, 100, 20, 50);
    assert!(edge > 0 && edge < 255, "edge value {edge}");

    // Every intermediate value sits within the kernel's reach of the
    // unblurred boundary.
    let reach = 3u32; // taps 7 -> radius 3
    for y in 0..100u32 {
        for x in 0..100u32 {
            let v = at(&mask, 100, x, y);
            if v == 0 || v == 255 {
                continue;
            }
            let near_x = x + reach >= 20 && x < 80 + reach;
            let near_y = y + reach >= 20 && y < 80 + reach;
            let interior_x = x >= 20 + reach && x < 80 - reach;
            let interior_y = y >= 20 + reach && y < 80 - reach;
            assert!(
                near_x && near_y && !(interior_x && interior_y),
                "intermediate value off the boundary band at ({x},{y})"
            );
        }
    }
}

#[test]
fn feather_band_width_is_monotonic() {
    let quad = square_quad(30.0, 40.0);
    let soft = |feather: f32| {
        build_mask(100, 100, &quad, feather)
            .iter()
            .filter(|&&v| v > 0 && v < 255)
            .count()
    };
    let narrow = soft(5.0);
    let wide = soft(15.0);
    assert!(narrow > 0);
    assert!(wide > narrow, "narrow {narrow}, wide {wide}");
}

#[test]
fn blur_preserves_total_coverage_roughly() {
    // A feather redistributes mask mass but must not grow or shrink it much.
    let quad = square_quad(30.0, 40.0);
    let hard: u64 = build_mask(100, 100, &quad, 0.0).iter().map(|&v| u64::from(v)).sum();
    let soft: u64 = build_mask(100, 100, &quad, 9.0).iter().map(|&v| u64::from(v)).sum();
    let diff = hard.abs_diff(soft);
    assert!(diff * 50 < hard, "hard {hard}, soft {soft}");
}
