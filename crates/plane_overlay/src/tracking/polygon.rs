//! Boundary polygon helpers
//!
//! Boundaries are ordered (x, z) points in the plane's local frame, with the
//! plane center at the origin.

use crate::foundation::math::Vec2;

/// Even-odd point-in-polygon test
pub fn contains_point(polygon: &[Vec2], point: Vec2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether every edge turns the same way around the plane center, going
/// around it exactly once
///
/// This holds when the center lies strictly inside the polygon's kernel,
/// which is what the inset ring and the zig-zag interior strip need to stay
/// free of self-intersections.
pub fn is_star_shaped_about_center(polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut turn = 0.0_f32;
    let mut swept = 0.0_f32;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let cross = a.x * b.y - a.y * b.x;
        if cross == 0.0 || (turn != 0.0 && cross.signum() != turn) {
            return false;
        }
        turn = cross.signum();
        swept += cross.atan2(a.dot(&b));
    }

    // Same-sign edges sweep a whole number of turns; anything past one revisits angles
    swept.abs() < 3.0 * std::f32::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn test_contains_point_square() {
        let polygon = square();
        assert!(contains_point(&polygon, Vec2::new(0.0, 0.0)));
        assert!(contains_point(&polygon, Vec2::new(0.9, -0.9)));
        assert!(!contains_point(&polygon, Vec2::new(1.5, 0.0)));
        assert!(!contains_point(&polygon, Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn test_contains_point_concave() {
        // U shape opening towards +z
        let polygon = vec![
            Vec2::new(-2.0, -1.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(-1.0, 2.0),
            Vec2::new(-2.0, 2.0),
        ];
        assert!(contains_point(&polygon, Vec2::new(1.5, 1.0)));
        assert!(!contains_point(&polygon, Vec2::new(0.0, 1.0)));
        assert!(contains_point(&polygon, Vec2::new(0.0, -0.5)));
    }

    #[test]
    fn test_degenerate_polygons() {
        assert!(!contains_point(&[], Vec2::zeros()));
        assert!(!contains_point(&[Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)], Vec2::zeros()));
        assert!(!is_star_shaped_about_center(&[Vec2::new(1.0, 0.0)]));
    }

    #[test]
    fn test_star_shape_detection() {
        assert!(is_star_shaped_about_center(&square()));

        let mut reversed = square();
        reversed.reverse();
        assert!(is_star_shaped_about_center(&reversed));

        // Center outside the polygon
        let offset: Vec<Vec2> = square().iter().map(|p| p + Vec2::new(3.0, 0.0)).collect();
        assert!(!is_star_shaped_about_center(&offset));
    }

    #[test]
    fn test_boundary_winding_twice_is_rejected() {
        // Pentagram: unit-circle points visited every other vertex
        let pentagram: Vec<Vec2> = [0, 2, 4, 1, 3]
            .iter()
            .map(|&k| {
                let angle = k as f32 * std::f32::consts::TAU / 5.0;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();
        assert!(!is_star_shaped_about_center(&pentagram));

        let pentagon: Vec<Vec2> = (0..5)
            .map(|k| {
                let angle = k as f32 * std::f32::consts::TAU / 5.0;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();
        assert!(is_star_shaped_about_center(&pentagon));
    }
}
