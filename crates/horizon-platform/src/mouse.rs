//! Pointer coordinate translation.
//!
//! Maps window pixel coordinates to the attractor's planar world position.

/// Translate a pixel position to world-space `(x, y)` inside `[-limit, limit]`.
///
/// `x = 2·limit·(px / width) − limit`, and likewise for `y`. Window y grows
/// downward and is not flipped. Zero dimensions are treated as 1.
pub fn pointer_to_world(
    pixel_x: f64,
    pixel_y: f64,
    width: u32,
    height: u32,
    limit: f32,
) -> [f32; 2] {
    let span = 2.0 * limit;
    let x = span * (pixel_x as f32 / width.max(1) as f32) - limit;
    let y = span * (pixel_y as f32 / height.max(1) as f32) - limit;
    [x, y]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_maps_to_origin() {
        let [x, y] = pointer_to_world(350.0, 350.0, 700, 700, 15.0);
        assert!(x.abs() < 1e-5);
        assert!(y.abs() < 1e-5);
    }

    #[test]
    fn corners_map_to_limits() {
        assert_eq!(pointer_to_world(0.0, 0.0, 700, 700, 15.0), [-15.0, -15.0]);
        assert_eq!(pointer_to_world(700.0, 700.0, 700, 700, 15.0), [15.0, 15.0]);
    }

    #[test]
    fn non_square_window() {
        let [x, y] = pointer_to_world(200.0, 150.0, 800, 600, 15.0);
        assert!((x - (30.0 * 0.25 - 15.0)).abs() < 1e-5);
        assert!((y - (30.0 * 0.25 - 15.0)).abs() < 1e-5);
    }

    #[test]
    fn zero_size_does_not_divide_by_zero() {
        let [x, y] = pointer_to_world(0.5, 0.5, 0, 0, 15.0);
        assert!(x.is_finite());
        assert!(y.is_finite());
    }
}
