//! Easing curves over normalized progress.

/// Linear interpolation from `from` to `to` at `value`.
#[inline]
pub fn map(from: f32, to: f32, value: f32) -> f32 {
    from + (to - from) * value
}

/// Cubic ease-in-out: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out_cubic(value: f32) -> f32 {
    if value < 0.5 {
        4.0 * value * value * value
    } else {
        1.0 - (-2.0 * value + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_symmetric_around_midpoint() {
        let a = ease_in_out_cubic(0.25);
        let b = ease_in_out_cubic(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!(a < 0.25);
    }

    #[test]
    fn test_map() {
        assert_eq!(map(10.0, 20.0, 0.0), 10.0);
        assert_eq!(map(10.0, 20.0, 0.5), 15.0);
        assert_eq!(map(10.0, 20.0, 1.0), 20.0);
        assert_eq!(map(20.0, 10.0, 0.25), 17.5);
    }
}
