//! Angle arithmetic over the circular degree domain (-180, 180]
//!
//! Headings wrap at the ±180 seam: an angle that overshoots past +180
//! reappears negative, measured from -180, and symmetrically for
//! undershoot. All stored or compared headings must first pass through
//! [`normalize_degrees`].

/// Wrap any real-valued degree angle into (-180, 180]
///
/// Idempotent. The boundary itself belongs to the positive side:
/// `normalize_degrees(180.0) == 180.0` and `normalize_degrees(-180.0) == 180.0`.
///
/// # Example
///
/// ```rust
/// use zigzag_library::algorithms::angles::normalize_degrees;
///
/// assert_eq!(normalize_degrees(181.0), -179.0);
/// assert_eq!(normalize_degrees(-181.0), 179.0);
/// ```
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Magnitude of the difference between two already-normalized angles
///
/// This is a plain `|a - b|`, not the shorter way around the circle:
/// comparing 179 and -179 yields 358, not 2. A rotation target sitting just
/// across the seam is therefore approached the long way around.
// TODO: measure across the ±180 seam so near-seam headings compare close.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_pinned_values() {
        assert_relative_eq!(normalize_degrees(181.0), -179.0);
        assert_relative_eq!(normalize_degrees(-181.0), 179.0);
        assert_relative_eq!(normalize_degrees(180.0), 180.0);
        assert_relative_eq!(normalize_degrees(0.0), 0.0);
    }

    #[test]
    fn test_normalize_boundary_belongs_to_positive_side() {
        assert_relative_eq!(normalize_degrees(-180.0), 180.0);
        assert_relative_eq!(normalize_degrees(540.0), 180.0);
        assert_relative_eq!(normalize_degrees(-540.0), 180.0);
    }

    #[test]
    fn test_normalize_full_turns() {
        assert_relative_eq!(normalize_degrees(360.0), 0.0);
        assert_relative_eq!(normalize_degrees(-360.0), 0.0);
        assert_relative_eq!(normalize_degrees(725.0), 5.0);
        assert_relative_eq!(normalize_degrees(-725.0), -5.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for &a in &[
            0.0f64, 1.0, -1.0, 90.5, -90.5, 179.9, -179.9, 180.0, 181.0, -181.0, 359.0, 361.0,
            -1000.0, 1e6,
        ] {
            let once = normalize_degrees(a);
            assert_relative_eq!(normalize_degrees(once), once);
            assert!(once > -180.0 && once <= 180.0, "{} escaped the domain", once);
        }
    }

    #[test]
    fn test_angular_difference_is_plain_magnitude() {
        assert_relative_eq!(angular_difference(10.0, -10.0), 20.0);
        assert_relative_eq!(angular_difference(-10.0, 10.0), 20.0);
        // the seam is not shortcut: these headings are 2 degrees apart on
        // the circle but 358 apart to this function
        assert_relative_eq!(angular_difference(179.0, -179.0), 358.0);
    }
}
