//! Scalar interpolation helpers with longitude wraparound.

/// Linear interpolation between `a` and `b` at fraction `t` in [0, 1].
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Raw longitude delta from `from` to `to`, without wrapping.
#[inline]
pub fn longitude_delta(from: f64, to: f64) -> f64 {
    to - from
}

/// True if moving from `from` to `to` jumps more than 180° of longitude.
///
/// Such a jump only happens when the object crossed the antimeridian; drawing
/// a straight segment between the two points would wrap around the map.
#[inline]
pub fn crosses_antimeridian(from: f64, to: f64) -> bool {
    longitude_delta(from, to).abs() > 180.0
}

/// Fold a longitude back into [-180, 180] with a single ±360° shift.
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Interpolate longitude along the shorter angular path.
///
/// The result is always within [-180, 180]; crossing the antimeridian goes
/// through ±180 and never back through 0.
pub fn lerp_longitude(a: f64, b: f64, t: f64) -> f64 {
    let mut diff = b - a;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    normalize_longitude(a + diff * t)
}

/// Smoothstep easing: `t² (3 - 2t)`.
///
/// Zero slope at both ends, so motion neither jumps at the start of an
/// animation nor stops abruptly at the end.
#[inline]
pub fn ease(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }

    #[test]
    fn test_lerp_longitude_without_wrap() {
        assert_eq!(lerp_longitude(20.0, 170.0, 0.5), 95.0);
        assert_eq!(lerp_longitude(-10.0, 10.0, 0.25), -5.0);
    }

    #[test]
    fn test_lerp_longitude_midpoint_on_antimeridian() {
        let mid = lerp_longitude(175.0, -175.0, 0.5);
        assert!(mid == 180.0 || mid == -180.0, "got {}", mid);

        let mid = lerp_longitude(-175.0, 175.0, 0.5);
        assert!(mid == 180.0 || mid == -180.0, "got {}", mid);
    }

    #[test]
    fn test_lerp_longitude_westbound_wrap() {
        // -170 -> 170 heading west: passes -180 and comes out at +179.
        let lon = lerp_longitude(-170.0, 170.0, 0.55);
        assert!((lon - 179.0).abs() < 1e-9, "got {}", lon);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(181.0), -179.0);
        assert_eq!(normalize_longitude(-181.0), 179.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-45.0), -45.0);
    }

    #[test]
    fn test_crosses_antimeridian() {
        assert!(crosses_antimeridian(179.5, -179.5));
        assert!(crosses_antimeridian(-179.5, 179.5));
        assert!(!crosses_antimeridian(-90.0, 90.0));
        assert!(!crosses_antimeridian(10.0, 20.0));
    }

    #[test]
    fn test_ease_boundaries() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        assert_eq!(ease(0.5), 0.5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_antimeridian_path_never_regresses_through_zero(t in 0.0..=1.0_f64) {
                let lon = lerp_longitude(175.0, -175.0, t);
                prop_assert!(
                    (175.0..=180.0).contains(&lon) || (-180.0..=-175.0).contains(&lon),
                    "t={} produced lon={}", t, lon
                );
            }

            #[test]
            fn prop_lerp_longitude_stays_in_range(
                a in -180.0..=180.0_f64,
                b in -180.0..=180.0_f64,
                t in 0.0..=1.0_f64
            ) {
                let lon = lerp_longitude(a, b, t);
                prop_assert!((-180.0..=180.0).contains(&lon), "lon={}", lon);
            }

            #[test]
            fn prop_lerp_longitude_takes_short_path(
                a in -180.0..=180.0_f64,
                b in -180.0..=180.0_f64,
                t in 0.0..=1.0_f64
            ) {
                // Angular distance travelled never exceeds half a turn.
                let lon = lerp_longitude(a, b, t);
                let mut travelled = (lon - a).abs();
                if travelled > 180.0 {
                    travelled = 360.0 - travelled;
                }
                prop_assert!(travelled <= 180.0 + 1e-9);
            }

            #[test]
            fn prop_ease_monotonic(t1 in 0.0..=1.0_f64, t2 in 0.0..=1.0_f64) {
                let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
                prop_assert!(ease(lo) <= ease(hi) + 1e-12);
                prop_assert!((0.0..=1.0).contains(&ease(lo)));
            }
        }
    }
}
