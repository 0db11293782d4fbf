// -------------------------------------------------------------------------------------------------
// Involute helpers                                                                              //
// -------------------------------------------------------------------------------------------------

use crate::float_types::Real;
use nalgebra::Point2;

/// Bisection steps used to locate the radius where two flanks meet.
const CLOSURE_BISECTIONS: usize = 60;

/// Classic parametric involute of a circle calculation.
///
/// # Parameters
/// - `rb`: base-circle radius
/// - `phi`: involute parameter
///
/// x = rb( cosφ + φ·sinφ )
/// y = rb( sinφ – φ·cosφ )
///
/// # Returns
/// Cartesian coordinates (x, y) of the involute point
#[inline]
pub fn involute_xy(rb: Real, phi: Real) -> (Real, Real) {
    (
        rb * (phi.cos() + phi * phi.sin()),
        rb * (phi.sin() - phi * phi.cos()),
    )
}

/// Calculate the involute parameter at a given radius.
///
/// # Parameters
/// - `r`: radius at which to calculate the angle
/// - `rb`: base circle radius
///
/// # Returns
/// The involute parameter φ = sqrt((r/rb)² - 1), clamped to 0 inside the base circle
#[inline]
pub fn involute_angle_at_radius(r: Real, rb: Real) -> Real {
    ((r / rb).powi(2) - 1.0).max(0.0).sqrt()
}

/// inv(φ) = φ − atan φ, the polar angle swept by the involute at parameter φ.
#[inline]
pub fn involute_function(phi: Real) -> Real {
    phi - phi.atan()
}

/// Point on the involute of the base circle `rb` at radius `r`, with y
/// negated so the curve winds clockwise away from the +x axis.
#[inline]
pub fn involute_point(rb: Real, r: Real) -> Point2<Real> {
    let (ix, iy) = involute_xy(rb, involute_angle_at_radius(r, rb));
    Point2::new(ix, -iy)
}

/// Polar angle of the clockwise-wound flank at radius `r` once the flank has
/// been rotated by `alignment` radians.
#[inline]
pub fn flank_angle(rb: Real, alignment: Real, r: Real) -> Real {
    alignment - involute_function(involute_angle_at_radius(r, rb))
}

/// Radius in `[r_start, r_end]` where the aligned flank reaches the tooth
/// axis (polar angle 0), or `None` if it stays above the axis all the way out.
pub fn flank_closure_radius(rb: Real, alignment: Real, r_start: Real, r_end: Real) -> Option<Real> {
    if flank_angle(rb, alignment, r_end) > 0.0 {
        return None;
    }
    let (mut lo, mut hi) = (r_start, r_end);
    for _ in 0..CLOSURE_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if flank_angle(rb, alignment, mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involute_starts_on_base_circle() {
        let p = involute_point(10.0, 10.0);
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn involute_point_lies_on_requested_radius() {
        for r in [10.5, 12.0, 15.0] {
            let p = involute_point(10.0, r);
            assert!((p.coords.norm() - r).abs() < 1e-9, "radius {r}");
            assert!(p.y < 0.0);
        }
    }

    #[test]
    fn polar_angle_matches_involute_function() {
        let rb = 8.0;
        let r = 11.0;
        let p = involute_point(rb, r);
        let polar = (-p.y).atan2(p.x);
        let expected = involute_function(involute_angle_at_radius(r, rb));
        assert!((polar - expected).abs() < 1e-12);
    }

    #[test]
    fn closure_radius_sits_on_the_axis() {
        let rb = 10.0;
        let alignment = 0.1;
        let r = flank_closure_radius(rb, alignment, 10.0, 20.0).expect("flank crosses the axis");
        assert!(flank_angle(rb, alignment, r).abs() < 1e-9);
        assert!(flank_closure_radius(rb, 1.0, 10.0, 12.0).is_none());
    }
}
