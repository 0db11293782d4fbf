// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized geometric tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `GEARSKETCH_TOLERANCE` (e.g. `GEARSKETCH_TOLERANCE=1e-7 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-9
    }
}

/// Returns the current tolerance.
/// If not set yet, it tries `GEARSKETCH_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("GEARSKETCH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `gearsketch::float_types::set_tolerance(1e-7);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

/// Number of decimals kept in emitted outline coordinates.
pub const OUTPUT_DECIMALS: u32 = 3;

/// Round `value` to `decimals` places, halves away from zero.
///
/// `-0.0` is normalised to `0.0` so mirrored points compare equal.
#[inline]
pub fn round_to(value: Real, decimals: u32) -> Real {
    let scale = (10.0 as Real).powi(decimals as i32);
    (value * scale).round() / scale + 0.0
}

/// Wrap an angle into `[0, τ)`.
#[inline]
pub fn normalize_angle(angle: Real) -> Real {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can land exactly on TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Unit conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
/// Millimetres per inch.
pub const INCH: Real = 25.4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_three_decimals() {
        assert_eq!(round_to(1.23449, 3), 1.234);
        assert_eq!(round_to(2.71828, 3), 2.718);
        assert_eq!(round_to(-2.71828, 3), -2.718);
        assert_eq!(round_to(0.0006, 3), 0.001);
    }

    #[test]
    fn round_to_drops_negative_zero() {
        let r = round_to(-0.0001, 3);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn normalize_angle_wraps_into_one_turn() {
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
    }
}
