//! Parameter and geometry errors

use crate::float_types::Real;
use std::fmt::Display;

/// Which end of an oval arm a tangent circle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmSide {
    /// The end at positive x offset `u`.
    Right,
    /// The end at negative x offset `w`.
    Left,
}

impl Display for ArmSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArmSide::Right => write!(f, "right"),
            ArmSide::Left => write!(f, "left"),
        }
    }
}

/// All the ways a gear or arm request can be refused.
///
/// Parameter checks happen before any geometry is computed; the tangent
/// variants are only produced by the arm builder, the solver itself reports
/// an impossible tangency as [`crate::arm::tangent::Tangency::NoSolution`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidParameter) A value lies outside its domain
    #[error("(InvalidParameter) `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },
    /// (ModuleMismatch) Gears meant to mesh use different modules
    #[error("(ModuleMismatch) sun module {sun} differs from planet module {planet}")]
    ModuleMismatch { sun: Real, planet: Real },
    /// (NoTangentSolution) The end offset exceeds a bounding radius
    #[error("(NoTangentSolution) no circle on the {side} end is tangent to both bounding arcs")]
    NoTangentSolution { side: ArmSide },
    /// (DegenerateTangentCircle) The tangent circle collapsed to a non-positive radius
    #[error("(DegenerateTangentCircle) {side} end circle has radius {radius}")]
    DegenerateTangentCircle { side: ArmSide, radius: Real },
}

impl GeometryError {
    pub(crate) const fn invalid(name: &'static str, value: Real, reason: &'static str) -> Self {
        GeometryError::InvalidParameter { name, value, reason }
    }
}

/// Fail with [`GeometryError::InvalidParameter`] unless `value` is finite.
pub(crate) fn ensure_finite(name: &'static str, value: Real) -> Result<Real, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::invalid(name, value, "must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parameter() {
        let err = GeometryError::invalid("teeth", 2.0, "need at least 3 teeth");
        let msg = err.to_string();
        assert!(msg.contains("InvalidParameter"));
        assert!(msg.contains("teeth"));
        assert!(msg.contains("need at least 3 teeth"));
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(ensure_finite("module", 2.0).is_ok());
        assert!(ensure_finite("module", Real::NAN).is_err());
        assert!(ensure_finite("module", Real::INFINITY).is_err());
    }
}
