use crate::float_types::Real;
use nalgebra::{Matrix3, Rotation2, Vector2};

/// Planar affine transformations over homogeneous 3×3 matrices.
///
/// Implementors only provide [`Transform2D::transform`]; the rest are
/// expressed in terms of it.
pub trait Transform2D: Sized {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector2<Real>) -> Self {
        self.transform(&Matrix3::new_translation(&vector))
    }

    /// Returns a new Self translated by x and y.
    fn translate(&self, x: Real, y: Real) -> Self {
        self.translate_vector(Vector2::new(x, y))
    }

    /// Rotates about the origin by `angle` radians, counter-clockwise.
    fn rotate(&self, angle: Real) -> Self {
        self.transform(&Rotation2::new(angle).to_homogeneous())
    }

    /// Scales by `sx`, `sy` about the origin.
    fn scale(&self, sx: Real, sy: Real) -> Self {
        self.transform(&Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)))
    }

    /// Reflect about the x axis (y → −y).
    ///
    /// Implementors whose vertex order encodes orientation must restore it.
    fn mirror_x(&self) -> Self {
        self.scale(1.0, -1.0)
    }
}
