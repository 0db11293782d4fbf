//! Circle tangent to two bounding circles.
//!
//! The upper bounding circle has radius `r1` and center `(0, p)`, the lower
//! one radius `r2` and center `(0, t)`. We look for a circle centred at
//! `(u, v)` lying inside both and touching each:
//!
//! ```text
//! a(v) = r1 − sqrt(u² + (p − v)²)
//! b(v) = r2 − sqrt(u² + (t − v)²)
//! r    = a(v) = b(v)
//! ```
//!
//! `v` is found with Newton's method on `a − b`, starting halfway between
//! where the two circles cross the vertical line `x = u`.

use crate::errors::{GeometryError, ensure_finite};
use crate::float_types::{Real, tolerance};
use crate::sketch::Circle;
use log::trace;
use nalgebra::{Point2, Vector2};

/// Iteration limits for [`TangentArcSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverOptions {
    pub max_iterations: usize,
    /// Stop when `|a′ − b′|` falls below this; the Newton step would blow up.
    pub derivative_epsilon: Real,
    /// Stop when `|a − b|` falls below this.
    pub residual_epsilon: Real,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 9,
            derivative_epsilon: 1e-5,
            residual_epsilon: 1e-12,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> Result<(), GeometryError> {
        if self.max_iterations == 0 {
            return Err(GeometryError::invalid(
                "max_iterations",
                0.0,
                "at least one iteration is needed",
            ));
        }
        for (name, value) in [
            ("derivative_epsilon", self.derivative_epsilon),
            ("residual_epsilon", self.residual_epsilon),
        ] {
            if ensure_finite(name, value)? <= 0.0 {
                return Err(GeometryError::invalid(name, value, "must be positive"));
            }
        }
        Ok(())
    }
}

/// Why the iteration stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Convergence {
    /// `|a − b|` dropped below the residual epsilon.
    Residual,
    /// `a′ − b′` became too flat to divide by.
    FlatDerivative,
    /// Neither stop condition was met within the iteration cap.
    IterationCap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentSolution {
    /// Radius `r` of the tangent circle.
    pub radius: Real,
    /// Center `(u, v)`.
    pub center: Point2<Real>,
    /// Where it touches the upper bounding circle.
    pub upper_point: Point2<Real>,
    /// Where it touches the lower bounding circle.
    pub lower_point: Point2<Real>,
    pub iterations: usize,
    /// `|a(v) − b(v)|` at the returned `v`.
    pub residual: Real,
    pub convergence: Convergence,
}

impl TangentSolution {
    /// Vertical center `v`.
    #[inline]
    pub fn vertical_center(&self) -> Real {
        self.center.y
    }

    /// Whether the circle really touches both bounding circles.
    ///
    /// A flat derivative only counts when `|a − b|` is already within
    /// tolerance; hitting the iteration cap never does. The estimate is
    /// returned either way.
    pub fn is_converged(&self) -> bool {
        match self.convergence {
            Convergence::Residual => true,
            Convergence::FlatDerivative => self.residual <= tolerance(),
            Convergence::IterationCap => false,
        }
    }

    #[inline]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

/// Outcome of a solve. An impossible tangency is an ordinary result, not an
/// error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tangency {
    Solved(TangentSolution),
    /// The offset `u` reaches past one of the bounding circles.
    NoSolution,
}

impl Tangency {
    #[inline]
    pub const fn solution(&self) -> Option<&TangentSolution> {
        match self {
            Tangency::Solved(solution) => Some(solution),
            Tangency::NoSolution => None,
        }
    }

    #[inline]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Tangency::Solved(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TangentArcSolver {
    options: SolverOptions,
}

impl TangentArcSolver {
    pub fn new(options: SolverOptions) -> Result<Self, GeometryError> {
        options.validate()?;
        Ok(Self { options })
    }

    #[inline]
    pub const fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Solve for the circle at horizontal offset `u` tangent to both bounding
    /// circles.
    ///
    /// Returns [`Tangency::NoSolution`] exactly when `u² > r1²` or `u² > r2²`.
    ///
    /// # Errors
    /// [`GeometryError::InvalidParameter`] for a non-positive radius, any
    /// non-finite input, or when the iteration lands `(u, v)` on a bounding
    /// circle's center, where neither gap has a derivative.
    pub fn solve(
        &self,
        r1: Real,
        r2: Real,
        center_p: Real,
        center_t: Real,
        u: Real,
    ) -> Result<Tangency, GeometryError> {
        for (name, radius) in [("r1", r1), ("r2", r2)] {
            if ensure_finite(name, radius)? <= 0.0 {
                return Err(GeometryError::invalid(name, radius, "must be positive"));
            }
        }
        let p = ensure_finite("center_p", center_p)?;
        let t = ensure_finite("center_t", center_t)?;
        let u = ensure_finite("u", u)?;

        let u2 = u * u;
        if r1 * r1 < u2 || r2 * r2 < u2 {
            return Ok(Tangency::NoSolution);
        }

        let upper_crossing = p - (r1 * r1 - u2).sqrt();
        let lower_crossing = t + (r2 * r2 - u2).sqrt();
        let mut v = 0.5 * (upper_crossing + lower_crossing);

        let on_center = || {
            GeometryError::invalid("u", u, "tangent circle center falls on a bounding circle center")
        };
        let mut iterations = 0;
        let mut convergence = Convergence::IterationCap;
        for i in 0..self.options.max_iterations {
            let (a, da) = gap_to_circle(r1, p, u, v).ok_or_else(on_center)?;
            let (b, db) = gap_to_circle(r2, t, u, v).ok_or_else(on_center)?;
            let slope = da - db;
            if slope.abs() < self.options.derivative_epsilon {
                convergence = Convergence::FlatDerivative;
                break;
            }
            v += (a - b) / slope;
            iterations = i + 1;
            trace!("tangent solve u={u}: iteration {iterations} v={v} |a-b|={}", (a - b).abs());
            if (a - b).abs() < self.options.residual_epsilon {
                convergence = Convergence::Residual;
                break;
            }
        }

        let v = ensure_finite("v", v)?;
        let (radius, _) = gap_to_circle(r1, p, u, v).ok_or_else(on_center)?;
        let (lower_radius, _) = gap_to_circle(r2, t, u, v).ok_or_else(on_center)?;
        let center = Point2::new(u, v);
        Ok(Tangency::Solved(TangentSolution {
            radius,
            center,
            upper_point: touch_point(&Circle::new(Point2::new(0.0, p), r1), &center, -Vector2::y()),
            lower_point: touch_point(&Circle::new(Point2::new(0.0, t), r2), &center, Vector2::y()),
            iterations,
            residual: (radius - lower_radius).abs(),
            convergence,
        }))
    }
}

/// `r − |(u, v) − (0, c)|` and the derivative of that distance with
/// respect to `v`, or `None` when `(u, v)` sits on the center `(0, c)`.
#[inline]
fn gap_to_circle(r: Real, c: Real, u: Real, v: Real) -> Option<(Real, Real)> {
    let distance = (u * u + (c - v) * (c - v)).sqrt();
    (distance > tolerance()).then(|| (r - distance, (v - c) / distance))
}

/// Point where `circle` meets the ray from its center through `through`.
///
/// `fallback` is the direction used when the two centers coincide.
fn touch_point(circle: &Circle, through: &Point2<Real>, fallback: Vector2<Real>) -> Point2<Real> {
    let d = through - circle.center;
    let len = d.norm();
    let direction = if len > tolerance() { d / len } else { fallback };
    circle.center + direction * circle.radius
}
