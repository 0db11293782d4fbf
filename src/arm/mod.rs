//! Oval arm links bounded by four circular arcs.
//!
//! The arm body is the lens where an upper circle (center `(0, p)`, radius
//! `p − s`) and a lower circle (center `(0, t)`, radius `q − t`) overlap. Each
//! end is rounded off by a cap circle at horizontal offset `u` (right) or `w`
//! (left) tangent to both, found by [`TangentArcSolver`].
//!
//! For a CSG backend the part is
//! `(upper ∩ lower) − right_slab − left_slab + right_cap + left_cap`;
//! [`ArmOutline::boundary`] gives the same region as four arcs.

pub mod tangent;

pub use tangent::{Convergence, SolverOptions, Tangency, TangentArcSolver, TangentSolution};

use crate::errors::{ArmSide, GeometryError, ensure_finite};
use crate::float_types::Real;
use crate::sketch::{Arc, Circle, Outline};
use log::{debug, warn};
use nalgebra::Point2;

/// The six numbers describing an arm, with `p > q > 0 > s > t` and `u > 0 > w`.
///
/// The upper circle is centred at height `p` and reaches down to `s`; the
/// lower one is centred at `t` and reaches up to `q`. `u` and `w` are the
/// end offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmParams {
    p: Real,
    q: Real,
    s: Real,
    t: Real,
    u: Real,
    w: Real,
}

impl Default for ArmParams {
    fn default() -> Self {
        Self {
            p: 40.0,
            q: 10.0,
            s: -30.0,
            t: -100.0,
            u: 40.0,
            w: -20.0,
        }
    }
}

impl ArmParams {
    /// # Errors
    /// [`GeometryError::InvalidParameter`] naming the first value that breaks
    /// the ordering, or that is not finite.
    pub fn new(p: Real, q: Real, s: Real, t: Real, u: Real, w: Real) -> Result<Self, GeometryError> {
        for (name, value) in [("p", p), ("q", q), ("s", s), ("t", t), ("u", u), ("w", w)] {
            ensure_finite(name, value)?;
        }
        if p <= q {
            return Err(GeometryError::invalid("p", p, "must be greater than q"));
        }
        if q <= 0.0 {
            return Err(GeometryError::invalid("q", q, "must be positive"));
        }
        if s >= 0.0 {
            return Err(GeometryError::invalid("s", s, "must be negative"));
        }
        if t >= s {
            return Err(GeometryError::invalid("t", t, "must be less than s"));
        }
        if u <= 0.0 {
            return Err(GeometryError::invalid("u", u, "must be positive"));
        }
        if w >= 0.0 {
            return Err(GeometryError::invalid("w", w, "must be negative"));
        }
        Ok(Self { p, q, s, t, u, w })
    }

    #[inline]
    pub const fn p(&self) -> Real {
        self.p
    }

    #[inline]
    pub const fn q(&self) -> Real {
        self.q
    }

    #[inline]
    pub const fn s(&self) -> Real {
        self.s
    }

    #[inline]
    pub const fn t(&self) -> Real {
        self.t
    }

    #[inline]
    pub const fn u(&self) -> Real {
        self.u
    }

    #[inline]
    pub const fn w(&self) -> Real {
        self.w
    }

    /// `r1 = p − s`
    #[inline]
    pub fn upper_radius(&self) -> Real {
        self.p - self.s
    }

    /// `r2 = q − t`
    #[inline]
    pub fn lower_radius(&self) -> Real {
        self.q - self.t
    }

    /// Horizontal offset of the cap on `side`.
    #[inline]
    pub const fn offset(&self, side: ArmSide) -> Real {
        match side {
            ArmSide::Right => self.u,
            ArmSide::Left => self.w,
        }
    }

    pub fn arc_pair(&self) -> ArcPair {
        ArcPair {
            upper: Circle::new(Point2::new(0.0, self.p), self.upper_radius()),
            lower: Circle::new(Point2::new(0.0, self.t), self.lower_radius()),
        }
    }
}

/// The two bounding circles of an arm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcPair {
    pub upper: Circle,
    pub lower: Circle,
}

impl ArcPair {
    /// Whether `point` lies in the lens shared by both circles.
    pub fn contains(&self, point: &Point2<Real>) -> bool {
        self.upper.distance(point) <= 0.0 && self.lower.distance(point) <= 0.0
    }
}

/// Axis-aligned rectangle cut away from the lens beyond a cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slab {
    pub min: Point2<Real>,
    pub max: Point2<Real>,
}

impl Slab {
    #[inline]
    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    /// Corners counter-clockwise from `min`.
    pub fn corners(&self) -> [Point2<Real>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    pub fn to_outline(&self) -> Outline {
        Outline::new(self.corners().to_vec())
    }
}

/// Everything the backend needs to build one arm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmOutline {
    params: ArmParams,
    arcs: ArcPair,
    right: TangentSolution,
    left: TangentSolution,
    right_slab: Slab,
    left_slab: Slab,
}

impl ArmOutline {
    #[inline]
    pub const fn params(&self) -> &ArmParams {
        &self.params
    }

    #[inline]
    pub const fn arcs(&self) -> &ArcPair {
        &self.arcs
    }

    #[inline]
    pub const fn solution(&self, side: ArmSide) -> &TangentSolution {
        match side {
            ArmSide::Right => &self.right,
            ArmSide::Left => &self.left,
        }
    }

    #[inline]
    pub const fn cap(&self, side: ArmSide) -> Circle {
        self.solution(side).circle()
    }

    #[inline]
    pub const fn slab(&self, side: ArmSide) -> &Slab {
        match side {
            ArmSide::Right => &self.right_slab,
            ArmSide::Left => &self.left_slab,
        }
    }

    /// The closed boundary as four counter-clockwise arcs: right cap, top
    /// of the lower circle, left cap, bottom of the upper circle.
    pub fn boundary(&self) -> [Arc; 4] {
        let (r, l) = (&self.right, &self.left);
        [
            Arc::between(&r.circle(), &r.upper_point, &r.lower_point),
            Arc::between(&self.arcs.lower, &r.lower_point, &l.lower_point),
            Arc::between(&l.circle(), &l.lower_point, &l.upper_point),
            Arc::between(&self.arcs.upper, &l.upper_point, &r.upper_point),
        ]
    }

    /// Sample the boundary with `segments_per_arc` chords per arc.
    pub fn to_outline(&self, segments_per_arc: usize) -> Outline {
        let mut vertices = Vec::with_capacity(4 * segments_per_arc.max(1));
        for arc in self.boundary() {
            let mut points = arc.sample(segments_per_arc);
            // the next arc starts where this one ends
            points.pop();
            vertices.extend(points);
        }
        Outline::new(vertices)
    }
}

/// Builds [`ArmOutline`]s with a shared solver configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OvalArm {
    solver: TangentArcSolver,
}

impl OvalArm {
    pub const fn new(solver: TangentArcSolver) -> Self {
        Self { solver }
    }

    /// # Errors
    /// [`GeometryError::NoTangentSolution`] when an end offset reaches past a
    /// bounding circle, [`GeometryError::DegenerateTangentCircle`] when a cap
    /// collapses to a non-positive radius.
    pub fn build(&self, params: &ArmParams) -> Result<ArmOutline, GeometryError> {
        let arcs = params.arc_pair();
        let right = self.solve_side(params, ArmSide::Right)?;
        let left = self.solve_side(params, ArmSide::Left)?;

        let span = 2.0 * arcs.upper.radius.max(arcs.lower.radius);
        let x_right = right.upper_point.x.min(right.lower_point.x);
        let x_left = left.upper_point.x.max(left.lower_point.x);
        let right_slab = Slab {
            min: Point2::new(x_right, right.upper_point.y.min(right.lower_point.y)),
            max: Point2::new(x_right + span, right.upper_point.y.max(right.lower_point.y)),
        };
        let left_slab = Slab {
            min: Point2::new(x_left - span, left.upper_point.y.min(left.lower_point.y)),
            max: Point2::new(x_left, left.upper_point.y.max(left.lower_point.y)),
        };

        Ok(ArmOutline {
            params: *params,
            arcs,
            right,
            left,
            right_slab,
            left_slab,
        })
    }

    /// Cap circle for one end of the arm.
    pub fn solve_side(&self, params: &ArmParams, side: ArmSide) -> Result<TangentSolution, GeometryError> {
        let tangency = self.solver.solve(
            params.upper_radius(),
            params.lower_radius(),
            params.p(),
            params.t(),
            params.offset(side),
        )?;
        let solution = match tangency {
            Tangency::Solved(solution) => solution,
            Tangency::NoSolution => return Err(GeometryError::NoTangentSolution { side }),
        };
        if !solution.is_converged() {
            warn!(
                "{side} cap did not converge in {} iterations (residual {:e})",
                solution.iterations, solution.residual
            );
        }
        if solution.radius <= 0.0 {
            return Err(GeometryError::DegenerateTangentCircle {
                side,
                radius: solution.radius,
            });
        }
        debug!(
            "{side} cap: r={:.5} center=({:.3}, {:.5}) after {} iterations",
            solution.radius, solution.center.x, solution.center.y, solution.iterations
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let d = ArmParams::default();
        assert_eq!(ArmParams::new(40.0, 10.0, -30.0, -100.0, 40.0, -20.0).unwrap(), d);
        assert_eq!(d.upper_radius(), 70.0);
        assert_eq!(d.lower_radius(), 110.0);
    }

    #[test]
    fn rejects_broken_ordering() {
        let bad = [
            (10.0, 10.0, -30.0, -100.0, 40.0, -20.0),
            (40.0, 0.0, -30.0, -100.0, 40.0, -20.0),
            (40.0, 10.0, 0.0, -100.0, 40.0, -20.0),
            (40.0, 10.0, -30.0, -30.0, 40.0, -20.0),
            (40.0, 10.0, -30.0, -100.0, 0.0, -20.0),
            (40.0, 10.0, -30.0, -100.0, 40.0, 5.0),
        ];
        let names = ["p", "q", "s", "t", "u", "w"];
        for ((p, q, s, t, u, w), expected) in bad.into_iter().zip(names) {
            match ArmParams::new(p, q, s, t, u, w) {
                Err(GeometryError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn slabs_start_at_inner_tangency() {
        let arm = OvalArm::default().build(&ArmParams::default()).unwrap();
        let right = arm.slab(ArmSide::Right);
        let left = arm.slab(ArmSide::Left);
        assert!((right.width() - 220.0).abs() < 1e-9);
        assert!((left.width() - 220.0).abs() < 1e-9);
        // tangency lies beyond each cap center
        assert!(right.min.x > 40.0 && left.max.x < -20.0);
        let r = arm.solution(ArmSide::Right);
        assert_eq!(right.min.x, r.upper_point.x.min(r.lower_point.x));
    }

    #[test]
    fn slab_corners_wind_counter_clockwise() {
        let slab = Slab {
            min: Point2::new(0.0, 0.0),
            max: Point2::new(2.0, 1.0),
        };
        assert!(slab.to_outline().is_ccw());
        assert_eq!(slab.height(), 1.0);
    }
}
