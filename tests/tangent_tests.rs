mod support;

use gearsketch::{
    arm::{Convergence, SolverOptions, Tangency, TangentArcSolver},
    float_types::Real,
};
use support::approx_eq;

/// `a(v) − b(v)` evaluated from scratch.
fn mismatch(r1: Real, r2: Real, p: Real, t: Real, u: Real, v: Real) -> Real {
    let a = r1 - (u * u + (p - v) * (p - v)).sqrt();
    let b = r2 - (u * u + (t - v) * (t - v)).sqrt();
    a - b
}

#[test]
fn symmetric_circles_meet_halfway() {
    let tangency = TangentArcSolver::default().solve(10.0, 10.0, 10.0, 0.0, 5.0).unwrap();
    let s = tangency.solution().expect("25 < 100, so a tangent circle exists");
    assert!(approx_eq(s.vertical_center(), 5.0, 1e-9));
    assert!(approx_eq(s.radius, 2.9289, 1e-4));
    assert!(approx_eq(s.upper_point.x, 7.0711, 1e-4));
    assert!(approx_eq(s.upper_point.y, 2.9289, 1e-4));
    assert!(approx_eq(s.lower_point.x, 7.0711, 1e-4));
    assert!(approx_eq(s.lower_point.y, 7.0711, 1e-4));
    assert!(s.is_converged());
}

#[test]
fn residual_is_tight_across_arm_shapes() {
    let solver = TangentArcSolver::default();
    let shapes: [(Real, Real, Real, Real); 4] = [
        (40.0, 10.0, -30.0, -100.0),
        (20.0, 5.0, -10.0, -40.0),
        (60.0, 30.0, -5.0, -80.0),
        (15.0, 2.0, -20.0, -25.0),
    ];
    for (p, q, s, t) in shapes {
        let (r1, r2) = (p - s, q - t);
        for k in 1..20 {
            for sign in [1.0, -1.0] {
                let u = sign * k as Real * r1.min(r2) * 0.045;
                let tangency = solver.solve(r1, r2, p, t, u).unwrap();
                let solution = tangency.solution().expect("offset inside both circles");
                let v = solution.vertical_center();
                assert!(
                    mismatch(r1, r2, p, t, u, v).abs() < 1e-9,
                    "p={p} q={q} s={s} t={t} u={u}"
                );
                assert_eq!(solution.center.x, u);
            }
        }
    }
}

#[test]
fn no_solution_exactly_when_offset_exceeds_a_radius() {
    let solver = TangentArcSolver::default();
    let (r1, r2, p, t) = (70.0, 110.0, 40.0, -100.0);
    for u in [-120.0, -110.5, -70.5, -40.0, 0.5, 40.0, 69.9, 70.0, 70.1, 111.0] {
        let tangency = solver.solve(r1, r2, p, t, u).unwrap();
        let impossible = u * u > r1 * r1 || u * u > r2 * r2;
        assert_eq!(tangency == Tangency::NoSolution, impossible, "u={u}");
    }
}

#[test]
fn arm_ends_converge_in_a_few_iterations() {
    let solver = TangentArcSolver::default();
    for (u, radius, v) in [(40.0, 8.50017, -6.71433), (-20.0, 16.9551, -9.13003)] {
        let tangency = solver.solve(70.0, 110.0, 40.0, -100.0, u).unwrap();
        let s = tangency.solution().unwrap();
        assert!(approx_eq(s.radius, radius, 1e-4));
        assert!(approx_eq(s.vertical_center(), v, 1e-4));
        assert!(s.iterations <= 4);
        assert_eq!(s.convergence, Convergence::Residual);
    }
}

#[test]
fn solve_is_deterministic() {
    let solver = TangentArcSolver::new(SolverOptions::default()).unwrap();
    let a = solver.solve(20.0, 15.0, 12.0, -5.0, 7.0).unwrap();
    let b = solver.solve(20.0, 15.0, 12.0, -5.0, 7.0).unwrap();
    assert_eq!(a, b);
    let s = a.solution().unwrap();
    assert!(approx_eq(s.radius, 6.27992, 1e-4));
    assert!(approx_eq(s.vertical_center(), 0.19998, 1e-4));
}

#[test]
fn solutions_are_finite_and_converged_only_when_tangent() {
    let solver = TangentArcSolver::default();
    for (r1, r2) in [(10.0, 10.0), (10.0, 5.0), (30.0, 12.0)] {
        for (p, t) in [(0.0, 0.0), (4.0, 4.0), (10.0, 0.0), (0.0, -1e-3)] {
            for u in [0.0, 1e-9, 3.0, -4.5] {
                let Ok(tangency) = solver.solve(r1, r2, p, t, u) else {
                    // only a center landing on a bounding center is refused
                    assert_eq!(p, t, "r1={r1} r2={r2} p={p} t={t} u={u}");
                    continue;
                };
                let Some(s) = tangency.solution() else { continue };
                assert!(s.radius.is_finite() && s.center.y.is_finite());
                assert!(s.residual.is_finite());
                if s.is_converged() {
                    assert!(mismatch(r1, r2, p, t, u, s.vertical_center()).abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn concentric_circles_are_refused_or_flagged() {
    let solver = TangentArcSolver::default();
    assert!(solver.solve(10.0, 10.0, 0.0, 0.0, 0.0).is_err());

    let tangency = solver.solve(10.0, 5.0, 0.0, 0.0, 3.0).unwrap();
    let s = tangency.solution().unwrap();
    assert_eq!(s.convergence, Convergence::FlatDerivative);
    assert!(approx_eq(s.residual, 5.0, 1e-12));
    assert!(!s.is_converged());
}
