//! Closed planar outlines handed to the solid-modeling backend.

use crate::float_types::{Real, tolerance};
use crate::traits::Transform2D;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Area, Coord, Line, LineString, Polygon as GeoPolygon};
use nalgebra::{Matrix3, Point2};

/// A closed ring of vertices, counter-clockwise for a well formed part.
///
/// The closing edge from the last vertex back to the first is implicit; the
/// first vertex is never repeated at the end.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    vertices: Vec<Point2<Real>>,
}

impl Outline {
    pub fn new(mut vertices: Vec<Point2<Real>>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<Real>] {
        &self.vertices
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point2<Real>> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the ring's edges, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<Real>, Point2<Real>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Convert to a `geo` polygon without holes (the ring is closed by `geo`).
    pub fn to_geo_polygon(&self) -> GeoPolygon<Real> {
        let coords: Vec<Coord<Real>> = self
            .vertices
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        GeoPolygon::new(LineString::from(coords), vec![])
    }

    /// Shoelace area, positive for a counter-clockwise ring.
    pub fn signed_area(&self) -> Real {
        self.to_geo_polygon().signed_area()
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Smallest and largest distance of any vertex from the origin.
    pub fn radius_range(&self) -> (Real, Real) {
        self.vertices
            .iter()
            .map(|p| p.coords.norm())
            .fold((Real::MAX, 0.0), |(lo, hi), r| (lo.min(r), hi.max(r)))
    }

    /// True when no two edges cross or overlap.
    ///
    /// Neighbouring edges may only touch at their shared vertex, and no edge
    /// may have zero length. Runs in O(n²) over the edges.
    pub fn is_simple(&self) -> bool {
        let Some(lines) = self.edge_lines() else {
            return false;
        };
        let n = lines.len();
        (0..n).all(|i| ((i + 1)..n).all(|j| !edges_clash(&lines, i, j)))
    }

    /// [`Self::is_simple`] for a ring of `n / period` copies of one vertex
    /// run, each turned about the origin into its own angular wedge.
    ///
    /// Edges of non-neighbouring copies cannot meet, so only pairs inside a
    /// window of two consecutive copies are tested, in O(n·period). Falls
    /// back to the full test when the ring is not made of at least three
    /// whole copies.
    pub fn is_simple_periodic(&self, period: usize) -> bool {
        let n = self.vertices.len();
        if period == 0 || n % period != 0 || n < 3 * period {
            return self.is_simple();
        }
        let Some(lines) = self.edge_lines() else {
            return false;
        };
        (0..n).step_by(period).all(|start| {
            let window: Vec<usize> = (start..start + 2 * period).map(|k| k % n).collect();
            window
                .iter()
                .enumerate()
                .all(|(a, &i)| window[a + 1..].iter().all(|&j| !edges_clash(&lines, i, j)))
        })
    }

    /// Edges as `geo` lines, or `None` for a degenerate ring: fewer than
    /// three vertices or an edge no longer than the tolerance.
    fn edge_lines(&self) -> Option<Vec<Line<Real>>> {
        if self.vertices.len() < 3 {
            return None;
        }
        let eps = tolerance();
        if self.edges().any(|(a, b)| (b - a).norm() <= eps) {
            return None;
        }
        Some(
            self.edges()
                .map(|(a, b)| Line::new(Coord { x: a.x, y: a.y }, Coord { x: b.x, y: b.y }))
                .collect(),
        )
    }
}

/// Whether edges `i` and `j` of a closed ring meet anywhere but at a vertex
/// they share.
fn edges_clash(lines: &[Line<Real>], i: usize, j: usize) -> bool {
    let n = lines.len();
    let adjacent = j == (i + 1) % n || i == (j + 1) % n;
    match line_intersection(lines[i], lines[j]) {
        None => false,
        Some(LineIntersection::SinglePoint { is_proper, .. }) if adjacent => is_proper,
        Some(_) => true,
    }
}

impl Transform2D for Outline {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self {
        let mut vertices: Vec<Point2<Real>> = self
            .vertices
            .iter()
            .map(|p| matrix.transform_point(p))
            .collect();
        // a reflection flips the winding; restore counter-clockwise order
        let linear = matrix.fixed_view::<2, 2>(0, 0);
        if linear.determinant() < 0.0 {
            vertices.reverse();
        }
        Self { vertices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::TAU;

    fn square() -> Outline {
        Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn closing_duplicate_is_dropped() {
        let o = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ]);
        assert_eq!(o.len(), 3);
    }

    #[test]
    fn square_is_simple_and_ccw() {
        let sq = square();
        assert!(sq.is_simple());
        assert!(sq.is_ccw());
        assert!((sq.signed_area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let bowtie = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!(!bowtie.is_simple());
    }

    #[test]
    fn repeated_vertex_is_not_simple() {
        let o = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!(!o.is_simple());
    }

    #[test]
    fn periodic_check_agrees_with_full_check() {
        // eight teeth around the origin; `last` ends each one
        let ring = |last: Point2<Real>| {
            let tooth = [
                Point2::new(4.0, -0.8),
                Point2::new(6.0, -0.5),
                Point2::new(6.0, 0.5),
                last,
            ];
            let vertices = (0..8)
                .flat_map(|i| {
                    let (sin, cos) = (i as Real * TAU / 8.0).sin_cos();
                    tooth.map(|p| Point2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y))
                })
                .collect();
            Outline::new(vertices)
        };

        let good = ring(Point2::new(4.0, 0.8));
        assert!(good.is_simple());
        assert!(good.is_simple_periodic(4));

        // reaches into the next tooth's wedge and crosses its first flank
        let folded = ring(Point2::new(4.5, 4.2));
        assert!(!folded.is_simple());
        assert!(!folded.is_simple_periodic(4));
    }

    #[test]
    fn periodic_check_rejects_a_collapsed_vertex() {
        let o = Outline::new(vec![
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(-2.0, 0.0),
            Point2::new(0.0, -2.0),
            Point2::new(1.0, -1.0),
        ]);
        assert!(!o.is_simple_periodic(2));
    }

    #[test]
    fn mirror_keeps_winding() {
        let m = square().mirror_x();
        assert!(m.is_ccw());
        assert!((m.signed_area() - 4.0).abs() < 1e-12);
        assert!(m.vertices().iter().all(|p| p.y <= 0.0));
    }

    #[test]
    fn translate_moves_every_vertex() {
        let t = square().translate(3.0, -1.0);
        assert_eq!(t.vertices()[0], Point2::new(3.0, -1.0));
        assert_eq!(t.vertices()[2], Point2::new(5.0, 1.0));
    }
}
