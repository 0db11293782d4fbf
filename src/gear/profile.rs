//! **Involute Spur Gear Outlines**
//!
//! Builds the closed polygon of a full spur gear from one sampled half-tooth.
//!
//! ## **Construction**
//!
//! 1. **Flank sampling**: the involute of the base circle `rb` is sampled at
//!    evenly spaced radii from `rm = max(rb, rr)` out to the tip radius:
//!    ```text
//!    φ(r) = sqrt((r/rb)² − 1)
//!    P(r) = rb·(cos φ + φ·sin φ,  −(sin φ − φ·cos φ))
//!    ```
//! 2. **Alignment**: all samples are rotated by `inv(φ(rp)) + π/(2z)` so the
//!    flank crosses the pitch circle at half the tooth thickness, leaving the
//!    tooth centred on the +x axis.
//! 3. **Root smoothing** (optional): up to three points on the root circle
//!    run from the flank foot to the middle of the gap.
//! 4. **Mirroring**: the half-tooth and its reflection across the tooth axis
//!    form one tooth-plus-gap period.
//! 5. **Replication**: the period is rotated by `i·2π/z` for every tooth.
//!
//! Coordinates are rounded to a fixed number of decimals after every
//! rotation, purely to keep the emitted outline compact. Root points closer
//! than two and a half output steps are pruned, and a gear whose teeth still fold
//! under rounding is rejected rather than emitted.
//!
//! When the two flanks of a tooth meet before the tip circle, sampling stops
//! at the meeting radius and the tooth ends in a single point on its axis.

use crate::errors::GeometryError;
use crate::float_types::{OUTPUT_DECIMALS, Real, round_to};
use crate::gear::GearSpec;
use crate::gear::involute::{flank_angle, flank_closure_radius, involute_point};
use crate::sketch::{Outline, mirror_point, rotate_points, round_point};
use crate::traits::Transform2D;
use log::{debug, trace, warn};
use nalgebra::{Matrix3, Point2};

/// Points in the root smoothing curve, gap-centre point included.
pub const ROOT_SMOOTHING_POINTS: usize = 3;

/// Sampling and output settings for [`InvoluteProfiler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileOptions {
    /// Involute samples per flank, tip included.
    pub samples_per_flank: usize,
    /// Add a short root-circle curve between neighbouring teeth.
    pub root_smoothing: bool,
    /// Decimals kept in emitted coordinates.
    pub decimals: u32,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            samples_per_flank: 6,
            root_smoothing: false,
            decimals: OUTPUT_DECIMALS,
        }
    }
}

impl ProfileOptions {
    pub const fn with_root_smoothing(mut self, root_smoothing: bool) -> Self {
        self.root_smoothing = root_smoothing;
        self
    }

    pub const fn with_samples_per_flank(mut self, samples_per_flank: usize) -> Self {
        self.samples_per_flank = samples_per_flank;
        self
    }

    fn validate(&self) -> Result<(), GeometryError> {
        if self.samples_per_flank < 2 {
            return Err(GeometryError::invalid(
                "samples_per_flank",
                self.samples_per_flank as Real,
                "a flank needs at least its start and end point",
            ));
        }
        if self.decimals > 9 {
            return Err(GeometryError::invalid(
                "decimals",
                self.decimals as Real,
                "at most 9 decimals are kept",
            ));
        }
        Ok(())
    }
}

/// One half-tooth, ordered from the root side out to the tip.
///
/// Lives in the tooth frame: the tooth is centred on the +x axis and these
/// points trace its +y flank. With root smoothing the sequence starts at the
/// middle of the gap, unless that gap is too narrow to show at the output
/// precision.
#[derive(Clone, Debug, PartialEq)]
pub struct ToothOutline {
    points: Vec<Point2<Real>>,
    gap_center: bool,
    pointed_tip: bool,
}

impl ToothOutline {
    #[inline]
    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the first point is the gap centre shared with the next tooth.
    #[inline]
    pub const fn has_gap_center(&self) -> bool {
        self.gap_center
    }

    /// Whether the last point lies on the tooth axis, shared with the mirror.
    #[inline]
    pub const fn has_pointed_tip(&self) -> bool {
        self.pointed_tip
    }

    /// Points shared between mirrored halves or neighbouring periods.
    #[inline]
    pub fn shared_per_tooth(&self) -> usize {
        usize::from(self.gap_center) + usize::from(self.pointed_tip)
    }

    /// Vertices each tooth contributes to the full gear polygon.
    #[inline]
    pub fn period_len(&self) -> usize {
        2 * self.points.len() - self.shared_per_tooth()
    }

    /// Mirror into one tooth-plus-gap period running counter-clockwise:
    /// the −y flank from root to tip, then the +y flank back down.
    ///
    /// Shared points appear once; the trailing gap centre is left to the
    /// next period.
    pub fn into_period(self) -> Vec<Point2<Real>> {
        let mut period: Vec<Point2<Real>> = Vec::with_capacity(2 * self.points.len());
        period.extend(self.points.iter().copied().map(mirror_point));
        let skip = usize::from(self.pointed_tip);
        period.extend(self.points.iter().rev().skip(skip).copied());
        if self.gap_center {
            period.pop();
        }
        period
    }
}

/// Closed outline of a whole spur gear plus what the solid backend needs to
/// extrude it and cut the center hole.
#[derive(Clone, Debug, PartialEq)]
pub struct GearPolygon {
    outline: Outline,
    teeth: usize,
    thickness: Real,
    hole_diameter: Real,
}

impl GearPolygon {
    #[inline]
    pub const fn outline(&self) -> &Outline {
        &self.outline
    }

    #[inline]
    pub fn into_outline(self) -> Outline {
        self.outline
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<Real>] {
        self.outline.vertices()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    #[inline]
    pub const fn teeth(&self) -> usize {
        self.teeth
    }

    /// Extrusion thickness.
    #[inline]
    pub const fn thickness(&self) -> Real {
        self.thickness
    }

    /// Diameter of the centered hole the backend subtracts; 0 for none.
    #[inline]
    pub const fn hole_diameter(&self) -> Real {
        self.hole_diameter
    }

    /// Vertex count of a gear whose half-tooth has `half_len` points, of
    /// which `shared_per_tooth` are shared with a neighbour.
    #[inline]
    pub const fn expected_vertex_count(teeth: usize, half_len: usize, shared_per_tooth: usize) -> usize {
        teeth * (2 * half_len - shared_per_tooth)
    }
}

impl Transform2D for GearPolygon {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self {
        Self {
            outline: self.outline.transform(matrix),
            ..self.clone()
        }
    }
}

/// Turns a [`GearSpec`] into its [`GearPolygon`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InvoluteProfiler {
    options: ProfileOptions,
}

impl InvoluteProfiler {
    pub fn new(options: ProfileOptions) -> Result<Self, GeometryError> {
        options.validate()?;
        Ok(Self { options })
    }

    #[inline]
    pub const fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Sample, align and optionally root-smooth one half-tooth.
    pub fn half_tooth(&self, spec: &GearSpec) -> ToothOutline {
        let decimals = self.options.decimals;
        let n = self.options.samples_per_flank;
        let radii = spec.radii();
        let (rb, rm, rt) = (radii.base, radii.involute_start(), radii.tip);
        let alignment = spec.flank_alignment();

        let closure = flank_closure_radius(rb, alignment, rm, rt);
        let r_end = closure.unwrap_or(rt);
        let step = (r_end - rm) / (n - 1) as Real;
        let samples: Vec<Point2<Real>> = (0..n)
            .map(|j| involute_point(rb, rm + j as Real * step))
            .collect();
        let mut points = rotate_points(&samples, alignment, decimals);

        let mut pointed_tip = closure.is_some();
        if let Some(tip) = points.last_mut() {
            if pointed_tip || tip.y <= 0.0 {
                *tip = Point2::new(round_to(tip.coords.norm(), decimals), 0.0);
                pointed_tip = true;
            }
        }
        trace!(
            "half-tooth for {} teeth: {} flank samples from r={rm:.4} to r={r_end:.4}, pointed={pointed_tip}",
            spec.teeth(),
            n
        );

        let mut gap_center = false;
        if self.options.root_smoothing {
            let mut curve = self.root_curve(spec, points[0]);
            gap_center = !curve.is_empty();
            curve.reverse();
            curve.extend(points);
            points = curve;
        }

        ToothOutline {
            points,
            gap_center,
            pointed_tip,
        }
    }

    /// Root-circle points from the flank foot to the gap centre.
    ///
    /// Every kept point is more than two and a half output steps from its
    /// neighbours, so none of them merge once a tooth is turned and rounded
    /// again. Grid distances are `√k` steps and never tie with that bound.
    /// The foot is also dropped when it lands on or behind the flank (root
    /// circle at or above the involute start). An empty curve means the gap
    /// is too narrow to hold even its centre.
    fn root_curve(&self, spec: &GearSpec, flank_start: Point2<Real>) -> Vec<Point2<Real>> {
        let decimals = self.options.decimals;
        let radii = spec.radii();
        let rr = radii.root;
        let theta0 = flank_angle(radii.base, spec.flank_alignment(), radii.involute_start());
        let gap = spec.root_gap_half_angle();
        let quantum = (10.0 as Real).powi(-(decimals as i32));
        let spacing = 2.5 * quantum;

        let on_root = |angle: Real| round_point(Point2::new(rr * angle.cos(), rr * angle.sin()), decimals);
        let center = on_root(spec.tooth_angle());
        if (center - flank_start).norm() <= spacing {
            trace!("{}-tooth root gap is below the output precision, left unsmoothed", spec.teeth());
            return Vec::new();
        }

        let mut curve = Vec::with_capacity(ROOT_SMOOTHING_POINTS);
        let foot = on_root(theta0);
        let mid = on_root(theta0 + gap / 2.0);
        let clear = |p: Point2<Real>, prev: Point2<Real>| {
            (p - prev).norm() > spacing && (center - p).norm() > spacing
        };
        if foot.x < curve_max_x(&[flank_start, foot]) - quantum && clear(foot, flank_start) {
            curve.push(foot);
        }
        if clear(mid, curve.last().copied().unwrap_or(flank_start)) {
            curve.push(mid);
        }
        curve.push(center);
        curve
    }

    /// Full gear polygon in the gear's own frame (tooth 0 on the +x axis).
    ///
    /// # Errors
    /// See [`Self::build_rotated`].
    pub fn build_gear_polygon(&self, spec: &GearSpec) -> Result<GearPolygon, GeometryError> {
        self.build_rotated(spec, 0.0)
    }

    /// Full gear polygon with tooth 0 turned to `mesh_angle` radians.
    ///
    /// # Errors
    /// [`GeometryError::InvalidParameter`] on `module` when the teeth are too
    /// small for the output decimals: vertices merge or edges cross once
    /// rounded.
    pub fn build_rotated(&self, spec: &GearSpec, mesh_angle: Real) -> Result<GearPolygon, GeometryError> {
        let decimals = self.options.decimals;
        let tooth = self.half_tooth(spec);
        let capacity = GearPolygon::expected_vertex_count(spec.teeth(), tooth.len(), tooth.shared_per_tooth());
        let period_len = tooth.period_len();
        let period = tooth.into_period();
        let pitch_angle = spec.tooth_pitch_angle();

        let mut vertices = Vec::with_capacity(capacity);
        for i in 0..spec.teeth() {
            vertices.extend(rotate_points(&period, mesh_angle + i as Real * pitch_angle, decimals));
        }
        let outline = Outline::new(vertices);
        if !outline.is_simple_periodic(period_len) {
            warn!(
                "gear z={} m={} pa={}°: outline folds at {decimals} decimals",
                spec.teeth(),
                spec.module(),
                spec.pressure_angle_deg()
            );
            return Err(GeometryError::invalid(
                "module",
                spec.module(),
                "tooth features collapse at the output precision",
            ));
        }
        debug!(
            "gear z={} m={} pa={}°: pitch Ø{:.3} base Ø{:.3} root Ø{:.3} tip Ø{:.3}, {} vertices",
            spec.teeth(),
            spec.module(),
            spec.pressure_angle_deg(),
            spec.pitch_diameter(),
            spec.base_diameter(),
            spec.root_diameter(),
            spec.tip_diameter(),
            outline.len()
        );

        Ok(GearPolygon {
            outline,
            teeth: spec.teeth(),
            thickness: spec.thickness(),
            hole_diameter: spec.hole_diameter(),
        })
    }
}

fn curve_max_x(points: &[Point2<Real>]) -> Real {
    points.iter().map(|p| p.x).fold(Real::MIN, Real::max)
}

/// Outline of a `teeth`-tooth spur gear with default sampling and a 4 mm
/// thickness.
///
/// # Errors
/// [`GeometryError::InvalidParameter`] for any parameter outside its domain,
/// see [`GearSpec::new`], or for teeth too small to survive rounding, see
/// [`InvoluteProfiler::build_rotated`].
pub fn build_gear_polygon(
    teeth: usize,
    module: Real,
    pressure_angle_deg: Real,
    hole_diameter: Real,
) -> Result<GearPolygon, GeometryError> {
    let spec = GearSpec::new(
        teeth,
        module,
        pressure_angle_deg,
        GearSpec::default().thickness(),
        hole_diameter,
    )?;
    InvoluteProfiler::default().build_gear_polygon(&spec)
}
