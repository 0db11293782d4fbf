//! Sun-and-planets layout.
//!
//! Planets sit evenly around the sun at the sum of the two pitch radii. Each
//! planet is turned so that one of its teeth points into the sun gap nearest
//! its line of centers, which keeps the teeth interleaved at first contact.

use crate::errors::GeometryError;
use crate::float_types::{PI, Real, TAU, normalize_angle};
use crate::gear::GearSpec;
use crate::gear::profile::{GearPolygon, InvoluteProfiler};
use crate::sketch::Outline;
use crate::traits::Transform2D;
use log::{debug, warn};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A sun gear, `planet_count` identical planets and their shared module.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetarySpec {
    sun: GearSpec,
    planet: GearSpec,
    planet_count: usize,
}

impl Default for PlanetarySpec {
    fn default() -> Self {
        Self {
            sun: GearSpec::from_parts(13, 2.3, 20.0, 2.5, 3.1),
            planet: GearSpec::from_parts(7, 2.3, 20.0, 2.5, 3.1),
            planet_count: 5,
        }
    }
}

impl PlanetarySpec {
    /// Sun and planets sharing module, pressure angle, thickness and hole.
    ///
    /// # Errors
    /// [`GeometryError::InvalidParameter`] for an out-of-domain gear parameter
    /// or `planet_count == 0`.
    pub fn new(
        sun_teeth: usize,
        planet_teeth: usize,
        planet_count: usize,
        module: Real,
        pressure_angle_deg: Real,
        thickness: Real,
        hole_diameter: Real,
    ) -> Result<Self, GeometryError> {
        let sun = GearSpec::new(sun_teeth, module, pressure_angle_deg, thickness, hole_diameter)?;
        let planet = GearSpec::new(planet_teeth, module, pressure_angle_deg, thickness, hole_diameter)?;
        Self::from_gears(sun, planet, planet_count)
    }

    /// Pair two already validated gears.
    ///
    /// # Errors
    /// [`GeometryError::ModuleMismatch`] when the modules differ, since such
    /// gears cannot mesh; [`GeometryError::InvalidParameter`] for
    /// `planet_count == 0`.
    pub fn from_gears(sun: GearSpec, planet: GearSpec, planet_count: usize) -> Result<Self, GeometryError> {
        if planet_count == 0 {
            return Err(GeometryError::invalid(
                "planet_count",
                0.0,
                "an assembly needs at least one planet",
            ));
        }
        if sun.module() != planet.module() {
            return Err(GeometryError::ModuleMismatch {
                sun: sun.module(),
                planet: planet.module(),
            });
        }
        Ok(Self { sun, planet, planet_count })
    }

    #[inline]
    pub const fn sun(&self) -> &GearSpec {
        &self.sun
    }

    #[inline]
    pub const fn planet(&self) -> &GearSpec {
        &self.planet
    }

    #[inline]
    pub const fn planet_count(&self) -> usize {
        self.planet_count
    }

    #[inline]
    pub const fn module(&self) -> Real {
        self.sun.module()
    }

    /// Distance between sun and planet centers: the pitch circles touch.
    #[inline]
    pub fn center_distance(&self) -> Real {
        self.sun.radii().pitch + self.planet.radii().pitch
    }
}

/// Polar angle of the line from the sun to planet `k` of `planet_count`.
#[inline]
pub fn line_of_centers_angle(k: usize, planet_count: usize) -> Real {
    TAU * (k % planet_count) as Real / planet_count as Real
}

/// Rotation of planet `k` so one of its teeth faces the sun gap nearest its
/// line of centers. Always in `[0, 2π)`.
///
/// The number of whole sun tooth pitches before the line of centers is
/// `⌊k·z_sun / n⌋`, computed in integers.
pub fn mesh_angle(k: usize, planet_count: usize, sun_teeth: usize) -> Real {
    let sun_pitch = TAU / sun_teeth as Real;
    let k_teeth = (k % planet_count) * sun_teeth / planet_count;
    let target = k_teeth as Real * sun_pitch + sun_pitch / 2.0;
    normalize_angle(target + PI)
}

/// Where each planet goes and how it is turned, in planet order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetLayout {
    mesh_angles: Vec<Real>,
    line_of_centers: Vec<Real>,
    centers: Vec<Point2<Real>>,
    center_distance: Real,
}

impl PlanetLayout {
    pub fn new(spec: &PlanetarySpec) -> Self {
        let n = spec.planet_count();
        let center_distance = spec.center_distance();
        let line_of_centers: Vec<Real> = (0..n).map(|k| line_of_centers_angle(k, n)).collect();
        let mesh_angles: Vec<Real> = (0..n).map(|k| mesh_angle(k, n, spec.sun().teeth())).collect();
        let centers = line_of_centers
            .iter()
            .map(|angle| Point2::new(center_distance * angle.cos(), center_distance * angle.sin()))
            .collect();

        Self {
            mesh_angles,
            line_of_centers,
            centers,
            center_distance,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mesh_angles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh_angles.is_empty()
    }

    #[inline]
    pub fn mesh_angles(&self) -> &[Real] {
        &self.mesh_angles
    }

    #[inline]
    pub fn line_of_centers(&self) -> &[Real] {
        &self.line_of_centers
    }

    #[inline]
    pub fn centers(&self) -> &[Point2<Real>] {
        &self.centers
    }

    #[inline]
    pub const fn center_distance(&self) -> Real {
        self.center_distance
    }

    /// Center-to-center distance of neighbouring planets; `None` for a
    /// single planet.
    pub fn planet_spacing(&self) -> Option<Real> {
        let n = self.len();
        (n > 1).then(|| 2.0 * self.center_distance * (PI / n as Real).sin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GearRole {
    Sun,
    /// Planet index `k`, counter-clockwise from the +x axis.
    Planet(usize),
}

/// One gear of an assembly: its outline in its own frame (already turned by
/// its mesh angle) and where the backend has to put it.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshedGear {
    role: GearRole,
    polygon: GearPolygon,
    center: Point2<Real>,
    mesh_angle: Real,
    line_of_centers: Real,
}

impl MeshedGear {
    #[inline]
    pub const fn role(&self) -> GearRole {
        self.role
    }

    #[inline]
    pub const fn polygon(&self) -> &GearPolygon {
        &self.polygon
    }

    #[inline]
    pub fn into_polygon(self) -> GearPolygon {
        self.polygon
    }

    #[inline]
    pub const fn center(&self) -> Point2<Real> {
        self.center
    }

    /// Translation from the sun center to this gear's center.
    #[inline]
    pub fn offset(&self) -> Vector2<Real> {
        self.center.coords
    }

    #[inline]
    pub const fn mesh_angle(&self) -> Real {
        self.mesh_angle
    }

    #[inline]
    pub const fn line_of_centers(&self) -> Real {
        self.line_of_centers
    }

    /// The outline moved to its place in the assembly.
    pub fn placed_outline(&self) -> Outline {
        self.polygon.outline().translate_vector(self.offset())
    }
}

/// Builds sun-and-planet assemblies with one [`InvoluteProfiler`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GearMeshAligner {
    profiler: InvoluteProfiler,
}

impl GearMeshAligner {
    pub const fn new(profiler: InvoluteProfiler) -> Self {
        Self { profiler }
    }

    #[inline]
    pub const fn profiler(&self) -> &InvoluteProfiler {
        &self.profiler
    }

    /// Mesh angles and centers of every planet.
    pub fn layout(&self, spec: &PlanetarySpec) -> PlanetLayout {
        let layout = PlanetLayout::new(spec);
        debug!(
            "planetary z_sun={} z_planet={} n={}: center distance {:.3}, mesh angles {:?}",
            spec.sun().teeth(),
            spec.planet().teeth(),
            spec.planet_count(),
            layout.center_distance(),
            layout.mesh_angles()
        );
        if let Some(spacing) = layout.planet_spacing() {
            if spacing < spec.planet().tip_diameter() {
                warn!(
                    "{} planets of tip diameter {:.3} overlap: neighbouring centers are only {:.3} apart",
                    spec.planet_count(),
                    spec.planet().tip_diameter(),
                    spacing
                );
            }
        }
        layout
    }

    /// Sun first, then planets in increasing `k`.
    ///
    /// # Errors
    /// Whatever [`InvoluteProfiler::build_rotated`] reports for the sun or
    /// planet outline.
    pub fn build_assembly(&self, spec: &PlanetarySpec) -> Result<Vec<MeshedGear>, GeometryError> {
        let layout = self.layout(spec);
        let mut gears = Vec::with_capacity(layout.len() + 1);
        gears.push(MeshedGear {
            role: GearRole::Sun,
            polygon: self.profiler.build_gear_polygon(spec.sun())?,
            center: Point2::origin(),
            mesh_angle: 0.0,
            line_of_centers: 0.0,
        });

        let planets = self.planet_polygons(spec.planet(), layout.mesh_angles())?;
        for (k, polygon) in planets.into_iter().enumerate() {
            let center = layout.centers()[k];
            debug!(
                "planet {k}: mesh angle {:.4}, center ({:.3}, {:.3})",
                layout.mesh_angles()[k],
                center.x,
                center.y
            );
            gears.push(MeshedGear {
                role: GearRole::Planet(k),
                polygon,
                center,
                mesh_angle: layout.mesh_angles()[k],
                line_of_centers: layout.line_of_centers()[k],
            });
        }
        Ok(gears)
    }

    /// Assemble from two separately specified gears.
    ///
    /// # Errors
    /// See [`PlanetarySpec::from_gears`] and [`Self::build_assembly`].
    pub fn build_from_specs(
        &self,
        sun: &GearSpec,
        planet: &GearSpec,
        planet_count: usize,
    ) -> Result<Vec<MeshedGear>, GeometryError> {
        let spec = PlanetarySpec::from_gears(sun.clone(), planet.clone(), planet_count)?;
        self.build_assembly(&spec)
    }

    #[cfg(not(feature = "parallel"))]
    fn planet_polygons(
        &self,
        planet: &GearSpec,
        mesh_angles: &[Real],
    ) -> Result<Vec<GearPolygon>, GeometryError> {
        mesh_angles
            .iter()
            .map(|&angle| self.profiler.build_rotated(planet, angle))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn planet_polygons(
        &self,
        planet: &GearSpec,
        mesh_angles: &[Real],
    ) -> Result<Vec<GearPolygon>, GeometryError> {
        mesh_angles
            .par_iter()
            .map(|&angle| self.profiler.build_rotated(planet, angle))
            .collect()
    }
}

/// Sun plus `planet_count` planets at a 20° pressure angle with default
/// sampling.
///
/// # Errors
/// [`GeometryError::InvalidParameter`] for any out-of-domain value,
/// including a module too small to resolve at the output precision.
pub fn build_assembly(
    sun_teeth: usize,
    planet_teeth: usize,
    planet_count: usize,
    module: Real,
    hole_diameter: Real,
    thickness: Real,
) -> Result<Vec<MeshedGear>, GeometryError> {
    let spec = PlanetarySpec::new(
        sun_teeth,
        planet_teeth,
        planet_count,
        module,
        PlanetarySpec::default().sun().pressure_angle_deg(),
        thickness,
        hole_diameter,
    )?;
    GearMeshAligner::default().build_assembly(&spec)
}
