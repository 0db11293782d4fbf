//! Spur gear parameters and the outlines derived from them.
//!
//! A gear is described by a [`GearSpec`]; [`profile::InvoluteProfiler`] turns it
//! into a closed [`profile::GearPolygon`], and [`planetary::GearMeshAligner`]
//! lays out a sun gear with meshing planets.

pub mod involute;
pub mod planetary;
pub mod profile;

pub use planetary::{
    GearMeshAligner, GearRole, MeshedGear, PlanetLayout, PlanetarySpec, build_assembly,
};
pub use profile::{GearPolygon, InvoluteProfiler, ProfileOptions, ToothOutline, build_gear_polygon};

use crate::errors::{GeometryError, ensure_finite};
use crate::float_types::{INCH, PI, Real, TAU};

/// Smallest tooth count that still yields a non-degenerate polygon.
pub const MIN_TEETH: usize = 3;

/// Addendum as a multiple of the module (ISO 53 basic rack).
pub const ADDENDUM_COEFFICIENT: Real = 1.0;
/// Dedendum as a multiple of the module (ISO 53 basic rack).
pub const DEDENDUM_COEFFICIENT: Real = 1.25;

/// The four reference radii of a spur gear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GearRadii {
    pub pitch: Real,
    pub base: Real,
    pub root: Real,
    pub tip: Real,
}

impl GearRadii {
    /// Standard full-depth proportions: addendum `m`, dedendum `1.25·m`.
    pub fn standard(teeth: usize, module: Real, pressure_angle: Real) -> Self {
        Self::with_proportions(
            teeth,
            module,
            pressure_angle,
            ADDENDUM_COEFFICIENT,
            DEDENDUM_COEFFICIENT,
        )
    }

    /// Radii for arbitrary addendum/dedendum coefficients.
    ///
    /// Profile shifting would enter here as `addendum + x`, `dedendum − x`.
    pub fn with_proportions(
        teeth: usize,
        module: Real,
        pressure_angle: Real,
        addendum: Real,
        dedendum: Real,
    ) -> Self {
        let pitch_diameter = module * teeth as Real;
        let pitch = pitch_diameter / 2.0;
        Self {
            pitch,
            base: pitch * pressure_angle.cos(),
            root: pitch - dedendum * module,
            tip: pitch + addendum * module,
        }
    }

    /// Innermost radius at which the involute is sampled; the involute is
    /// undefined inside the base circle.
    #[inline]
    pub fn involute_start(&self) -> Real {
        self.base.max(self.root)
    }

    #[inline]
    pub fn addendum(&self) -> Real {
        self.tip - self.pitch
    }

    #[inline]
    pub fn dedendum(&self) -> Real {
        self.pitch - self.root
    }
}

/// Immutable parameter bundle for one spur gear.
///
/// Built only through [`GearSpec::new`], so every instance satisfies its
/// domain invariants and its derived radii are computed once.
#[derive(Clone, Debug, PartialEq)]
pub struct GearSpec {
    teeth: usize,
    module: Real,
    pressure_angle_deg: Real,
    thickness: Real,
    hole_diameter: Real,
    radii: GearRadii,
}

impl Default for GearSpec {
    fn default() -> Self {
        // quarter-inch shaft
        Self::from_parts(20, 3.0, 28.0, 4.0, 0.25 * INCH)
    }
}

impl GearSpec {
    /// Assemble without validation; callers guarantee the domain.
    pub(crate) fn from_parts(
        teeth: usize,
        module: Real,
        pressure_angle_deg: Real,
        thickness: Real,
        hole_diameter: Real,
    ) -> Self {
        Self {
            teeth,
            module,
            pressure_angle_deg,
            thickness,
            hole_diameter,
            radii: GearRadii::standard(teeth, module, pressure_angle_deg.to_radians()),
        }
    }

    /// Validate and build a gear description.
    ///
    /// # Errors
    /// [`GeometryError::InvalidParameter`] when `teeth < 3`, `module ≤ 0`, the
    /// pressure angle is outside `(0°, 90°)`, `thickness ≤ 0`, the hole is
    /// negative or does not fit inside the root circle, or adjacent flanks
    /// would overlap at the root.
    pub fn new(
        teeth: usize,
        module: Real,
        pressure_angle_deg: Real,
        thickness: Real,
        hole_diameter: Real,
    ) -> Result<Self, GeometryError> {
        if teeth < MIN_TEETH {
            return Err(GeometryError::invalid(
                "teeth",
                teeth as Real,
                "a gear needs at least 3 teeth",
            ));
        }
        if ensure_finite("module", module)? <= 0.0 {
            return Err(GeometryError::invalid("module", module, "must be positive"));
        }
        let pressure_angle = ensure_finite("pressure_angle_deg", pressure_angle_deg)?.to_radians();
        let cos_pa = pressure_angle.cos();
        if pressure_angle_deg <= 0.0 || pressure_angle_deg >= 90.0 || cos_pa <= 0.0 || cos_pa >= 1.0 {
            return Err(GeometryError::invalid(
                "pressure_angle_deg",
                pressure_angle_deg,
                "must lie strictly between 0 and 90 degrees",
            ));
        }
        if ensure_finite("thickness", thickness)? <= 0.0 {
            return Err(GeometryError::invalid("thickness", thickness, "must be positive"));
        }

        let radii = GearRadii::standard(teeth, module, pressure_angle);
        if ensure_finite("hole_diameter", hole_diameter)? < 0.0 {
            return Err(GeometryError::invalid(
                "hole_diameter",
                hole_diameter,
                "must not be negative",
            ));
        }
        if hole_diameter >= 2.0 * radii.root {
            return Err(GeometryError::invalid(
                "hole_diameter",
                hole_diameter,
                "must be smaller than the root diameter",
            ));
        }

        let spec = Self::from_parts(teeth, module, pressure_angle_deg, thickness, hole_diameter);
        if spec.root_gap_half_angle() <= 0.0 {
            return Err(GeometryError::invalid(
                "pressure_angle_deg",
                pressure_angle_deg,
                "adjacent tooth flanks overlap at the root for this tooth count",
            ));
        }
        Ok(spec)
    }

    /// Same gear with a different center hole.
    pub fn with_hole_diameter(&self, hole_diameter: Real) -> Result<Self, GeometryError> {
        Self::new(
            self.teeth,
            self.module,
            self.pressure_angle_deg,
            self.thickness,
            hole_diameter,
        )
    }

    /// Same gear with a different extrusion thickness.
    pub fn with_thickness(&self, thickness: Real) -> Result<Self, GeometryError> {
        Self::new(
            self.teeth,
            self.module,
            self.pressure_angle_deg,
            thickness,
            self.hole_diameter,
        )
    }

    #[inline]
    pub const fn teeth(&self) -> usize {
        self.teeth
    }

    #[inline]
    pub const fn module(&self) -> Real {
        self.module
    }

    #[inline]
    pub const fn pressure_angle_deg(&self) -> Real {
        self.pressure_angle_deg
    }

    /// Pressure angle in radians.
    #[inline]
    pub fn pressure_angle(&self) -> Real {
        self.pressure_angle_deg.to_radians()
    }

    #[inline]
    pub const fn thickness(&self) -> Real {
        self.thickness
    }

    #[inline]
    pub const fn hole_diameter(&self) -> Real {
        self.hole_diameter
    }

    #[inline]
    pub const fn radii(&self) -> &GearRadii {
        &self.radii
    }

    #[inline]
    pub fn pitch_diameter(&self) -> Real {
        2.0 * self.radii.pitch
    }

    #[inline]
    pub fn base_diameter(&self) -> Real {
        2.0 * self.radii.base
    }

    #[inline]
    pub fn root_diameter(&self) -> Real {
        2.0 * self.radii.root
    }

    #[inline]
    pub fn tip_diameter(&self) -> Real {
        2.0 * self.radii.tip
    }

    /// Angle subtended by one tooth plus one gap.
    #[inline]
    pub fn tooth_pitch_angle(&self) -> Real {
        TAU / self.teeth as Real
    }

    /// Angle subtended by one tooth (or one gap) at the pitch circle.
    #[inline]
    pub fn tooth_angle(&self) -> Real {
        PI / self.teeth as Real
    }

    /// Rotation that puts the flank's pitch-circle crossing at half the tooth
    /// angle, so the tooth is centred on the +x axis.
    pub fn flank_alignment(&self) -> Real {
        let p = involute::involute_point(self.radii.base, self.radii.pitch);
        (-p.y).atan2(p.x) + self.tooth_angle() / 2.0
    }

    /// Half the angular width of the gap between two teeth, measured at the
    /// involute start radius.
    pub fn root_gap_half_angle(&self) -> Real {
        let theta0 = involute::flank_angle(
            self.radii.base,
            self.flank_alignment(),
            self.radii.involute_start(),
        );
        self.tooth_angle() - theta0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_diameters_follow_module() {
        let g = GearSpec::new(20, 3.0, 28.0, 4.0, 6.35).unwrap();
        assert_eq!(g.pitch_diameter(), 60.0);
        assert_eq!(g.tip_diameter(), 66.0);
        assert_eq!(g.root_diameter(), 52.5);
        assert!((g.base_diameter() - 60.0 * (28.0 as Real).to_radians().cos()).abs() < 1e-9);
        assert_eq!(g.radii().addendum(), 3.0);
        assert_eq!(g.radii().dedendum(), 3.75);
    }

    #[test]
    fn default_matches_reference_gear() {
        let d = GearSpec::default();
        let n = GearSpec::new(20, 3.0, 28.0, 4.0, 6.35).unwrap();
        assert_eq!(d, n);
    }

    #[test]
    fn involute_start_is_base_or_root() {
        let small = GearSpec::new(12, 2.0, 20.0, 3.0, 0.0).unwrap();
        assert_eq!(small.radii().involute_start(), small.radii().base);
        let large = GearSpec::new(60, 2.0, 20.0, 3.0, 0.0).unwrap();
        assert_eq!(large.radii().involute_start(), large.radii().root);
        for g in [small, large] {
            let r = g.radii();
            assert!(r.root <= r.involute_start());
            assert!(r.involute_start() < r.tip);
        }
    }

    #[test]
    fn rejects_out_of_domain_parameters() {
        assert!(GearSpec::new(2, 3.0, 20.0, 4.0, 0.0).is_err());
        assert!(GearSpec::new(20, 0.0, 20.0, 4.0, 0.0).is_err());
        assert!(GearSpec::new(20, -1.0, 20.0, 4.0, 0.0).is_err());
        assert!(GearSpec::new(20, 3.0, 0.0, 4.0, 0.0).is_err());
        assert!(GearSpec::new(20, 3.0, 90.0, 4.0, 0.0).is_err());
        assert!(GearSpec::new(20, 3.0, 20.0, 0.0, 0.0).is_err());
        assert!(GearSpec::new(20, 3.0, 20.0, 4.0, -1.0).is_err());
        assert!(GearSpec::new(20, 3.0, 20.0, 4.0, 52.5).is_err());
        assert!(GearSpec::new(20, Real::NAN, 20.0, 4.0, 0.0).is_err());
    }

    #[test]
    fn rejects_flanks_overlapping_at_root() {
        let err = GearSpec::new(20, 3.0, 40.0, 4.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidParameter { name: "pressure_angle_deg", .. }
        ));
    }
}
