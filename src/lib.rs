//! Parametric **2D outlines** for mechanical parts, computed from a handful
//! of design numbers and handed to a solid-modeling backend for extrusion.
//!
//! - [`gear::InvoluteProfiler`]: closed involute spur-gear polygons, with
//!   optional root-gap smoothing.
//! - [`gear::GearMeshAligner`]: a sun gear with evenly spaced planets, each
//!   turned so its teeth interleave with the sun's.
//! - [`arm::TangentArcSolver`] and [`arm::OvalArm`]: "oval arm" links whose
//!   ends are circles tangent to two bounding arcs.
//!
//! Every builder is a pure function of its inputs. Parameters are checked up
//! front and rejected with a [`GeometryError`] instead of producing NaN
//! geometry.
//!
//! ```
//! use gearsketch::gear::build_gear_polygon;
//!
//! let gear = build_gear_polygon(20, 3.0, 28.0, 6.35).unwrap();
//! assert_eq!(gear.teeth(), 20);
//! assert!(gear.outline().is_ccw());
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build planet outlines concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod arm;
pub mod errors;
pub mod float_types;
pub mod gear;
pub mod sketch;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use arm::{ArmOutline, ArmParams, OvalArm, Tangency, TangentArcSolver, TangentSolution};
pub use errors::{ArmSide, GeometryError};
pub use gear::{GearMeshAligner, GearPolygon, GearSpec, InvoluteProfiler, PlanetarySpec};
pub use sketch::Outline;
pub use traits::Transform2D;
