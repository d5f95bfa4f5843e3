#![warn(missing_docs)]

//! Solid object model for the csgray ray tracer.
//!
//! Solids are closed regions of space that report every point where a ray
//! crosses their surface and whether a point lies inside them. Primitive
//! shapes are defined in their own coordinates and placed through a
//! reorientable frame; set combinators build composite solids out of boxed
//! operands.
//!
//! # Architecture
//!
//! - [`Solid`]: the trait every renderable object implements
//! - [`Intersection`]: one ray/surface crossing, borrowing its solid
//! - [`Optics`] / [`Appearance`]: matte, gloss, opacity and refraction
//! - [`Primitive`] + [`Shape`]: reorientable primitives ([`Cuboid`],
//!   [`Sphere`], [`Cylinder`], [`Torus`])
//! - [`SetUnion`], [`SetIntersection`], [`SetComplement`]: set combinators

mod csg;
mod error;
mod intersection;
mod optics;
mod reorient;
mod shape;
mod solid;

pub use csg::{SetComplement, SetIntersection, SetUnion};
pub use error::{Result, SolidError};
pub use intersection::{
    pick_closest_intersection, ClosestIntersection, Intersection, IntersectionList,
};
pub use optics::{Appearance, Optics};
pub use reorient::{Frame, Primitive, Shape, SurfaceHit};
pub use shape::{Cuboid, Cylinder, Sphere, Torus};
pub use solid::{contains_by_parity, Solid};
