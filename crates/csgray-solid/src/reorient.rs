//! Reorientable primitives.
//!
//! A primitive is described by a [`Shape`] in its own object coordinates,
//! where it sits at the origin aligned with the axes. A [`Frame`] maps camera
//! coordinates into object coordinates and back, so rotating or moving a
//! primitive only updates its frame.

use csgray_math::{Axis, Mat3, Vec3};

use crate::error::Result;
use crate::intersection::{Intersection, IntersectionList};
use crate::optics::Appearance;
use crate::solid::{contains_by_parity, Solid};

/// Rigid placement of object coordinates in camera coordinates.
///
/// The rows of `to_object` are the object's unit axes expressed in camera
/// coordinates; `to_camera` is kept equal to its transpose.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    center: Vec3,
    to_object: Mat3,
    to_camera: Mat3,
}

impl Frame {
    /// Identity orientation centered at `center`.
    pub fn new(center: Vec3) -> Self {
        Self {
            center,
            to_object: Mat3::identity(),
            to_camera: Mat3::identity(),
        }
    }

    /// Origin of object coordinates, in camera coordinates.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Matrix taking camera directions to object directions.
    pub fn to_object(&self) -> &Mat3 {
        &self.to_object
    }

    /// Rotate the object axes by `rotation` (camera coordinates), keeping
    /// the center fixed.
    pub fn rotate(&mut self, rotation: &Mat3) {
        self.to_object *= rotation.transpose();
        self.to_camera = self.to_object.transpose();
    }

    /// Move the center by `offset`.
    pub fn translate(&mut self, offset: &Vec3) {
        self.center += offset;
    }

    /// Camera-space point to object-space point.
    pub fn object_point(&self, camera_point: &Vec3) -> Vec3 {
        self.to_object * (camera_point - self.center)
    }

    /// Camera-space direction to object-space direction.
    pub fn object_dir(&self, camera_dir: &Vec3) -> Vec3 {
        self.to_object * camera_dir
    }

    /// Object-space point to camera-space point.
    pub fn camera_point(&self, object_point: &Vec3) -> Vec3 {
        self.center + self.to_camera * object_point
    }

    /// Object-space direction to camera-space direction.
    pub fn camera_dir(&self, object_dir: &Vec3) -> Vec3 {
        self.to_camera * object_dir
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

/// A ray crossing of a shape, in object coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Squared distance from the vantage point.
    pub distance_squared: f64,
    /// Location on the surface.
    pub point: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
    /// Name of the surface region.
    pub tag: &'static str,
    /// Region index.
    pub context: Option<usize>,
}

/// Geometry of a primitive in its own object coordinates.
pub trait Shape: Send + Sync {
    /// Diagnostic name of the shape.
    const TAG: &'static str;

    /// Push every crossing of `vantage + u * direction` (`u > EPSILON`).
    fn intersect(&self, vantage: &Vec3, direction: &Vec3, hits: &mut Vec<SurfaceHit>);

    /// Analytic containment of an object-space point, when the shape has a
    /// closed form for it. `None` falls back to parity counting.
    fn contains(&self, _point: &Vec3) -> Option<bool> {
        None
    }
}

/// A [`Shape`] placed in the scene through a [`Frame`].
#[derive(Debug, Clone)]
pub struct Primitive<S> {
    shape: S,
    frame: Frame,
    appearance: Appearance,
}

impl<S: Shape> Primitive<S> {
    /// Place `shape` at the origin with identity orientation and default
    /// appearance.
    pub fn new(shape: S) -> Self {
        Self {
            shape,
            frame: Frame::default(),
            appearance: Appearance::default(),
        }
    }

    /// Underlying shape.
    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// Current placement.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl<S: Shape> Solid for Primitive<S> {
    fn tag(&self) -> &str {
        S::TAG
    }

    fn center(&self) -> Vec3 {
        self.frame.center()
    }

    fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn appearance_mut(&mut self) -> &mut Appearance {
        &mut self.appearance
    }

    fn append_all_intersections<'a>(
        &'a self,
        vantage: &Vec3,
        direction: &Vec3,
        list: &mut IntersectionList<'a>,
    ) -> Result<()> {
        let mut hits = Vec::new();
        self.shape.intersect(
            &self.frame.object_point(vantage),
            &self.frame.object_dir(direction),
            &mut hits,
        );
        list.extend(hits.into_iter().map(|hit| Intersection {
            distance_squared: hit.distance_squared,
            point: self.frame.camera_point(&hit.point),
            surface_normal: self.frame.camera_dir(&hit.normal),
            solid: self,
            tag: hit.tag,
            context: hit.context,
        }));
        Ok(())
    }

    fn contains(&self, point: &Vec3) -> Result<bool> {
        match self.shape.contains(&self.frame.object_point(point)) {
            Some(inside) => Ok(inside),
            None => contains_by_parity(self, point),
        }
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.frame.rotate(&axis.rotation(degrees));
    }

    fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.frame.translate(&Vec3::new(dx, dy, dz));
    }
}
