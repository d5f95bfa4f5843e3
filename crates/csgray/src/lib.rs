#![warn(missing_docs)]

//! csgray: a constructive solid geometry ray tracer.
//!
//! Re-exports the public surface of the workspace crates so a scene can be
//! built and rendered from a single dependency.
//!
//! # Example
//!
//! ```
//! use csgray::{Color, Cuboid, LightSource, Scene, Solid, Vec3};
//!
//! let mut scene = Scene::new();
//! let cube = scene.add_solid(Cuboid::solid(2.0, 2.0, 2.0).unwrap());
//! cube.set_full_matte(Color::new(0.7, 0.7, 0.8)).unwrap();
//! cube.move_to(0.0, 0.0, -20.0);
//! cube.rotate_x(21.0);
//! cube.rotate_y(22.0);
//! scene.add_light(LightSource::new(Vec3::new(-5.0, 50.0, 20.0), Color::new(0.7, 0.7, 0.7)).unwrap());
//!
//! let rgba = scene.render(16, 16, 3.0, 1).unwrap().to_rgba8().unwrap();
//! assert_eq!(rgba.len(), 16 * 16 * 4);
//! ```

pub use csgray_algebra;
pub use csgray_math;
pub use csgray_render;
pub use csgray_solid;

pub use csgray_algebra::{
    filter_real_numbers, solve_linear_equations, solve_real_cubic, solve_real_quadratic,
    solve_real_quartic, SolverError,
};
pub use csgray_math::{
    Axis, Color, Mat3, ValueError, Vec3, EPSILON, REFRACTION_GLASS, REFRACTION_VACUUM,
};
pub use csgray_render::{
    ImageBuffer, LightSource, PixelData, Ray, RenderError, RenderSettings, Scene,
};
pub use csgray_solid::{
    Appearance, Cuboid, Cylinder, Intersection, Optics, Primitive, SetComplement,
    SetIntersection, SetUnion, Solid, SolidError, Sphere, Torus,
};
