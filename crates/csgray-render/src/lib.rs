#![warn(missing_docs)]

//! Recursive ray tracing of CSG scenes.
//!
//! A [`Scene`] owns solids and point lights. Rendering casts one ray per
//! supersample from a pinhole camera at the origin, shades the closest
//! surface with matte, reflected and refracted light, and stores the linear
//! result in an [`ImageBuffer`] that converts to normalized 8-bit RGBA.
//!
//! # Architecture
//!
//! - [`Scene`] - solids, lights, background, ambient medium; render entry point
//! - [`RenderSettings`] - image size, zoom, anti-aliasing and recursion limits
//! - [`Ray`] / [`TraceContext`] - per-ray state carried through the recursion
//! - [`ImageBuffer`] - supersampled colors, ambiguity healing, RGBA conversion
//! - [`LightSource`] - point lights
//!
//! # Example
//!
//! ```ignore
//! use csgray_render::{LightSource, Scene};
//! use csgray_solid::{Cuboid, Solid};
//!
//! let mut scene = Scene::new();
//! scene.add_solid(Cuboid::solid(2.0, 2.0, 2.0)?).move_to(0.0, 0.0, -20.0);
//! scene.add_light(LightSource::new(Vec3::new(-5.0, 50.0, 20.0), Color::WHITE)?);
//! let rgba = scene.render(300, 300, 3.0, 2)?.to_rgba8()?;
//! ```

mod buffer;
mod error;
mod light;
mod scene;
mod settings;
mod trace;

pub use buffer::{ImageBuffer, PixelData};
pub use error::{RenderError, Result};
pub use light::LightSource;
pub use scene::Scene;
pub use settings::RenderSettings;
pub use trace::{polarized_reflection, Ray, TraceContext, SMALL_SHIFT};
