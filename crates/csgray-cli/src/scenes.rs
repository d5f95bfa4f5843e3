//! Built-in demo scenes.

use csgray::{
    Color, Cuboid, LightSource, RenderSettings, Scene, SetIntersection, SetUnion, Solid, Sphere,
    Torus, ValueError, Vec3, REFRACTION_GLASS,
};

type BuildFn = fn() -> Result<Scene, ValueError>;

/// A named scene with the settings it is meant to be rendered at.
pub struct SceneEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: BuildFn,
    settings: fn() -> RenderSettings,
}

impl SceneEntry {
    pub fn build(&self) -> Result<Scene, ValueError> {
        (self.build)()
    }

    pub fn default_settings(&self) -> RenderSettings {
        (self.settings)()
    }
}

pub const SCENES: &[SceneEntry] = &[
    SceneEntry {
        name: "cube1",
        description: "Matte cube tipped back, turned left",
        build: || cube(50.0, -115.0, 22.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "cube2",
        description: "Matte cube tipped back, turned right",
        build: || cube(50.0, -115.0, -22.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "cube3",
        description: "Close-up cube, top face toward the camera",
        build: || cube(20.0, -90.0, 22.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "cube4",
        description: "Distant cube turned past a quarter turn",
        build: || cube(55.0, -115.0, 122.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "cube5",
        description: "Close-up cube tipped forward",
        build: || cube(20.0, 21.0, 22.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "cube6",
        description: "Far cube, shallow tilt",
        build: || cube(65.0, -35.0, 122.0),
        settings: cube_settings,
    },
    SceneEntry {
        name: "block",
        description: "Concrete block: a cuboid with two through-holes",
        build: block,
        settings: || RenderSettings::new(300, 300, 3.0, 2),
    },
    SceneEntry {
        name: "glass",
        description: "Glass torus in front of a glossy sphere on a floor",
        build: glass,
        settings: || RenderSettings::new(400, 300, 2.0, 2),
    },
];

/// Look up a scene by name.
pub fn find(name: &str) -> Option<&'static SceneEntry> {
    SCENES.iter().find(|entry| entry.name == name)
}

fn cube_settings() -> RenderSettings {
    RenderSettings::new(300, 300, 3.0, 2)
}

fn key_light() -> Result<LightSource, ValueError> {
    LightSource::new(Vec3::new(-5.0, 50.0, 20.0), Color::new(0.7, 0.7, 0.7))
}

/// A 4x4x4 matte cube `distance` units in front of the camera, rotated
/// about x and then y.
fn cube(distance: f64, rotate_x: f64, rotate_y: f64) -> Result<Scene, ValueError> {
    let mut scene = Scene::new();
    let cube = scene.add_solid(Cuboid::solid(2.0, 2.0, 2.0)?);
    cube.set_full_matte(Color::new(0.7, 0.7, 0.8))?;
    cube.move_to(0.0, 0.0, -distance);
    cube.rotate_x(rotate_x);
    cube.rotate_y(rotate_y);
    scene.add_light(key_light()?);
    Ok(scene)
}

fn block() -> Result<Scene, ValueError> {
    let concrete = Color::new(0.6, 0.6, 0.58);
    let mut body = Cuboid::solid(8.0, 16.0, 8.0)?;
    body.set_full_matte(concrete)?;

    let hole = |y: f64| -> Result<Box<dyn Solid>, ValueError> {
        let mut cavity = Cuboid::solid(6.0, 6.5, 8.01)?;
        cavity.set_full_matte(concrete)?;
        cavity.move_to(0.0, y, 0.0);
        Ok(Box::new(cavity))
    };
    let holes = SetUnion::new(Vec3::zeros(), hole(7.5)?, hole(-7.5)?);

    let mut block = SetIntersection::difference(Vec3::zeros(), Box::new(body), Box::new(holes));
    block.move_to(0.0, 0.0, -120.0);
    block.rotate_x(-65.0);
    block.rotate_y(25.0);

    let mut scene = Scene::new();
    scene.add_solid(block);
    scene.add_light(key_light()?);
    scene.add_light(LightSource::new(
        Vec3::new(40.0, 10.0, 30.0),
        Color::new(0.3, 0.3, 0.35),
    )?);
    Ok(scene)
}

fn glass() -> Result<Scene, ValueError> {
    let mut scene = Scene::new();
    scene.set_background(Color::new(0.05, 0.05, 0.1))?;

    let floor = scene.add_solid(Cuboid::solid(30.0, 0.5, 30.0)?);
    floor.set_matte_gloss_balance(0.2, Color::new(0.5, 0.6, 0.5), Color::WHITE)?;
    floor.move_to(0.0, -5.0, -40.0);

    let ball = scene.add_solid(Sphere::solid(2.5)?);
    ball.set_matte_gloss_balance(0.6, Color::new(0.8, 0.2, 0.1), Color::WHITE)?;
    ball.move_to(3.0, -2.0, -38.0);

    let ring = scene.add_solid(Torus::solid(3.0, 1.0)?);
    ring.set_matte_gloss_balance(0.0, Color::new(0.9, 0.95, 1.0), Color::BLACK)?;
    ring.set_opacity(0.1)?;
    ring.set_refraction(REFRACTION_GLASS)?;
    ring.move_to(-1.0, 0.0, -28.0);
    ring.rotate_x(-55.0);
    ring.rotate_y(20.0);

    scene.add_light(LightSource::new(Vec3::new(-10.0, 30.0, 10.0), Color::WHITE)?);
    scene.add_light(LightSource::new(
        Vec3::new(20.0, 5.0, -10.0),
        Color::new(0.4, 0.4, 0.5),
    )?);
    Ok(scene)
}
