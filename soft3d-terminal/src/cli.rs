/// Command line arguments and demo scene assembly
use clap::Parser;
use nalgebra::Vector3;
use soft3d_core::{axes, obj, Color, Config, Mesh, Object, Scene};
use std::path::PathBuf;

use crate::AppError;

/// Offset applied to the world axes so their origin does not sit on an
/// exact half-extent pixel when the camera looks straight at it
const WORLD_AXES_NUDGE: f32 = 1e-3;
const WORLD_AXES_SCALE: f32 = 2.0;

#[derive(Parser, Debug, Default, PartialEq)]
#[command(
    name = "soft3d",
    about = "Software 3D renderer for the terminal",
    long_about = "Projects an OBJ mesh (or a unit cube) and its axes onto the terminal. \
                  Move with W/S, A/D, Q/E, look with the arrow keys, quit with Esc."
)]
pub struct Args {
    /// Wavefront OBJ mesh to display; a unit cube when omitted
    #[arg(value_name = "MESH")]
    pub mesh: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn load_config(&self) -> Result<Config, AppError> {
        match &self.config {
            Some(path) => Ok(Config::load(path)?),
            None => Ok(Config::default()),
        }
    }

    /// The OBJ file if one was given, the unit cube otherwise
    pub fn load_mesh(&self) -> Result<Mesh, AppError> {
        match &self.mesh {
            Some(path) => Ok(obj::load_obj(path)?),
            None => Ok(Mesh::cube()),
        }
    }
}

/// The mesh with vertex markers and its own spinning axes, plus static world axes
pub fn build_scene(config: &Config, mesh: Mesh) -> Result<Scene, AppError> {
    let mut scene = Scene::from_config(config);

    let object = Object::new(mesh, Color::ORANGE)?
        .named("mesh")
        .with_vertex_markers(true)
        .with_spin(config.spin_rate);
    scene.add(object);

    let mut world = axes().named("world axes");
    world.scale(WORLD_AXES_SCALE);
    world.translate(&Vector3::repeat(WORLD_AXES_NUDGE));
    scene.add(world);

    scene.add(axes().named("local axes").with_spin(config.spin_rate));

    Ok(scene)
}
