use bevy::prelude::*;

mod camera;
mod input;
mod sim;
mod visual;

use bevy::window::WindowResolution;
use camera::{CameraPlugin, ViewCamera};
use input::InputPlugin;
use sim::{ConfigError, SimConfig, Simulation};

use crate::visual::plugin::SimulationPlugin;

fn main() -> AppExit {
    let mut warnings = Vec::new();
    let mut simulation = match load_simulation(std::env::args().nth(1), &mut warnings) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("spring_mesh: {}", err);
            return AppExit::error();
        }
    };
    simulation.start();

    let view = simulation.bounds().copied().unwrap_or_default();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Spring Mesh".into(),
            resolution: WindowResolution::new(view.width as u32, view.height as u32),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ViewCamera { view })
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(SimulationPlugin::new(simulation).with_warnings(warnings));

    app.run()
}

/// Config from the path given on the command line, else the embedded one
fn load_simulation(path: Option<String>, warnings: &mut Vec<String>) -> Result<Simulation, ConfigError> {
    if let Some(path) = path {
        match SimConfig::load(&path).and_then(|config| config.build()) {
            Ok(simulation) => return Ok(simulation),
            Err(err) => warnings.push(format!("{}: {}, using built-in config", path, err)),
        }
    }

    SimConfig::embedded()?.build()
}
