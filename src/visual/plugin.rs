use crate::sim::Simulation;
use crate::visual::controls::{handle_controls, update_window_title};
use crate::visual::interactions::{DragState, handle_pointer_drag};
use crate::visual::render::{BACKGROUND_COLOR, draw_snapshot, step_simulation};
use crate::visual::session::{FrameSnapshot, SimulationSession, StartupWarnings};
use bevy::prelude::*;

pub struct SimulationPlugin {
    simulation: Simulation,
    warnings: Vec<String>,
}

impl SimulationPlugin {
    pub fn new(simulation: Simulation) -> Self {
        SimulationPlugin {
            simulation,
            warnings: Vec::new(),
        }
    }

    /// Messages to log once logging is up
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let session = SimulationSession::new(self.simulation.clone());
        let frame = FrameSnapshot::capture(&session);

        app.insert_resource(session)
            .insert_resource(frame)
            .insert_resource(StartupWarnings(self.warnings.clone()))
            .insert_resource(ClearColor(BACKGROUND_COLOR))
            .init_resource::<DragState>()
            .add_systems(Startup, report_startup)
            .add_systems(
                Update,
                (
                    // Input
                    handle_pointer_drag,
                    handle_controls,
                    // Frame driver
                    step_simulation,
                    // Redraw
                    draw_snapshot,
                    update_window_title,
                )
                    .chain(),
            );
    }
}

fn report_startup(warnings: Res<StartupWarnings>, session: Res<SimulationSession>) {
    for warning in &warnings.0 {
        warn!("{}", warning);
    }

    let topology = session.simulation().topology();
    info!(
        "Simulation ready: {} particles, {} springs, {}",
        topology.particles().len(),
        topology.springs().len(),
        session.simulation().integrator()
    );
}
