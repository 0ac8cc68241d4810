use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::{
    input::ControlEvent,
    sim::{Integrator, ParamUpdate, Scenario, SimError, Simulation, SimulationParams},
    visual::session::SimulationSession,
};

/// System: Apply keyboard commands to the kernel
pub fn handle_controls(
    mut controls: MessageReader<ControlEvent>,
    mut session: ResMut<SimulationSession>,
) {
    for control in controls.read() {
        if let Err(err) = apply_control(session.simulation_mut(), *control) {
            warn!("{:?} rejected: {}", control, err);
        }
    }
}

/// Map one command onto the kernel API. Rejected edits leave the
/// simulation untouched.
pub fn apply_control(simulation: &mut Simulation, control: ControlEvent) -> Result<(), SimError> {
    let params = *simulation.params();

    match control {
        ControlEvent::SelectScenario(number) => {
            if let Some(scenario) = Scenario::from_number(number) {
                simulation.load_scenario(scenario)?;
            }
        }
        ControlEvent::ResizeRows(delta) => {
            let (rows, cols) = simulation.layout().dimensions().ok_or(SimError::NotAGrid)?;
            simulation.resize_grid(rows.saturating_add_signed(delta), cols)?;
        }
        ControlEvent::ResizeCols(delta) => {
            let (rows, cols) = simulation.layout().dimensions().ok_or(SimError::NotAGrid)?;
            simulation.resize_grid(rows, cols.saturating_add_signed(delta))?;
        }
        ControlEvent::ScaleStiffness(factor) => {
            simulation.update_param(ParamUpdate::ScaleStiffness(factor))?;
        }
        ControlEvent::ScaleDamping(factor) => {
            simulation.update_param(ParamUpdate::ScaleDamping(factor))?;
        }
        ControlEvent::ScaleMass(factor) => {
            simulation.update_param(ParamUpdate::Mass(params.mass * factor))?;
        }
        ControlEvent::AdjustRestLength(delta) => {
            simulation.update_param(ParamUpdate::RestLength(params.rest_length + delta))?;
        }
        ControlEvent::CycleIntegrator => {
            simulation.set_integrator(simulation.integrator().next());
        }
        ControlEvent::ToggleRunning => {
            simulation.toggle_running();
            info!("Simulation {:?}", simulation.state());
        }
        ControlEvent::Reset => simulation.reset()?,
        ControlEvent::DumpSnapshot => match simulation.snapshot().to_json() {
            Ok(json) => info!("{}", json),
            Err(err) => warn!("Snapshot not serializable: {}", err),
        },
    }
    Ok(())
}

/// One-line summary of the live parameters
pub fn status_line(simulation: &Simulation) -> String {
    let params: &SimulationParams = simulation.params();
    let integrator: Integrator = simulation.integrator();
    let grid = match simulation.layout().dimensions() {
        Some((rows, cols)) => format!("{}x{}", rows, cols),
        None => format!("{} masses", simulation.topology().particles().len()),
    };
    let state = if simulation.is_running() { "running" } else { "stopped" };

    format!(
        "Spring Mesh | {} | {} | k {:.2}/{:.2} b {:.2}/{:.2} m {:.2} L {:.0} | {}",
        grid,
        integrator,
        params.structural_stiffness,
        params.shear_stiffness,
        params.structural_damping,
        params.shear_damping,
        params.mass,
        params.rest_length,
        state,
    )
}

/// System: Mirror the parameters in the window title
pub fn update_window_title(
    session: Res<SimulationSession>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let title = status_line(session.simulation());
    if window.title != title {
        window.title = title;
    }
}
