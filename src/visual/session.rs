// visual/session.rs

use crate::sim::{Simulation, SimulationSnapshot};
use bevy::prelude::Resource;

/// The running kernel, owned by the ECS world
#[derive(Debug, Clone, Resource)]
pub struct SimulationSession {
    simulation: Simulation,
}

impl SimulationSession {
    pub fn new(simulation: Simulation) -> Self {
        SimulationSession { simulation }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }
}

/// Last state handed to the redraw, drawn every frame even while stopped
#[derive(Debug, Clone, Resource)]
pub struct FrameSnapshot {
    pub snapshot: SimulationSnapshot,
}

impl FrameSnapshot {
    pub fn capture(session: &SimulationSession) -> Self {
        FrameSnapshot {
            snapshot: session.simulation().snapshot(),
        }
    }
}

/// Config problems found before logging was up, reported at startup
#[derive(Debug, Clone, Default, Resource)]
pub struct StartupWarnings(pub Vec<String>);
