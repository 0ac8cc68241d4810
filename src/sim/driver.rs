use super::bounds::Bounds;
use super::error::SimError;
use super::forces::accumulate_forces;
use super::integrator::{Integrator, euler_step, half_kick, stormer_verlet_step, velocity_verlet_step};
use super::interaction::DragController;
use super::params::{ParamUpdate, SimulationParams};
use super::particle::{Particle, ParticleId};
use super::scenario::Scenario;
use super::snapshot::SimulationSnapshot;
use super::spring::SpringKind;
use super::topology::{Layout, Topology};

use bevy::math::Vec2;
use log::{info, warn};

/// Whether the host frame loop should be stepping the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
}

/// The whole kernel: parameters, particle store, springs and the scheme
/// used to advance them. All mutation goes through `&mut self`, so a tick
/// always sees a complete topology.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimulationParams,
    layout: Layout,
    topology: Topology,
    integrator: Integrator,
    /// Walls, honoured by Störmer-Verlet only
    bounds: Option<Bounds>,
    drag: DragController,
    state: DriverState,
    ticks: u64,
    /// Pre-tick particles, reused across ticks by the divergence guard
    checkpoint: Vec<Particle>,
}

impl Simulation {
    pub fn new(layout: Layout, params: SimulationParams, integrator: Integrator) -> Result<Self, SimError> {
        params.validate()?;
        let topology = Topology::build(&layout, params.rest_length)?;

        Ok(Simulation {
            params,
            layout,
            topology,
            integrator,
            bounds: None,
            drag: DragController::default(),
            state: DriverState::Stopped,
            ticks: 0,
            checkpoint: Vec::new(),
        })
    }

    pub fn from_scenario(scenario: Scenario) -> Result<Self, SimError> {
        let mut simulation = Self::new(scenario.layout(), scenario.params(), scenario.integrator())?;
        simulation.set_bounds(scenario.bounds())?;
        Ok(simulation)
    }

    // === Query Methods ===

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn integrator(&self) -> Integrator {
        self.integrator
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn dragged(&self) -> Option<ParticleId> {
        self.drag.grabbed()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(self.ticks, &self.topology)
    }

    // === Configuration ===

    /// Apply one live parameter edit. Rejected edits keep the previous value.
    pub fn update_param(&mut self, update: ParamUpdate) -> Result<(), SimError> {
        let params = self.params.with_update(update).inspect_err(|err| {
            warn!("rejected parameter update {:?}: {}", update, err);
        })?;

        if update.requires_rebuild() {
            self.rebuild(self.layout.clone(), params)
        } else {
            self.params = params;
            Ok(())
        }
    }

    /// Replace every parameter at once, rebuilding if the rest length changed
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), SimError> {
        params.validate()?;

        if params.rest_length != self.params.rest_length {
            self.rebuild(self.layout.clone(), params)
        } else {
            self.params = params;
            Ok(())
        }
    }

    /// Change grid dimensions. Only valid for grid layouts.
    pub fn resize_grid(&mut self, rows: usize, cols: usize) -> Result<(), SimError> {
        let layout = self.layout.resized(rows, cols)?;
        self.rebuild(layout, self.params)
    }

    /// Put every particle back where the layout places it
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.rebuild(self.layout.clone(), self.params)
    }

    /// Swap in a preset. The running state carries over.
    pub fn load_scenario(&mut self, scenario: Scenario) -> Result<(), SimError> {
        let state = self.state;
        *self = Self::from_scenario(scenario)?;
        self.state = state;
        info!("loaded scenario: {}", scenario);
        Ok(())
    }

    /// Switch scheme between ticks. Position history is resynced so a
    /// history-based scheme does not start with a phantom velocity.
    pub fn set_integrator(&mut self, integrator: Integrator) {
        if integrator.derives_velocity() {
            for particle in self.topology.particles_mut() {
                particle.sync_history();
            }
        }
        self.integrator = integrator;
        info!("integrator: {}", integrator);
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) -> Result<(), SimError> {
        if let Some(bounds) = &bounds {
            bounds.validate()?;
        }
        self.bounds = bounds;
        Ok(())
    }

    /// Build the new topology first and swap it in only on success.
    /// Topology changes reset motion.
    fn rebuild(&mut self, layout: Layout, params: SimulationParams) -> Result<(), SimError> {
        let topology = Topology::build(&layout, params.rest_length).inspect_err(|err| {
            warn!("rejected topology rebuild: {}", err);
        })?;

        self.topology = topology;
        self.layout = layout;
        self.params = params;
        self.drag.release();

        info!(
            "topology rebuilt: {} particles, {} structural and {} shear springs",
            self.topology.particles().len(),
            self.topology.count(SpringKind::Structural),
            self.topology.count(SpringKind::Shear)
        );
        Ok(())
    }

    // === Interaction ===

    pub fn begin_drag(&mut self, id: ParticleId) -> Result<(), SimError> {
        self.drag.begin(self.topology.particles_mut(), id)
    }

    pub fn drag_to(&mut self, id: ParticleId, target: Vec2) -> Result<(), SimError> {
        self.drag.update(self.topology.particles_mut(), id, target)
    }

    pub fn end_drag(&mut self) {
        self.drag.end(self.topology.particles_mut());
    }

    // === Frame Driver ===

    pub fn start(&mut self) {
        self.state = DriverState::Running;
    }

    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    pub fn toggle_running(&mut self) {
        match self.state {
            DriverState::Running => self.stop(),
            DriverState::Stopped => self.start(),
        }
    }

    /// One force pass followed by one integration pass.
    ///
    /// If the step produces a non-finite particle (e.g. an unstable time
    /// step), the pre-step particles are restored and brought to rest.
    pub fn step(&mut self) {
        self.checkpoint.clear();
        self.checkpoint.extend_from_slice(self.topology.particles());
        let h = self.params.time_step;

        accumulate_forces(&mut self.topology, &self.params);

        match self.integrator {
            Integrator::Euler => euler_step(self.topology.particles_mut(), h),
            Integrator::VelocityVerlet => velocity_verlet_step(self.topology.particles_mut(), h),
            Integrator::VelocityVerletFull => {
                velocity_verlet_step(self.topology.particles_mut(), h);
                accumulate_forces(&mut self.topology, &self.params);
                half_kick(self.topology.particles_mut(), h);
            }
            Integrator::StormerVerlet => {
                stormer_verlet_step(self.topology.particles_mut(), h, self.bounds.as_ref())
            }
        }

        if !self.topology.is_finite() {
            warn!("tick {} diverged, restoring previous state", self.ticks);
            self.topology.restore_particles(&self.checkpoint);
            for particle in self.topology.particles_mut() {
                particle.settle();
            }
        }

        self.ticks += 1;
    }

    /// Step once and report the new state
    pub fn tick(&mut self) -> SimulationSnapshot {
        self.step();
        self.snapshot()
    }

    /// Host entry point, called once per animation frame. Ticks and redraws
    /// only while running; returns whether a tick happened.
    pub fn advance_frame<F>(&mut self, redraw: F) -> bool
    where
        F: FnOnce(&SimulationSnapshot),
    {
        if !self.is_running() {
            return false;
        }

        let snapshot = self.tick();
        redraw(&snapshot);
        true
    }
}
