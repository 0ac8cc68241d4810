//! Mass-spring-damper kernel: particle store, spring topology, force pass,
//! integrators and the per-frame driver. Free of ECS types so it can be
//! stepped synchronously from tests.

mod bounds;
mod config;
mod driver;
mod error;
mod forces;
mod integrator;
mod interaction;
mod params;
mod particle;
mod scenario;
mod snapshot;
mod spring;
mod topology;

pub use bounds::Bounds;
pub use config::{ConfigError, SimConfig};
pub use driver::Simulation;
pub use error::SimError;
pub use integrator::Integrator;
pub use params::{ParamUpdate, SimulationParams};
pub use particle::ParticleId;
pub use scenario::Scenario;
pub use snapshot::SimulationSnapshot;
pub use spring::SpringKind;
